//! Status bar, held sounds and parameter gauges

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use nature_dsp::{sounds::SoundFamily, GlobalParams, ParamId, MAX_VOICES};

use super::UiState;

pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

fn family_color(family: SoundFamily) -> Color {
    match family {
        SoundFamily::Water => Color::Blue,
        SoundFamily::Wind => Color::Gray,
        SoundFamily::Insect => Color::Yellow,
        SoundFamily::Bird => Color::LightCyan,
        SoundFamily::Amphibian => Color::Green,
        SoundFamily::Mammal => Color::LightRed,
    }
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    active_voices: usize,
    stats: &AudioStats,
) {
    let block = Block::default()
        .title(format!(" nature {} ", nature_dsp::VERSION))
        .borders(Borders::ALL);

    let family = state.family();
    let line = Line::from(vec![
        Span::styled(
            format!(" {}  ", family.name()),
            Style::default().fg(family_color(family)),
        ),
        Span::styled(
            format!("Voices {active_voices}/{MAX_VOICES}  "),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz  ", state.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}  ", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(state.status.as_str(), Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Variant keys of the current family, and everything still held.
pub fn render_sounds(frame: &mut Frame, area: Rect, state: &UiState) {
    let family = state.family();
    let color = family_color(family);

    let mut items: Vec<ListItem> = ['z', 'x', 'c', 'v', 'b', 'n']
        .iter()
        .enumerate()
        .map(|(variant, key)| {
            let note = state.note_for_variant(variant);
            let marker = if state.held[note as usize] { "●" } else { " " };
            let name = family.variant_name(variant);
            ListItem::new(format!(" {marker} [{key}] {name}")).style(Style::default().fg(color))
        })
        .collect();

    let others: Vec<String> = state
        .held_sounds()
        .filter(|(_, f, _)| *f != family)
        .map(|(_, f, name)| format!("{}/{}", f.name(), name))
        .collect();
    if !others.is_empty() {
        items.push(ListItem::new(format!(" also: {}", others.join(", "))));
    }

    let list = List::new(items).block(Block::default().title(" Sounds ").borders(Borders::ALL));
    frame.render_widget(list, area);
}

pub fn render_params(frame: &mut Frame, area: Rect, params: &GlobalParams) {
    let block = Block::default().title(" Parameters ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 4])
        .split(inner);

    for (row, id) in rows.iter().zip(ParamId::ALL) {
        let value = params.get(id);
        let gauge = Gauge::default()
            .ratio(value.clamp(0.0, 1.0) as f64)
            .label(format!("{} {:.2}", id.info().name, value))
            .gauge_style(Style::default().fg(Color::Cyan));
        frame.render_widget(gauge, *row);
    }
}
