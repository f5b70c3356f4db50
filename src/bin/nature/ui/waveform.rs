//! Oscilloscope of the left output channel
//!
//! Nature textures are mostly noise, so a plain sample plot turns into a
//! solid smear. The scope instead draws the min/max envelope of each column
//! and marks the window's peak level.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use super::status::AudioStats;

const CLIP_LEVEL: f32 = 0.99;

/// Min/max of each of `columns` equal slices of `buffer`, as chart points.
fn envelope_points(buffer: &[f32], columns: usize) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let columns = columns.clamp(1, buffer.len().max(1));
    let mut upper = Vec::with_capacity(columns);
    let mut lower = Vec::with_capacity(columns);

    for col in 0..columns {
        let start = col * buffer.len() / columns;
        let end = ((col + 1) * buffer.len() / columns).max(start + 1).min(buffer.len());
        let slice = buffer.get(start..end).unwrap_or(&[]);

        let (lo, hi) = slice
            .iter()
            .fold((0.0f32, 0.0f32), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        let x = col as f64 / columns as f64;
        upper.push((x, hi.clamp(-1.0, 1.0) as f64));
        lower.push((x, lo.clamp(-1.0, 1.0) as f64));
    }

    (upper, lower)
}

fn to_dbfs(level: f32) -> f32 {
    20.0 * level.max(1.0e-6).log10()
}

pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32], stats: &AudioStats) {
    let title = if stats.peak > 0.0 {
        format!(" Output  peak {:.1} dBFS ", to_dbfs(stats.peak))
    } else {
        " Output ".to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    // Braille packs two dots per cell horizontally
    let columns = (area.width.saturating_sub(2) as usize * 2).max(1);
    let (upper, lower) = envelope_points(audio_buffer, columns);

    let peak = stats.peak.min(1.0) as f64;
    let peak_high = [(0.0, peak), (1.0, peak)];
    let peak_low = [(0.0, -peak), (1.0, -peak)];

    let trace = if stats.peak >= CLIP_LEVEL {
        Color::Red
    } else {
        Color::Cyan
    };

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(trace))
            .data(&upper),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(trace))
            .data(&lower),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&peak_high),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&peak_low),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(Axis::default().bounds([0.0, 1.0]))
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .labels(["-1", "0", "1"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_tracks_extremes_per_column() {
        let buffer = [0.1, -0.4, 0.9, 0.2, -0.7, 0.3, 0.0, 0.5];
        let (upper, lower) = envelope_points(&buffer, 2);

        assert_eq!(upper.len(), 2);
        assert!((upper[0].1 - 0.9).abs() < 1e-6);
        assert!((lower[0].1 + 0.4).abs() < 1e-6);
        assert!((upper[1].1 - 0.5).abs() < 1e-6);
        assert!((lower[1].1 + 0.7).abs() < 1e-6);
    }

    #[test]
    fn more_columns_than_samples_is_capped() {
        let (upper, lower) = envelope_points(&[0.5, -0.5], 100);
        assert_eq!(upper.len(), 2);
        assert_eq!(lower.len(), 2);
    }

    #[test]
    fn empty_buffer_draws_a_flat_line() {
        let (upper, lower) = envelope_points(&[], 8);
        assert_eq!(upper, vec![(0.0, 0.0)]);
        assert_eq!(lower, vec![(0.0, 0.0)]);
    }

    #[test]
    fn full_scale_is_zero_dbfs() {
        assert!(to_dbfs(1.0).abs() < 1e-6);
        assert!((to_dbfs(0.5) + 6.02).abs() < 0.01);
    }
}
