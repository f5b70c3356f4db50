//! TUI for the nature player
//!
//! Shows what is playing, the global parameters, and a live view of the
//! output (oscilloscope and spectrum).

mod spectrum;
pub mod state;
mod status;
mod waveform;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, warn};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use nature_dsp::{patch::Preset, EngineHandle};

pub use state::UiState;

use crate::app::save_preset;
use crate::keymap::{action_for, Action};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_params, render_sounds, render_status, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

pub struct UiApp {
    /// Left-channel samples from the audio thread
    audio_rx: Consumer<f32>,
    handle: EngineHandle,
    state: UiState,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(audio_rx: Consumer<f32>, handle: EngineHandle, state: UiState) -> Self {
        let spectrum = SpectrumAnalyzer::new(VIS_BUFFER_SIZE, state.sample_rate);
        Self {
            audio_rx,
            handle,
            state,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = action_for(key.code) {
                            self.apply(action);
                        }
                    }
                }
            }
        }

        // Let the release tails go
        let _ = self.handle.panic();
        Ok(())
    }

    /// Keep the last VIS_BUFFER_SIZE samples
    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }
        if let Ok(chunk) = self.audio_rx.read_chunk(available) {
            self.audio_buffer.extend(chunk);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn apply(&mut self, action: Action) {
        let sent = match action {
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Action::SelectFamily(slot) => {
                self.state.family_slot = slot;
                self.state.status = format!("family: {}", self.state.family().name());
                Ok(())
            }
            Action::ToggleVariant(variant) => {
                let note = self.state.note_for_variant(variant);
                let held = &mut self.state.held[note as usize];
                *held = !*held;
                debug!("note {note} {}", if *held { "on" } else { "off" });
                if *held {
                    self.handle.note_on(note, 0.8)
                } else {
                    self.handle.note_off(note)
                }
            }
            Action::Nudge(param, delta) => {
                let value = self.state.params.get(param) + delta;
                self.state.params.set(param, value);
                self.handle.set_parameter(param, self.state.params.get(param))
            }
            Action::Panic => {
                self.state.held = [false; 128];
                self.state.status = "panic".to_string();
                self.handle.panic()
            }
            Action::SavePreset => {
                let preset = Preset::from_params(&self.state.params);
                self.state.status = match save_preset(&self.state.preset_dir, &preset) {
                    Ok(path) => format!("saved {}", path.display()),
                    Err(err) => {
                        warn!("{err:#}");
                        format!("save failed: {err}")
                    }
                };
                Ok(())
            }
        };

        if let Err(err) = sent {
            self.state.status = err.to_string();
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(6),    // Sounds + parameters
                Constraint::Length(8), // Waveform
                Constraint::Length(8), // Spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(
            frame,
            rows[0],
            &self.state,
            self.handle.active_voice_count(),
            &stats,
        );
        render_sounds(frame, middle[0], &self.state);
        render_params(frame, middle[1], &self.state.params);
        render_waveform(frame, rows[2], &self.audio_buffer, &stats);
        render_spectrum(frame, rows[3], self.spectrum.data());

        let help = Paragraph::new(
            " [1-6] Family  [zxcvbn] Toggle  [-=] Level  [[]] Mix  [;'] Room  [,.] Damp  [Space] Panic  [S] Save  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[4]);
    }
}
