//! Spectrum view
//!
//! Hann-windowed FFT of the oscilloscope buffer, folded into log-spaced
//! bands. Each band averages the power of the FFT bins it covers, and the
//! display falls back slowly so noise textures read as a stable shape.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

const BANDS: usize = 64;
const MIN_HZ: f64 = 40.0;
const MAX_HZ: f64 = 16_000.0;
const FLOOR_DB: f64 = -100.0;
/// dB lost per frame when the signal drops
const FALL_DB: f64 = 1.5;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin range [start, end) of each band
    band_bins: Vec<(usize, usize)>,
    /// (log10 Hz, dB) per band
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        let denom = fft_len.saturating_sub(1).max(1) as f32;
        let window = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let nyquist = (sample_rate as f64 / 2.0).max(1.0);
        let top = MAX_HZ.min(nyquist);
        let bottom = MIN_HZ.min(top);
        let hz_per_bin = sample_rate as f64 / fft_len.max(1) as f64;
        let half = (fft_len / 2).max(1);

        let edge = |band: usize| bottom * (top / bottom).powf(band as f64 / BANDS as f64);
        let mut band_bins = Vec::with_capacity(BANDS);
        let mut spectrum = Vec::with_capacity(BANDS);
        for band in 0..BANDS {
            let (lo, hi) = (edge(band), edge(band + 1));
            let start = ((lo / hz_per_bin).floor() as usize).min(half - 1);
            // Every band covers at least one bin, even where bins are wider than bands
            let end = ((hi / hz_per_bin).ceil() as usize).clamp(start + 1, half);
            band_bins.push((start, end));
            spectrum.push(((lo * hi).sqrt().log10(), FLOOR_DB));
        }

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            band_bins,
            spectrum,
        }
    }

    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (&(start, end), (_, db)) in self.band_bins.iter().zip(self.spectrum.iter_mut()) {
            let bins = &self.scratch[start..end];
            let power = bins.iter().map(|c| c.norm_sqr()).sum::<f32>() / bins.len() as f32;
            let level = (10.0 * (power.max(1e-12) as f64).log10()).max(FLOOR_DB);
            *db = level.max(*db - FALL_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default()
        .title(" Spectrum (40 Hz - 16 kHz) ")
        .borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let x_min = spectrum.first().map_or(MIN_HZ.log10(), |p| p.0);
    let x_max = spectrum.last().map_or(MAX_HZ.log10(), |p| p.0).max(x_min + 0.1);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([x_min, x_max])
                .labels(vec!["40", "400", "4k", "16k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 20.0])
                .labels(vec!["-100", "-40", "20"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
