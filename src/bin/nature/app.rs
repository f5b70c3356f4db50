//! Player - audio device setup and the UI run loop

use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info};

use nature_dsp::{patch::Preset, EngineConfig, NatureEngine, ParamId};

use super::ui::{UiApp, UiState};

/// Largest block the engine renders at once; longer device buffers are chunked.
const ENGINE_BLOCK_SIZE: usize = 1024;
/// Samples buffered between the audio thread and the oscilloscope.
const SCOPE_QUEUE_LEN: usize = 16_384;

#[derive(Debug, Default)]
pub struct Options {
    pub verbose: bool,
    /// Preset file applied before the first block.
    pub preset: Option<PathBuf>,
    /// Where `save` writes presets.
    pub preset_dir: PathBuf,
}

pub struct Player {
    options: Options,
}

impl Player {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Open the default output device and run until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f64;
        let channels = config.channels() as usize;
        info!("output device at {sample_rate} Hz, {channels} channels");

        let (mut engine, mut handle) = NatureEngine::with_event_queue(EngineConfig::default());
        engine
            .prepare(sample_rate, ENGINE_BLOCK_SIZE)
            .wrap_err("engine rejected the device configuration")?;

        let mut state = UiState::new(sample_rate as f32, self.options.preset_dir.clone());
        if let Some(path) = &self.options.preset {
            let text = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("cannot read preset {}", path.display()))?;
            let preset = engine
                .validate_preset(&text)
                .wrap_err_with(|| format!("invalid preset {}", path.display()))?;
            let params = preset.to_params();
            for id in ParamId::ALL {
                handle.set_parameter(id, params.get(id))?;
            }
            state.params = params;
            state.status = format!("loaded {}", path.display());
        }

        let (mut scope_tx, scope_rx) = rtrb::RingBuffer::<f32>::new(SCOPE_QUEUE_LEN);

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                engine.process_interleaved(data, channels);

                // Oscilloscope gets the left channel; drop samples when it lags
                for frame in data.chunks_exact(channels) {
                    if scope_tx.push(frame[0]).is_err() {
                        break;
                    }
                }
            },
            |err| error!("audio stream error: {err}"),
            None,
        )?;
        stream.play()?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(scope_rx, handle, state).run(&mut terminal);
        ratatui::restore();

        drop(stream);
        result
    }
}

/// Write the current parameters as a preset file, returning its path.
pub fn save_preset(dir: &std::path::Path, preset: &Preset) -> EyreResult<PathBuf> {
    std::fs::create_dir_all(dir).wrap_err_with(|| format!("cannot create {}", dir.display()))?;
    let path = dir.join("preset.json");
    std::fs::write(&path, preset.to_text())
        .wrap_err_with(|| format!("cannot write {}", path.display()))?;
    info!("saved preset to {}", path.display());
    Ok(path)
}
