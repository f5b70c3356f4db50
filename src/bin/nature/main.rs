//! nature - Terminal player for the nature sound engine
//!
//! Run with: cargo run -- [--verbose] [--preset <file>]

mod app;
mod keymap;
mod ui;

use std::fs::File;
use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};

use app::{Options, Player};

/// Directory under the user config dir holding the log and saved presets.
pub const APP_DIR: &str = "nature_dsp";

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

// The terminal belongs to the UI, so logs go to a file
fn init_logging(verbose: bool) -> EyreResult<PathBuf> {
    use simplelog::{Config, LevelFilter, WriteLogger};

    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("cannot create {}", dir.display()))?;
    let log_path = dir.join("nature.log");
    let log_file = File::create(&log_path)
        .wrap_err_with(|| format!("cannot create log file {}", log_path.display()))?;

    WriteLogger::init(log_level, Config::default(), log_file)
        .wrap_err("failed to initialize logger")?;

    log::info!("nature starting (log level: {:?})", log_level);
    Ok(log_path)
}

fn parse_args() -> EyreResult<Options> {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" | "-v" => options.verbose = true,
            "--preset" | "-p" => {
                let path = args
                    .next()
                    .ok_or_else(|| eyre!("--preset needs a file argument"))?;
                options.preset = Some(PathBuf::from(path));
            }
            other => return Err(eyre!("unknown argument '{other}'")),
        }
    }
    options.preset_dir = config_dir();
    Ok(options)
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let options = parse_args()?;
    init_logging(options.verbose)?;

    Player::new(options).run()
}
