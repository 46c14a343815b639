use std::path::PathBuf;

use clap::Parser;
use scimitar::TypingSession;
use tracing::info;

mod app;
mod config;
mod error;
mod logging;
mod page;
mod utils;

use config::{Config, TextDirection};
use error::AppError;

#[derive(Debug, Parser)]
#[command(name = "duotype", version, about = "A bidirectional typing test for your terminal")]
struct Cli {
    /// Directory holding `settings.toml`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Direction of the text at startup
    #[arg(short, long, value_enum)]
    direction: Option<TextDirection>,

    /// File holding the text to type
    #[arg(short, long)]
    text: Option<PathBuf>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut config = Config::get(cli.config)?;
    if let Some(direction) = cli.direction {
        config.settings.direction = direction;
    }
    if let Some(path) = cli.text {
        // Relative to the working directory, not the settings file
        let absolute = std::path::absolute(&path)
            .map_err(|source| AppError::ReadText { path, source })?;
        config.settings.text = Some(absolute);
    }

    if cli.dump_config {
        println!("{}", toml::to_string_pretty(&config.settings)?);
        return Ok(());
    }

    let _guard = logging::init(&config.settings.log, &config.log_dir())?;

    let direction = config.settings.direction.into();
    let session = match &config.settings.text {
        Some(path) => {
            // Relative paths in the settings file are relative to the file itself
            let path = config.config_dir.join(path);
            let text = std::fs::read_to_string(&path)
                .map_err(|source| AppError::ReadText { path, source })?;
            TypingSession::with_text(&text, direction)
        }
        None => TypingSession::new(direction),
    }
    .with_configuration(config.settings.configuration());

    info!(%direction, length = session.text().len(), "starting");
    app::App::new(config, session).run()
}
