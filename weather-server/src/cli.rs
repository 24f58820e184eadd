use std::path::{Path, PathBuf};

use anyhow::Context;
use cityweather_core::{Config, city_weather, provider_from_config};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tokio::net::TcpListener;

use crate::http::{self, AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "cityweather",
    version,
    about = "Weather API - current weather and air quality for a city"
)]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `GET /weather?city=<name>` over HTTP.
    Serve {
        /// Address to listen on, e.g. "127.0.0.1:8000". Overrides the config file.
        #[arg(long)]
        listen: Option<String>,
    },

    /// Look up a single city and print the JSON payload.
    Show {
        /// City name.
        city: String,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command {
            Command::Serve { listen } => {
                let config = Config::load_from(&config_path)?;
                let provider = provider_from_config(&config)?;

                let addr = listen.unwrap_or(config.listen_addr);
                let listener = TcpListener::bind(&addr)
                    .await
                    .with_context(|| format!("Failed to bind {addr}"))?;

                http::serve(listener, AppState::new(provider)).await
            }
            Command::Show { city } => {
                let config = Config::load_from(&config_path)?;
                let provider = provider_from_config(&config)?;

                let report = city_weather(&*provider, &city).await?;
                println!("{}", serde_json::to_string_pretty(&report)?);
                Ok(())
            }
            Command::Configure => configure(&config_path),
        }
    }
}

fn configure(path: &Path) -> anyhow::Result<()> {
    let mut config = Config::from_file(path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.api_key()?;
    config.save_to(path)?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}
