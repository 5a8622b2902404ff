use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{Action, City, Config, LiveReading, Screen, Session, model::CITY_CATALOG};
use inquire::{Password, PasswordDisplayMode};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "City weather with pinned favorites")]
pub struct Cli {
    /// Log lookups and state changes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Print where the config file lives.
    ConfigPath,

    /// List the cities offered by the selector.
    Cities,

    /// Show the current temperature for one city and exit.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Interactive session: select cities, pin favorites, view the map (default).
    Run,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Run) {
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
            Command::Cities => {
                for name in CITY_CATALOG {
                    println!("{name}");
                }
                Ok(())
            }
            Command::Show { city } => show(&city).await,
            Command::Run => {
                let config = Config::load()?;
                let session = Session::from_config(&config)?;
                interactive::run(session).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Ok(inquire::validator::Validation::Invalid(
                    "API key must not be empty".into(),
                ))
            } else {
                Ok(inquire::validator::Validation::Valid)
            }
        })
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let city = City::try_from(city)?;
    if !city.is_catalogued() {
        eprintln!("Note: '{city}' is not one of the listed cities; looking it up anyway.");
    }

    let config = Config::load()?;
    let mut session = Session::from_config(&config)?;

    session.dispatch(Action::SelectCity(city));
    session.settle().await;

    render::screen(&outcome(&session)?);
    Ok(())
}

/// Screen to print, or the failed lookup with its friendly message on top.
fn outcome(session: &Session) -> anyhow::Result<Screen> {
    match session.store().live() {
        LiveReading::Failed { error, .. } => {
            Err(anyhow::Error::new(error.clone()).context(error.user_message()))
        }
        _ => Ok(session.screen()),
    }
}
