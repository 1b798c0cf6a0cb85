use std::{io::Write, process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tokio::sync::mpsc;
use weatherview_core::{Config, QueryState, Session, WeatherProvider, provider_from_config};

use crate::{app, view};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherview", version, about = "Current weather for a city")]
pub struct Cli {
    /// Log provider diagnostics to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Without a command, starts the interactive widget.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city.
    Configure,

    /// Show current weather for one city and exit.
    Show {
        /// City name, sent to the provider as typed.
        city: String,

        /// Print the normalized result as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city, json }) => show(city, json).await,
            None => interactive().await,
        }
    }
}

fn load_provider(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    Ok(Arc::from(provider_from_config(config)?))
}

fn configure() -> anyhow::Result<ExitCode> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_validator(inquire::required!("An API key is required"))
        .prompt()
        .context("API key prompt was cancelled")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Default city prompt was cancelled")?;

    config.set_api_key(api_key.trim().to_string());
    config.default_city = default_city;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(ExitCode::SUCCESS)
}

async fn show(city: String, json: bool) -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let provider = load_provider(&config)?;

    let outcome = show_once(provider.as_ref(), city, json, &mut std::io::stdout()).await?;
    Ok(outcome.into())
}

/// Whether a one-shot lookup found the city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    Shown,
    Failed,
}

impl From<ShowOutcome> for ExitCode {
    fn from(outcome: ShowOutcome) -> Self {
        match outcome {
            ShowOutcome::Shown => ExitCode::SUCCESS,
            ShowOutcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Query `city` once and write the result to `out`, as JSON when `json` is
/// set and the query succeeded.
pub async fn show_once(
    provider: &dyn WeatherProvider,
    city: String,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<ShowOutcome> {
    let (mut session, ticket) = Session::start(city);
    let result = provider.current_weather(&ticket.city).await;
    session.resolve(&ticket, result);

    match session.state() {
        QueryState::Showing(weather) if json => {
            writeln!(out, "{}", serde_json::to_string_pretty(weather)?)?;
        }
        state => write!(out, "{}", view::render(state))?,
    }
    out.flush()?;

    Ok(match session.state() {
        QueryState::Showing(_) => ShowOutcome::Shown,
        _ => ShowOutcome::Failed,
    })
}

async fn interactive() -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let provider = load_provider(&config)?;

    let (tx, rx) = mpsc::unbounded_channel();
    app::spawn_stdin_reader(tx.clone());

    let mut stdout = std::io::stdout();
    app::run(provider, config.default_city.clone(), tx, rx, &mut stdout).await?;

    Ok(ExitCode::SUCCESS)
}
