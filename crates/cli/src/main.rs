//! formbot entry point
//!
//! Replays a scripted conversation through the restaurant form and prints
//! what the bot would have said.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use formbot_agent::RestaurantForm;
use formbot_cli::{Replay, Script};
use formbot_config::{constants::paths, load_settings, FormConfig, Settings};

#[derive(Parser)]
#[command(name = "formbot")]
#[command(version)]
#[command(about = "Replay a conversation through the restaurant booking form", long_about = None)]
struct Cli {
    /// Script of parsed user turns (YAML or JSON)
    #[arg(long)]
    script: PathBuf,

    /// Settings environment (config/<env>.yaml), defaults to $FORMBOT_ENV
    #[arg(long, value_name = "ENV")]
    config_env: Option<String>,

    /// Form configuration file, overrides the path from settings
    #[arg(long)]
    form_config: Option<PathBuf>,

    /// Print the events of every turn
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = cli
        .config_env
        .clone()
        .or_else(|| std::env::var(format!("{}_ENV", paths::ENV_PREFIX)).ok());
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) if env.is_none() => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load settings: {}. Using defaults.", e);
            Settings::default()
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("loading settings for environment {}", env.as_deref().unwrap_or(""))
            })
        }
    };

    init_tracing(&settings);

    tracing::info!(
        environment = ?settings.environment,
        config_env = env.as_deref().unwrap_or("default"),
        "Settings loaded"
    );

    let form_path = cli
        .form_config
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.form_config_path));
    let form_config = if cli.form_config.is_some() {
        FormConfig::load(&form_path)
    } else {
        FormConfig::load_or_default(&form_path)
    }
    .with_context(|| format!("loading form config {}", form_path.display()))?;

    let form = RestaurantForm::from_config(&form_config).context("building restaurant form")?;
    let script = Script::load(&cli.script)?;

    tracing::info!(turns = script.len(), script = %cli.script.display(), "Replaying script");

    let mut replay = Replay::new(form, form_config.responses.clone());
    for (index, turn) in script.turns.into_iter().enumerate() {
        println!("user: {}", turn.text);

        let outcome = replay
            .turn(turn)
            .with_context(|| format!("running form on turn {}", index + 1))?;

        if let Some(slot) = &outcome.rejected {
            println!("  (nothing extracted for {})", slot);
        }
        for reply in &outcome.replies {
            println!("bot:  {}", reply);
        }
        if cli.verbose {
            for event in &outcome.events {
                println!("  {}", serde_json::to_string(event)?);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&replay.slots())?);
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("formbot={level},formbot_agent={level},formbot_config={level},formbot_core={level}")
            .into()
    });

    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
