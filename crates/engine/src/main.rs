//! Charforge - Main entry point.
//!
//! Prints normalized character options as JSON:
//!
//! ```text
//! charforge races | classes | backgrounds
//! charforge race <id> | class <id> | background <id>
//! ```

use anyhow::Context;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charforge_engine::infrastructure::config::EngineConfig;
use charforge_engine::App;

const USAGE: &str = "Usage: charforge <command>

Commands:
  races               List every race
  classes             List every class
  backgrounds         List every background
  race <id>           Show one race
  class <id>          Show one class
  background <id>     Show one background";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Races,
    Classes,
    Backgrounds,
    Race(String),
    Class(String),
    Background(String),
}

impl Command {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let Some(name) = args.next() else {
            anyhow::bail!(USAGE);
        };
        let mut id = || {
            args.next()
                .with_context(|| format!("`{name}` needs an id\n\n{USAGE}"))
        };

        let command = match name.as_str() {
            "races" => Self::Races,
            "classes" => Self::Classes,
            "backgrounds" => Self::Backgrounds,
            "race" => Self::Race(id()?),
            "class" => Self::Class(id()?),
            "background" => Self::Background(id()?),
            other => anyhow::bail!("Unknown command: {other}\n\n{USAGE}"),
        };
        Ok(command)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root so the binary works from any crate directory.
    load_dotenv_from_repo_root();

    // Initialize logging (stderr, so stdout stays pure JSON)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charforge_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = Command::parse(std::env::args().skip(1))?;

    let config = EngineConfig::from_env();
    tracing::info!(base_url = %config.catalog_base_url, "Using rules catalog");
    let app = App::from_config(&config);
    let options = &app.use_cases.character_options;

    match command {
        Command::Races => print_json(&options.list_races().await.context("listing races")?),
        Command::Classes => print_json(&options.list_classes().await.context("listing classes")?),
        Command::Backgrounds => print_json(
            &options
                .list_backgrounds()
                .await
                .context("listing backgrounds")?,
        ),
        Command::Race(id) => print_json(
            &options
                .get_race(&id)
                .await
                .with_context(|| format!("loading race {id}"))?,
        ),
        Command::Class(id) => print_json(
            &options
                .get_class(&id)
                .await
                .with_context(|| format!("loading class {id}"))?,
        ),
        Command::Background(id) => print_json(
            &options
                .get_background(&id)
                .await
                .with_context(|| format!("loading background {id}"))?,
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{json}");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
