use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use scoreboard::ScoreboardConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Command};

const LOCAL_CONFIG: &str = "scoreboard.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("scoreboard=info".parse()?)
                .add_directive("scoreboard_cli=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Ingest(args) => {
            let summary = commands::ingest::run(&config, args)?;
            summary.print();
            Ok(())
        }
        Command::Check(args) => commands::check::run(&config, args),
        Command::Decode(args) => commands::decode::run(&config, args),
    }
}

/// Resolve the config file: an explicit path must load, the implicit ones may
/// be absent.
fn load_config(explicit: Option<&Path>) -> Result<ScoreboardConfig> {
    if let Some(path) = explicit {
        return ScoreboardConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    for candidate in default_config_paths() {
        if candidate.is_file() {
            return ScoreboardConfig::load(&candidate)
                .with_context(|| format!("Failed to load config {}", candidate.display()));
        }
    }

    warn!("No config file found, using defaults");
    Ok(ScoreboardConfig::default())
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    match dirs::config_dir() {
        Some(dir) => paths.push(dir.join("scoreboard").join("config.toml")),
        None => info!("No user config directory on this platform"),
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_explicit_config_must_exist() {
        assert!(load_config(Some(Path::new("/nonexistent/scoreboard.toml"))).is_err());
    }

    #[test]
    fn test_explicit_config_loads() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "strict_tables = true").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert!(config.strict_tables);
    }

    #[test]
    fn test_default_paths_start_local() {
        assert_eq!(default_config_paths()[0], PathBuf::from(LOCAL_CONFIG));
    }
}
