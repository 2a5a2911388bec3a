use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use crate::session::Difficulty;

/// Tic-tac-toe against a minimax AI, played in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe-minimax")]
#[command(about = "Tic-tac-toe against a minimax AI", long_about = None)]
#[command(version)]
pub(crate) struct Config {
    /// Level for the first game
    #[arg(long, value_enum, default_value = "easy")]
    pub difficulty: Difficulty,

    /// How long the AI waits before committing its move, in milliseconds
    #[arg(long, default_value = "1500")]
    pub ai_delay_ms: u64,

    /// Longest wait for input per loop iteration, in milliseconds
    #[arg(long, default_value = "16")]
    pub frame_ms: u64,

    /// Write log records here instead of stderr (which the UI covers)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Sets up env_logger; `RUST_LOG` picks the filter as usual.
    pub fn init_logging(&self) -> anyhow::Result<()> {
        let mut builder = env_logger::Builder::from_default_env();
        if let Some(path) = &self.log_file {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        builder.try_init().context("Failed to initialize logger")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["tictactoe-minimax"]).unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.ai_delay(), Duration::from_millis(1500));
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "tictactoe-minimax",
            "--difficulty",
            "hard",
            "--ai-delay-ms",
            "0",
            "--log-file",
            "game.log",
        ])
        .unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.ai_delay(), Duration::ZERO);
        assert_eq!(config.log_file, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn test_rejects_unknown_difficulty() {
        assert!(Config::try_parse_from(["tictactoe-minimax", "--difficulty", "brutal"]).is_err());
    }
}
