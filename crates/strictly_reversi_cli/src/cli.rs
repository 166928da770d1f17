//! Command-line interface for strictly_reversi.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_reversi::PlayerMode;

/// Strictly Reversi - console Reversi with automated players
#[derive(Parser, Debug)]
#[command(name = "strictly_reversi")]
#[command(about = "Play Reversi in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game, resuming the saved one if present
    Play(PlayArgs),

    /// Print the saved game and its status
    Show {
        /// Save file to read
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Overwrite the save with a new game
    Reset {
        /// Save file to overwrite
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

/// Options for `play`.
#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Save file, overrides the configured path
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Control mode for dark (manual or auto)
    #[arg(long)]
    pub dark: Option<PlayerMode>,

    /// Control mode for light (manual or auto)
    #[arg(long)]
    pub light: Option<PlayerMode>,

    /// Apply placements without animation
    #[arg(long)]
    pub no_animation: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_flags() {
        let cli = Cli::parse_from([
            "strictly_reversi",
            "play",
            "--save",
            "game.txt",
            "--light",
            "auto",
            "--no-animation",
        ]);
        let Command::Play(args) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(args.save, Some(PathBuf::from("game.txt")));
        assert_eq!(args.light, Some(PlayerMode::Automated));
        assert_eq!(args.dark, None);
        assert!(args.no_animation);
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::parse_from(["strictly_reversi", "show"]);
        assert!(matches!(cli.command, Command::Show { save: None }));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let result = Cli::try_parse_from(["strictly_reversi", "play", "--dark", "wizard"]);
        assert!(result.is_err());
    }
}
