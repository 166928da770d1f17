//! Strictly Reversi - console front end
//!
//! Plays Reversi in the terminal against another person or the computer,
//! saving after every move.

#![warn(missing_docs)]

mod cli;
mod commands;
mod config;
mod console;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use commands::{Command as Input, HELP};
use config::ReversiConfig;
use console::{ConsoleAnimation, ConsoleNotifier, render};
use std::path::PathBuf;
use strictly_reversi::{
    Disk, ExecutorCanceller, Game, GameStore, PlacementError, SaveFile, TurnExecutor,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

type ConsoleExecutor = TurnExecutor<ConsoleAnimation, ConsoleNotifier, SaveFile>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the board on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_reversi=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(args).await,
        Command::Show { save } => run_show(save),
        Command::Reset { save } => run_reset(save),
    }
}

fn save_file(save: Option<PathBuf>) -> SaveFile {
    SaveFile::new(save.unwrap_or_else(|| ReversiConfig::default().save_path().clone()))
}

/// Print the saved game
#[instrument]
fn run_show(save: Option<PathBuf>) -> Result<()> {
    let store = save_file(save);
    let game = Game::from_record(store.load()?);
    let (dark, light) = game.counts();

    print!("{}", render(game.board()));
    println!("Dark {} - Light {}", dark, light);
    for (side, mode) in game.modes().iter() {
        println!("{}: {}", side, mode);
    }
    println!("{}", game.status());
    Ok(())
}

/// Overwrite the save with a new game
#[instrument]
fn run_reset(save: Option<PathBuf>) -> Result<()> {
    let mut store = save_file(save);
    store.save(&Game::new().to_record())?;
    info!(path = %store.path().display(), "Saved game reset");
    println!("New game saved to {}", store.path().display());
    Ok(())
}

/// Run the interactive console game
#[instrument(skip(args))]
async fn run_play(args: PlayArgs) -> Result<()> {
    let config = ReversiConfig::resolve(&args)?;
    info!(save_path = %config.save_path().display(), "Starting console game");

    let mut executor = TurnExecutor::new(
        ConsoleAnimation::new(config.animation_step()),
        ConsoleNotifier,
        SaveFile::new(config.save_path()),
        config.executor_settings(),
    );

    if executor.start() {
        println!("Resumed saved game");
    }
    for (side, mode) in [(Disk::Dark, *config.dark()), (Disk::Light, *config.light())] {
        if let Some(mode) = mode {
            executor.set_player_mode(side, mode);
        }
    }
    println!("{}", HELP);

    let mut inputs = spawn_input_reader(executor.canceller());

    loop {
        tokio::select! {
            input = inputs.recv() => {
                let Some(input) = input else {
                    debug!("Input closed");
                    break;
                };
                if !handle_input(&mut executor, input).await {
                    break;
                }
            }
            Some(due) = executor.next_due() => {
                match executor.play_due(due).await {
                    Ok(Some(report)) => debug!(placement = %report.placement, "Automated move played"),
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "Automated move rejected"),
                }
                print_status(&executor);
            }
        }
    }

    executor.cancel_all();
    info!("Leaving console game");
    Ok(())
}

/// Reads stdin on its own task. A reset cancels pending work straight
/// away, even while the game loop is busy animating.
fn spawn_input_reader(canceller: ExecutorCanceller) -> mpsc::UnboundedReceiver<Input> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read input");
                    break;
                }
            };
            match line.parse::<Input>() {
                Ok(input) => {
                    if input == Input::Reset {
                        canceller.cancel_all();
                    }
                    if tx.send(input).is_err() {
                        break;
                    }
                }
                Err(commands::CommandError::Empty) => {}
                Err(e) => println!("{}", e),
            }
        }
    });
    rx
}

/// Applies one console command. Returns false to leave the game.
#[instrument(skip(executor))]
async fn handle_input(executor: &mut ConsoleExecutor, input: Input) -> bool {
    match input {
        Input::Place(coordinate) => match executor.play(coordinate).await {
            Ok(report) => {
                if let Some(e) = &report.save_error {
                    println!("Warning: game not saved ({})", e);
                }
                print_status(executor);
            }
            Err(PlacementError::Illegal(..)) => println!("{} is not a legal move", coordinate),
            Err(e) => println!("{}", e),
        },
        Input::Mode(side, mode) => {
            executor.set_player_mode(side, mode);
            println!("{} is now {}", side, mode);
        }
        Input::Reset => {
            executor.new_game();
            println!("New game");
        }
        Input::Board => print_status(executor),
        Input::Help => println!("{}", HELP),
        Input::Quit => return false,
    }
    true
}

fn print_status(executor: &ConsoleExecutor) {
    let game = executor.game();
    print!("{}", render(game.board()));
    println!("{}", game.status());
}
