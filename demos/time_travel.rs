//! Time-travel tic-tac-toe persisted to a JSON file.
//!
//! Plays a few moves, rewinds, branches, then reopens the game from disk
//! to show that both the history and the viewed step survive.
//!
//! Run with: `cargo run --example time_travel [path]`

use rewind::game::{Game, GameConfig, GameError};
use rewind::store::{FileStore, FileStoreConfig};
use std::sync::Arc;
use tracing::info;

fn print_game(game: &Game) {
    println!("{}\n", game.board());
    println!("{}", game.status());
    for entry in game.moves() {
        println!("  {}. {}", entry.step, entry);
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "time-travel-demo.json".to_string());
    let config = GameConfig::default();
    let store_config = FileStoreConfig {
        pretty: true,
        ..FileStoreConfig::at(&path)
    };

    {
        let store = Arc::new(FileStore::open(store_config.clone())?);
        let mut game = Game::open(store, &config)?;
        game.restart()?;

        println!("=== X takes the top row ===");
        for cell in [0, 4, 1, 8, 2] {
            game.select_square(cell)?;
        }
        print_game(&game);
        if let Some(mark) = game.status().winner() {
            println!("{mark} beats {}\n", mark.opponent());
        }

        match game.select_square(5) {
            Err(GameError::IllegalMove { cell, reason }) => {
                println!("Move at {cell} refused: {reason}\n");
            }
            other => println!("Unexpected result: {other:?}\n"),
        }

        println!("=== Rewind to move #2 and branch ===");
        game.jump_to(2)?;
        game.select_square(6)?;
        print_game(&game);

        println!("=== Look back at the start ===");
        game.jump_to(0)?;
        print_game(&game);
    }

    info!("Reopening {}", path);
    let store = Arc::new(FileStore::open(store_config)?);
    let game = Game::open(store, &config)?;
    println!("=== Reopened from disk ===");
    print_game(&game);

    Ok(())
}
