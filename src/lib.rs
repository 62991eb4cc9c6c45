//! Rewind: persisted values and a branching, time-travel history.
//!
//! Rewind keeps application state in a durable key/value store without
//! hiding when it touches that store. Every mutation is explicit and
//! synchronous; there is no background re-synchronization.
//!
//! # Core Concepts
//!
//! - **Store**: durable string key/value map ([`store::Store`])
//! - **PersistentValue**: a lazily loaded value written through to one key
//! - **HistoryLog**: snapshots plus a cursor, supporting rewind and
//!   branching (a new step from the past discards the old future)
//! - **Game**: tic-tac-toe rules and a persisted session built on the log
//!
//! # Example
//!
//! ```rust
//! use rewind::game::{Game, GameConfig, GameStatus, Mark};
//! use rewind::store::MemoryStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//!
//! let mut game = Game::open(store.clone(), &GameConfig::default()).unwrap();
//! game.select_square(4).unwrap();
//! game.select_square(0).unwrap();
//! game.jump_to(1).unwrap();
//! drop(game);
//!
//! // A new session resumes at the step that was being viewed
//! let game = Game::open(store, &GameConfig::default()).unwrap();
//! assert_eq!(game.step(), 1);
//! assert_eq!(game.history().len(), 3);
//! assert_eq!(game.status(), GameStatus::InProgress { next: Mark::O });
//! ```

pub mod game;
pub mod history;
pub mod persist;
pub mod store;

// Re-export commonly used types
pub use game::{Board, Game, GameConfig, GameStatus, Mark};
pub use history::{Checkpoint, HistoryKeys, HistoryLog};
pub use persist::{DefaultValue, PersistentValue};
pub use store::{FileStore, MemoryStore, Store};
