//! Property-based tests for persistence, history and game rules.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use rewind::game::{rules, Board, Game, GameConfig, GameStatus, Mark, CELLS};
use rewind::history::{HistoryError, HistoryKeys, HistoryLog};
use rewind::persist::{Codec, JsonCodec, PersistentValue};
use rewind::store::{MemoryStore, Store};
use std::sync::Arc;

prop_compose! {
    fn arbitrary_board()(cells in prop::array::uniform9(prop::option::of(prop::bool::ANY))) -> Board {
        Board::from_cells(cells.map(|c| c.map(|x| if x { Mark::X } else { Mark::O })))
    }
}

fn open_log(store: &Arc<MemoryStore>) -> HistoryLog<u32> {
    HistoryLog::open(store.clone(), HistoryKeys::namespaced("prop"), 0).unwrap()
}

proptest! {
    #[test]
    fn board_roundtrips_through_json(board in arbitrary_board()) {
        let raw = Codec::<Board>::serialize(&JsonCodec, &board).unwrap();
        let decoded: Board = JsonCodec.deserialize(&raw).unwrap();
        prop_assert_eq!(board, decoded);
    }

    #[test]
    fn history_roundtrips_through_json(boards in prop::collection::vec(arbitrary_board(), 1..6)) {
        let raw = Codec::<Vec<Board>>::serialize(&JsonCodec, &boards).unwrap();
        let decoded: Vec<Board> = JsonCodec.deserialize(&raw).unwrap();
        prop_assert_eq!(boards, decoded);
    }

    #[test]
    fn written_value_is_what_a_fresh_binding_reads(values in prop::collection::vec(any::<i64>(), 1..8)) {
        let store = Arc::new(MemoryStore::new());
        let mut value: PersistentValue<Vec<i64>> =
            PersistentValue::new(store.clone(), "values", Vec::new());
        value.write(values.clone()).unwrap();

        let fresh: PersistentValue<Vec<i64>> = PersistentValue::new(store, "values", Vec::new());
        prop_assert_eq!(fresh.read(), &values);
    }

    #[test]
    fn rebind_leaves_no_orphan(value in any::<String>(), suffix in "[a-z]{1,8}") {
        let store = Arc::new(MemoryStore::new());
        let mut bound: PersistentValue<String> =
            PersistentValue::new(store.clone(), "old", String::new());
        bound.write(value.clone()).unwrap();

        let new_key = format!("new-{suffix}");
        bound.rebind(new_key.clone()).unwrap();

        prop_assert!(!store.contains("old").unwrap());
        prop_assert_eq!(bound.peek_stored().unwrap(), Some(value));
        prop_assert_eq!(store.keys(), vec![new_key]);
    }

    #[test]
    fn branching_truncates_after_cursor(
        appended in prop::collection::vec(1..100u32, 1..10),
        jump in any::<prop::sample::Index>(),
        next in 100..200u32,
    ) {
        let store = Arc::new(MemoryStore::new());
        let mut log = open_log(&store);
        for n in &appended {
            log.append(*n).unwrap();
        }
        let before = log.snapshots().to_vec();
        let step = jump.index(before.len());

        log.jump_to(step).unwrap();
        log.append(next).unwrap();

        let mut expected = before[..=step].to_vec();
        expected.push(next);
        prop_assert_eq!(log.snapshots(), expected.as_slice());
        prop_assert_eq!(log.cursor(), step + 1);
    }

    #[test]
    fn cursor_always_indexes_a_snapshot(ops in prop::collection::vec((any::<bool>(), 0..12usize), 0..30)) {
        let store = Arc::new(MemoryStore::new());
        let mut log = open_log(&store);

        for (is_append, n) in ops {
            if is_append {
                log.append(n as u32).unwrap();
            } else {
                match log.jump_to(n) {
                    Ok(()) => {
                        prop_assert_eq!(log.cursor(), n);
                    }
                    Err(HistoryError::OutOfRange { step, len }) => {
                        prop_assert_eq!(step, n);
                        prop_assert!(step >= len);
                    }
                    Err(e) => return Err(TestCaseError::fail(e.to_string())),
                }
            }
            prop_assert!(log.cursor() < log.len());
        }
    }

    #[test]
    fn reopened_log_matches_in_memory_log(appended in prop::collection::vec(any::<u32>(), 0..8), back in 0..8usize) {
        let store = Arc::new(MemoryStore::new());
        let mut log = open_log(&store);
        for n in &appended {
            log.append(*n).unwrap();
        }
        let step = log.cursor().saturating_sub(back);
        log.jump_to(step).unwrap();

        let reopened = open_log(&store);
        prop_assert_eq!(reopened.snapshots(), log.snapshots());
        prop_assert_eq!(reopened.cursor(), log.cursor());
    }

    #[test]
    fn next_mover_follows_parity(board in arbitrary_board()) {
        let expected = if board.filled_count() % 2 == 0 { Mark::X } else { Mark::O };
        prop_assert_eq!(rules::next_mover(&board), expected);
    }

    #[test]
    fn status_is_consistent_with_winner(board in arbitrary_board()) {
        match rules::status(&board) {
            GameStatus::Won(mark) => {
                prop_assert_eq!(rules::winner(&board), Some(mark));
            }
            GameStatus::Draw => {
                prop_assert!(board.is_full());
                prop_assert_eq!(rules::winner(&board), None);
            }
            GameStatus::InProgress { next } => {
                prop_assert!(!board.is_full());
                prop_assert_eq!(next, rules::next_mover(&board));
            }
        }
    }

    #[test]
    fn random_play_never_corrupts_history(cells in prop::collection::vec(0..CELLS + 2, 0..20)) {
        let store = Arc::new(MemoryStore::new());
        let mut game = Game::open(store, &GameConfig::default()).unwrap();

        for cell in cells {
            let before = game.history().len();
            let legal = rules::legal_move(game.board(), cell).is_legal();
            let result = game.select_square(cell);

            prop_assert_eq!(result.is_ok(), legal);
            let expected_len = if legal { before + 1 } else { before };
            prop_assert_eq!(game.history().len(), expected_len);
            prop_assert!(game.history().is_at_latest());
        }
    }

    #[test]
    fn restart_always_yields_single_empty_board(cells in prop::collection::vec(0..CELLS, 0..9)) {
        let store = Arc::new(MemoryStore::new());
        let mut game = Game::open(store, &GameConfig::default()).unwrap();
        for cell in cells {
            let _ = game.select_square(cell);
        }

        game.restart().unwrap();

        prop_assert_eq!(game.history().snapshots().to_vec(), vec![Board::empty()]);
        prop_assert_eq!(game.step(), 0);
    }
}
