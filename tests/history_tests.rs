//! History engine integration tests.
//!
//! These tests drive the engine through its public API only: staging,
//! commit, undo, reconstruction, frames, stride changes, and records.

use board_history::board::{BoardSnapshot, Color, Point};
use board_history::history::{HistoryConfig, HistoryEngine, HistoryRecord, Traversal};
use board_history::HistoryError;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine(width: u32, height: u32, stride: usize) -> HistoryEngine {
    init_logging();
    HistoryEngine::new(HistoryConfig::new(width, height).with_stride(stride)).unwrap()
}

/// A deterministic game touching every kind of change: placements,
/// removals, recolors, multi-stone turns, and empty turns.
fn scripted(history: &mut HistoryEngine) {
    let (width, height) = history.dimensions();
    let (w, h) = (width as i32, height as i32);
    for turn in 0..23i32 {
        let color = if turn % 2 == 0 { Color::Black } else { Color::White };
        match turn % 5 {
            0 => history.put(&[(Point::new(turn % w, (turn / w) % h), color)]).unwrap(),
            1 => history
                .put(&[
                    (Point::new((turn * 3) % w, (turn * 7) % h), color),
                    (Point::new((turn * 5) % w, (turn * 2) % h), color.opposite()),
                ])
                .unwrap(),
            2 => history.take(&[Point::new((turn - 2) % w, ((turn - 2) / w) % h)]).unwrap(),
            3 => {}
            _ => {
                let target = Point::new((turn * 3 - 9) % w, ((turn - 3) * 7) % h);
                history.put(&[(target, color)]).unwrap();
            }
        }
        history.close();
    }
}

// =============================================================================
// Scenarios
// =============================================================================

/// Two closes on a 9x9 board.
#[test]
fn test_two_closes_on_nine_by_nine() {
    let mut history = engine(9, 9, 5);
    history.put(&[(Point::new(0, 0), Color::Black)]).unwrap();
    history.close();
    history.put(&[(Point::new(1, 0), Color::White)]).unwrap();
    history.close();

    assert_eq!(history.len(), 3);

    let expected = [
        (Color::Empty, Color::Empty),
        (Color::Black, Color::Empty),
        (Color::Black, Color::White),
    ];
    for (i, (a, b)) in expected.into_iter().enumerate() {
        let state = history.get_state(i).unwrap();
        assert_eq!(state.get(Point::new(0, 0)), a, "state {} at (0, 0)", i);
        assert_eq!(state.get(Point::new(1, 0)), b, "state {} at (1, 0)", i);
    }
}

/// With stride 2, five closes cache exactly 0, 2, and 4.
#[test]
fn test_stride_two_after_five_closes() {
    let mut history = engine(9, 9, 2);
    for i in 0..5 {
        history.put(&[(Point::new(i, i), Color::White)]).unwrap();
        history.close();
    }
    assert_eq!(history.cached_indices(), vec![0, 2, 4]);
}

/// An empty turn can be popped; a staged change blocks pop.
#[test]
fn test_pop_empty_turn_then_blocked_pop() {
    let mut history = engine(9, 9, 5);
    history.put(&[(Point::new(3, 3), Color::Black)]).unwrap();
    history.close();
    history.close();

    let before = history.len();
    history.pop().unwrap();
    assert_eq!(history.len(), before - 1);

    history.put(&[(Point::new(4, 4), Color::White)]).unwrap();
    assert!(matches!(
        history.pop(),
        Err(HistoryError::PreconditionViolation(_))
    ));
    assert_eq!(history.len(), before - 1);
}

// =============================================================================
// Reconstruction properties on a scripted game
// =============================================================================

/// Replaying diff i forward from state i yields state i + 1.
#[test]
fn test_forward_replay_matches_next_state() {
    let mut history = engine(7, 6, 4);
    scripted(&mut history);

    for i in 0..history.turns() {
        let mut state = history.get_state(i).unwrap();
        history.diffs().get(i).unwrap().apply_forward(&mut state);
        assert_eq!(state, history.get_state(i + 1).unwrap(), "turn {}", i);
    }
}

/// Forward then backward application is the identity.
#[test]
fn test_forward_backward_identity() {
    let mut history = engine(7, 6, 4);
    scripted(&mut history);

    for i in 0..history.turns() {
        let original = history.get_state(i).unwrap();
        let diff = history.diffs().get(i).unwrap();
        let mut state = original.clone();
        diff.apply_forward(&mut state);
        diff.apply_backward(&mut state);
        assert_eq!(state, original, "turn {}", i);
    }
}

/// Every cached anchor equals a full replay from the empty board.
#[test]
fn test_cache_entries_match_full_replay() {
    let mut history = engine(7, 6, 3);
    let (w, h) = (7, 6);

    for turn in 0..20i32 {
        history
            .put(&[(Point::new(turn % w, (turn / w) % h), Color::Black)])
            .unwrap();
        history.close();

        let expected: Vec<usize> = (0..history.len()).filter(|k| k % 3 == 0).collect();
        assert_eq!(history.cached_indices(), expected);

        for k in expected {
            let mut replayed = BoardSnapshot::empty(*history.codec());
            history.diffs().replay(&mut replayed, 0..k);
            assert_eq!(history.get_state(k).unwrap(), replayed);
        }
    }
}

/// Every stride reconstructs the same states.
#[test]
fn test_stride_does_not_change_states() {
    let mut reference = engine(7, 6, 1);
    scripted(&mut reference);

    for stride in [2, 3, 5, 8, 100] {
        let mut history = engine(7, 6, stride);
        scripted(&mut history);
        for i in 0..history.len() {
            assert_eq!(
                history.get_state(i).unwrap(),
                reference.get_state(i).unwrap(),
                "stride {} state {}",
                stride,
                i
            );
        }
    }
}

/// Changing stride at runtime keeps every state and leaves only new-stride
/// anchors in the cache.
#[test]
fn test_runtime_stride_change() {
    let mut history = engine(7, 6, 5);
    scripted(&mut history);
    let before: Vec<_> = (0..history.len()).map(|i| history.get_state(i).unwrap()).collect();

    for stride in [3, 1, 8] {
        history.set_stride(stride).unwrap();
        let expected: Vec<usize> = (0..history.len()).filter(|k| k % stride == 0).collect();
        assert_eq!(history.cached_indices(), expected);

        let after: Vec<_> = (0..history.len()).map(|i| history.get_state(i).unwrap()).collect();
        assert_eq!(before, after);
    }

    // Closing after a change stores anchors at the new stride.
    assert_eq!(history.close(), 24);
    assert_eq!(history.cached_indices(), vec![0, 8, 16, 24]);
}

/// Off-board queries answer `Offboard` in every state.
#[test]
fn test_offboard_in_every_state() {
    let mut history = engine(7, 6, 4);
    scripted(&mut history);

    for i in 0..history.len() {
        let state = history.get_state(i).unwrap();
        for point in [
            Point::new(-1, 0),
            Point::new(0, -1),
            Point::new(7, 0),
            Point::new(0, 6),
            Point::new(i32::MIN, i32::MAX),
        ] {
            assert_eq!(state.get(point), Color::Offboard);
        }

        let mut frame = history.frame(i).unwrap();
        assert_eq!(frame.get(-3, 2), Color::Offboard);
        assert_eq!(frame.get(6, 5), state.get(Point::new(6, 5)));
    }
}

/// Two reads of the same state are equal and independently owned.
#[test]
fn test_reads_are_independent() {
    let mut history = engine(7, 6, 4);
    scripted(&mut history);

    for i in [0, 3, 4, 9] {
        let mut a = history.get_state(i).unwrap();
        let b = history.get_state(i).unwrap();
        assert_eq!(a, b);

        a.put(Point::new(0, 0), Color::White).unwrap();
        a.put(Point::new(6, 5), Color::Black).unwrap();
        assert_eq!(history.get_state(i).unwrap(), b);
    }
}

// =============================================================================
// Frames
// =============================================================================

/// A frame renders lazily and agrees with get_state in both traversal orders.
#[test]
fn test_frame_agrees_with_get_state() {
    let mut history = engine(7, 6, 4);
    scripted(&mut history);

    for i in 0..history.len() {
        let state = history.get_state(i).unwrap();
        let mut frame = history.frame(i).unwrap();
        assert!(!frame.is_rendered());

        for order in [Traversal::RowMajor, Traversal::ColumnMajor] {
            let cells: Vec<_> = frame.iter(order).collect();
            assert_eq!(cells.len(), 42);
            for (point, color) in cells {
                assert_eq!(color, state.get(point));
            }
        }
        assert!(frame.is_rendered());
    }
}

/// Frames and get_state reject turn indices outside history.
#[test]
fn test_invalid_turn_index() {
    let mut history = engine(5, 5, 2);
    history.close();

    assert_eq!(
        history.get_state(2).unwrap_err(),
        HistoryError::InvalidIndex { index: 2, len: 2 }
    );
    assert!(history.frame(5).is_err());
    assert!(history.resolve(-3).is_err());
    assert_eq!(history.resolve(-1).unwrap(), 1);
}

// =============================================================================
// Records
// =============================================================================

/// A record rebuilt through bincode reproduces every state and cache entry.
#[test]
fn test_record_rebuild_through_bincode() {
    let mut history = engine(7, 6, 3);
    scripted(&mut history);

    let bytes = bincode::serialize(&history.record()).unwrap();
    let record: HistoryRecord = bincode::deserialize(&bytes).unwrap();
    let rebuilt = HistoryEngine::from_record(record).unwrap();

    assert_eq!(rebuilt.cached_indices(), history.cached_indices());
    for i in 0..history.len() {
        assert_eq!(rebuilt.get_state(i).unwrap(), history.get_state(i).unwrap());
    }
}

/// Staged changes are not recorded.
#[test]
fn test_record_excludes_staged_changes() {
    let mut history = engine(5, 5, 2);
    history.put(&[(Point::new(0, 0), Color::Black)]).unwrap();
    history.close();
    history.put(&[(Point::new(1, 1), Color::White)]).unwrap();

    let rebuilt = HistoryEngine::from_record(history.record()).unwrap();
    assert_eq!(rebuilt.len(), 2);
    assert!(!rebuilt.has_pending_changes());
    assert_eq!(rebuilt.working().get(Point::new(1, 1)), Color::Empty);
}
