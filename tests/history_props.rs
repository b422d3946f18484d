//! Property-based tests for the undo/redo log.

use neurodraw::{History, Point, Stroke};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    Undo,
    Redo,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![any::<u8>().prop_map(Op::Add), Just(Op::Undo), Just(Op::Redo)]
}

fn snapshot(tag: u8) -> Vec<Stroke> {
    vec![Stroke::new(vec![Point::new(tag as f64, 0.0)])]
}

proptest! {
    /// Property: the cursor stays in -1..=len-1 and the can_* queries agree with it
    #[test]
    fn cursor_stays_in_range(ops in prop::collection::vec(op(), 0..60)) {
        let mut history = History::new();
        for op in ops {
            match op {
                Op::Add(tag) => history.add_state(&snapshot(tag)),
                Op::Undo => { history.undo(); }
                Op::Redo => { history.redo(); }
            }
            let cursor = history.cursor();
            prop_assert!(cursor >= -1 && cursor < history.len() as isize);
            prop_assert_eq!(history.can_undo(), cursor >= 0);
            prop_assert_eq!(history.can_redo(), cursor < history.len() as isize - 1);
        }
    }

    /// Property: undo followed by redo lands back on the same snapshot
    #[test]
    fn undo_redo_is_identity(tags in prop::collection::vec(any::<u8>(), 1..10)) {
        let mut history = History::new();
        for &tag in &tags {
            history.add_state(&snapshot(tag));
        }
        history.undo();
        let redone = history.redo().unwrap().to_vec();
        prop_assert_eq!(redone, snapshot(*tags.last().unwrap()));
    }
}
