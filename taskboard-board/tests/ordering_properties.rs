//! Property tests for position allocation and ordering

use proptest::prelude::*;
use taskboard_board::{
    allocate, needs_rebalance, plan_rebalance, sorted, Draggable, Position, PositionAllocator,
};

fn item(id: &str, position: f64) -> Draggable {
    Draggable::new(id, position)
}

proptest! {
    #[test]
    fn allocation_between_neighbors_is_strict(a in -1.0e6f64..1.0e6, gap in 1.0e-3f64..1.0e6) {
        let b = a + gap;
        let position = allocate(Some(&item("a", a)), Some(&item("b", b))).value();
        prop_assert!(a < position && position < b, "{a} < {position} < {b}");
    }

    #[test]
    fn allocation_at_the_edges_stays_outside(first in 1.0e-3f64..1.0e9) {
        let head = allocate(None, Some(&item("f", first))).value();
        let tail = allocate(Some(&item("l", first)), None).value();
        prop_assert!(head < first);
        prop_assert!(tail > first);
    }

    #[test]
    fn sorted_is_ordered_and_a_permutation(
        positions in prop::collection::vec(-1.0e6f64..1.0e6, 0..40)
    ) {
        let items: Vec<Draggable> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| item(&format!("i{i}"), *p))
            .collect();
        let view = sorted(&items);

        prop_assert_eq!(view.len(), items.len());
        prop_assert!(view.windows(2).all(|w| w[0].position.value() <= w[1].position.value()));
        for (i, p) in positions.iter().enumerate() {
            prop_assert_eq!(items[i].position, Position::new(*p));
        }
    }

    #[test]
    fn rebalance_plan_clears_the_threshold(
        positions in prop::collection::vec(0.0f64..1.0e-6, 1..30)
    ) {
        let items: Vec<Draggable> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| item(&format!("i{i}"), *p))
            .collect();

        let respaced: Vec<Draggable> = plan_rebalance(&items, 65535.0)
            .into_iter()
            .map(|(id, position)| Draggable::new(id, position))
            .collect();
        prop_assert!(!needs_rebalance(&respaced, 1e-9));
    }
}

#[test]
fn repeated_head_inserts_stay_ordered() {
    let allocator = PositionAllocator::default();
    let mut head = allocator.between(None, None);
    for _ in 0..50 {
        let next = allocator.between(None, Some(head));
        assert!(next < head);
        head = next;
    }
    assert!(head.value() > 0.0);
}
