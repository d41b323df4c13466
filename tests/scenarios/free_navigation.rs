//! Test: Free navigation - any open step can be entered in any order

use crate::helpers::*;
use stepper::core::{EventKind, Transition};

/// Jumping anywhere is allowed and only announces a move
#[test]
fn test_free_jump_anywhere() {
    let mut w = wizard_with_policy(CHECKOUT_YAML, false);
    let log = EventLog::attach(&mut w.iterator);
    let payment = step(&w, "payment");

    w.iterator.move_to(Some(&payment)).unwrap();
    assert_eq!(current_id(&w), id("payment"));

    let events = log.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Advanced);
    assert_eq!(events[0].transition, Some(Transition::Move));
    assert_eq!(events[0].previous, None);
    assert_eq!(events[0].current.as_deref(), Some("Payment"));

    // Unvisited steps before the current one are reachable backwards
    w.iterator.previous().unwrap();
    assert_eq!(current_id(&w), id("gift"));
}

/// `next` picks the first open step, wherever it is
#[test]
fn test_free_next_takes_first_open() {
    let mut w = wizard_with_policy(CHECKOUT_YAML, false);
    let shipping = step(&w, "shipping");

    w.iterator.move_to(Some(&shipping)).unwrap();
    complete_and_next(&mut w);
    assert_eq!(current_id(&w), id("cart"));
}

/// Steps can be completed in any order
#[test]
fn test_free_completion_in_any_order() {
    let mut w = wizard_with_policy(CHECKOUT_YAML, false);

    for id in ["payment", "cart", "gift", "shipping"] {
        let target = step(&w, id);
        assert!(w.iterator.has_move_to(Some(&target)), "cannot move to {}", id);
        w.iterator.move_to(Some(&target)).unwrap();
        target.fire_complete();
    }

    assert!(w.iterator.is_complete());
    let cart = step(&w, "cart");
    assert!(!w.iterator.has_move_to(Some(&cart)));
    assert!(w.iterator.move_to(Some(&cart)).is_err());
}

/// Read-only accepts legal requests but never moves
#[test]
fn test_read_only_freezes_everything() {
    let mut w = wizard_with_policy(CHECKOUT_YAML, false);
    let payment = step(&w, "payment");
    w.iterator.next().unwrap();

    w.iterator.set_read_only(true);
    let log = EventLog::attach(&mut w.iterator);

    assert_eq!(w.iterator.move_to(Some(&payment)).unwrap(), Some(step(&w, "cart")));
    assert!(w.iterator.move_to(None).is_ok());
    assert!(w.iterator.next().is_ok());
    assert!(w.iterator.skip().is_err());
    assert_eq!(current_id(&w), id("cart"));
    assert!(log.events().is_empty());

    w.iterator.set_read_only(false);
    w.iterator.move_to(Some(&payment)).unwrap();
    assert_eq!(current_id(&w), id("payment"));
    assert_eq!(log.kinds(), vec![EventKind::Advanced]);
}
