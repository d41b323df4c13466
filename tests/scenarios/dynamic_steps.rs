//! Test: Dynamic steps - inserting and removing steps mid-wizard

use crate::helpers::*;
use stepper::core::{EventKind, Step, StepperError, Transition};

const SINGLE_STEP_YAML: &str = r#"
name: "Confirm"
steps:
  - id: "confirm"
    caption: "Confirm"
"#;

fn captions(w: &stepper::Wizard) -> Vec<String> {
    w.iterator.steps().iter().map(Step::caption).collect()
}

/// New steps land right after the current one and join the line
#[test]
fn test_add_step_after_current() {
    let mut w = wizard(CHECKOUT_YAML);
    let log = EventLog::attach(&mut w.iterator);
    w.iterator.next().unwrap();
    log.clear();

    w.iterator.add(Step::new("Coupon")).unwrap();
    assert_eq!(
        captions(&w),
        vec!["Cart", "Coupon", "Shipping", "Gift wrap", "Payment"]
    );

    let events = log.events();
    assert_eq!(events[0].kind, EventKind::ElementAdded);
    assert_eq!(events[0].current.as_deref(), Some("Coupon"));

    complete_and_next(&mut w);
    assert_eq!(
        w.iterator.current().map(Step::caption).as_deref(),
        Some("Coupon")
    );
}

/// Without a current step new steps are appended
#[test]
fn test_add_without_current_appends() {
    let mut w = wizard(CHECKOUT_YAML);
    w.iterator.add(Step::new("Receipt")).unwrap();
    assert_eq!(captions(&w).last().map(String::as_str), Some("Receipt"));
}

/// The same step cannot be added twice
#[test]
fn test_add_duplicate_rejected() {
    let mut w = wizard(CHECKOUT_YAML);
    let cart = step(&w, "cart");
    assert!(matches!(
        w.iterator.add(cart),
        Err(StepperError::DuplicateStep(_))
    ));
    assert_eq!(w.iterator.len(), 4);
}

/// Removing the current step moves on to the next open one
#[test]
fn test_remove_current_moves_on() {
    let mut w = wizard(CHECKOUT_YAML);
    let shipping = step(&w, "shipping");
    w.iterator.next().unwrap();
    complete_and_next(&mut w);

    let log = EventLog::attach(&mut w.iterator);
    let next = w.iterator.remove().unwrap();

    assert_eq!(next.map(|s| s.caption()).as_deref(), Some("Gift wrap"));
    assert!(!w.iterator.contains(&shipping));
    assert_eq!(
        log.events()[1],
        Recorded {
            kind: EventKind::Advanced,
            transition: Some(Transition::Move),
            previous: Some("Shipping".to_string()),
            current: Some("Gift wrap".to_string()),
        }
    );
    assert_eq!(log.events()[0].kind, EventKind::ElementRemoved);

    // The removed step no longer affects completion
    shipping.fire_complete();
    assert!(!w.iterator.is_step_complete(&shipping));
}

/// Removing the last step leaves an empty, complete wizard
#[test]
fn test_remove_only_step() {
    let mut w = wizard(SINGLE_STEP_YAML);
    w.iterator.next().unwrap();

    assert_eq!(w.iterator.remove().unwrap(), None);
    assert!(w.iterator.is_empty());
    assert!(w.iterator.current().is_none());
    assert!(w.iterator.is_complete());
    assert!(matches!(
        w.iterator.remove(),
        Err(StepperError::NoCurrentStep)
    ));
}

/// Slots cannot be overwritten
#[test]
fn test_set_is_unsupported() {
    let mut w = wizard(SINGLE_STEP_YAML);
    let err = w.iterator.set(Step::new("Other")).unwrap_err();
    assert!(matches!(err, StepperError::UnsupportedMutation(_)));
    assert_eq!(captions(&w), vec!["Confirm"]);
}
