//! Test: Scripted sessions - driving a wizard from an action source

use crate::helpers::*;
use stepper::render::Layout;
use stepper::session::SessionStatus;

/// A full run through the checkout, skipping and coming back to the gift step
#[tokio::test]
async fn test_session_completes_checkout() {
    let result = run_session(
        wizard(CHECKOUT_YAML),
        Layout::Horizontal,
        &["next", "next", "skip", "next", "next", "next"],
    )
    .await;

    assert_eq!(result.outcome.status, SessionStatus::Completed);
    assert_eq!(result.outcome.wizard, "Checkout");
    assert_eq!(
        result.outcome.visited,
        vec!["cart", "shipping", "gift", "payment"]
    );
    assert_eq!(result.outcome.current, id("gift"));
    assert_eq!(result.outcome.refused, 0);
    assert_eq!(
        result.moves(),
        vec![
            (None, id("cart")),
            (id("cart"), id("shipping")),
            (id("shipping"), id("gift")),
            (id("gift"), id("payment")),
            (id("payment"), id("gift")),
        ]
    );

    // The session stops asking for actions once the wizard is complete
    assert_eq!(result.polled, 5);
    assert!(result.output.contains("All steps complete"));
}

/// Running out of actions abandons the session where it stands
#[tokio::test]
async fn test_session_abandoned_when_script_runs_out() {
    let result = run_session(wizard(CHECKOUT_YAML), Layout::Vertical, &["next"]).await;

    assert_eq!(result.outcome.status, SessionStatus::Abandoned);
    assert_eq!(result.outcome.visited, vec!["cart"]);
    assert_eq!(result.outcome.current, id("shipping"));
    assert_eq!(result.polled, 2);
}

/// Cancel only works on cancellable steps, refusals are shown on the step
#[tokio::test]
async fn test_cancel_refused_until_cancellable() {
    let result = run_session(
        wizard(CHECKOUT_YAML),
        Layout::Vertical,
        &["cancel", "next", "next", "next", "cancel"],
    )
    .await;

    assert_eq!(result.outcome.status, SessionStatus::Cancelled);
    assert_eq!(result.outcome.refused, 1);
    assert_eq!(result.outcome.current, id("payment"));
    assert_eq!(result.outcome.visited, vec!["cart", "shipping", "gift"]);
    assert!(result.output.contains("This step cannot be cancelled"));
}

/// Illegal jumps and unknown ids are refused without ending the session
#[tokio::test]
async fn test_illegal_actions_are_refused() {
    let result = run_session(
        wizard(CHECKOUT_YAML),
        Layout::List,
        &["back", "skip", "goto:payment", "goto:nowhere", "next"],
    )
    .await;

    assert_eq!(result.outcome.status, SessionStatus::Abandoned);
    assert_eq!(result.outcome.refused, 4);
    assert_eq!(result.outcome.current, id("shipping"));
    assert!(result.output.contains("No legal move transition to 'Payment'"));
    assert!(result.output.contains("No step with id 'nowhere'"));
}

/// Jumps and resets under free navigation
#[tokio::test]
async fn test_goto_and_reset() {
    let result = run_session(
        wizard_with_policy(CHECKOUT_YAML, false),
        Layout::Horizontal,
        &["goto:payment", "next", "reset:payment", "goto:payment"],
    )
    .await;

    assert_eq!(result.outcome.status, SessionStatus::Abandoned);
    assert_eq!(result.outcome.refused, 0);
    assert!(result.outcome.visited.is_empty());
    assert_eq!(result.outcome.current, id("payment"));
    assert_eq!(
        result.moves(),
        vec![
            (None, id("cart")),
            (id("cart"), id("payment")),
            (id("payment"), id("cart")),
            (id("cart"), id("payment")),
        ]
    );
}

/// Removing the first step mid-session
#[tokio::test]
async fn test_remove_in_session() {
    let result = run_session(
        wizard(CHECKOUT_YAML),
        Layout::Vertical,
        &["remove", "next", "next", "next"],
    )
    .await;

    assert_eq!(result.outcome.status, SessionStatus::Completed);
    assert_eq!(result.outcome.visited, vec!["shipping", "gift", "payment"]);
    assert_eq!(result.moves()[1], (id("cart"), id("shipping")));
}

/// A read-only wizard never starts moving
#[tokio::test]
async fn test_read_only_session() {
    let mut w = wizard(CHECKOUT_YAML);
    w.iterator.set_read_only(true);

    let result = run_session(w, Layout::List, &["next", "next"]).await;

    assert_eq!(result.outcome.status, SessionStatus::Abandoned);
    assert!(result.outcome.visited.is_empty());
    assert_eq!(result.outcome.current, None);
    assert!(result.outcome.transitions.is_empty());
    assert!(result.output.contains("Read-only"));
}
