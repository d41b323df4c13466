//! Test: Stepper rendering - what each layout shows while navigating

use crate::helpers::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stepper::render::{create_renderer, LabelIconStrategy, Layout, SharedBuffer, Theme};
use stepper::session::Stepper;
use stepper::StepperError;

fn build_stepper(layout: Layout, icons: LabelIconStrategy) -> (Stepper, SharedBuffer) {
    let w = wizard(CHECKOUT_YAML);
    let buffer = SharedBuffer::new();
    let renderer = create_renderer(layout, Theme::default(), Box::new(buffer.clone()));
    (Stepper::new(w.iterator, renderer, icons), buffer)
}

fn redraw(stepper: &mut Stepper, buffer: &SharedBuffer) -> String {
    buffer.clear();
    stepper.refresh().unwrap();
    console::strip_ansi_codes(&buffer.contents()).to_string()
}

/// Labels reflect completed, editable, skipped and active steps
#[test]
fn test_vertical_labels_follow_progress() {
    let (mut stepper, buffer) = build_stepper(Layout::Vertical, LabelIconStrategy::Default);
    stepper.start().unwrap();
    stepper.next().unwrap();
    stepper.next().unwrap();
    stepper.skip().unwrap();

    let output = redraw(&mut stepper, &buffer);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "✎ Cart");
    assert_eq!(lines[1], "✓ Shipping");
    assert_eq!(lines[2], "» Gift wrap");
    assert_eq!(lines[3], "(4) Payment");
    assert_eq!(lines[4], "  │ [Back] [Cancel] [Next]");
}

/// Numbers-only labels never show state icons
#[test]
fn test_numbers_only_labels() {
    let (mut stepper, buffer) = build_stepper(Layout::Vertical, LabelIconStrategy::NumbersOnly);
    stepper.start().unwrap();
    stepper.next().unwrap();

    let output = redraw(&mut stepper, &buffer);
    assert!(output.starts_with("(1) Cart\n(2) Shipping\n"));
}

/// Every navigation that changes something renders exactly once
#[test]
fn test_renders_once_per_change() {
    let (mut stepper, buffer) = build_stepper(Layout::Horizontal, LabelIconStrategy::Default);
    stepper.start().unwrap();
    let renders = |buffer: &SharedBuffer| {
        console::strip_ansi_codes(&buffer.contents())
            .matches("Shipping")
            .count()
    };
    assert_eq!(renders(&buffer), 1);

    buffer.clear();
    stepper.next().unwrap();
    // Label bar and content block both name the active step
    assert_eq!(renders(&buffer), 2);

    buffer.clear();
    assert!(stepper.skip().is_err());
    assert_eq!(buffer.contents(), "");
}

/// Completion is announced once and hides the buttons
#[test]
fn test_completion_hides_buttons() {
    let (mut stepper, buffer) = build_stepper(Layout::List, LabelIconStrategy::Default);
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = completions.clone();
    stepper.add_complete_handler(move |s| {
        assert!(s.is_complete());
        counter.fetch_add(1, Ordering::SeqCst);
    });

    stepper.start().unwrap();
    for _ in 0..4 {
        stepper.next().unwrap();
    }
    assert!(stepper.is_complete());
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    // Further presses are no-ops
    stepper.next().unwrap();
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    let output = redraw(&mut stepper, &buffer);
    assert!(output.contains("All steps complete"));
    assert!(!output.contains("[Next]"));
}

/// Locking freezes navigation until unlocked
#[test]
fn test_lock_shows_status() {
    let (mut stepper, buffer) = build_stepper(Layout::Horizontal, LabelIconStrategy::Default);
    stepper.start().unwrap();
    stepper.lock().unwrap();

    assert!(matches!(stepper.next(), Err(StepperError::Locked)));
    assert!(matches!(stepper.back(), Err(StepperError::Locked)));

    let output = redraw(&mut stepper, &buffer);
    assert!(output.contains("Stepper locked"));
    assert!(!output.contains("[Next]"));

    stepper.unlock().unwrap();
    let output = redraw(&mut stepper, &buffer);
    assert!(output.contains("[Next]"));
}

/// Errors mark the label and show under the content
#[test]
fn test_error_message_on_step() {
    let (mut stepper, buffer) = build_stepper(Layout::Horizontal, LabelIconStrategy::Default);
    stepper.start().unwrap();
    stepper.show_current_error("Cart is empty").unwrap();

    let output = redraw(&mut stepper, &buffer);
    assert!(output.starts_with("! Cart"));
    assert!(output.contains("! Cart is empty"));

    // Completing the step clears its error
    stepper.next().unwrap();
    let output = redraw(&mut stepper, &buffer);
    assert!(!output.contains("Cart is empty"));
}
