//! Scenario-based tests for stepper

mod dynamic_steps;
mod free_navigation;
mod scripted_sessions;
mod stepper_rendering;
