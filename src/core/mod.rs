//! Core domain models for the stepper
//!
//! This module defines steps, their visitation state, the navigation
//! state machine over a step sequence and the events it publishes.

pub mod config;
pub mod error;
pub mod event;
pub mod iterator;
pub mod state;
pub mod step;
pub mod wizard;

pub use error::*;
pub use event::*;
pub use iterator::*;
pub use state::*;
pub use step::*;
pub use wizard::*;
