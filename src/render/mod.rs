//! Renderers - terminal layouts for a stepper
//!
//! Renderers own no navigation logic. The stepper facade hands them a
//! [`StepperView`] snapshot after every change and forwards feedback
//! messages and button visibility.

pub mod horizontal;
pub mod label;
pub mod list;
pub mod vertical;

pub use horizontal::HorizontalRenderer;
pub use label::{LabelIcon, LabelIconStrategy, LabelProvider, StepLabel};
pub use list::ListRenderer;
pub use vertical::VerticalRenderer;

use console::style;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Visual layout of a stepper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Label bar on top, content below, buttons at the bottom
    #[default]
    Horizontal,
    /// One row per step, the active one expanded in place
    Vertical,
    /// Step list on the left, active content on the right
    List,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::Horizontal => "horizontal",
            Layout::Vertical => "vertical",
            Layout::List => "list",
        };
        f.write_str(name)
    }
}

/// Symbols and proportions used by the renderers
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub complete_icon: String,
    pub skipped_icon: String,
    pub editable_icon: String,
    pub error_icon: String,
    /// Character repeated between labels and below the label bar
    pub divider: char,
    /// Share of the free label bar width given to dividers (0.0 - 1.0)
    pub divider_ratio: f32,
    /// Draw a line between the label bar and the content
    pub show_divider: bool,
    /// Width of the step column in the list layout
    pub list_width: usize,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            complete_icon: "✓".to_string(),
            skipped_icon: "»".to_string(),
            editable_icon: "✎".to_string(),
            error_icon: "!".to_string(),
            divider: '─',
            divider_ratio: 0.75,
            show_divider: true,
            list_width: 24,
        }
    }
}

/// Which buttons the active step offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonBar {
    pub back: bool,
    pub cancel: bool,
    pub skip: bool,
    pub next: bool,
}

impl ButtonBar {
    /// Left and right half of the button bar
    pub fn format(&self) -> (String, String) {
        let back = if self.back {
            style("[Back]").to_string()
        } else {
            String::new()
        };

        let right: Vec<String> = [
            (self.cancel, "[Cancel]"),
            (self.skip, "[Skip]"),
            (self.next, "[Next]"),
        ]
        .iter()
        .filter(|(visible, _)| *visible)
        .map(|(_, text)| style(*text).bold().to_string())
        .collect();

        (back, right.join(" "))
    }

    pub fn is_empty(&self) -> bool {
        !(self.back || self.cancel || self.skip || self.next)
    }
}

/// The active step as shown in the content area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveStep {
    pub number: usize,
    pub caption: String,
    pub description: Option<String>,
    pub error: Option<String>,
}

/// Snapshot of everything a renderer needs to draw a stepper
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepperView {
    pub labels: Vec<StepLabel>,
    pub active: Option<ActiveStep>,
    pub buttons: ButtonBar,
    pub locked: bool,
    pub read_only: bool,
    pub complete: bool,
}

/// Capability interface every layout implements
pub trait Renderer: Send {
    /// Draw the stepper
    fn render(&mut self, view: &StepperView) -> io::Result<()>;

    /// Show a transition message, or hide it with `None`
    fn show_feedback(&mut self, message: Option<&str>) -> io::Result<()>;

    /// Hide or show the button bar
    fn set_buttons_hidden(&mut self, hidden: bool);
}

/// Create a renderer for the given layout
pub fn create_renderer(
    layout: Layout,
    theme: Theme,
    out: Box<dyn Write + Send>,
) -> Box<dyn Renderer> {
    match layout {
        Layout::Horizontal => Box::new(HorizontalRenderer::new(out, theme)),
        Layout::Vertical => Box::new(VerticalRenderer::new(out, theme)),
        Layout::List => Box::new(ListRenderer::new(out, theme)),
    }
}

/// Footer shown instead of buttons
pub(crate) fn status_line(view: &StepperView) -> Option<String> {
    if view.complete {
        Some(style("All steps complete").green().bold().to_string())
    } else if view.locked {
        Some(style("Stepper locked").dim().to_string())
    } else if view.read_only {
        Some(style("Read-only").dim().to_string())
    } else {
        None
    }
}

/// In-memory writer that can be cloned and inspected, e.g. in tests
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
