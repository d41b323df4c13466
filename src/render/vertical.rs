//! Vertical layout: one row per step, the active one expanded

use crate::render::{status_line, Renderer, StepperView, Theme};
use console::style;
use std::io::{self, Write};

const GUTTER: &str = "  │ ";

pub struct VerticalRenderer<W: Write + Send> {
    out: W,
    theme: Theme,
    buttons_hidden: bool,
    feedback: Option<String>,
}

impl<W: Write + Send> VerticalRenderer<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            theme,
            buttons_hidden: false,
            feedback: None,
        }
    }
}

impl<W: Write + Send> Renderer for VerticalRenderer<W> {
    fn render(&mut self, view: &StepperView) -> io::Result<()> {
        for label in &view.labels {
            writeln!(self.out, "{}", label.styled(&self.theme))?;

            if !label.active {
                continue;
            }

            let gutter = style(GUTTER).dim();
            if let Some(active) = &view.active {
                if let Some(description) = &active.description {
                    writeln!(self.out, "{}{}", gutter, description)?;
                }
                if let Some(error) = &active.error {
                    writeln!(self.out, "{}{}", gutter, style(error).red())?;
                }
            }

            if let Some(message) = &self.feedback {
                writeln!(self.out, "{}{}", gutter, style(message).italic())?;
            } else if !self.buttons_hidden && status_line(view).is_none() && !view.buttons.is_empty() {
                let (left, right) = view.buttons.format();
                let buttons = [left, right]
                    .into_iter()
                    .filter(|b| !b.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(self.out, "{}{}", gutter, buttons)?;
            }
        }

        if let Some(status) = status_line(view) {
            writeln!(self.out, "{}", status)?;
        }
        writeln!(self.out)?;

        self.out.flush()
    }

    fn show_feedback(&mut self, message: Option<&str>) -> io::Result<()> {
        self.feedback = message.map(str::to_string);
        Ok(())
    }

    fn set_buttons_hidden(&mut self, hidden: bool) {
        self.buttons_hidden = hidden;
    }
}
