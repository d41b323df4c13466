//! List layout: step list on the left, active content on the right

use crate::render::{status_line, Renderer, StepperView, Theme};
use console::{pad_str, style, Alignment};
use std::io::{self, Write};

pub struct ListRenderer<W: Write + Send> {
    out: W,
    theme: Theme,
    buttons_hidden: bool,
    feedback: Option<String>,
}

impl<W: Write + Send> ListRenderer<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            theme,
            buttons_hidden: false,
            feedback: None,
        }
    }

    fn panel(&self, view: &StepperView) -> Vec<String> {
        let mut panel = Vec::new();

        if let Some(active) = &view.active {
            panel.push(style(&active.caption).bold().to_string());
            if let Some(description) = &active.description {
                panel.push(description.clone());
            }
            if let Some(error) = &active.error {
                panel.push(style(error).red().to_string());
            }
        }
        panel.push(String::new());

        if let Some(message) = &self.feedback {
            panel.push(style(message).italic().to_string());
        } else if let Some(status) = status_line(view) {
            panel.push(status);
        } else if !self.buttons_hidden && !view.buttons.is_empty() {
            let (left, right) = view.buttons.format();
            panel.push(
                [left, right]
                    .into_iter()
                    .filter(|b| !b.is_empty())
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }

        panel
    }
}

impl<W: Write + Send> Renderer for ListRenderer<W> {
    fn render(&mut self, view: &StepperView) -> io::Result<()> {
        let entries: Vec<String> = view
            .labels
            .iter()
            .map(|l| {
                let marker = if l.active { "›" } else { " " };
                format!("{} {}", marker, l.styled(&self.theme))
            })
            .collect();
        let panel = self.panel(view);
        let rows = entries.len().max(panel.len());
        let separator = style("│").dim();

        for row in 0..rows {
            let entry = entries.get(row).map(String::as_str).unwrap_or("");
            let content = panel.get(row).map(String::as_str).unwrap_or("");
            let left = pad_str(entry, self.theme.list_width, Alignment::Left, Some("…"));
            writeln!(self.out, "{} {} {}", left, separator, content)?;
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
