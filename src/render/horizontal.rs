//! Horizontal layout: label bar, content, button bar

use crate::render::{status_line, Renderer, StepLabel, StepperView, Theme};
use console::{measure_text_width, style};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// Renders the step labels side by side, joined by dividers
pub struct HorizontalRenderer<W: Write + Send> {
    out: W,
    theme: Theme,
    width: usize,
    buttons_hidden: bool,
    feedback: Option<String>,
    spinner: Option<ProgressBar>,
}

impl<W: Write + Send> HorizontalRenderer<W> {
    /// Create a renderer as wide as the terminal (80 columns if unknown)
    pub fn new(out: W, theme: Theme) -> Self {
        let width = term_size::dimensions_stdout()
            .map(|(w, _)| w)
            .unwrap_or(80);
        Self {
            out,
            theme,
            width,
            buttons_hidden: false,
            feedback: None,
            spinner: None,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Labels joined by dividers that take a share of the free width
    pub(crate) fn label_bar(&self, labels: &[StepLabel]) -> String {
        let rendered: Vec<String> = labels.iter().map(|l| l.styled(&self.theme)).collect();
        if rendered.len() < 2 {
            return rendered.concat();
        }

        let used: usize = rendered.iter().map(|l| measure_text_width(l) + 2).sum();
        let dividers = rendered.len() - 1;
        let free = self.width.saturating_sub(used) / dividers;
        let length = ((free as f32) * self.theme.divider_ratio) as usize;
        let divider = format!(
            " {} ",
            self.theme.divider.to_string().repeat(length.max(1))
        );

        rendered.join(&style(divider).dim().to_string())
    }

    fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl<W: Write + Send> Renderer for HorizontalRenderer<W> {
    fn render(&mut self, view: &StepperView) -> io::Result<()> {
        match &self.feedback {
            Some(message) => writeln!(self.out, "{}", style(message).italic())?,
            None => writeln!(self.out, "{}", self.label_bar(&view.labels))?,
        }

        if self.theme.show_divider {
            let line = self.theme.divider.to_string().repeat(self.width);
            writeln!(self.out, "{}", style(line).dim())?;
        }

        if let Some(active) = &view.active {
            writeln!(self.out, "{}", style(&active.caption).bold())?;
            if let Some(description) = &active.description {
                writeln!(self.out, "{}", description)?;
            }
            if let Some(error) = &active.error {
                writeln!(self.out, "{} {}", style(&self.theme.error_icon).red(), style(error).red())?;
            }
        }
        writeln!(self.out)?;

        if let Some(status) = status_line(view) {
            writeln!(self.out, "{}", status)?;
        } else if !self.buttons_hidden && self.feedback.is_none() && !view.buttons.is_empty() {
            let (left, right) = view.buttons.format();
            let padding = self
                .width
                .saturating_sub(measure_text_width(&left) + measure_text_width(&right));
            writeln!(self.out, "{}{}{}", left, " ".repeat(padding), right)?;
        }

        self.out.flush()
    }

    fn show_feedback(&mut self, message: Option<&str>) -> io::Result<()> {
        self.stop_spinner();
        self.feedback = message.map(str::to_string);
        if let Some(message) = message {
            self.start_spinner(message);
        }
        Ok(())
    }

    fn set_buttons_hidden(&mut self, hidden: bool) {
        self.buttons_hidden = hidden;
    }
}

impl<W: Write + Send> Drop for HorizontalRenderer<W> {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}
