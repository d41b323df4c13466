//! Action sources - where a session's user intents come from

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// A single user intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Next,
    Back,
    Skip,
    /// Jump to the step with this configured id
    Goto(String),
    /// Invalidate the step with this configured id
    Reset(String),
    /// Remove the current step
    Remove,
    Cancel,
    Quit,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (verb, arg) = match s.split_once(':') {
            Some((verb, arg)) => (verb.trim(), Some(arg.trim())),
            None => (s, None),
        };

        let action = match (verb.to_ascii_lowercase().as_str(), arg) {
            ("next" | "n", None) => Action::Next,
            ("back" | "b", None) => Action::Back,
            ("skip" | "s", None) => Action::Skip,
            ("remove", None) => Action::Remove,
            ("cancel" | "c", None) => Action::Cancel,
            ("quit" | "q", None) => Action::Quit,
            ("goto" | "g", Some(id)) if !id.is_empty() => Action::Goto(id.to_string()),
            ("reset" | "r", Some(id)) if !id.is_empty() => Action::Reset(id.to_string()),
            ("goto" | "g" | "reset" | "r", _) => bail!("Action '{}' needs a step id, e.g. '{}:cart'", verb, verb),
            _ => bail!("Unknown action: '{}'", s),
        };

        Ok(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Next => write!(f, "next"),
            Action::Back => write!(f, "back"),
            Action::Skip => write!(f, "skip"),
            Action::Goto(id) => write!(f, "goto:{}", id),
            Action::Reset(id) => write!(f, "reset:{}", id),
            Action::Remove => write!(f, "remove"),
            Action::Cancel => write!(f, "cancel"),
            Action::Quit => write!(f, "quit"),
        }
    }
}

/// Trait for action sources - allows scripted and interactive sessions
#[async_trait]
pub trait ActionSource: Send {
    /// Wait for the next action. `None` when the source is exhausted.
    async fn next_action(&mut self) -> Result<Option<Action>>;
}

/// Actions fixed up front
#[derive(Debug, Clone, Default)]
pub struct ScriptedActions {
    actions: VecDeque<Action>,
}

impl ScriptedActions {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    /// Parse a comma separated script such as `next,skip,goto:cart`
    pub fn parse(script: &str) -> Result<Self> {
        let actions = script
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Action::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(actions))
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

#[async_trait]
impl ActionSource for ScriptedActions {
    async fn next_action(&mut self) -> Result<Option<Action>> {
        Ok(self.actions.pop_front())
    }
}

/// Actions read line by line, e.g. from stdin
///
/// Unparsable lines are reported through `tracing` and skipped.
pub struct LineActions<R> {
    lines: Lines<R>,
}

/// Interactive source reading from the terminal
pub type StdinActions = LineActions<BufReader<Stdin>>;

impl StdinActions {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send> LineActions<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> ActionSource for LineActions<R> {
    async fn next_action(&mut self) -> Result<Option<Action>> {
        while let Some(line) = self.lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse() {
                Ok(action) => return Ok(Some(action)),
                Err(err) => tracing::warn!("{}", err),
            }
        }
        Ok(None)
    }
}
