//! CLI command definitions

use crate::render::Layout;
use clap::Args;

/// Run a wizard
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to wizard YAML file
    #[arg(short, long)]
    pub file: String,

    /// Override the configured layout
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Allow free navigation even if the wizard is linear
    #[arg(long)]
    pub free: bool,

    /// Show the wizard without allowing progress
    #[arg(long)]
    pub read_only: bool,

    /// Comma separated actions instead of reading stdin
    /// (next, back, skip, goto:ID, reset:ID, remove, cancel, quit)
    #[arg(long)]
    pub script: Option<String>,

    /// Print the session outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Validate a wizard configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to wizard YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List the steps of a wizard
#[derive(Debug, Args, Clone)]
pub struct ListCommand {
    /// Path to wizard YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Layout argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LayoutArg {
    Horizontal,
    Vertical,
    List,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Horizontal => Layout::Horizontal,
            LayoutArg::Vertical => Layout::Vertical,
            LayoutArg::List => Layout::List,
        }
    }
}
