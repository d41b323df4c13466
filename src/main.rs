use anyhow::{Context, Result};
use stepper::cli::commands::{ListCommand, RunCommand, ValidateCommand};
use stepper::cli::output::*;
use stepper::cli::{Cli, Command};
use stepper::core::config::WizardConfig;
use stepper::render::{create_renderer, Layout, Theme};
use stepper::session::{ActionSource, ScriptedActions, StdinActions, WizardSession};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging on stderr, stdout belongs to the renderer
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Run(cmd) => run_wizard(cmd).await?,
        Command::Validate(cmd) => validate_wizard(cmd)?,
        Command::List(cmd) => list_steps(cmd)?,
    }

    Ok(())
}

async fn run_wizard(cmd: &RunCommand) -> Result<()> {
    let config = WizardConfig::from_file(&cmd.file)
        .with_context(|| format!("Failed to load wizard config from {}", cmd.file))?;

    println!("{} Loaded wizard: {}", INFO, style(&config.name).bold());

    let mut wizard = config.to_wizard()?;
    if cmd.free {
        wizard.iterator.set_linear(false);
    }
    if cmd.read_only {
        wizard.iterator.set_read_only(true);
    }
    let layout: Layout = cmd.layout.map(Into::into).unwrap_or(wizard.layout);

    let mut source: Box<dyn ActionSource> = match &cmd.script {
        Some(script) => Box::new(ScriptedActions::parse(script).context("Invalid action script")?),
        None => {
            println!(
                "{} Type next, back, skip, goto:ID, reset:ID, remove, cancel or quit",
                ROCKET
            );
            Box::new(StdinActions::stdin())
        }
    };

    let renderer = create_renderer(layout, Theme::default(), Box::new(std::io::stdout()));
    let mut session = WizardSession::new(wizard, renderer);
    let outcome = session.run(source.as_mut()).await?;

    println!();
    for record in &outcome.transitions {
        println!("  {}", format_transition(record));
    }
    let iterator = session.stepper().iterator();
    for step in iterator.steps() {
        println!(
            "  {} {}",
            format_step_state(&iterator.step_state(step)),
            step.caption()
        );
    }
    println!("\n{}", format_outcome(&outcome));

    if cmd.json {
        println!("\n{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}

fn validate_wizard(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating wizard...", INFO);

    match WizardConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Wizard configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Steps: {}", style(config.steps.len()).cyan());
            println!(
                "  Navigation: {}",
                style(if config.linear { "linear" } else { "free" }).cyan()
            );
            println!("  Layout: {}", style(config.layout).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}

fn list_steps(cmd: &ListCommand) -> Result<()> {
    let config = WizardConfig::from_file(&cmd.file)
        .with_context(|| format!("Failed to load wizard config from {}", cmd.file))?;

    if cmd.json {
        let steps = serde_json::json!({
            "name": config.name,
            "steps": config.steps,
        });
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }

    println!("{} Steps of {}:", INFO, style(&config.name).bold());
    for (i, step) in config.steps.iter().enumerate() {
        println!("{}", format_step_config(i + 1, step));
    }

    Ok(())
}
