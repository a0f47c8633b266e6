//! Flowview CLI - inspect workflow DAGs as the view engine sees them

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use flowview::error::{FixSuggestion, FlowViewError};
use flowview::{FlowViewConfig, GraphView, WorkflowFragment};

#[derive(Parser)]
#[command(name = "flowview")]
#[command(about = "Flowview - incremental visible-set engine for workflow DAGs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a workflow file, replay toggles, and print the visible graph
    Show {
        /// Path to a .yaml/.yml/.json workflow file
        file: PathBuf,

        /// Toggle a node after loading (repeatable, applied in order)
        #[arg(short, long = "toggle", value_name = "ID")]
        toggle: Vec<String>,

        /// Expand every reachable node before applying toggles
        #[arg(long)]
        expand_all: bool,

        /// Output format (text, json); overrides the configured default
        #[arg(short, long)]
        format: Option<String>,

        /// Print the mutation event log after the snapshot
        #[arg(long)]
        events: bool,
    },

    /// Parse a workflow file and report what the engine would see
    Validate {
        /// Path to a .yaml/.yml/.json workflow file
        file: PathBuf,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show {
            file,
            toggle,
            expand_all,
            format,
            events,
        } => show_workflow(&file, &toggle, expand_all, format, events),
        Commands::Validate { file } => validate_workflow(&file),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

/// Read and parse a workflow file by extension
fn load_fragment(file: &Path) -> Result<WorkflowFragment, FlowViewError> {
    if !file.exists() {
        return Err(FlowViewError::WorkflowNotFound {
            path: file.display().to_string(),
        });
    }

    let content = fs::read_to_string(file)?;
    match file.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => WorkflowFragment::from_yaml_str(&content),
        Some("json") => WorkflowFragment::from_json_str(&content),
        other => Err(FlowViewError::UnsupportedFormat {
            extension: other.unwrap_or("<none>").to_string(),
        }),
    }
}

fn show_workflow(
    file: &Path,
    toggles: &[String],
    expand_all: bool,
    format_override: Option<String>,
    events: bool,
) -> Result<(), FlowViewError> {
    let config = FlowViewConfig::load()?.with_env();
    let format = format_override.unwrap_or_else(|| config.format().to_string());

    let fragment = load_fragment(file)?;
    let mut view = GraphView::new();
    view.load_workflow(&fragment)?;

    if expand_all || config.defaults.expand_all {
        view.expand_all()?;
    }
    for id in toggles {
        view.toggle(id)?;
    }

    let snapshot = view.snapshot();
    match format.as_str() {
        "json" => println!("{}", snapshot.to_json()?),
        "text" => print!("{}", snapshot.render_text()),
        other => {
            return Err(FlowViewError::ConfigError {
                reason: format!("Unknown format: {}. Use 'text' or 'json'", other),
            })
        }
    }

    if events {
        println!("{}", "Events".cyan().bold());
        for event in view.events().events() {
            println!("[{:>6}ms] {:?}", event.timestamp_ms, event.kind);
        }
    }

    Ok(())
}

fn validate_workflow(file: &Path) -> Result<(), FlowViewError> {
    let fragment = load_fragment(file)?;
    let roots = fragment.root_ids();

    println!(
        "{} Workflow '{}' is valid",
        "✓".green(),
        file.display()
    );
    println!("  Items: {}", fragment.len());
    match roots.as_slice() {
        [] => println!("  Root: {} (graph stays empty until one is merged)", "none".yellow()),
        [root] => println!("  Root: {}", root),
        [root, rest @ ..] => println!(
            "  Root: {} ({} more declared, ignored first-wins: {})",
            root,
            rest.len(),
            rest.join(", ")
        ),
    }

    Ok(())
}
