//! `pbin box` command - Box management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{confirm_removal, effective_format, escape_csv, open_store};
use crate::cli::{table, GlobalOpts, OutputFormat};
use crate::core::BoxRecord;

#[derive(Subcommand, Debug)]
pub enum BoxCommands {
    /// Register a box under an existing location (idempotent on its code)
    Add(AddArgs),

    /// List boxes
    List(ListArgs),

    /// Show one box by code
    Show(ShowArgs),

    /// Delete a box and everything inside it
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Box code (natural key, globally unique)
    pub code: String,

    /// Name of the location the box sits at
    #[arg(long, short = 'l')]
    pub location: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only boxes at this location
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Show only the count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Box code, or a surrogate id with --id
    pub code: String,

    /// Treat the argument as a surrogate id
    #[arg(long)]
    pub id: bool,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Box id
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a box subcommand
pub fn run(cmd: BoxCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        BoxCommands::Add(args) => run_add(args, global),
        BoxCommands::List(args) => run_list(args, global),
        BoxCommands::Show(args) => run_show(args, global),
        BoxCommands::Rm(args) => run_rm(args, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let resolved = store
        .add_box(&args.code, &args.location)
        .map_err(|e| miette::miette!("{}", e))?;

    if effective_format(global) == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&resolved).into_diagnostic()?
        );
        return Ok(());
    }
    if global.quiet {
        return Ok(());
    }

    let record = resolved.record();
    if resolved.was_created() {
        println!(
            "{} Added box {} at {} (id {})",
            style("✓").green(),
            style(&record.code).cyan(),
            style(&record.location_name).yellow(),
            record.box_id
        );
    } else {
        println!(
            "{} Box {} already exists at {} (id {})",
            style("=").yellow(),
            style(&record.code).cyan(),
            style(&record.location_name).yellow(),
            record.box_id
        );
    }
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let boxes = match args.location {
        Some(ref name) => store.boxes_for_location(name),
        None => store.list_boxes(),
    }
    .map_err(|e| miette::miette!("{}", e))?;

    if args.count {
        println!("{}", boxes.len());
        return Ok(());
    }

    match effective_format(global) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&boxes).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("id,code,location,created");
            for record in &boxes {
                println!(
                    "{},{},{},{}",
                    record.box_id,
                    escape_csv(&record.code),
                    escape_csv(&record.location_name),
                    record.created_at.format("%Y-%m-%d")
                );
            }
        }
        OutputFormat::Id => {
            for record in &boxes {
                println!("{}", record.box_id);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => {
            if boxes.is_empty() {
                println!("No boxes found.");
                return Ok(());
            }
            let rows = boxes
                .iter()
                .map(|record| {
                    vec![
                        record.box_id.to_string(),
                        record.code.clone(),
                        record.location_name.clone(),
                        record.created_at.format("%Y-%m-%d").to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                table::render(&["ID", "CODE", "LOCATION", "CREATED"], rows)
            );
            if !global.quiet {
                println!("{} box(es)", style(boxes.len()).cyan());
            }
        }
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let record = if args.id {
        let id: i64 = args
            .code
            .parse()
            .map_err(|_| miette::miette!("'{}' is not a numeric id", args.code))?;
        store.box_by_id(id)
    } else {
        store.box_by_code(&args.code)
    }
    .map_err(|e| miette::miette!("{}", e))?;

    print_box(&record, global)
}

fn print_box(record: &BoxRecord, global: &GlobalOpts) -> Result<()> {
    match effective_format(global) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(record).into_diagnostic()?
            );
        }
        OutputFormat::Id => {
            println!("{}", record.box_id);
        }
        _ => {
            println!("{}", style("─".repeat(50)).dim());
            println!("{}: {}", style("ID").bold(), record.box_id);
            println!("{}: {}", style("Code").bold(), style(&record.code).cyan());
            println!(
                "{}: {}",
                style("Location").bold(),
                style(&record.location_name).yellow()
            );
            println!(
                "{}: {}",
                style("Created").bold(),
                record.created_at.format("%Y-%m-%d %H:%M")
            );
            println!("{}", style("─".repeat(50)).dim());
        }
    }
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let record = store
        .box_by_id(args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    let prompt = format!(
        "Delete box '{}' (id {}) and everything inside it?",
        record.code, args.id
    );
    if !confirm_removal(&prompt, args.yes)? {
        return Ok(());
    }

    let removed_items = store
        .delete_box(args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Deleted box {} and {} inventory item(s)",
            style("✓").green(),
            style(&record.code).cyan(),
            removed_items
        );
    }
    Ok(())
}
