//! `pbin part` command - Part catalog management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{
    confirm_removal, effective_format, escape_csv, open_store, truncate_str,
};
use crate::cli::{table, GlobalOpts, OutputFormat};
use crate::core::Part;

#[derive(Subcommand, Debug)]
pub enum PartCommands {
    /// Register a part (idempotent on its part number)
    Add(AddArgs),

    /// List catalog parts
    List(ListArgs),

    /// Show one part
    Show(ShowArgs),

    /// Print the id for a part number
    Resolve(ResolveArgs),

    /// Delete a part (blocked while inventory still references it)
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Part number (natural key, case-sensitive)
    pub part_number: String,

    /// Catalog description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show only the count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Part number, or a surrogate id with --id
    pub part_number: String,

    /// Treat the argument as a surrogate id
    #[arg(long)]
    pub id: bool,
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Part number
    pub part_number: String,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Part id
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a part subcommand
pub fn run(cmd: PartCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PartCommands::Add(args) => run_add(args, global),
        PartCommands::List(args) => run_list(args, global),
        PartCommands::Show(args) => run_show(args, global),
        PartCommands::Resolve(args) => run_resolve(args, global),
        PartCommands::Rm(args) => run_rm(args, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let resolved = store
        .add_part(&args.part_number, args.description.as_deref())
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

    let part = resolved.record();
    if resolved.was_created() {
        println!(
            "{} Added part {} (id {})",
            style("✓").green(),
            style(&part.part_number).cyan(),
            part.part_id
        );
    } else {
        println!(
            "{} Part {} already exists (id {})",
            style("=").yellow(),
            style(&part.part_number).cyan(),
            part.part_id
        );
    }
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let parts = store.list_parts().map_err(|e| miette::miette!("{}", e))?;

    if args.count {
        println!("{}", parts.len());
        return Ok(());
    }

    match effective_format(global) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&parts).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("id,part_number,description,created");
            for part in &parts {
                println!(
                    "{},{},{},{}",
                    part.part_id,
                    escape_csv(&part.part_number),
                    escape_csv(part.description.as_deref().unwrap_or("")),
                    part.created_at.format("%Y-%m-%d")
                );
            }
        }
        OutputFormat::Id => {
            for part in &parts {
                println!("{}", part.part_id);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => {
            if parts.is_empty() {
                println!("No parts found.");
                return Ok(());
            }
            let rows = parts
                .iter()
                .map(|part| {
                    vec![
                        part.part_id.to_string(),
                        part.part_number.clone(),
                        truncate_str(part.description.as_deref().unwrap_or("-"), 40),
                        part.created_at.format("%Y-%m-%d").to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                table::render(&["ID", "PART NUMBER", "DESCRIPTION", "CREATED"], rows)
            );
            if !global.quiet {
                println!("{} part(s)", style(parts.len()).cyan());
            }
        }
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let part = if args.id {
        let id: i64 = args
            .part_number
            .parse()
            .map_err(|_| miette::miette!("'{}' is not a numeric id", args.part_number))?;
        store.part_by_id(id)
    } else {
        store.part_by_number(&args.part_number)
    }
    .map_err(|e| miette::miette!("{}", e))?;

    print_part(&part, global)
}

fn print_part(part: &Part, global: &GlobalOpts) -> Result<()> {
    match effective_format(global) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(part).into_diagnostic()?);
        }
        OutputFormat::Id => {
            println!("{}", part.part_id);
        }
        _ => {
            println!("{}", style("─".repeat(50)).dim());
            println!("{}: {}", style("ID").bold(), part.part_id);
            println!(
                "{}: {}",
                style("Part number").bold(),
                style(&part.part_number).cyan()
            );
            if let Some(ref description) = part.description {
                println!("{}: {}", style("Description").bold(), description);
            }
            println!(
                "{}: {}",
                style("Created").bold(),
                part.created_at.format("%Y-%m-%d %H:%M")
            );
            println!("{}", style("─".repeat(50)).dim());
        }
    }
    Ok(())
}

fn run_resolve(args: ResolveArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let part = store
        .part_by_number(&args.part_number)
        .map_err(|e| miette::miette!("{}", e))?;
    println!("{}", part.part_id);
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let part = store
        .part_by_id(args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    let prompt = format!("Delete part '{}' (id {})?", part.part_number, args.id);
    if !confirm_removal(&prompt, args.yes)? {
        return Ok(());
    }

    store
        .delete_part(args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Deleted part {} (id {})",
            style("✓").green(),
            style(&part.part_number).cyan(),
            args.id
        );
    }
    Ok(())
}
