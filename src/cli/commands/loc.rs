//! `pbin loc` command - Location management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{confirm_removal, effective_format, escape_csv, open_store};
use crate::cli::{table, GlobalOpts, OutputFormat};
use crate::core::Location;

#[derive(Subcommand, Debug)]
pub enum LocCommands {
    /// Register a location (idempotent on its name)
    Add(AddArgs),

    /// List locations
    List(ListArgs),

    /// Show one location
    Show(ShowArgs),

    /// Print the id for a location name
    Resolve(ResolveArgs),

    /// Delete a location (blocked while it still holds boxes)
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Location name (natural key, case-sensitive)
    pub name: String,

    /// Free-form description
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
    /// Location name, or a surrogate id with --id
    pub name: String,

    /// Treat the argument as a surrogate id
    #[arg(long)]
    pub id: bool,
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Location name
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Location id
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a location subcommand
pub fn run(cmd: LocCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LocCommands::Add(args) => run_add(args, global),
        LocCommands::List(args) => run_list(args, global),
        LocCommands::Show(args) => run_show(args, global),
        LocCommands::Resolve(args) => run_resolve(args, global),
        LocCommands::Rm(args) => run_rm(args, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let resolved = store
        .add_location(&args.name, args.description.as_deref())
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

    let location = resolved.record();
    if resolved.was_created() {
        println!(
            "{} Added location {} (id {})",
            style("✓").green(),
            style(&location.name).cyan(),
            location.location_id
        );
    } else {
        println!(
            "{} Location {} already exists (id {})",
            style("=").yellow(),
            style(&location.name).cyan(),
            location.location_id
        );
    }
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let locations = store
        .list_locations()
        .map_err(|e| miette::miette!("{}", e))?;

    if args.count {
        println!("{}", locations.len());
        return Ok(());
    }

    match effective_format(global) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&locations).into_diagnostic()?
            );
        }
        OutputFormat::Csv => {
            println!("id,name,description,created");
            for location in &locations {
                println!(
                    "{},{},{},{}",
                    location.location_id,
                    escape_csv(&location.name),
                    escape_csv(location.description.as_deref().unwrap_or("")),
                    location.created_at.format("%Y-%m-%d")
                );
            }
        }
        OutputFormat::Id => {
            for location in &locations {
                println!("{}", location.location_id);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => {
            if locations.is_empty() {
                println!("No locations found.");
                return Ok(());
            }
            let rows = locations
                .iter()
                .map(|location| {
                    vec![
                        location.location_id.to_string(),
                        location.name.clone(),
                        table::or_dash(location.description.as_deref()),
                        location.created_at.format("%Y-%m-%d").to_string(),
                    ]
                })
                .collect();
            println!("{}", table::render(&["ID", "NAME", "DESCRIPTION", "CREATED"], rows));
            if !global.quiet {
                println!("{} location(s)", style(locations.len()).cyan());
            }
        }
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let location = if args.id {
        let id: i64 = args
            .name
            .parse()
            .map_err(|_| miette::miette!("'{}' is not a numeric id", args.name))?;
        store.location_by_id(id)
    } else {
        store.location_by_name(&args.name)
    }
    .map_err(|e| miette::miette!("{}", e))?;

    print_location(&location, global)
}

fn print_location(location: &Location, global: &GlobalOpts) -> Result<()> {
    match effective_format(global) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(location).into_diagnostic()?
            );
        }
        OutputFormat::Id => {
            println!("{}", location.location_id);
        }
        _ => {
            println!("{}", style("─".repeat(50)).dim());
            println!("{}: {}", style("ID").bold(), location.location_id);
            println!(
                "{}: {}",
                style("Name").bold(),
                style(&location.name).cyan()
            );
            if let Some(ref description) = location.description {
                println!("{}: {}", style("Description").bold(), description);
            }
            println!(
                "{}: {}",
                style("Created").bold(),
                location.created_at.format("%Y-%m-%d %H:%M")
            );
            println!("{}", style("─".repeat(50)).dim());
        }
    }
    Ok(())
}

fn run_resolve(args: ResolveArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let location = store
        .location_by_name(&args.name)
        .map_err(|e| miette::miette!("{}", e))?;
    println!("{}", location.location_id);
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let location = store
        .location_by_id(args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    let prompt = format!("Delete location '{}' (id {})?", location.name, args.id);
    if !confirm_removal(&prompt, args.yes)? {
        return Ok(());
    }

    store
        .delete_location(args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Deleted location {} (id {})",
            style("✓").green(),
            style(&location.name).cyan(),
            args.id
        );
    }
    Ok(())
}
