//! `pbin inv` command - Inventory management
//!
//! `inv add` is the whole resolution chain in one step: the part and
//! location must exist, the box is created on the fly when its code is new,
//! and re-adding the same (box, part) pair returns the stored row unchanged.

use std::fs;
use std::io::{self, Write};

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{
    confirm_removal, effective_format, escape_csv, open_store, truncate_str,
};
use crate::cli::{table, GlobalOpts, OutputFormat};
use crate::core::InventoryRecord;

#[derive(Subcommand, Debug)]
pub enum InvCommands {
    /// Add stock of a part to a box (idempotent on the box/part pair)
    Add(AddArgs),

    /// Replace an item's part, description, and quantity
    Update(UpdateArgs),

    /// Show one inventory item
    Show(ShowArgs),

    /// List inventory, optionally scoped to a box or a part
    List(ListArgs),

    /// Delete one inventory item
    Rm(RmArgs),

    /// Export the joined inventory view as CSV
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Box code; the box is created at the location if it does not exist
    #[arg(long, short = 'b', value_name = "CODE")]
    pub r#box: String,

    /// Part number; must already be in the catalog
    #[arg(long, short = 'p', value_name = "NUMBER")]
    pub part: String,

    /// Location name; must already be registered
    #[arg(long, short = 'l', value_name = "NAME")]
    pub location: String,

    /// Quantity on hand
    #[arg(long, short = 'n', value_name = "QTY")]
    pub qty: i64,

    /// Item description snapshot
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Inventory item id
    pub id: i64,

    /// New part number; must already be in the catalog
    #[arg(long, short = 'p', value_name = "NUMBER")]
    pub part: String,

    /// New quantity
    #[arg(long, short = 'n', value_name = "QTY")]
    pub qty: i64,

    /// New description (omitting clears it)
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Inventory item id
    pub id: i64,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only items inside this box
    #[arg(long, short = 'b', value_name = "CODE", conflicts_with = "part")]
    pub r#box: Option<String>,

    /// Only stock of this part
    #[arg(long, short = 'p', value_name = "NUMBER")]
    pub part: Option<String>,

    /// Show only the count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Inventory item id
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<std::path::PathBuf>,
}

/// Run an inventory subcommand
pub fn run(cmd: InvCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        InvCommands::Add(args) => run_add(args, global),
        InvCommands::Update(args) => run_update(args, global),
        InvCommands::Show(args) => run_show(args, global),
        InvCommands::List(args) => run_list(args, global),
        InvCommands::Rm(args) => run_rm(args, global),
        InvCommands::Export(args) => run_export(args, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let resolved = store
        .add_inventory(
            &args.r#box,
            &args.part,
            args.description.as_deref(),
            &args.location,
            args.qty,
        )
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
            "{} Added {} x {} to box {} at {} (inventory id {})",
            style("✓").green(),
            record.quantity,
            style(&record.part_number).cyan(),
            style(&record.box_code).cyan(),
            style(&record.location_name).yellow(),
            record.inventory_id
        );
    } else {
        println!(
            "{} Box {} already holds {} x {} (inventory id {})",
            style("=").yellow(),
            style(&record.box_code).cyan(),
            record.quantity,
            style(&record.part_number).cyan(),
            record.inventory_id
        );
    }
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let record = store
        .update_inventory(args.id, &args.part, args.description.as_deref(), args.qty)
        .map_err(|e| miette::miette!("{}", e))?;

    if effective_format(global) == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&record).into_diagnostic()?
        );
        return Ok(());
    }
    if !global.quiet {
        println!(
            "{} Updated inventory {}: {} x {} in box {}",
            style("✓").green(),
            record.inventory_id,
            record.quantity,
            style(&record.part_number).cyan(),
            style(&record.box_code).cyan()
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let record = store
        .inventory_record(args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    match effective_format(global) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&record).into_diagnostic()?
            );
        }
        OutputFormat::Id => {
            println!("{}", record.inventory_id);
        }
        _ => {
            println!("{}", style("─".repeat(50)).dim());
            println!("{}: {}", style("ID").bold(), record.inventory_id);
            println!(
                "{}: {}",
                style("Part").bold(),
                style(&record.part_number).cyan()
            );
            println!("{}: {}", style("Quantity").bold(), record.quantity);
            println!(
                "{}: {}",
                style("Box").bold(),
                style(&record.box_code).cyan()
            );
            println!(
                "{}: {}",
                style("Location").bold(),
                style(&record.location_name).yellow()
            );
            if let Some(ref description) = record.description {
                println!("{}: {}", style("Description").bold(), description);
            }
            println!(
                "{}: {}",
                style("Updated").bold(),
                record.updated_at.format("%Y-%m-%d %H:%M")
            );
            println!("{}", style("─".repeat(50)).dim());
        }
    }
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let records = match (&args.r#box, &args.part) {
        (Some(code), _) => store.inventory_for_box(code),
        (None, Some(number)) => store.inventory_for_part(number),
        (None, None) => store.list_inventory(),
    }
    .map_err(|e| miette::miette!("{}", e))?;

    if args.count {
        println!("{}", records.len());
        return Ok(());
    }

    match effective_format(global) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&records).into_diagnostic()?
            );
        }
        OutputFormat::Csv => {
            println!("id,box,part,quantity,description,location,updated");
            for record in &records {
                println!(
                    "{},{},{},{},{},{},{}",
                    record.inventory_id,
                    escape_csv(&record.box_code),
                    escape_csv(&record.part_number),
                    record.quantity,
                    escape_csv(record.description.as_deref().unwrap_or("")),
                    escape_csv(&record.location_name),
                    record.updated_at.format("%Y-%m-%d")
                );
            }
        }
        OutputFormat::Id => {
            for record in &records {
                println!("{}", record.inventory_id);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => {
            if records.is_empty() {
                println!("No inventory found.");
                return Ok(());
            }
            let rows = records.iter().map(inventory_row).collect();
            println!(
                "{}",
                table::render(
                    &["ID", "BOX", "PART", "QTY", "DESCRIPTION", "LOCATION", "UPDATED"],
                    rows
                )
            );
            if !global.quiet {
                println!("{} item(s)", style(records.len()).cyan());
            }
        }
    }
    Ok(())
}

fn inventory_row(record: &InventoryRecord) -> Vec<String> {
    vec![
        record.inventory_id.to_string(),
        record.box_code.clone(),
        record.part_number.clone(),
        record.quantity.to_string(),
        truncate_str(record.description.as_deref().unwrap_or("-"), 30),
        record.location_name.clone(),
        record.updated_at.format("%Y-%m-%d").to_string(),
    ]
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let record = store
        .inventory_record(args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    let prompt = format!(
        "Delete inventory item {} ({} x {} in box {})?",
        args.id, record.quantity, record.part_number, record.box_code
    );
    if !confirm_removal(&prompt, args.yes)? {
        return Ok(());
    }

    store
        .delete_inventory(args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Deleted inventory item {} ({} from box {})",
            style("✓").green(),
            args.id,
            style(&record.part_number).cyan(),
            style(&record.box_code).cyan()
        );
    }
    Ok(())
}

fn run_export(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let records = store
        .list_inventory()
        .map_err(|e| miette::miette!("{}", e))?;

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(fs::File::create(path).into_diagnostic()?),
        None => Box::new(io::stdout()),
    };

    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record([
            "inventory_id",
            "box_code",
            "part_number",
            "description",
            "location_name",
            "quantity",
            "updated_at",
        ])
        .into_diagnostic()?;
    for record in &records {
        writer
            .write_record([
                record.inventory_id.to_string(),
                record.box_code.clone(),
                record.part_number.clone(),
                record.description.clone().unwrap_or_default(),
                record.location_name.clone(),
                record.quantity.to_string(),
                record.updated_at.to_rfc3339(),
            ])
            .into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    if let Some(path) = args.output {
        if !global.quiet {
            eprintln!(
                "{} Exported {} item(s) to {}",
                style("✓").green(),
                records.len(),
                style(path.display()).cyan()
            );
        }
    }
    Ok(())
}
