//! `pbin init` - create the inventory database

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::resolve_db_path;
use crate::cli::GlobalOpts;
use crate::core::Store;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Database file to create (default: resolved like every other command)
    pub path: Option<PathBuf>,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => resolve_db_path(global),
    };

    let existed = path.exists();
    Store::open(&path).map_err(|e| miette::miette!("{}", e))?;

    if global.quiet {
        return Ok(());
    }
    if existed {
        println!(
            "{} Database already present at {}",
            style("=").yellow(),
            style(path.display()).cyan()
        );
    } else {
        println!(
            "{} Created inventory database at {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }
    Ok(())
}
