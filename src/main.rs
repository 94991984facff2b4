use clap::Parser;
use miette::Result;
use pbin::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix
    // piping. Without this, piping to `head`, `grep -q`, etc. causes a panic
    // on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for readable diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => pbin::cli::commands::init::run(args, &global),
        Commands::Loc(cmd) => pbin::cli::commands::loc::run(cmd, &global),
        Commands::Part(cmd) => pbin::cli::commands::part::run(cmd, &global),
        Commands::Box(cmd) => pbin::cli::commands::boxes::run(cmd, &global),
        Commands::Inv(cmd) => pbin::cli::commands::inv::run(cmd, &global),
        Commands::Completions(args) => pbin::cli::commands::completions::run(args),
    }
}
