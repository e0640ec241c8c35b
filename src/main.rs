use clap::Parser;
use dse::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
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
    dse::cli::init_logging(cli.global.verbose);

    match cli.command {
        Commands::Fields(args) => dse::cli::commands::fields::run(args, &cli.global),
        Commands::Volume(args) => dse::cli::commands::volume::run(args, &cli.global),
        Commands::Edit(args) => dse::cli::commands::edit::run(args, &cli.global),
        Commands::Completions(args) => dse::cli::commands::completions::run(args),
    }
}
