use clap::Parser;
use miette::Result;
use stockpile::cli::{Cli, Commands};
use stockpile::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_env("RUST_LOG")
        .target(env_logger::Target::Stderr)
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => stockpile::cli::build::run(args, &printer)?,
        Commands::Init(args) => stockpile::cli::init::run(args, &printer)?,
        Commands::List(args) => stockpile::cli::list::run(args, &printer)?,
        Commands::Validate(args) => stockpile::cli::validate::run(args, &printer)?,
        Commands::Watch(args) => stockpile::cli::watch::run(args, &printer)?,
        Commands::Completions(args) => stockpile::cli::completions::run(args)?,
    }

    Ok(())
}
