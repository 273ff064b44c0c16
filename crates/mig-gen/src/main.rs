use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    decks::{self, DecksArgs},
    generate::{self, GenerateArgs},
    script::{self, ScriptArgs},
    show::{self, ShowArgs},
};

mod commands;
mod overrides;

#[derive(Parser, Debug)]
#[command(name = "mig-gen", about = "MUSIC input deck and batch script generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the decks, the submission script, and the run manifest.
    Generate(GenerateArgs),
    /// Write the parameter decks only.
    Decks(DecksArgs),
    /// Write the submission script only.
    Script(ScriptArgs),
    /// Print the deck for one engine mode to stdout.
    Show(ShowArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::Decks(args) => decks::run(&args),
        Command::Script(args) => script::run(&args),
        Command::Show(args) => show::run(&args),
    }
}
