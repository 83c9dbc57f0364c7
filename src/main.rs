mod commands;
mod hash;
mod store;

use clap::{Parser, Subcommand};
use colored::*;
use std::process;

/// User management CLI
#[derive(Parser, Debug)]
#[command(name = "umt", version, about, long_about = None)]
struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty user file
    #[command(visible_alias = "i")]
    Init {
        /// Path of the user file to create
        file: String,
    },

    /// Add a new user
    #[command(visible_alias = "a")]
    Add(commands::AddArgs),

    /// Delete a user by login
    #[command(visible_alias = "d")]
    Delete {
        /// Path of the user file
        file: String,
        /// Login of the user to delete
        login: String,
    },

    /// Update one field of a user
    #[command(visible_alias = "u")]
    Update {
        /// Path of the user file
        file: String,
        /// Login of the user to update
        login: String,
        /// Field name (status, gender, name, first_name, company_name,
        /// timezone or password)
        field: String,
        /// New value
        value: String,
    },

    /// Print a user's fields
    #[command(visible_alias = "p")]
    Print {
        /// Path of the user file
        file: String,
        /// Login of the user to print
        login: String,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // help and version are not failures; any real usage error is
            let failure = err.use_stderr();
            let _ = err.print();
            process::exit(if failure { 1 } else { 0 });
        }
    };

    let result = match &cli.command {
        Commands::Init { file } => commands::init_file(file, cli.debug),
        Commands::Add(args) => commands::add_user(args, cli.debug),
        Commands::Delete { file, login } => commands::delete_user(file, login, cli.debug),
        Commands::Update {
            file,
            login,
            field,
            value,
        } => commands::update_user(file, login, field, value, cli.debug),
        Commands::Print { file, login } => commands::print_user(file, login, cli.debug),
    };

    if let Err(err) = result {
        println!("{} {err:#}", "ERROR:".red());
        process::exit(1);
    }
}
