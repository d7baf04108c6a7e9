use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use freebies::{command, logging, Repository};
use tracing::info;

#[derive(Parser)]
#[command(name = "freebies", about = "Companies, developers and the freebies between them")]
struct Cli {
    /// SQLite database file, or `:memory:`. Falls back to `DATABASE_URL`, then `freebies.db`
    #[arg(long)]
    database: Option<String>,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert the sample companies, developers and freebies
    Seed,
    /// Open an interactive session on the ledger
    Debug,
    OldestCompany,
    ReceivedOne { dev_id: i32, item_name: String },
    GiveFreebie {
        company_id: i32,
        dev_id: i32,
        item_name: String,
        value: i32,
    },
    Transfer {
        from_dev_id: i32,
        freebie_id: i32,
        to_dev_id: i32,
    },
    /// Print every table as JSON
    Dump,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);
    let mut repo = match &cli.database {
        Some(database_url) => Repository::establish(database_url)?,
        None => Repository::new()?,
    };
    match cli.command {
        Command::Seed => {
            command::seed::seed(&mut repo)?;
        }
        Command::Debug => command::debug::run(&mut repo, io::stdin().lock(), io::stdout())?,
        Command::OldestCompany => match repo.oldest_company()? {
            Some(company) => println!("{} founded {}", company, company.founding_year),
            None => println!("no companies"),
        },
        Command::ReceivedOne { dev_id, item_name } => {
            println!("{}", command::received_one_by_id(&mut repo, dev_id, &item_name)?);
        }
        Command::GiveFreebie {
            company_id,
            dev_id,
            item_name,
            value,
        } => {
            let freebie = command::give_freebie_by_ids(&mut repo, company_id, dev_id, &item_name, value)?;
            println!("{}", repo.freebie_details(&freebie)?);
        }
        Command::Transfer {
            from_dev_id,
            freebie_id,
            to_dev_id,
        } => {
            let transferred = command::transfer_by_ids(&mut repo, from_dev_id, freebie_id, to_dev_id)?;
            info!(transferred, "transfer finished");
            println!("{}", transferred);
        }
        Command::Dump => {
            println!("{}", serde_json::to_string_pretty(&command::dump(&mut repo)?)?);
        }
    }
    Ok(())
}
