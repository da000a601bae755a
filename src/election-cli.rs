//! Offline maintenance for an election booth's store directory.
//! This goes through the same store and tally code as the server, so what it
//! prints is what the admin dashboard would show.

use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};
use rocket::serde::json::serde_json;

use election_booth::{
    election,
    model::election::ElectionDocument,
    store::{JsonFileStore, Store, StoreError},
};

const PROGRAM_NAME: &str = "election-cli";

const ABOUT_TEXT: &str = "Inspect or reset the election document of a booth.

EXIT CODES:
     0: Success.
     1: The store could not be read or written, or holds a malformed document.";

const STORE_DIR: &str = "STORE_DIR";

const STORE_DIR_HELP: &str = "The booth's store directory, as set by `store_dir` in Rocket.toml";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    let store_dir = Arg::new(STORE_DIR)
        .help(STORE_DIR_HELP)
        .action(ArgAction::Set)
        .required(true);

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .subcommand_required(true)
        .subcommand(
            Command::new("results")
                .about("Print the tally and turnout")
                .arg(store_dir.clone()),
        )
        .subcommand(
            Command::new("show")
                .about("Print the whole document as JSON")
                .arg(store_dir.clone()),
        )
        .subcommand(
            Command::new("reset")
                .about("Discard all voters, parties and votes, and restore default settings")
                .arg(store_dir),
        )
}

/// Errors that this program may produce.
#[derive(Debug)]
enum Error {
    /// The store directory does not exist.
    Missing(String),
    /// Reading or writing the store failed.
    Store(StoreError),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Open an existing store directory. Only `reset` may create one.
fn open_existing(dir: &str) -> Result<Store, Error> {
    if !Path::new(dir).is_dir() {
        return Err(Error::Missing(dir.to_string()));
    }
    Ok(Store::new(JsonFileStore::open(dir)?))
}

/// Read the document of an existing store directory without writing to it.
fn read_existing(dir: &str) -> Result<ElectionDocument, Error> {
    Ok(open_existing(dir)?.peek()?.unwrap_or_default())
}

fn results_report(doc: &ElectionDocument) -> Vec<String> {
    let mut lines: Vec<String> = election::tally(doc)
        .into_iter()
        .map(|result| {
            format!(
                "{}: {} vote{} ({:.1}%)",
                result.name,
                result.votes,
                if result.votes != 1 { "s" } else { "" },
                result.percentage
            )
        })
        .collect();
    if lines.is_empty() {
        lines.push("No parties registered.".to_string());
    }

    let turnout = election::turnout(doc);
    lines.push(format!(
        "Turnout: {} of {} voter{} ({:.1}%)",
        turnout.voted,
        turnout.total,
        if turnout.total != 1 { "s" } else { "" },
        turnout.percentage
    ));
    lines
}

fn execute(args: &ArgMatches) -> Result<Vec<String>, Error> {
    // Subcommand is required, and every subcommand requires the directory.
    let (name, sub_args) = args.subcommand().unwrap();
    let dir: &String = sub_args.get_one(STORE_DIR).unwrap();

    match name {
        "results" => Ok(results_report(&read_existing(dir)?)),
        "show" => {
            let doc = read_existing(dir)?;
            let json = serde_json::to_string_pretty(&doc).map_err(StoreError::from)?;
            Ok(vec![json])
        }
        _ => {
            let store = Store::new(JsonFileStore::open(dir)?);
            store.reset()?;
            Ok(vec![format!("Reset election document at {}", store.describe())])
        }
    }
}

/// Run the command, report the outcome, and return the exit code.
fn run(args: &ArgMatches) -> u8 {
    match execute(args) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            0
        }
        Err(Error::Missing(dir)) => {
            println!("IO error: no store directory at {dir}");
            1
        }
        Err(Error::Store(err)) => {
            println!("IO error: {err}");
            1
        }
    }
}

fn main() {
    let args = cli().get_matches();
    let exit_code = run(&args);
    std::process::exit(exit_code.into())
}
