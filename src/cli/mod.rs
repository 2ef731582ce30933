use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

mod server;
mod users;

/// Command line options for roster.
#[derive(Debug, Parser)]
#[command(about = "In-memory user registry with CLI and HTTP front ends", version, author)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Debug, Error)]
#[error("Command failed")]
pub struct CliError;

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self.subcommand {
            Subcommand::Server(args) => self::server::run(args).change_context(CliError),
            Subcommand::List(args) => self::users::list(&args),
            Subcommand::Show(args) => self::users::show(&args),
            Subcommand::Create(args) => self::users::create(&args),
            Subcommand::Update(args) => self::users::update(&args),
            Subcommand::Delete(args) => self::users::delete(&args),
            Subcommand::Stats => self::users::stats(),
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    /// Expose the registry over an HTTP JSON API.
    Server(self::server::ServerCommand),
    /// List users, optionally filtered by a search term.
    List(self::users::ListCommand),
    /// Show one user by id.
    Show(self::users::ShowCommand),
    /// Create a new user.
    Create(self::users::CreateCommand),
    /// Update an existing user's name and/or email.
    Update(self::users::UpdateCommand),
    /// Delete a user by id.
    Delete(self::users::DeleteCommand),
    /// Show user statistics.
    Stats,
}
