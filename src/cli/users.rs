use clap::Parser;
use error_stack::{Report, Result, ResultExt};

use roster::registry::UserId;
use roster::Registry;

use super::CliError;

#[derive(Debug, Parser)]
pub struct ListCommand {
    /// Only list users whose name contains this term.
    #[clap(short, long)]
    pub search: Option<String>,
}

#[derive(Debug, Parser)]
pub struct ShowCommand {
    /// User id.
    pub id: u64,
}

#[derive(Debug, Parser)]
pub struct CreateCommand {
    #[clap(short, long)]
    pub name: String,
    #[clap(short, long)]
    pub email: String,
}

#[derive(Debug, Parser)]
pub struct UpdateCommand {
    /// User id.
    pub id: u64,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
}

#[derive(Debug, Parser)]
pub struct DeleteCommand {
    /// User id.
    pub id: u64,
}

pub fn list(args: &ListCommand) -> Result<(), CliError> {
    let registry = Registry::new();
    let users = match args.search.as_deref().filter(|term| !term.trim().is_empty()) {
        Some(term) => {
            let found = registry.search_by_name(term);
            println!("Search results for '{}': {} user(s)", term.trim(), found.len());
            found
        }
        None => {
            let mut all = registry.get_all();
            all.sort_by_key(|user| user.id);
            println!("All users: {} user(s)", all.len());
            all
        }
    };

    println!();
    println!("{:<6} {:<24} {:<32} {}", "ID", "NAME", "EMAIL", "CREATED");
    println!("{}", "-".repeat(80));
    for user in &users {
        println!(
            "{:<6} {:<24} {:<32} {}",
            user.id,
            user.name,
            user.email,
            user.created_at.format("%Y-%m-%d %H:%M:%S"),
        );
    }

    Ok(())
}

pub fn show(args: &ShowCommand) -> Result<(), CliError> {
    let registry = Registry::new();
    let Some(user) = registry.get_by_id(UserId(args.id)) else {
        return Err(
            Report::new(CliError).attach_printable(format!("user {} does not exist", args.id))
        );
    };

    println!("User {}:", user.id);
    println!("  name:       {}", user.name);
    println!("  email:      {}", user.email);
    println!("  created at: {}", user.created_at);
    println!("  updated at: {}", user.updated_at);

    Ok(())
}

pub fn create(args: &CreateCommand) -> Result<(), CliError> {
    let registry = Registry::new();
    let user = registry
        .create(&args.name, &args.email)
        .change_context(CliError)?;

    println!("Created user {}:", user.id);
    println!("  name:  {}", user.name);
    println!("  email: {}", user.email);

    Ok(())
}

pub fn update(args: &UpdateCommand) -> Result<(), CliError> {
    let registry = Registry::new();
    let user = registry
        .update(UserId(args.id), args.name.as_deref(), args.email.as_deref())
        .change_context(CliError)?;

    println!("Updated user {}:", user.id);
    println!("  name:  {}", user.name);
    println!("  email: {}", user.email);

    Ok(())
}

pub fn delete(args: &DeleteCommand) -> Result<(), CliError> {
    let registry = Registry::new();
    if registry.delete(UserId(args.id)) {
        println!("Deleted user {}", args.id);
        Ok(())
    } else {
        Err(Report::new(CliError).attach_printable(format!("user {} does not exist", args.id)))
    }
}

pub fn stats() -> Result<(), CliError> {
    let registry = Registry::new();
    let stats = registry.statistics();

    println!("Total users: {}", stats.total_users);
    println!("Users per email domain:");

    let mut domains: Vec<_> = stats.domains.iter().collect();
    domains.sort();
    for (domain, count) in domains {
        println!("  {domain}: {count}");
    }

    Ok(())
}
