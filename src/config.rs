use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::db::Database;

#[derive(Debug, Parser)]
#[command(name = "ideaforge")]
#[command(about = "API server for validating, planning and tracking business ideas")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (the default)
    Serve(ServeArgs),
    /// Create the database schema and exit
    Migrate(DatabaseArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// IP address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port for HTTP API
    #[arg(short, long, env = "PORT", default_value = "3001")]
    pub port: u16,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// SQLite database file; defaults to the platform data directory
    #[arg(long = "database", env = "DATABASE_PATH")]
    pub path: Option<PathBuf>,
}

impl Cli {
    /// The server settings to use when no subcommand, or `serve`, was given.
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Serve(self.serve))
    }
}

impl ServeArgs {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

impl DatabaseArgs {
    /// Open the configured database and bring its schema up to date.
    pub fn open(&self) -> anyhow::Result<Database> {
        let db = match &self.path {
            Some(path) => Database::open(path)?,
            None => Database::open_default()?,
        };
        db.migrate()?;
        Ok(db)
    }
}
