// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{Column, Direction};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the card store
    #[arg(long, value_name = "URL", env = "MEMOCARDS_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Username to log in with
    #[arg(short, long, env = "MEMOCARDS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password to log in with
    #[arg(long, env = "MEMOCARDS_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the mock card store
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// JSON file holding users and cards
        #[arg(long, value_name = "FILE")]
        db: Option<PathBuf>,

        /// Add a user before serving (repeatable)
        #[arg(long = "seed-user", value_name = "USER:PASSWORD")]
        seed_users: Vec<String>,
    },

    /// Show the board, column by column
    Board {
        /// Only show cards with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// List the tags in use
    Tags,

    /// Add a card
    Add {
        #[arg(short, long)]
        question: String,

        #[arg(short, long)]
        answer: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Existing tag
        #[arg(short, long)]
        tag: Option<String>,

        /// New tag (wins over --tag)
        #[arg(long)]
        new_tag: Option<String>,

        /// Column label or number (defaults to "to learn")
        #[arg(long)]
        column: Option<Column>,
    },

    /// Edit fields of a card
    Edit {
        #[arg(value_name = "CARD_ID")]
        id: i64,

        #[arg(short, long)]
        question: Option<String>,

        #[arg(short, long)]
        answer: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        tag: Option<String>,

        #[arg(long)]
        new_tag: Option<String>,

        #[arg(long)]
        column: Option<Column>,
    },

    /// Delete a card
    Delete {
        #[arg(value_name = "CARD_ID")]
        id: i64,
    },

    /// Move a card one column left or right (wraps around)
    Move {
        #[arg(value_name = "CARD_ID")]
        id: i64,

        /// previous or next
        #[arg(value_name = "DIRECTION")]
        direction: Direction,
    },

    /// View a card in the browser
    View {
        #[arg(value_name = "CARD_ID")]
        id: i64,

        /// Output card as JSON instead of opening in browser
        #[arg(long)]
        json: bool,
    },

    /// Write a config file with default values
    InitConfig {
        /// Target path (defaults to the user config location)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
