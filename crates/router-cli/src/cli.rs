use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "router", about = "Skill routing and context assembly")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read a query from PROMPT or stdin and print the assembled
    /// `<skill_context>` block. The default command when none is given.
    Hook {
        #[arg(long, env = "ROUTER_CATALOG")]
        catalog: Option<PathBuf>,
        #[arg(long, env = "ROUTER_SKILLS_ROOT")]
        skills_root: Option<PathBuf>,
    },
    /// Route one query and print the wire-shape JSON result.
    Route {
        #[arg(long)]
        query: String,
        #[arg(long, env = "ROUTER_CATALOG")]
        catalog: Option<PathBuf>,
    },
    /// Load and validate a catalog file, reporting unresolved references.
    Validate {
        #[arg(long, env = "ROUTER_CATALOG")]
        catalog: Option<PathBuf>,
    },
    /// Run the optional HTTP front-end (requires the `http-transport` feature).
    Serve {
        #[arg(long, default_value = "127.0.0.1:8085")]
        bind: String,
        #[arg(long, env = "ROUTER_CATALOG")]
        catalog: Option<PathBuf>,
    },
}
