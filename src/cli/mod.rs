pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "desk")]
#[command(about = "Desk CLI - inspect paperdesk tenant routing")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the tenant context a path resolves to")]
    Context {
        #[arg(help = "Request path or URL")]
        path: String,
    },

    #[command(about = "Resolve a view name on a page rendered at a path")]
    Route {
        #[arg(help = "Page name (dashboard, documents, finance, schedule)")]
        page: String,
        #[arg(help = "Path the page is rendered at")]
        path: String,
        #[arg(help = "View name emitted by a component")]
        view: String,
    },

    #[command(about = "List every view a page offers at a path")]
    Views {
        #[arg(help = "Page name (dashboard, documents, finance, schedule)")]
        page: String,
        #[arg(help = "Path the page is rendered at")]
        path: String,
    },

    #[command(about = "Show where a legacy parent route forwards to")]
    Shim {
        #[arg(help = "Legacy parent segment (documents, finance)")]
        parent: String,
        #[arg(long, help = "Tenant id; omit for the unscoped route tree")]
        tenant: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Context { path } => commands::context(&path, &output_format),
        Commands::Route { page, path, view } => commands::route(&page, &path, &view, &output_format),
        Commands::Views { page, path } => commands::views(&page, &path, &output_format),
        Commands::Shim { parent, tenant } => commands::shim(&parent, tenant.as_deref(), &output_format),
    }
}
