use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{HttpNodeService, NodeListController, TracingReporter};

#[derive(Parser, Debug)]
#[command(about = "Manage the node fleet from the command line")]
struct Args {
    /// Base URL of the node server, e.g. http://127.0.0.1:9080
    #[arg(long)]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current node list
    List,
    /// Register a node, then print the refreshed list
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let service = Arc::new(HttpNodeService::new(args.server_url));
    let controller = NodeListController::new(service, Arc::new(TracingReporter));

    match args.command {
        Command::List => {
            controller.initial_load().await?;
        }
        Command::Add { name, role } => {
            controller.initial_load().await?;
            controller.add_node(&name, &role).await?;
        }
    }

    for node in controller.snapshot().await.nodes {
        println!("{}\t{}", node.name, node.role);
    }
    Ok(())
}
