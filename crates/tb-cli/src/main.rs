//! # tb
//!
//! Terminal client for the ticket browser hub.
//!
//! - `tb list`: paginated ticket table with search and filters.
//! - `tb show <id>`: one ticket with its comments.
//! - `tb stats`: status counters.

mod client;
mod render;

use clap::{Parser, Subcommand};

use client::{HubClient, ListFilters};

/// Browse an exported ticket archive served by `tb-hub`.
#[derive(Parser)]
#[command(name = "tb", version, about, long_about = None)]
struct Cli {
    /// Hub base URL.
    #[arg(long, env = "TB_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Print the raw JSON response instead of a table.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tickets, newest number first.
    List {
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        limit: Option<usize>,
        /// Matches summary, description or ticket number.
        #[arg(long, short)]
        search: Option<String>,
        /// Exact status, e.g. open, closed, pending.
        #[arg(long)]
        status: Option<String>,
        /// Created on or after this date (YYYY-MM-DD).
        #[arg(long)]
        start_date: Option<String>,
        /// Created on or before this date (YYYY-MM-DD).
        #[arg(long)]
        end_date: Option<String>,
    },

    /// Show one ticket by its import id.
    Show { id: i64 },

    /// Ticket counts per status.
    Stats,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = HubClient::new(cli.base_url);

    let result = match cli.command {
        Commands::List {
            page,
            limit,
            search,
            status,
            start_date,
            end_date,
        } => {
            let filters = ListFilters {
                page,
                limit,
                search,
                status,
                start_date,
                end_date,
            };
            client
                .tickets(&filters)
                .await
                .map(|page| output(cli.json, &page, render::render_page))
        }

        Commands::Show { id } => match client.ticket(id).await {
            Ok(Some(detail)) => {
                output(cli.json, &detail, render::render_detail);
                Ok(())
            }
            Ok(None) => {
                eprintln!("Ticket not found");
                std::process::exit(1);
            }
            Err(e) => Err(e),
        },

        Commands::Stats => client
            .stats()
            .await
            .map(|stats| output(cli.json, &stats, render::render_stats)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn output<T: serde::Serialize>(json: bool, value: &T, render: fn(&T) -> String) {
    if json {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error: {}", e),
        }
    } else {
        println!("{}", render(value));
    }
}
