use anyhow::Result;
use clap::{Parser, Subcommand};
use haki_mcp::{Config, create_server, format_documents};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// rmcp imports for MCP stdio server mode
use rmcp::service::ServiceExt;
use rmcp::transport::stdio;

#[derive(Parser)]
#[command(name = "haki-mcp")]
#[command(about = "MCP server for semantic search over Kenyan case law")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdio (the default when no subcommand is given)
    Stdio,
    /// Serve MCP over streamable HTTP
    Http {
        /// Bind address, e.g. 0.0.0.0:3942
        #[arg(long, default_value = "127.0.0.1:3942")]
        bind: String,
    },
    /// Run a one-shot search against the configured index
    Search {
        query: String,
        /// Number of documents to retrieve
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the stdio transport.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("haki_mcp=info".parse()?)
                .add_directive("rmcp=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Required credentials are checked before any transport is established.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Stdio) {
        Commands::Stdio => {
            info!("Starting MCP stdio server");

            let server = create_server(&config);

            let service = server
                .as_ref()
                .clone()
                .serve(stdio())
                .await
                .inspect_err(|e| error!("serving error: {:?}", e))?;

            // Block until the MCP session ends.
            service.waiting().await?;
            info!("MCP stdio server session ended");
        }
        Commands::Http { bind } => {
            info!("Starting MCP HTTP server on {}", bind);

            let server = create_server(&config);
            haki_mcp::server::start_mcp_http(server, &bind).await?;
        }
        Commands::Search { query, top_k } => {
            info!("Running search command. query='{}'", query);

            let mut retriever = haki_mcp::build_retriever(&config);
            if let Some(k) = top_k {
                retriever = retriever.with_top_k(k);
            }

            let docs = retriever.retrieve(&query).await?;
            println!("{}", format_documents(&docs));
        }
    }

    Ok(())
}
