//! Binary entry point for the fsgate MCP server.

use clap::Parser;
use fsgate::{FsServer, config};
use rmcp::ServiceExt;

/// Sandboxed filesystem MCP server.
///
/// Tools operate only within the allowed root directories, taken from the
/// command line, from FSGATE_ALLOWED_DIRS (colon separated), or defaulting
/// to the current working directory plus the user's home directory.
#[derive(Parser)]
#[command(name = "fsgate", version, about)]
struct Cli {
    /// Allowed root directories (overrides FSGATE_ALLOWED_DIRS).
    allowed_dirs: Vec<std::path::PathBuf>,
}

#[tokio::main]
async fn main() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }
    let cli = Cli::parse();
    let allowed_dirs = if cli.allowed_dirs.is_empty() {
        config::allowed_dirs_from_env()
    } else {
        cli.allowed_dirs
    };
    let server = FsServer::new(allowed_dirs);
    if server.allowed_dirs().is_empty() {
        eprintln!("fsgate: no usable allowed directories; every request will be denied");
    }
    tracing::info!(roots = ?server.allowed_dirs(), "starting fsgate");
    let transport = rmcp::transport::stdio();
    let service = match server.serve(transport).await {
        Ok(service) => service,
        Err(e) => {
            eprintln!("fsgate: failed to start: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = service.waiting().await {
        eprintln!("fsgate: server error: {e}");
        std::process::exit(1);
    }
}
