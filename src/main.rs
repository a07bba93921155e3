use clap::Parser;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};
use tracing::info;

use script_language_server::catalog::Catalog;
use script_language_server::config::{ServerArgs, resolve_debounce};
use script_language_server::engine::Engine;
use script_language_server::logging::init_logger;
use script_language_server::lsp::backend::ScriptBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();
    let _guard = init_logger(args.no_color, args.log_level.as_deref(), args.log_file)?;

    info!("Starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let catalog = match &args.catalog {
        Some(path) => {
            info!("Loading catalog from {}", path.display());
            Catalog::load(path)?
        }
        None => Catalog::bundled(),
    };

    let engine = Engine::new(catalog, resolve_debounce(None, args.debounce_ms));
    let cli_debounce_ms = args.debounce_ms;

    let (service, socket) =
        LspService::new(move |client| ScriptBackend::new(client, engine, cli_debounce_ms));
    Server::new(stdin(), stdout(), socket).serve(service).await;

    info!("Server stopped");
    Ok(())
}
