use anyhow::Result;

use crate::graphql::build_schema;
use crate::server::{run_server, shutdown_signal};

use super::CommandContext;

pub async fn handle_serve(
    ctx: CommandContext,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let mut settings = ctx.config.server.clone();
    if let Some(host) = host {
        settings.host = host;
    }
    if let Some(port) = port {
        settings.port = port;
    }

    let schema = build_schema(ctx.store.clone());
    tracing::info!(host = %settings.host, port = settings.port, "Starting GraphQL server");

    let result = run_server(schema, &settings, shutdown_signal()).await;
    ctx.close().await;
    result
}
