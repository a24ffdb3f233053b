use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use bookshelf::cli::handlers::{
    CommandContext, handle_mutate, handle_query, handle_schema, handle_serve,
};
use bookshelf::cli::{Cli, Commands};
use bookshelf::config::BookshelfConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    bookshelf::logging::init(cli.verbose, cli.log_file.map(PathBuf::from));

    match cli.command {
        Commands::Schema => handle_schema(),
        Commands::Serve { host, port } => {
            let ctx = open_context(cli.config).await?;
            handle_serve(ctx, host, port).await
        }
        Commands::Query { query, variables } => {
            let ctx = open_context(cli.config).await?;
            let result = handle_query(&ctx, query, variables).await;
            ctx.close().await;
            result
        }
        Commands::Mutate {
            mutation,
            variables,
        } => {
            let ctx = open_context(cli.config).await?;
            let result = handle_mutate(&ctx, mutation, variables).await;
            ctx.close().await;
            result
        }
    }
}

async fn open_context(config_path: Option<String>) -> Result<CommandContext> {
    let cwd = std::env::current_dir()?;
    let config_path = config_path.map(PathBuf::from);
    let config = BookshelfConfig::load(config_path.as_deref(), &cwd)?;
    Ok(CommandContext::open(config).await)
}
