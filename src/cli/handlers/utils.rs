use anyhow::{Context, Result};

use crate::graphql::build_schema;

use super::CommandContext;

pub fn parse_variables(variables: Option<&str>) -> Result<async_graphql::Variables> {
    match variables {
        Some(v) => serde_json::from_str(v).context("Variables must be a JSON object"),
        None => Ok(async_graphql::Variables::default()),
    }
}

/// Executes a GraphQL document against the context's store and prints the JSON response.
pub async fn execute_and_print(
    ctx: &CommandContext,
    document: &str,
    variables: async_graphql::Variables,
) -> Result<()> {
    let schema = build_schema(ctx.store.clone());
    let request = async_graphql::Request::new(document).variables(variables);
    let response = schema.execute(request).await;

    if response.is_err() {
        tracing::debug!(errors = response.errors.len(), "GraphQL request returned errors");
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
