use anyhow::Result;

use crate::graphql::schema_sdl;

pub fn handle_schema() -> Result<()> {
    println!("{}", schema_sdl());
    Ok(())
}
