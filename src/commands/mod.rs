use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::{
    application::CommandGenerator,
    catalog::JsonCatalog,
    domain::model::{Direction, GenerateRequest},
    runtime::Runtime,
};

pub mod config;
pub mod output;

use config::Config;
use output::{render_install, render_uninstall};

/// Output format of the generated plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Generate commands for `request` against the configured catalog and
/// render them in `format`.
#[tracing::instrument(skip(runtime, catalog, request))]
pub async fn generate<R: Runtime>(
    runtime: &R,
    catalog: Option<PathBuf>,
    direction: Direction,
    request: &GenerateRequest,
    format: Format,
) -> Result<String> {
    let config = Config::load(runtime, catalog)?;
    let catalog = JsonCatalog::load(runtime, &config.catalog_path)?;
    let generator = CommandGenerator::new(&catalog, &catalog);
    debug!("Request: {:?}", request);

    let rendered = match direction {
        Direction::Install => {
            let plan = generator.install(request).await?;
            match format {
                Format::Text => render_install(&plan),
                Format::Json => serde_json::to_string_pretty(&plan)?,
            }
        }
        Direction::Uninstall => {
            let plan = generator.uninstall(request).await?;
            match format {
                Format::Text => render_uninstall(&plan),
                Format::Json => serde_json::to_string_pretty(&plan)?,
            }
        }
    };
    Ok(rendered)
}
