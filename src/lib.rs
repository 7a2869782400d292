//! Catalog Application Library
//!
//! Books and authors held in memory and served over GraphQL.

pub mod modules;

use anyhow::Context;
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Register every module, drive its lifecycle and serve HTTP until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &settings);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = catalog_http::start_server(&registry, &settings)
        .await
        .context("HTTP server terminated with an error");

    registry.stop_modules().await?;
    served
}
