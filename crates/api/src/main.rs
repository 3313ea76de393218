use std::sync::Arc;

use anyhow::Context;

use payroll_api::app::{build_app, services::AppServices};
use payroll_api::config::ApiConfig;
use payroll_api::seed::SeedData;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    payroll_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let services = AppServices::new(config.executor.clone());

    match &config.seed_path {
        Some(path) => {
            let summary = SeedData::load(path)?.apply(services.directory())?;
            tracing::info!(
                departments = summary.departments,
                employees = summary.employees,
                "seed data loaded from {}",
                path.display()
            );
        }
        None => tracing::warn!("PAYROLL_SEED_PATH not set; starting with an empty directory"),
    }

    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
