//! Seed demo tenants and their employees.
//!
//! Demonstrates the two legitimate context usages: an unbound session to
//! provision and enumerate the tenant catalog, then one bound session per
//! tenant to populate tenant-owned rows under the row-level policies.
//!
//! Run once after the database is up:
//! `DATABASE_URL=postgres://... cargo run --bin seed`

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ports::TenantCatalog;
use backend::outbound::persistence::{
    DbPool, DieselTenantCatalog, PoolConfig, run_pending_migrations, seed,
};

/// Seeder configuration, from flags or environment.
#[derive(Debug, Parser)]
#[command(name = "seed", about = "Seed demo tenants and employees")]
struct Args {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();

    run_pending_migrations(&args.database_url)?;

    let pool = DbPool::new(PoolConfig::new(&args.database_url).with_max_size(4)).await?;

    // Provision the catalog, then enumerate it, both with no tenant bound.
    seed::ensure_demo_tenants(&pool).await?;
    let catalog = DieselTenantCatalog::new(pool.clone());
    let tenants = catalog.list().await?;

    if tenants.is_empty() {
        warn!("no tenants found after provisioning; nothing to seed");
        return Ok(());
    }

    // One bound session per tenant for the tenant-owned rows.
    for tenant in &tenants {
        info!(tenant = %tenant.id, name = %tenant.name, "seeding tenant");
        seed::seed_tenant(&pool, tenant, &seed::demo_employees(&tenant.name)).await?;
    }

    info!(count = tenants.len(), "seed complete");
    Ok(())
}
