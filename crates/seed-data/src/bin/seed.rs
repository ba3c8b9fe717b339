//! Creates the bank tables if needed and seeds random customers.
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! ```

use bank::{ConnectionSettings, Database};
use seed_data::config::SeedConfig;
use seed_data::db::Seeder;
use seed_data::setup;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    setup::load_dotenv()?;
    setup::init_logging();

    let settings = ConnectionSettings::from_env()?;
    let config = SeedConfig::from_env()?;

    let db = Database::connect(&settings).await?;
    tracing::info!("Connected to database");

    db.create_tables().await?;

    let mut rng = rand::thread_rng();
    let report = Seeder::new(&db).run(&config, &mut rng).await?;

    db.close().await;

    tracing::info!("Seed completed!");
    tracing::info!("  Requested: {}", report.requested);
    tracing::info!("  Created: {}", report.created);
    tracing::info!("  Collisions: {}", report.collisions);
    tracing::info!("  Pre-existing: {}", report.pre_existing);

    Ok(())
}
