//! Creates the bank database on the configured MySQL server.
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin create-db
//! ```

use bank::{ConnectionSettings, Database};
use seed_data::setup;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    setup::load_dotenv()?;
    setup::init_logging();

    let settings = ConnectionSettings::from_env()?;

    let server = Database::connect_server(&settings).await?;
    server.create_database(&settings.database).await?;
    server.close().await;

    Ok(())
}
