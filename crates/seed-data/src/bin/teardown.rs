//! Drops the bank database and everything in it.
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin teardown
//! ```

use bank::{ConnectionSettings, Database};
use seed_data::setup;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    setup::load_dotenv()?;
    setup::init_logging();

    let settings = ConnectionSettings::from_env()?;

    let server = Database::connect_server(&settings).await?;
    server.drop_database(&settings.database).await?;
    server.close().await;

    Ok(())
}
