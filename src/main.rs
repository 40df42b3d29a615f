use dotenvy::dotenv;
use review_ledger::{
    config,
    core::{customer, item, review},
    errors::Result,
};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Connect and make sure the schema exists
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 4. Seed from config.toml when present
    if let Some(seed) = config::seed::load_default_config()? {
        review_ledger::core::seed::seed_database(&db, &seed)
            .await
            .inspect(|()| info!("Seed data applied."))
            .inspect_err(|e| error!("Failed to seed database: {}", e))?;
    }

    // 5. Print every entity's full view
    let mut customers = Vec::new();
    for model in customer::get_all_customers(&db).await? {
        customers.push(customer::render_full(&db, &model).await?);
    }
    let mut items = Vec::new();
    for model in item::get_all_items(&db).await? {
        items.push(item::render_full(&db, &model).await?);
    }
    let mut reviews = Vec::new();
    for model in review::get_all_reviews(&db).await? {
        reviews.push(review::render_full(&db, &model).await?);
    }

    let snapshot = json!({
        "customers": customers,
        "items": items,
        "reviews": reviews,
    });
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
