//! Seeds the orders table with sample rows for manual testing.
//!
//! Creates the table if it does not exist yet and inserts one order per
//! status label, each with a random 10-character id. The ids are printed so
//! a tester can text them to the webhook number. Not part of the runtime
//! path.

use order_sms::config::AppConfig;
use rand::Rng;
use rand::distributions::Alphanumeric;
use sqlx::PgPool;

const STATUSES: [&str; 4] = ["approved", "delivered", "in transit", "awaiting approval"];

const STREETS: [&str; 8] = [
    "1042 Wisteria Ln",
    "77 Hudson St",
    "5th Ave",
    "Main St",
    "280 Crescent Blvd",
    "19 Dockside Way",
    "901 Mercer Rd",
    "34 Elmwood Dr",
];

fn random_order_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let pool = PgPool::connect(&config.database.url).await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS orders (
            order_id TEXT PRIMARY KEY,
            current_location TEXT NOT NULL,
            last_location TEXT NOT NULL,
            status TEXT NOT NULL
        )",
    )
    .execute(&pool)
    .await?;

    let mut rng = rand::thread_rng();
    for status in STATUSES {
        let order_id = random_order_id();
        let current = STREETS[rng.gen_range(0..STREETS.len())];
        let last = STREETS[rng.gen_range(0..STREETS.len())];

        sqlx::query(
            "INSERT INTO orders (order_id, current_location, last_location, status) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&order_id)
        .bind(current)
        .bind(last)
        .bind(status)
        .execute(&pool)
        .await?;

        println!("seeded order {order_id} ({status})");
    }

    Ok(())
}
