//! Prints every user in the configured database, one per line.

use timetable_server::config::Config;
use timetable_server::db;
use timetable_server::models::Role;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cfg = Config::from_env()?;
    let pool = db::init_pool(&cfg.database_path).await?;

    let users: Vec<(i64, String, String, Role)> =
        sqlx::query_as("SELECT id, name, email, role FROM users ORDER BY id")
            .fetch_all(&pool)
            .await?;

    println!("All users in {:?}:", cfg.database_path);
    for (id, name, email, role) in users {
        println!(
            "ID: {} | Name: {} | Email: {} | Role: {}",
            id,
            name,
            email,
            role.as_str()
        );
    }

    Ok(())
}
