//! Overwrites one user's password hash by email. Usage:
//!
//!     reset_password [email] [new_password]
//!
//! Without arguments it resets the seeded main admin account.

use timetable_server::auth::hash_password;
use timetable_server::config::Config;
use timetable_server::db;

const DEFAULT_EMAIL: &str = "admin@srmist.edu.in";
const DEFAULT_PASSWORD: &str = "admin123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let email = args.next().unwrap_or_else(|| DEFAULT_EMAIL.to_string());
    let password = args.next().unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

    let cfg = Config::from_env()?;
    let pool = db::init_pool(&cfg.database_path).await?;

    let hashed = hash_password(&password).map_err(|e| anyhow::anyhow!("hashing failed: {}", e))?;

    let res = sqlx::query("UPDATE users SET password_hash = ? WHERE email = ?")
        .bind(&hashed)
        .bind(&email)
        .execute(&pool)
        .await?;

    if res.rows_affected() == 0 {
        anyhow::bail!("no user with email {}", email);
    }

    println!("Password reset for {}", email);
    Ok(())
}
