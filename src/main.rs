use timetable_server::config::Config;
use timetable_server::{app, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cfg = Config::from_env()?;
    let pool = db::init_pool(&cfg.database_path).await?;
    db::run_migrations(&pool).await?;

    let addr = cfg.addr;
    log::info!("Starting Timetable HTTP Server on http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app(pool, cfg).into_make_service())
        .await?;
    Ok(())
}
