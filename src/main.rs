use actix_web::middleware::Logger;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};

use survey::config::Config;
use survey::core::ports::repository::Manager;
use survey::database::{memory::MemoryStore, postgres::PgSqlxManager, seed::intake_survey};
use survey::error::Error;
use survey::handlers;

async fn serve<M>(manager: M, config: Config) -> Result<(), Error>
where
    M: Manager + Clone + Send + 'static,
{
    let bind = (config.host.clone(), config.port);
    log::info!("listening on {}:{}{}", bind.0, bind.1, config.api_root);
    HttpServer::new(move || {
        let api_root = config.api_root.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(Data::new(manager.clone()))
            .app_data(Data::new(config.clone()))
            .configure(move |cfg| handlers::configure::<M>(cfg, &api_root))
            .default_service(web::to(handlers::not_found))
    })
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::from_env()?;
    match config.database_url.clone() {
        Some(url) => {
            let manager = PgSqlxManager::connect(&url, config.db_max_connections).await?;
            serve(manager, config).await
        }
        None => {
            log::warn!("DATABASE_URL not set, serving the intake survey from memory");
            serve(MemoryStore::with_surveys(vec![intake_survey()]), config).await
        }
    }
}
