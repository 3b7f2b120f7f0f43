use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use ticklist::auth::{AuthMiddleware, AuthService, TokenSigner};
use ticklist::config::Config;
use ticklist::routes;
use ticklist::state::AppState;
use ticklist::store::{MemStore, PgStore, Store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let pool = PgPool::connect(url)
                .await
                .expect("Failed to connect to database");
            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("Failed to run migrations");
            Arc::new(PgStore::new(pool))
        }
        None => {
            log::warn!("DATABASE_URL not set; using in-memory store (data is not persisted)");
            Arc::new(MemStore::new())
        }
    };

    let signer = Arc::new(TokenSigner::new(&config.jwt_secret));
    let auth = AuthService::new(store.clone(), signer);
    let state = AppState::new(store, auth, config.cookie_secure);

    log::info!("Starting ticklist server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            // Registration order is inside-out: the session gate runs after
            // CORS and logging have seen the request.
            .wrap(AuthMiddleware::new(state.auth.clone()))
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
