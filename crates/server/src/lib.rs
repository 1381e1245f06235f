//! HTTP and WebSocket serving layer for gridfall.
//!
//! A thin adapter around the engine: REST-ish routes for account and
//! game mutations, one WebSocket route streaming diff events, and the
//! scheduler that drives the periodic ticks through the very same
//! engine methods the request handlers use.
//!
//! ## Submodules
//!
//! - [`config`] — clap-derived runtime configuration
//! - [`handlers`] — `/game` route implementations
//! - [`stream`] — WebSocket bridge onto the update broadcaster
//! - [`scheduler`] — interval tasks for the maintenance ticks

pub mod config;
pub mod handlers;
pub mod scheduler;
pub mod stream;

pub use config::Config;
pub use scheduler::Scheduler;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use gfl_engine::Engine;
use gfl_storage::Store;
use std::sync::Arc;

/// The one engine instantiation the whole server shares.
pub type GameEngine = Engine<Arc<Store>>;

async fn health(engine: web::Data<GameEngine>, store: web::Data<Arc<Store>>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "players": engine.active_players(),
        "users": store.population(),
    }))
}

#[rustfmt::skip]
pub async fn run(config: Config) -> Result<(), std::io::Error> {
    let bind = config.bind();
    let store = Arc::new(Store::open(config.storage.clone()));
    let engine = Arc::new(Engine::new(config.engine(), store.clone()));
    Scheduler::spawn(engine.clone(), store.clone(), &config);
    let tokens = web::Data::new(gfl_auth::Crypto::from_env());
    let engine = web::Data::from(engine);
    let directory = web::Data::new(store.clone());
    log::info!("starting gridfall server on {}", bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(engine.clone())
            .app_data(directory.clone())
            .app_data(tokens.clone())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(gfl_auth::register))
                    .route("/login", web::post().to(gfl_auth::login))
                    .route("/guest", web::post().to(gfl_auth::guest))
                    .route("/rename", web::post().to(gfl_auth::rename))
                    .route("/password", web::post().to(gfl_auth::change_password))
                    .route("/renew", web::post().to(gfl_auth::renew))
                    .route("/me", web::get().to(gfl_auth::me)),
            )
            .service(
                web::scope("/game")
                    .route("/join", web::post().to(handlers::join))
                    .route("/leave", web::post().to(handlers::leave))
                    .route("/place/{column}", web::post().to(handlers::place))
                    .route("/updates", web::get().to(stream::updates)),
            )
    })
    .workers(6)
    .bind(bind)?
    .run()
    .await?;
    // the scheduler dies with the runtime, so flush scores ourselves
    if let Err(e) = store.save() {
        log::error!("final score flush failed: {}", e);
    }
    Ok(())
}
