use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write;

use chess_club_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let coupon_service = CouponService::new(pool.clone(), config.coupons.generated_code_length);
    let checkout_service = CheckoutService::new(pool.clone(), coupon_service.clone());
    let tournament_service = TournamentService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let allowed_origins = config.server.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&allowed_origins))
            .app_data(web::Data::new(coupon_service.clone()))
            .app_data(web::Data::new(checkout_service.clone()))
            .app_data(web::Data::new(tournament_service.clone()))
            .configure(swagger_config)
            .service(web::scope("/api/v1").configure(handlers::api_config))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
