use actix_web::{middleware::Logger, web, App, HttpServer};
use blackjack_series::config::init_logging;
use blackjack_series::prelude::*;
use clap::Parser;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    let store = web::Data::new(config.match_store());

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    log::info!("listening at {}:{}...", config.address, config.port);
    server
        .bind((config.address.as_str(), config.port))?
        .run()
        .await
}
