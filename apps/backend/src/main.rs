use actix_web::{web, App, HttpServer};
use backend::config::ServerConfig;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::app_state::AppState;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // BACKEND_HOST, BACKEND_PORT, BACKEND_DEAL_SEED, MAX_JSON_PAYLOAD_SIZE
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };

    let host = config.host.clone();
    let port = config.port;
    info!(
        host = %host,
        port,
        seeded = config.deal_seed.is_some(),
        "Starting tycoon backend"
    );

    let data = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
