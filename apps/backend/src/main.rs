use actix_web::{web, App, HttpServer};
use quizroom::middleware::request_trace::RequestTrace;
use quizroom::middleware::structured_logger::StructuredLogger;
use quizroom::{routes, telemetry, AppState, QuestionSourceConfig, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // QUIZROOM_HOST, QUIZROOM_PORT, QUIZROOM_QUESTIONS_FILE,
    // QUIZROOM_HEARTBEAT_SECS, QUIZROOM_CLIENT_TIMEOUT_SECS
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    match &config.questions {
        QuestionSourceConfig::Sample => {
            tracing::info!("Using built-in sample questions");
        }
        QuestionSourceConfig::File(path) => {
            tracing::info!(path = %path.display(), "Using question bank file");
        }
    }

    let host = config.host.clone();
    let port = config.port;
    println!("🚀 Starting Quizroom on http://{host}:{port}");

    let data = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
