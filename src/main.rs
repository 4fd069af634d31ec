use log::{error, info};
use std::process;
use std::sync::Arc;
use warp::Filter;

use recovery_quote_backend::config::AppConfig;
use recovery_quote_backend::routes;
use recovery_quote_backend::services::llm::{ChatModel, DisabledChat, OpenAiChat};
use recovery_quote_backend::state::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            process::exit(1);
        }
    };

    let rates = match config.load_rate_table() {
        Ok(rates) => rates,
        Err(e) => {
            error!("Failed to load pricing tables: {:#}", e);
            process::exit(1);
        }
    };

    let chat: Arc<dyn ChatModel> = match &config.openai_api_key {
        Some(key) => Arc::new(OpenAiChat::new(key.clone(), config.chat.clone())),
        None => Arc::new(DisabledChat),
    };

    let addr = config.addr();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    let api = routes::routes(AppState::new(rates, chat)).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
}
