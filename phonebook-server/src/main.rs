use dotenvy::dotenv;
use env_logger::Env;
use log::error;
use phonebook_server::config::Config;
use phonebook_server::http::{self, AppState};
use std::process;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            error!("Invalid configuration: {error}");
            process::exit(1);
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(error) => {
            error!("Could not prepare data directory: {error}");
            process::exit(1);
        }
    };

    http::listen(state, &config).await;
}
