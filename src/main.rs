use dotenv::dotenv;
use receipt_processor::api::server;
use receipt_processor::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = ServerConfig::from_env()?;
    server::run_server(config).await
}
