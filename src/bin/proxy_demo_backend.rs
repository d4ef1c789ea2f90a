use anyhow::Result;

use echo_backend::config::ServerConfig;
use echo_backend::server::EchoServer;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("echo_backend=debug,info")
        .init();

    let config = ServerConfig::proxy_demo();
    let port = config.port;

    let server = EchoServer::bind(config).await?;
    println!(">>> Python Backend Server running on port {}...", port);

    server.run().await;
    println!(">>> Server stopped.");
    Ok(())
}
