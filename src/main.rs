use anyhow::Result;

use echo_backend::config::{self, ServerConfig};
use echo_backend::server::EchoServer;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("echo_backend=debug,info")
        .init();

    let port = config::port_from_arg(std::env::args().nth(1));
    let config = ServerConfig::backend(port);

    let server = EchoServer::bind(config).await?;
    println!(">>> Backend Server started on port {}...", port);

    server.run().await;
    Ok(())
}
