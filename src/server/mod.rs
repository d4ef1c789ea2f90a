use std::convert::Infallible;
use std::future::Future;
use std::io;
use std::net::SocketAddr;

use http::{Method, Request, Response, StatusCode, header};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

use crate::config::{RequestLog, ServerConfig};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind port {port}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },
}

pub struct EchoServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    config: ServerConfig,
}

impl EchoServer {
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(config.listen_addr())
            .await
            .map_err(|source| ServerError::Bind {
                port: config.port,
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind {
                port: config.port,
                source,
            })?;

        info!("Listening on {}", local_addr);
        Ok(Self {
            listener,
            local_addr,
            config,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accepts and serves connections until the process interrupt signal
    /// arrives.
    pub async fn run(self) {
        let interrupt = async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install interrupt signal handler");
        };
        self.run_until(interrupt).await;
    }

    /// Accepts and serves connections until `shutdown` resolves, then drops
    /// the listener. One connection is fully served before the next accept,
    /// so request logs keep arrival order.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, client_addr)) => {
                        debug!("New connection from {}", client_addr);
                        if let Err(e) = self.serve_connection(stream, client_addr).await {
                            error!("Error handling connection from {}: {}", client_addr, e);
                        }
                    }
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                    }
                },
            }
        }
    }

    async fn serve_connection(
        &self,
        stream: TcpStream,
        client_addr: SocketAddr,
    ) -> hyper::Result<()> {
        let io = TokioIo::new(stream);
        let service = service_fn(|req: Request<hyper::body::Incoming>| {
            let response = handle_request(&self.config, client_addr, &req);
            async move { response }
        });

        // Keep-alive stays off: one exchange per connection, so an idle
        // client cannot hold the accept loop between requests.
        http1::Builder::new()
            .keep_alive(false)
            .serve_connection(io, service)
            .await
    }
}

fn handle_request<B>(
    config: &ServerConfig,
    client_addr: SocketAddr,
    req: &Request<B>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    log_request(config, client_addr, req);

    // Methods without a handler get the stock 501 fallback.
    if req.method() != Method::GET {
        let body = format!("Unsupported method ('{}')", req.method());
        return Ok(plain_text(StatusCode::NOT_IMPLEMENTED, Bytes::from(body)));
    }

    // The request body is never read and the message never depends on the
    // path or query string.
    Ok(plain_text(
        StatusCode::OK,
        Bytes::from(config.response_message.clone()),
    ))
}

fn log_request<B>(config: &ServerConfig, client_addr: SocketAddr, req: &Request<B>) {
    match config.request_log {
        RequestLog::Headers => {
            info!("Received request from {}", client_addr);
            info!("Path: {}", req.uri());
            let mut headers = String::new();
            for (name, value) in req.headers() {
                headers.push_str(name.as_str());
                headers.push_str(": ");
                headers.push_str(&String::from_utf8_lossy(value.as_bytes()));
                headers.push('\n');
            }
            info!("Headers:\n{}", headers);
        }
        RequestLog::AddressOnly => {
            info!(
                "Request from {} served by instance on port {}",
                client_addr, config.port
            );
        }
    }
}

fn plain_text(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(body))
        .unwrap()
}
