use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestLog {
    /// Client address plus request target and the full header block.
    Headers,
    /// Client address and which port instance served the request.
    AddressOnly,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub response_message: String,
    pub request_log: RequestLog,
}

impl ServerConfig {
    /// Standalone backend: the message carries the port it was started on.
    pub fn backend(port: u16) -> Self {
        Self {
            port,
            response_message: format!("Hello from Backend Server running on Port {}!", port),
            request_log: RequestLog::AddressOnly,
        }
    }

    /// Backend placed behind the proxy demo; the response body is
    /// byte-compatible with the backend it stands in for.
    pub fn proxy_demo() -> Self {
        Self {
            port: DEFAULT_PORT,
            response_message: "Hello from Python Backend! (Via Netty Proxy)".to_string(),
            request_log: RequestLog::Headers,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Lenient parse of the single positional argument: absent and unparsable
/// both fall back to the default port.
pub fn port_from_arg(arg: Option<String>) -> u16 {
    arg.and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT)
}
