//! HTTP transport types and the blocking `ureq` transport.
//!
//! # Design
//! Fetchers describe requests as plain data (`HttpRequest`) and hand them to a
//! `Transport`. The transport returns the status and headers immediately and
//! leaves the body as an unread stream, so the client can reject a status
//! without ever touching the payload. `UreqTransport` is the production
//! implementation; tests plug in scripted transports through the same trait.

use std::fmt;
use std::io::{self, Read};
use std::time::Duration;

use thiserror::Error;

/// HTTP method for a request. Only reads are in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response whose body has not been read yet.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    body: Box<dyn Read>,
}

impl HttpResponse {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: impl Read + 'static) -> Self {
        Self {
            status,
            headers,
            body: Box::new(body),
        }
    }

    /// A response with an in-memory body.
    pub fn from_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, Vec::new(), io::Cursor::new(body.into()))
    }

    /// Drain the body stream into memory.
    pub fn read_body(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.body.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Failure reported by a `Transport` before any status is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be constructed.
    #[error("{0}")]
    Build(String),

    /// The request was sent but the exchange failed.
    #[error("{0}")]
    Execute(String),
}

/// Executes one HTTP round trip.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a single `ureq::Agent`.
///
/// The agent owns the connection pool and is reused for every request. Status
/// codes are never turned into errors here; that policy belongs to the client.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = ureq::http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let result = match &request.body {
            None => {
                let req = builder
                    .body(())
                    .map_err(|e| TransportError::Build(e.to_string()))?;
                self.agent.run(req)
            }
            Some(body) => {
                let req = builder
                    .body(body.clone())
                    .map_err(|e| TransportError::Build(e.to_string()))?;
                self.agent.run(req)
            }
        };

        let response = result.map_err(|e| match e {
            ureq::Error::BadUri(_) | ureq::Error::Http(_) => TransportError::Build(e.to_string()),
            other => TransportError::Execute(other.to_string()),
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.into_body().into_reader();

        Ok(HttpResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_body_is_readable() {
        let response = HttpResponse::from_bytes(200, r#"{"ID":1}"#);
        assert_eq!(response.status, 200);
        assert_eq!(response.read_body().unwrap(), br#"{"ID":1}"#.to_vec());
    }

    #[test]
    fn debug_omits_body() {
        let response = HttpResponse::from_bytes(404, "");
        let rendered = format!("{response:?}");
        assert!(rendered.contains("404"));
        assert!(!rendered.contains("body"));
    }

    #[test]
    fn malformed_url_is_a_build_error() {
        let transport = UreqTransport::new(Duration::from_secs(1));
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "https://exa mple.com/api".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = transport.execute(&request).unwrap_err();
        assert!(matches!(err, TransportError::Build(_)));
    }

    #[test]
    fn refused_connection_is_an_execute_error() {
        // Bind then drop to get a port with nothing listening on it.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let transport = UreqTransport::new(Duration::from_secs(5));
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: format!("http://127.0.0.1:{port}/api/v1.0/companies/"),
            headers: Vec::new(),
            body: None,
        };
        let err = transport.execute(&request).unwrap_err();
        assert!(matches!(err, TransportError::Execute(_)));
    }
}
