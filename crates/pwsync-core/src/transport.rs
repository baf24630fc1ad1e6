//! HTTP GET transport.
//!
//! The fetcher only needs a status code and a fully buffered body, so the
//! seam is a single blocking `get`. [`CurlTransport`] is the libcurl-backed
//! implementation used by the CLI.

use std::time::Duration;

/// Boxed error from the underlying HTTP stack (DNS, connect, TLS, timeout...).
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Status code and full body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Blocking HTTP GET. `headers` are `(name, value)` pairs sent verbatim.
pub trait Transport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError>;
}

/// Transport tuning. `None` leaves libcurl's default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurlOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// GET via a fresh `curl::easy::Easy` handle per request. Follows redirects.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: CurlOptions,
}

impl CurlTransport {
    pub fn new(options: CurlOptions) -> Self {
        Self { options }
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        if let Some(d) = self.options.connect_timeout {
            easy.connect_timeout(d)?;
        }
        if let Some(d) = self.options.timeout {
            easy.timeout(d)?;
        }
        if let Some(ua) = &self.options.user_agent {
            easy.useragent(ua)?;
        }

        let mut list = curl::easy::List::new();
        for (k, v) in headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !headers.is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(url, status, bytes = body.len(), "GET finished");
        Ok(HttpResponse { status, body })
    }
}
