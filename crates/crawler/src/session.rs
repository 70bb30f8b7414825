// ABOUTME: Polite per-source fetch session: bounded fixed retry, inter-request delay, charset decoding.
// ABOUTME: Also defines the Renderer capability used as a fallback for JavaScript-rendered pages.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use ipnet::{Ipv4Net, Ipv6Net};
use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::CrawlError;

/// Maximum allowed response body (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Settings for one source's fetch session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub timeout: Duration,
    /// Fixed sleep enforced after every successful fetch.
    pub request_delay: Duration,
    /// Total attempts per URL. Fixed wait between attempts, not exponential.
    pub max_retries: u32,
    pub retry_wait: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub allow_private_networks: bool,
    pub http_client: Option<reqwest::Client>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        let mut headers = HashMap::new();
        headers.insert(
            "Accept".to_string(),
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
        );
        headers.insert(
            "Accept-Language".to_string(),
            "en-IN,en;q=0.9,hi;q=0.8".to_string(),
        );
        Self {
            timeout: Duration::from_secs(30),
            request_delay: Duration::from_secs(2),
            max_retries: 3,
            retry_wait: Duration::from_secs(2),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers,
            allow_private_networks: false,
            http_client: None,
        }
    }
}

impl SessionOptions {
    /// Options suitable for tests: no politeness delay, local addresses allowed.
    pub fn immediate() -> Self {
        Self {
            request_delay: Duration::ZERO,
            retry_wait: Duration::ZERO,
            allow_private_networks: true,
            ..Default::default()
        }
    }
}

/// One source's HTTP session. Constructed by the orchestrator, exclusively
/// owned by that source's strategy for the duration of the run, and dropped
/// at source end regardless of outcome.
pub struct Session {
    client: reqwest::Client,
    opts: SessionOptions,
}

impl Session {
    pub fn new(opts: SessionOptions) -> Result<Self, CrawlError> {
        let client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(opts.timeout)
                .user_agent(opts.user_agent.clone())
                .redirect(reqwest::redirect::Policy::limited(5))
                .cookie_store(true)
                .build()
                .map_err(|e| {
                    CrawlError::fetch("", "NewSession", Some(anyhow::anyhow!(e)))
                })?,
        };
        Ok(Self { client, opts })
    }

    /// Fetches a page and returns its decoded text, retrying transient
    /// failures a bounded number of times with a fixed wait. Sleeps the
    /// configured delay after a successful fetch so target sites are never
    /// hammered back to back.
    pub async fn get_text(&self, url: &str) -> Result<String, CrawlError> {
        let attempts = self.opts.max_retries.max(1);
        let mut last_err = None;

        for attempt in 1..=attempts {
            match self.fetch_once(url).await {
                Ok(text) => {
                    if !self.opts.request_delay.is_zero() {
                        tokio::time::sleep(self.opts.request_delay).await;
                    }
                    return Ok(text);
                }
                Err(e) if e.is_fetch() || e.is_timeout() => {
                    debug!(url, attempt, error = %e, "fetch attempt failed");
                    last_err = Some(e);
                    if attempt < attempts && !self.opts.retry_wait.is_zero() {
                        tokio::time::sleep(self.opts.retry_wait).await;
                    }
                }
                // Invalid or blocked URLs never get better with retries.
                Err(e) => return Err(e),
            }
        }

        Err(last_err.expect("at least one attempt"))
    }

    async fn fetch_once(&self, url: &str) -> Result<String, CrawlError> {
        if url.is_empty() {
            return Err(CrawlError::invalid_url(url, "Fetch", None));
        }

        let parsed = url::Url::parse(url).map_err(|e| {
            CrawlError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
        })?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(CrawlError::invalid_url(
                url,
                "Fetch",
                Some(anyhow::anyhow!("scheme must be http or https")),
            ));
        }

        if !self.opts.allow_private_networks {
            self.check_host(&parsed, url).await?;
        }

        let mut request = self.client.get(url);
        for (key, value) in &self.opts.headers {
            request = request.header(key, value);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CrawlError::timeout(url, "Fetch", Some(anyhow::anyhow!(e)))
            } else {
                CrawlError::fetch(url, "Fetch", Some(anyhow::anyhow!(e)))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("HTTP status {}", status.as_u16())),
            ));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase());

        let body = response.bytes().await.map_err(|e| {
            CrawlError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("failed to read body: {}", e)),
            )
        })?;

        if body.len() > MAX_CONTENT_LENGTH {
            return Err(CrawlError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }

        Ok(decode_body(&body, content_type.as_deref()))
    }

    /// Refuses literal private IPs and hostnames resolving to private ranges.
    async fn check_host(&self, parsed: &url::Url, url: &str) -> Result<(), CrawlError> {
        let host = match parsed.host_str() {
            Some(h) => h,
            None => return Ok(()),
        };

        if let Ok(ip) = host.parse::<IpAddr>() {
            if is_private_ip(&ip) {
                return Err(CrawlError::blocked(
                    url,
                    "Fetch",
                    Some(anyhow::anyhow!("private IP addresses are not allowed")),
                ));
            }
            return Ok(());
        }

        let port = parsed
            .port()
            .unwrap_or(if parsed.scheme() == "https" { 443 } else { 80 });
        let addrs = tokio::net::lookup_host((host, port)).await.map_err(|e| {
            CrawlError::fetch(url, "Fetch", Some(anyhow::anyhow!("DNS lookup failed: {}", e)))
        })?;
        for socket_addr in addrs {
            if is_private_ip(&socket_addr.ip()) {
                return Err(CrawlError::blocked(
                    url,
                    "Fetch",
                    Some(anyhow::anyhow!("private IP addresses are not allowed")),
                ));
            }
        }
        Ok(())
    }
}

/// The external "fully rendered HTML" capability for JavaScript-heavy pages.
/// The crawler ships no browser; the orchestrator may be handed an
/// implementation, and without one the render fallback simply stays off.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &str, wait_for: Option<&str>) -> Result<String, CrawlError>;
}

static PRIVATE_V4: Lazy<Vec<Ipv4Net>> = Lazy::new(|| {
    [
        "10.0.0.0/8",
        "172.16.0.0/12",
        "192.168.0.0/16",
        "127.0.0.0/8",
        "169.254.0.0/16",
    ]
    .iter()
    .map(|net| net.parse().unwrap())
    .collect()
});

static PRIVATE_V6: Lazy<Vec<Ipv6Net>> =
    Lazy::new(|| ["fc00::/7", "fe80::/10"].iter().map(|net| net.parse().unwrap()).collect());

/// Check if an IP address is in a private/reserved range.
fn is_private_ip(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(ip) => PRIVATE_V4.iter().any(|net| net.contains(ip)),
        IpAddr::V6(ip) => ip.is_loopback() || PRIVATE_V6.iter().any(|net| net.contains(ip)),
    }
}

/// Decode body bytes to a String using the content-type charset when present,
/// falling back to chardetng detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract the charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    for part in content_type.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}
