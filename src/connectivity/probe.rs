//! Connectivity probes
//!
//! A probe answers one question: can outbound AI requests go out right now?

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Source of truth for the online flag
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Check the environment; called on every connectivity event
    async fn is_online(&self) -> bool;

    /// Probe name for logging
    fn name(&self) -> &str;
}

/// Reachability check against an HTTP endpoint
///
/// Any HTTP response, whatever the status, means the backend is reachable.
/// Connection failures and timeouts mean offline.
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ConnectivityProbe for HttpProbe {
    async fn is_online(&self) -> bool {
        match self.client.get(&self.url).send().await {
            Ok(response) => {
                tracing::trace!(url = %self.url, status = %response.status(), "Probe reached backend");
                true
            }
            Err(e) => {
                tracing::debug!(url = %self.url, error = %e, "Probe failed");
                false
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Probe whose answer is set by hand (`--offline`, tests)
#[derive(Debug, Clone)]
pub struct ManualProbe {
    online: Arc<AtomicBool>,
}

impl ManualProbe {
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    /// Change what the next check reports
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConnectivityProbe for ManualProbe {
    async fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "manual"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_manual_probe() {
        let probe = ManualProbe::new(true);
        assert!(probe.is_online().await);

        probe.clone().set_online(false);
        assert!(!probe.is_online().await);
    }

    #[tokio::test]
    async fn test_http_probe_any_status_is_online() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let probe = HttpProbe::new(server.uri(), Duration::from_secs(2)).unwrap();
        assert!(probe.is_online().await);
    }

    #[tokio::test]
    async fn test_http_probe_unreachable_is_offline() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{port}/");
        let probe = HttpProbe::new(url, Duration::from_millis(500)).unwrap();
        assert!(!probe.is_online().await);
    }
}
