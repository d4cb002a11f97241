//! Blocking HTTP retrieval with linear backoff and seeded jitter.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::settings::FetchSettings;

/// Source of raw response bodies. Implementations decide how hard to try;
/// an `Err` means the caller gets nothing for this URL.
pub trait Fetcher {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
    retries: u32,
    backoff: Duration,
    jitter: Duration,
    rng: Mutex<StdRng>,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(v) = HeaderValue::from_str(&settings.accept) {
            headers.insert(ACCEPT, v);
        }
        if let Ok(v) = HeaderValue::from_str(&settings.accept_language) {
            headers.insert(ACCEPT_LANGUAGE, v);
        }
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(HttpFetcher {
            client,
            retries: settings.retries.max(1),
            backoff: Duration::from_secs_f64(settings.backoff_secs.max(0.0)),
            jitter: Duration::from_secs_f64(settings.jitter_secs.max(0.0)),
            rng: Mutex::new(StdRng::seed_from_u64(settings.seed)),
        })
    }

    /// Delay before attempt `attempt` (1-based): `backoff * (attempt - 1)`
    /// plus up to `jitter`.
    fn delay_before(&self, attempt: u32) -> Duration {
        let unit: f64 = match self.rng.lock() {
            Ok(mut rng) => rng.gen(),
            Err(_) => 0.0,
        };
        self.backoff * (attempt - 1) + self.jitter.mul_f64(unit)
    }

    fn attempt(&self, url: &str, query: &[(&str, &str)]) -> std::result::Result<String, String> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        let body = resp.text().map_err(|e| e.to_string())?;
        if status == StatusCode::OK && !body.is_empty() {
            Ok(body)
        } else {
            Err(format!("HTTP {} for {}", status.as_u16(), url))
        }
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        let mut last_err = String::from("no attempt made");
        for attempt in 1..=self.retries {
            let delay = self.delay_before(attempt);
            debug!(url, attempt, delay_ms = delay.as_millis() as u64, "Fetching");
            thread::sleep(delay);

            match self.attempt(url, query) {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!(url, attempt, retries = self.retries, error = %e, "Fetch attempt failed");
                    last_err = e;
                }
            }
        }
        Err(PipelineError::Retrieval {
            url: url.to_string(),
            attempts: self.retries,
            reason: last_err,
        })
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_settings() -> FetchSettings {
        FetchSettings {
            timeout_secs: 1,
            retries: 2,
            backoff_secs: 0.0,
            jitter_secs: 0.0,
            ..FetchSettings::default()
        }
    }

    #[test]
    fn backoff_grows_linearly() {
        let fetcher = HttpFetcher::new(&FetchSettings {
            backoff_secs: 1.0,
            jitter_secs: 0.0,
            ..FetchSettings::default()
        })
        .unwrap();
        assert_eq!(fetcher.delay_before(1), Duration::ZERO);
        assert_eq!(fetcher.delay_before(3), Duration::from_secs(2));
    }

    #[test]
    fn jitter_is_bounded_and_seeded() {
        let settings = FetchSettings {
            backoff_secs: 0.0,
            jitter_secs: 0.4,
            ..FetchSettings::default()
        };
        let a = HttpFetcher::new(&settings).unwrap();
        let b = HttpFetcher::new(&settings).unwrap();
        for attempt in 1..5 {
            let d = a.delay_before(attempt);
            assert!(d < Duration::from_millis(400));
            assert_eq!(d, b.delay_before(attempt));
        }
    }

    #[test]
    fn unreachable_host_exhausts_retries() {
        let fetcher = HttpFetcher::new(&fast_settings()).unwrap();
        let err = fetcher.get("http://127.0.0.1:9/api", &[]).unwrap_err();
        match err {
            PipelineError::Retrieval { attempts, url, .. } => {
                assert_eq!(attempts, 2);
                assert_eq!(url, "http://127.0.0.1:9/api");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
