// SPDX-License-Identifier: MIT

//! HTTP(S) connector: a plain GET, or one forced onto HTTP/2 with prior
//! knowledge to probe whether a target actually speaks h2 or just
//! reflects the ALPN offer (spec §4.2, `ecn`/`h2` plugins).

use super::ConnectorAdapter;
use async_trait::async_trait;
use pathspider_core::{ActiveRecord, ConnState, Job};
use std::time::Duration;
use tokio::time::Instant;

/// Which HTTP version this connector instance negotiates, independent of
/// which configuration index it is invoked under — a plugin whose
/// configurations differ in some other way (e.g. `ecn`'s sysctl toggle)
/// reuses one instance across every index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVersion {
    Http1,
    H2PriorKnowledge,
}

/// URL scheme this connector instance dials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpConnector {
    pub request_timeout: Duration,
    pub scheme: Scheme,
    pub version: HttpVersion,
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            scheme: Scheme::Http,
            version: HttpVersion::Http1,
        }
    }
}

impl HttpConnector {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            request_timeout,
            ..Self::default()
        }
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_version(mut self, version: HttpVersion) -> Self {
        self.version = version;
        self
    }

    fn client(&self) -> reqwest::Result<reqwest::Client> {
        let builder = reqwest::Client::builder().timeout(self.request_timeout);
        let builder = match self.version {
            HttpVersion::H2PriorKnowledge => builder.http2_prior_knowledge(),
            HttpVersion::Http1 => builder.http1_only(),
        };
        builder.build()
    }
}

#[async_trait]
impl ConnectorAdapter for HttpConnector {
    async fn connect(&self, job: &Job, config_index: usize, started_at_ms: u64) -> ActiveRecord {
        let mut record = ActiveRecord::new(job.id.clone(), config_index, started_at_ms);
        let attempt_start = Instant::now();

        let host = job.domain.clone().unwrap_or_else(|| job.ip.to_string());
        let url = format!("{}://{}:{}/", self.scheme.as_str(), host, job.port);

        match self.client() {
            Ok(client) => match client.get(&url).send().await {
                Ok(response) => {
                    record.state = ConnState::Ok;
                    record
                        .fields
                        .insert("h2_status".into(), (response.status().as_u16()).into());
                    record.fields.insert(
                        "h2_version".into(),
                        format!("{:?}", response.version()).into(),
                    );
                }
                Err(err) if err.is_timeout() => record.state = ConnState::Timeout,
                Err(_) => record.state = ConnState::Failed,
            },
            Err(_) => record.state = ConnState::Failed,
        }

        record.elapsed_ms = attempt_start.elapsed().as_millis() as u64;
        record
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
