use std::time::Duration;

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use url::Url;

use crate::config::env::SupabaseConfig;
use crate::error::ScrapeError;
use crate::http::auth_middleware::ApiKeyMiddleware;
use crate::http::log_middleware::LogMiddleware;
use crate::model::course_record::{CourseRecord, CourseRow};
use crate::sink::{RecordSink, SinkReport};

/// Inserts rows one at a time through the PostgREST endpoint of a Supabase project.
pub struct SupabaseSink {
    client: ClientWithMiddleware,
    endpoint: Url,
}

impl SupabaseSink {
    pub fn new(config: &SupabaseConfig, timeout: Duration) -> Result<Self, ScrapeError> {
        let endpoint = format!("{}/rest/v1/{}", config.url.trim_end_matches('/'), config.table);
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| ScrapeError::Config(format!("invalid SUPABASE_URL {}: {}", config.url, e)))?;

        let auth = ApiKeyMiddleware::new(&config.key)
            .map_err(|e| ScrapeError::Config(format!("invalid SUPABASE_KEY: {}", e)))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::Config(format!("cannot build HTTP client: {}", e)))?;
        let client = ClientBuilder::new(client)
            .with(auth)
            .with(LogMiddleware)
            .build();

        Ok(SupabaseSink { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn insert(&self, record: &CourseRecord) -> Result<(), ScrapeError> {
        let insert_error = |reason: String| ScrapeError::Insert {
            course_code: record.course_code.clone(),
            reason,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Prefer", "return=minimal")
            .json(&CourseRow::from(record))
            .send()
            .await
            .map_err(|e| insert_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = match response.text().await {
                Ok(body) => format!("{} {}", status, body.trim()),
                Err(err) => format!("{} (body unreadable: {})", status, err),
            };
            return Err(insert_error(reason));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordSink for SupabaseSink {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn write(&self, records: &[CourseRecord]) -> Result<SinkReport, ScrapeError> {
        let mut report = SinkReport::default();
        for record in records {
            match self.insert(record).await {
                Ok(()) => {
                    log::info!("Inserted course: {} - {}", record.course_code, record.course_name);
                    report.written += 1;
                }
                Err(err) => {
                    log::error!("{}", err);
                    report.failed.push(record.course_code.clone());
                }
            }
        }
        log::info!(
            "Inserted {} of {} courses into {}",
            report.written,
            records.len(),
            self.endpoint
        );
        Ok(report)
    }
}
