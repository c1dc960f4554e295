pub mod csv_sink;
pub mod supabase_sink;

use async_trait::async_trait;

use crate::error::ScrapeError;
use crate::model::course_record::CourseRecord;

/// Outcome of handing finalized records to a sink.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SinkReport {
    pub written: usize,
    /// Course codes the sink rejected.
    pub failed: Vec<String>,
}

/// Durable destination for finalized course records.
#[async_trait]
pub trait RecordSink: Send + Sync {
    fn name(&self) -> &str;

    async fn write(&self, records: &[CourseRecord]) -> Result<SinkReport, ScrapeError>;
}
