//! Export data points and the provider/exporter contracts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use tracing::info;

/// Boxed error for the provider/exporter boundary; concrete sinks bring
/// their own error types.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Tag key naming where a point was captured.
pub const LOCATION_TAG: &str = "location";

/// A field value in a data point.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
    Text(String),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// One export-ready snapshot: a table name, identifying tags, measured
/// fields, and the capture timestamp.
///
/// Created fresh each cycle by a provider and owned by the hub only for the
/// duration of one export call.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub table: String,
    pub tags: HashMap<String, String>,
    pub fields: HashMap<String, FieldValue>,
    pub stamp: DateTime<Utc>,
}

impl DataPoint {
    /// New point stamped with the current time.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            tags: HashMap::new(),
            fields: HashMap::new(),
            stamp: Utc::now(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// A source of one data point per export cycle.
pub type ProviderFn = Box<dyn Fn() -> BoxFuture<'static, Result<DataPoint, BoxError>> + Send + Sync>;

/// A sink receiving each cycle's batch.
#[async_trait::async_trait]
pub trait Exporter: Send + Sync {
    /// Short name used in failure logs.
    fn name(&self) -> &'static str;

    async fn export(&self, points: &[DataPoint]) -> Result<(), BoxError>;
}

/// Exporter that writes the batch to the structured log.
///
/// Stands in for a real metrics sink during local runs; an empty batch is a
/// no-op.
pub struct LogExporter;

#[async_trait::async_trait]
impl Exporter for LogExporter {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn export(&self, points: &[DataPoint]) -> Result<(), BoxError> {
        for point in points {
            info!(
                table = %point.table,
                tags = ?point.tags,
                fields = ?point.fields,
                stamp = %point.stamp,
                "export",
            );
        }
        Ok(())
    }
}
