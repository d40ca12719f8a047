//! Periodic snapshot export.
//!
//! Providers turn a live or cached source into one [`DataPoint`] per cycle;
//! exporters forward each cycle's batch to a sink. The [`ExportHub`] drives
//! both on a timer, isolating every provider and exporter failure so one
//! broken sensor never stops collection of the rest.

mod hub;
mod point;

pub use hub::ExportHub;
pub use point::{
    BoxError, DataPoint, Exporter, FieldValue, LOCATION_TAG, LogExporter, ProviderFn,
};
