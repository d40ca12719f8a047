//! The export scheduler.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::point::{Exporter, ProviderFn};

/// Timer-driven scheduler fanning registered providers out to registered
/// exporters.
///
/// The first cycle runs immediately; each later cycle starts `interval`
/// after the previous one finished. Failures are observational only: a
/// provider that errors is skipped for the cycle, an exporter that errors
/// is logged, and neither stops the others.
pub struct ExportHub {
    interval: Duration,
    providers: Vec<ProviderFn>,
    exporters: Vec<Box<dyn Exporter>>,
}

impl ExportHub {
    /// Create a hub cycling at the given interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            providers: Vec::new(),
            exporters: Vec::new(),
        }
    }

    /// Register a data provider.
    pub fn add_provider(&mut self, provider: ProviderFn) {
        self.providers.push(provider);
    }

    /// Register an export sink.
    pub fn add_exporter<E: Exporter + 'static>(&mut self, exporter: E) {
        self.exporters.push(Box::new(exporter));
    }

    /// Run cycles until `shutdown` fires.
    ///
    /// Shutdown is observed between cycles: an in-flight cycle finishes
    /// rather than being aborted mid-export.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.interval.as_secs(),
            providers = self.providers.len(),
            exporters = self.exporters.len(),
            "export hub running",
        );

        loop {
            self.cycle().await;

            tokio::select! {
                _ = shutdown.changed() => {
                    info!("export hub stopping");
                    return;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    /// One collect-and-export pass.
    async fn cycle(&self) {
        let mut points = Vec::new();
        for provider in &self.providers {
            match provider().await {
                Ok(point) => points.push(point),
                Err(err) => warn!(error = %err, "data provider failed"),
            }
        }

        // With nothing registered there is nothing to export; with
        // providers registered, exporters see the batch even when every
        // provider failed this cycle.
        if self.providers.is_empty() {
            return;
        }

        debug!(points = points.len(), "exporting batch");
        for exporter in &self.exporters {
            if let Err(err) = exporter.export(&points).await {
                warn!(exporter = exporter.name(), error = %err, "data export failed");
            }
        }
    }
}
