use chrono::{DateTime, Utc};

use super::ProximityEvent;
use crate::catalog::{CatalogError, ObjectId};
use crate::propagate::PropagationError;
use crate::time::{format_utc, TimeGrid};

/// Receives what happens during one proximity scan. Passed into each
/// `detect` or `scan` call, so separate scans never share a reporting channel.
pub trait ScanSink {
    fn scan_started(&mut self, _grid: &TimeGrid, _objects: usize) {}

    fn proximity_detected(&mut self, event: &ProximityEvent);

    /// An object could not be positioned at `at` and was left out of that
    /// instant's pair analysis.
    fn object_skipped(&mut self, object_id: ObjectId, at: DateTime<Utc>, error: &PropagationError);

    /// An object could not be joined with its orbit and takes no part in
    /// the scan.
    fn object_unresolved(&mut self, object_id: ObjectId, error: &CatalogError);

    fn scan_finished(&mut self, _steps: u64, _events: usize) {}
}

/// Forwards scan reports to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ScanSink for LogSink {
    fn scan_started(&mut self, grid: &TimeGrid, objects: usize) {
        log::info!(
            "Starting event analysis from {} to {} every {} ({} steps, {} objects)",
            format_utc(&grid.start()),
            format_utc(&grid.end()),
            humantime::format_duration(grid.step().to_std().unwrap_or_default()),
            grid.len(),
            objects
        );
    }

    fn proximity_detected(&mut self, event: &ProximityEvent) {
        log::warn!(
            "Proximity detected: {} <-> {} distance={:.6}km at {}",
            event.object_a,
            event.object_b,
            event.distance_km,
            format_utc(&event.at)
        );
    }

    fn object_skipped(&mut self, object_id: ObjectId, at: DateTime<Utc>, error: &PropagationError) {
        log::warn!(
            "Error calculating position for object {} at {}: {}",
            object_id,
            format_utc(&at),
            error
        );
    }

    fn object_unresolved(&mut self, object_id: ObjectId, error: &CatalogError) {
        log::warn!("Skipping object {} for this scan: {}", object_id, error);
    }

    fn scan_finished(&mut self, steps: u64, events: usize) {
        log::info!(
            "Analysis completed. Analyzed {} steps, detected {} events",
            steps,
            events
        );
    }
}
