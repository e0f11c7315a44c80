mod detector;
mod error;
mod event;
mod sink;

pub use detector::{DetectorSettings, ProximityDetector};
pub use error::ProximityError;
pub use event::{sort_events, ProximityEvent};
pub use sink::{LogSink, ScanSink};
