//! Error types for every failure domain of the relay.

use crate::device::DeviceClass;
use std::path::PathBuf;
use thiserror::Error;

/// A raw report could not be turned into a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{device} report too short: expected {expected} bytes, got {actual}")]
    ShortReport {
        device: DeviceClass,
        expected: usize,
        actual: usize,
    },
}

/// Failure reading from a report source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The stream ended; no further reports will arrive.
    #[error("report source closed")]
    Closed,

    #[error("no device with vendor id {vendor_id:#06x} and product id {product_id:#06x}")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    #[cfg(feature = "hid")]
    #[error("hid error: {0}")]
    Hid(#[from] hidapi::HidError),
}

/// Failure writing a value to a report sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("axis {0:#06x} is not declared on this device")]
    UnknownAxis(u16),

    #[error("button {0:#06x} is not declared on this device")]
    UnknownButton(u16),

    #[error("axis {id:#06x} value {value} outside {min}..={max}")]
    OutOfRange { id: u16, value: i32, min: i32, max: i32 },
}

/// Failure reported by a state listener. Never propagated past the event bus.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("failed to spawn {device} worker: {source}")]
    Spawn {
        device: DeviceClass,
        #[source]
        source: std::io::Error,
    },

    #[error("{device} worker panicked")]
    WorkerPanicked { device: DeviceClass },
}
