//! Report sources and sinks.
//!
//! Implementations of [`ReportSource`](crate::ReportSource) and
//! [`ReportSink`](crate::ReportSink).
//!
//! # Feature flags
//! - **`hid`**: enables [`hid::HidReportSource`], reading physical devices via `hidapi`.
//!
//! [`virtual_input`] is always available: a replaying source and an in-memory
//! sink, used by tests and demos.

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

pub mod virtual_input;
