//! hotas-relay: X-56 Rhino HOTAS report decoding and state fan-out.
//!
//! Decodes the fixed 13-byte HID input reports of the throttle and the stick
//! into typed snapshots, keeps the latest snapshot per device in a thread-safe
//! store, and republishes every update to registered listeners. [`SinkSync`]
//! mirrors the state onto a virtual joystick using the legacy axis/button
//! numbering; [`DebugLogger`] traces raw reports and decoded state.
//!
//! ```
//! use hotas_relay::{
//!     DeviceManager, InputEventBus, Pipeline, ReplaySource, SinkSync, ThrottleState,
//!     VirtualDevice,
//! };
//!
//! let sink = VirtualDevice::for_projection::<ThrottleState>("throttle (emulated)");
//! let mut bus = InputEventBus::<ThrottleState>::new();
//! bus.add_listener(SinkSync::new(sink.clone()));
//!
//! let mut pipeline = Pipeline::new(bus);
//! let state = pipeline
//!     .process(&[0xFF, 0x03, 0, 0, 0, 0, 0, 0x80, 0x80, 0x80, 0x80, 0, 0])
//!     .unwrap();
//! assert_eq!(state.throttle_l, 1023);
//! assert_eq!(sink.axis(hotas_relay::throttle::AXIS_L), Some(1023));
//!
//! let mut manager = DeviceManager::new();
//! manager.spawn(pipeline, ReplaySource::default()).unwrap();
//! manager.shutdown();
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod backends;
pub mod binding;
pub mod bits;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod logger;
pub mod manager;
pub mod pipeline;
pub mod snapshot;
pub mod stick;
pub mod throttle;

pub use backends::virtual_input::{ReplaySource, VirtualDevice};
pub use binding::{AxisBinding, Projection, ReportSink, SinkSync};
pub use config::{Config, DeviceConfig};
pub use device::{Decode, DeviceClass, ReportSource, REPORT_LEN, VENDOR_ID};
pub use error::{ConfigError, DecodeError, ListenerError, ManagerError, SinkError, SourceError};
pub use event::{Hat, Mode, StateUpdate};
pub use eventbus::{from_fn, InputEventBus, ListenerId, StateListener};
pub use filtered_listener::FilteredListener;
pub use logger::DebugLogger;
pub use manager::DeviceManager;
pub use pipeline::{Pipeline, RunSummary, StopSignal};
pub use snapshot::{StateReader, StateStore};
pub use stick::StickState;
pub use throttle::ThrottleState;
