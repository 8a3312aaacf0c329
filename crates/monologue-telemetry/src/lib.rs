//! Logging and in-process telemetry recording for the monologue agent runtime.
//!
//! ```no_run
//! use monologue_telemetry::{LogConfig, LogFormat, TelemetryRecorder, setup_logging};
//!
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Pretty)
//!     .with_directive("monologue_runtime=trace");
//! setup_logging(&config).expect("install subscriber");
//!
//! let recorder = TelemetryRecorder::new("session-1");
//! recorder.finalize("response");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod error;
mod logging;
mod recorder;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{setup_default_logging, setup_logging, LogConfig, LogFormat};
pub use recorder::{
    LlmCallMetric, LoopIterationMetric, MemoryOpMetric, TelemetryRecorder, ToolCallMetric,
};
