//! Lifecycle hook dispatcher for the monologue agent runtime.
//!
//! Extensions register in a fixed order and are dispatched sequentially;
//! only `before_llm_call`'s return value feeds back into the scheduler.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod error;
mod extension;
mod manager;

pub use error::{HookError, HookResult};
pub use extension::Extension;
pub use manager::HookManager;
