//! Runtime configuration for the monologue agent runtime.
//!
//! ```no_run
//! use monologue_config::load;
//!
//! let config = load(None).expect("defaults always validate");
//! println!("chat model: {}", config.llm.chat_model);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod error;
mod loader;
mod types;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load, ENV_API_KEY, ENV_BASE_URL, ENV_CHAT_MODEL};
pub use types::{LlmConfig, ModelRouterConfig, RuntimeConfig};
