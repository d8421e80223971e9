pub mod api;
pub mod changelog;
pub mod config;
pub mod console;
pub mod error;
pub mod migrate;
pub mod package;
pub mod promote;
pub mod rollout;

pub use error::{RelayError, Result};
