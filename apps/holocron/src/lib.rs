//! # holocron
//!
//! Application layer of the Holocron reference browser: configuration, the
//! reqwest transport, context construction and the HTTP server.
//! The command-line front end lives in the binary.

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod transport;

pub use browser::{Browser, DynStore, DynTransport, clear_cache, open_browser};
pub use config::Config;
pub use error::AppError;
pub use transport::ReqwestTransport;
