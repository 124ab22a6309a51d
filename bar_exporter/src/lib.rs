#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod transform;
pub mod tz;
