//! # cosmic-explorer
//!
//! Terminal front end for the [`space_query`] engine: loads a TOML
//! configuration, runs free-text space queries and prints the aggregated
//! result as JSON.

pub mod config;
pub mod error;
pub mod output;

pub use config::{AppConfig, LoggingConfig};
pub use error::{AppError, Result};

/// Sample queries covering each topical route.
pub const EXAMPLE_QUERIES: &[&str] = &[
    "Latest NASA missions to Mars",
    "SpaceX rocket launches this year",
    "International Space Station updates",
    "Hubble telescope discoveries",
    "Solar system exploration",
    "Moon landing missions",
    "Asteroid and comet news",
    "Galaxy and universe studies",
];
