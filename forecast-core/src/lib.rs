//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - A client for the forecast API with pluggable HTTP transport and cache
//! - A lazy, read-only model over the JSON response
//! - The unit lookup table and configuration handling
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod time;
pub mod units;

pub use cache::{CacheStore, FileCache, MemoryCache};
pub use client::{API_URL, ForecastClient};
pub use config::Config;
pub use error::{ForecastError, Result};
pub use http::{HttpClient, ReqwestClient, build_url};
pub use model::{Alert, DataBlock, DataPoint, Field, Flags, Forecast, Icon, PrecipType, StationSource};
pub use time::ForecastTime;
pub use units::{Quantity, Units, unit_symbol};
