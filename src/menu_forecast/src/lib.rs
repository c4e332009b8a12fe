//! Daily sales forecasting and production recommendations for a food-service menu.
//!
//! Pipeline, leaf first:
//! - [`cleaner`]: raw transaction lines → canonical sales table
//! - [`encoder`] + [`regression`], wired together in [`pipeline`]: the trained model
//! - [`recommend`]: the ranked item × weekday production table
//! - [`service`]: the read-only query surface over both
//!
//! ```no_run
//! use menu_forecast::{config, io::csv_source, service::ForecastService};
//!
//! let cfg = config::load_config_path("forecast.toml")?;
//! let raw = csv_source::load_raw_records(&cfg.source)?;
//! let service = ForecastService::initialize(&raw, &cfg)?;
//! let monday = service.recommendations("monday")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

#![deny(missing_docs)]

pub mod cleaner;
pub mod config;
pub mod encoder;
pub mod errors;
pub mod evaluation;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod recommend;
pub mod regression;
pub mod service;
pub mod split;

#[cfg(test)]
pub(crate) mod test_support;
