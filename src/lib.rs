//! # Getting Started
//! Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! dataplot = "*"
//! ```
//!
//! ```rust,no_run
//! use dataplot::series::Series;
//!
//! let mut series = Series::new("ping/rtt");
//! series.push(0.0, 23.1);
//! series.push(1.0, 22.8);
//! // Bucket the y values into bins of width 1 ms
//! let histogram = series.histogram(1.0);
//! ```

#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate log;

pub mod config;
pub mod read;
pub mod render;
pub mod series;
pub mod stats;
