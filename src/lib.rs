// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod search;
pub mod specs;

pub mod chart;
pub mod file;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod stats;
pub mod table;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod log;
