// src/error.rs
//! Crate-level error type.
//!
//! Per-page resolution failures during a race never reach this type: they are
//! `search::ResolveError`s, logged and absorbed by the search loop. Everything
//! here stops the pipeline that raised it.

use thiserror::Error;

use crate::core::net::FetchError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chart rendering failed: {0}")]
    Image(#[from] image::ImageError),

    /// A page did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0} is an invalid medal for ranking, must be one of Gold, Silver, Bronze")]
    InvalidMedal(String),
}
