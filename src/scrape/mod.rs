// src/scrape/mod.rs
//! Multi-page pipelines: decide which pages to fetch, fetch them politely
//! with a small worker pool and hand each body to its `specs` parser.
mod pool;
pub mod anniversaries;
pub mod olympics;

pub use pool::{ fetch_all, Job };
