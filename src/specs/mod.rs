// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! This module hosts the **page-specific scraping specifications** for
//! Wikipedia. Each spec focuses on one kind of page and encodes *where the
//! ground truth lives in the HTML* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing**: every function takes a page body and returns
//!   plain data. Nothing here touches the network.
//! - **Selector choice**: which table, paragraph or anchor carries the data
//!   (e.g. the first `wikitable` on the medal table page, the table captioned
//!   "Medals by summer sport" on a country page).
//! - **Tolerant extraction** using `core::html` helpers (case-insensitive tag
//!   blocks, tag stripping, whitespace/entity normalization).
//!
//! ## What does **not** live here
//! - **Fetching**: `search::wiki` (one page per race step) and
//!   `scrape::*` (worker-pool pipelines).
//! - **Export**: tables and charts are written by `runner`.
//!
//! ## Typical call chain
//! ```text
//! cli → runner → scrape::<pipeline>::collect → specs::<page>::parse
//!             ↘ search::GraphSearch → search::wiki → specs::links
//! ```
//!
//! ## Current specs
//! - `links` – in-namespace article links of any article, for the wiki race.
//! - `anniversaries` – `Wikipedia:Selected anniversaries/<Month>` entries.
//! - `medals` – the all-time medal table and per-country sport tables.
//!
//! Specs are tested **offline** against small captured fixtures.
pub mod links;
pub mod anniversaries;
pub mod medals;
