//! # NOVA Core
//!
//! Domain layer of the NOVA backend:
//!
//! - [`upstream`]: the shared JSON client and the tagged [`upstream::UpstreamError`]
//! - [`providers`]: metadata (TMDB), anime extractor and sports scraper clients
//! - [`content`]: normalization of provider records into [`models::ContentItem`] cards
//! - [`auth`]: in-memory accounts, Argon2id password hashing and bearer tokens

pub mod auth;
pub mod content;
pub mod models;
pub mod providers;
pub mod upstream;

pub use upstream::{Fallback, UpstreamError, UpstreamErrorKind, UpstreamResult};
