//! # NOVA Server
//!
//! HTTP front for the NOVA media browser. Three upstream providers sit
//! behind it:
//!
//! - **Metadata**: a TMDB-compatible movie and series catalogue
//! - **Anime**: an extractor service for anime listings and stream sources
//! - **Sports**: a scraping API for live and scheduled matches
//!
//! Their payloads are proxied as-is or reshaped into content cards, next to
//! a small in-memory auth surface.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
