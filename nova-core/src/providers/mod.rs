pub mod anime;
pub mod metadata;
pub mod sports;

pub use anime::{AnimeProvider, ExtractorClient, fetch_home};
pub use metadata::TmdbClient;
pub use sports::SportsClient;
