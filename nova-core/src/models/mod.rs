pub mod anime;
pub mod content;
pub mod sports;
pub mod tmdb;
pub mod user;

pub use anime::{AnimeHome, AnimeResult, TvInfo};
pub use content::ContentItem;
pub use sports::{Match, MatchSource, MatchTeam, MatchTeams};
pub use tmdb::{
    Genre, MultiSearchResult, Paged, TmdbEpisode, TmdbMovie, TmdbSeason,
    TmdbSeries, TmdbSeriesDetails, TmdbVideo,
};
pub use user::{PublicUser, User};
