use std::{fmt, sync::Arc};

use nova_config::Config;
use nova_core::{
    auth::AuthService,
    content::ContentNormalizer,
    providers::{AnimeProvider, SportsClient, TmdbClient},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tmdb: Arc<TmdbClient>,
    pub anime: Arc<dyn AnimeProvider>,
    pub sports: Arc<SportsClient>,
    pub auth: Arc<AuthService>,
    pub normalizer: Arc<ContentNormalizer>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn config(&self) -> &Config {
        &self.config
    }
}
