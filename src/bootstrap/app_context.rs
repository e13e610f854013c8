use std::sync::Arc;

use crate::application::ports::file_repository::FileRepository;
use crate::application::ports::stats_repository::StatsRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    file_repo: Arc<dyn FileRepository>,
    stats_repo: Arc<dyn StatsRepository>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        file_repo: Arc<dyn FileRepository>,
        stats_repo: Arc<dyn StatsRepository>,
    ) -> Self {
        Self {
            user_repo,
            file_repo,
            stats_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn file_repo(&self) -> Arc<dyn FileRepository> {
        self.services.file_repo.clone()
    }

    pub fn stats_repo(&self) -> Arc<dyn StatsRepository> {
        self.services.stats_repo.clone()
    }
}
