//! Site configuration: where episodes come from and how long generated pages live.

use std::time::Duration;

pub const API_URL_ENV: &str = "PODCASTR_API_URL";
const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Eight hours.
pub const HOME_REVALIDATE: Duration = Duration::from_secs(60 * 60 * 8);
pub const EPISODE_REVALIDATE: Duration = Duration::from_secs(60 * 60 * 24);

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub api_base_url: String,
    /// Episodes requested for the listing page.
    pub page_size: usize,
    /// How many of them are highlighted as latest releases.
    pub latest_count: usize,
    pub home_revalidate: Duration,
    pub episode_revalidate: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            page_size: 12,
            latest_count: 2,
            home_revalidate: HOME_REVALIDATE,
            episode_revalidate: EPISODE_REVALIDATE,
        }
    }
}

impl SiteConfig {
    /// Reads the API address from the environment at runtime on native targets,
    /// and from the build environment on wasm.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let runtime = std::env::var(API_URL_ENV).ok();
        #[cfg(target_arch = "wasm32")]
        let runtime: Option<String> = None;

        let api_base_url = runtime
            .or_else(|| option_env!("PODCASTR_API_URL").map(str::to_string))
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self::default().with_api_base_url(api_base_url)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }
}
