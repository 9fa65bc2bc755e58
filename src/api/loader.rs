//! Page data generation with a fixed revalidation interval.
//!
//! A generated page is served unchanged until its interval elapses. The next
//! request then regenerates it; if that fails the previous page keeps being
//! served until a later attempt succeeds.

use crate::api::episodes::{EpisodeApiClient, EpisodeQuery, EpisodeSource};
use crate::api::error::{ApiError, Result};
use crate::api::models::{Episode, HomePageData, RawEpisode};
use crate::config::SiteConfig;
use crate::diagnostics::{log_perf, PerfTimer};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

static SITE_LOADER: Lazy<PageDataLoader<EpisodeApiClient>> = Lazy::new(|| {
    let config = SiteConfig::from_env();
    tracing::info!("loading episodes from {}", config.api_base_url);
    PageDataLoader::new(EpisodeApiClient::new(config.api_base_url.clone()), config)
});

/// Loader shared by every page of the running app.
pub fn site_loader() -> &'static PageDataLoader<EpisodeApiClient> {
    &SITE_LOADER
}

/// A value together with the moment it was generated.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub value: T,
    pub generated_at: DateTime<Utc>,
}

impl<T> Generated<T> {
    pub fn new(value: T, generated_at: DateTime<Utc>) -> Self {
        Self {
            value,
            generated_at,
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, revalidate: Duration) -> bool {
        match (now - self.generated_at).to_std() {
            Ok(age) => age < revalidate,
            // generated "in the future": clock went backwards
            Err(_) => true,
        }
    }
}

pub fn format_episode(raw: RawEpisode) -> Result<Episode> {
    let id = raw.id.clone();
    Episode::try_from(raw).map_err(|source| ApiError::Format { id, source })
}

/// Formats every record; the first malformed one fails the whole batch.
pub fn format_episodes(raw: Vec<RawEpisode>) -> Result<Vec<Episode>> {
    raw.into_iter().map(format_episode).collect()
}

pub struct PageDataLoader<S> {
    source: S,
    config: SiteConfig,
    home: Mutex<Option<Generated<HomePageData>>>,
    episodes: Mutex<HashMap<String, Generated<Episode>>>,
}

impl<S: EpisodeSource> PageDataLoader<S> {
    pub fn new(source: S, config: SiteConfig) -> Self {
        Self {
            source,
            config,
            home: Mutex::new(None),
            episodes: Mutex::new(HashMap::new()),
        }
    }

    pub async fn home_page(&self) -> Result<HomePageData> {
        self.home_page_at(Utc::now()).await
    }

    pub async fn home_page_at(&self, now: DateTime<Utc>) -> Result<HomePageData> {
        let cached = self.home.lock().unwrap_or_else(|e| e.into_inner()).clone();

        if let Some(page) = &cached {
            if page.is_fresh(now, self.config.home_revalidate) {
                tracing::debug!("serving home page generated at {}", page.generated_at);
                return Ok(page.value.clone());
            }
        }

        match self.generate_home_page().await {
            Ok(page) => {
                *self.home.lock().unwrap_or_else(|e| e.into_inner()) =
                    Some(Generated::new(page.clone(), now));
                Ok(page)
            }
            Err(err) => match cached {
                Some(stale) => {
                    tracing::warn!(
                        "home page regeneration failed, serving page from {}: {err}",
                        stale.generated_at
                    );
                    Ok(stale.value)
                }
                None => {
                    tracing::error!("home page generation failed: {err}");
                    Err(err)
                }
            },
        }
    }

    /// One generation pass: fetch, format and partition, with no caching.
    pub async fn generate_home_page(&self) -> Result<HomePageData> {
        let timer = PerfTimer::now();
        let query = EpisodeQuery::latest(self.config.page_size);
        let raw = self.source.list_episodes(&query).await?;
        let fetched = raw.len();
        let episodes = format_episodes(raw)?;
        let page = HomePageData::partition(episodes, self.config.latest_count);
        log_perf(
            "generate_home_page",
            timer,
            &format!(
                "{fetched} episodes, {} latest",
                page.latest_episodes.len()
            ),
        );
        Ok(page)
    }

    pub async fn episode(&self, id: &str) -> Result<Episode> {
        self.episode_at(id, Utc::now()).await
    }

    pub async fn episode_at(&self, id: &str, now: DateTime<Utc>) -> Result<Episode> {
        let cached = self
            .episodes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned();

        if let Some(episode) = &cached {
            if episode.is_fresh(now, self.config.episode_revalidate) {
                return Ok(episode.value.clone());
            }
        }

        let generated = match self.source.get_episode(id).await {
            Ok(raw) => format_episode(raw),
            Err(err) => Err(err),
        };

        match generated {
            Ok(episode) => {
                self.episodes
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .insert(id.to_string(), Generated::new(episode.clone(), now));
                Ok(episode)
            }
            Err(err) => match cached {
                Some(stale) => {
                    tracing::warn!("episode {id} regeneration failed, serving stale copy: {err}");
                    Ok(stale.value)
                }
                None => Err(err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{RawDuration, RawEpisodeFile};
    use chrono::TimeZone;
    use std::cell::Cell;

    struct MemorySource {
        episodes: Vec<RawEpisode>,
        failing: Cell<bool>,
        list_calls: Cell<usize>,
    }

    impl MemorySource {
        fn new(episodes: Vec<RawEpisode>) -> Self {
            Self {
                episodes,
                failing: Cell::new(false),
                list_calls: Cell::new(0),
            }
        }
    }

    impl EpisodeSource for MemorySource {
        async fn list_episodes(&self, query: &EpisodeQuery) -> Result<Vec<RawEpisode>> {
            self.list_calls.set(self.list_calls.get() + 1);
            if self.failing.get() {
                return Err(ApiError::Request("connection refused".to_string()));
            }
            let mut episodes = self.episodes.clone();
            episodes.sort_by(|a, b| b.published_at.cmp(&a.published_at));
            episodes.truncate(query.limit);
            Ok(episodes)
        }

        async fn get_episode(&self, id: &str) -> Result<RawEpisode> {
            if self.failing.get() {
                return Err(ApiError::Request("connection refused".to_string()));
            }
            self.episodes
                .iter()
                .find(|episode| episode.id == id)
                .cloned()
                .ok_or_else(|| ApiError::Status {
                    status: 404,
                    url: format!("/episodes/{id}"),
                })
        }
    }

    fn raw(day: u32) -> RawEpisode {
        RawEpisode {
            id: format!("episode-{day:02}"),
            title: format!("Episode {day}"),
            thumbnail: String::new(),
            members: "Diego Fernandes".to_string(),
            published_at: format!("2021-01-{day:02} 18:00:00"),
            file: RawEpisodeFile {
                duration: RawDuration::Seconds(1800.0 + day as f64),
                url: format!("https://cdn.example.com/{day}.m4a"),
            },
            description: String::new(),
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 2, 1, hour, 0, 0).unwrap()
    }

    fn loader(episodes: Vec<RawEpisode>) -> PageDataLoader<MemorySource> {
        PageDataLoader::new(MemorySource::new(episodes), SiteConfig::default())
    }

    #[tokio::test]
    async fn home_page_partitions_the_twelve_newest() {
        let loader = loader((1..=15).map(raw).collect());

        let page = loader.home_page_at(at(0)).await.unwrap();

        assert_eq!(page.latest_episodes.len(), 2);
        assert_eq!(page.all_episodes.len(), 10);
        assert_eq!(page.latest_episodes[0].id, "episode-15");
        assert_eq!(page.latest_episodes[1].id, "episode-14");
        assert_eq!(page.all_episodes[0].id, "episode-13");
        assert_eq!(page.all_episodes[9].id, "episode-04");
    }

    #[tokio::test]
    async fn home_page_is_reused_within_the_revalidation_interval() {
        let loader = loader((1..=12).map(raw).collect());

        loader.home_page_at(at(0)).await.unwrap();
        loader.home_page_at(at(7)).await.unwrap();
        assert_eq!(loader.source.list_calls.get(), 1);

        loader.home_page_at(at(8)).await.unwrap();
        assert_eq!(loader.source.list_calls.get(), 2);
    }

    #[tokio::test]
    async fn failed_regeneration_keeps_serving_the_previous_page() {
        let loader = loader((1..=12).map(raw).collect());
        let first = loader.home_page_at(at(0)).await.unwrap();

        loader.source.failing.set(true);
        let stale = loader.home_page_at(at(9)).await.unwrap();
        assert_eq!(stale, first);
        assert_eq!(loader.source.list_calls.get(), 2);

        loader.source.failing.set(false);
        loader.home_page_at(at(10)).await.unwrap();
        assert_eq!(loader.source.list_calls.get(), 3);
    }

    #[tokio::test]
    async fn first_generation_failure_is_returned() {
        let loader = loader((1..=12).map(raw).collect());
        loader.source.failing.set(true);

        let err = loader.home_page_at(at(0)).await.unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));
    }

    #[tokio::test]
    async fn one_malformed_record_fails_the_pass() {
        let mut episodes: Vec<RawEpisode> = (1..=12).map(raw).collect();
        episodes[3].file.duration = RawDuration::Text("soon".to_string());
        let loader = loader(episodes);

        let err = loader.generate_home_page().await.unwrap_err();
        match err {
            ApiError::Format { id, .. } => assert_eq!(id, "episode-04"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn episode_detail_is_formatted_and_cached() {
        let loader = loader((1..=3).map(raw).collect());

        let episode = loader.episode_at("episode-02", at(0)).await.unwrap();
        assert_eq!(episode.published_at, "2 jan 21");
        assert_eq!(episode.duration_as_string, "00:30:02");

        loader.source.failing.set(true);
        let cached = loader.episode_at("episode-02", at(1)).await.unwrap();
        assert_eq!(cached, episode);

        let missing = loader.episode_at("episode-03", at(1)).await;
        assert!(missing.is_err());
    }

    #[test]
    fn generated_pages_expire_after_the_interval() {
        let page = Generated::new((), at(0));
        let revalidate = Duration::from_secs(60 * 60 * 8);
        assert!(page.is_fresh(at(7), revalidate));
        assert!(!page.is_fresh(at(8), revalidate));
        assert!(page.is_fresh(at(0) - chrono::Duration::hours(1), revalidate));
    }
}
