use crate::api::error::{ApiError, Result};
use crate::api::models::RawEpisode;
use once_cell::sync::Lazy;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Pagination and ordering for an episode listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeQuery {
    pub limit: usize,
    pub sort_by: String,
    pub order: SortOrder,
}

impl EpisodeQuery {
    /// The `limit` most recently published episodes.
    pub fn latest(limit: usize) -> Self {
        Self {
            limit,
            sort_by: "published_at".to_string(),
            order: SortOrder::Desc,
        }
    }

    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("_limit", self.limit.to_string()),
            ("_sort", self.sort_by.clone()),
            ("_order", self.order.as_str().to_string()),
        ]
    }
}

/// Read-only access to episode records.
#[allow(async_fn_in_trait)]
pub trait EpisodeSource {
    async fn list_episodes(&self, query: &EpisodeQuery) -> Result<Vec<RawEpisode>>;

    async fn get_episode(&self, id: &str) -> Result<RawEpisode>;
}

/// HTTP client for the JSON episode API.
pub struct EpisodeApiClient {
    base_url: String,
}

impl EpisodeApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn episodes_url(&self) -> String {
        format!("{}/episodes", self.base_url)
    }

    pub fn episode_url(&self, id: &str) -> String {
        format!("{}/episodes/{}", self.base_url, urlencoding::encode(id))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        params: &[(&str, String)],
    ) -> Result<T> {
        let response = HTTP_CLIENT.get(&url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl EpisodeSource for EpisodeApiClient {
    async fn list_episodes(&self, query: &EpisodeQuery) -> Result<Vec<RawEpisode>> {
        self.get_json(self.episodes_url(), &query.params()).await
    }

    async fn get_episode(&self, id: &str) -> Result<RawEpisode> {
        self.get_json(self.episode_url(id), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_query_sorts_by_publish_date_descending() {
        let params = EpisodeQuery::latest(12).params();
        assert_eq!(
            params,
            [
                ("_limit", "12".to_string()),
                ("_sort", "published_at".to_string()),
                ("_order", "desc".to_string()),
            ]
        );
    }

    #[test]
    fn episode_urls_hang_off_the_base_address() {
        let client = EpisodeApiClient::new("http://localhost:3333/");
        assert_eq!(client.episodes_url(), "http://localhost:3333/episodes");
        assert_eq!(
            client.episode_url("o-que-e-um-bom-codigo"),
            "http://localhost:3333/episodes/o-que-e-um-bom-codigo"
        );
        assert_eq!(
            client.episode_url("a/b c"),
            "http://localhost:3333/episodes/a%2Fb%20c"
        );
    }
}
