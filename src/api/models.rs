use crate::api::error::FormatError;
use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Locale every display date is rendered in.
pub const DISPLAY_LOCALE: Locale = Locale::pt_BR;

const PUBLISHED_AT_FORMAT: &str = "%-d %b %y";
const HEADER_DATE_FORMAT: &str = "%a, %-d %B";

/// Date-time layouts accepted for `published_at` when it is not RFC 3339.
const PUBLISHED_AT_LAYOUTS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Episode record as returned by the episode API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEpisode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub members: String,
    pub published_at: String,
    pub file: RawEpisodeFile,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEpisodeFile {
    pub duration: RawDuration,
    pub url: String,
}

/// The API sends durations either as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Seconds(f64),
    Text(String),
}

/// Display-ready episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub description: String,
    pub members: String,
    pub duration: u64,
    pub duration_as_string: String,
    pub url: String,
    pub published_at: String,
}

impl TryFrom<RawEpisode> for Episode {
    type Error = FormatError;

    fn try_from(raw: RawEpisode) -> Result<Self, Self::Error> {
        let duration = parse_duration_seconds(&raw.file.duration)?;
        let published_at = format_published_at(&raw.published_at)?;

        Ok(Self {
            id: raw.id,
            title: raw.title,
            thumbnail: raw.thumbnail,
            description: raw.description,
            members: raw.members,
            duration,
            duration_as_string: duration_as_string(duration),
            url: raw.file.url,
            published_at,
        })
    }
}

/// Input of the listing page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HomePageData {
    pub latest_episodes: Vec<Episode>,
    pub all_episodes: Vec<Episode>,
}

impl HomePageData {
    /// Splits episodes, newest first, into the `latest_count` highlighted ones and the rest.
    pub fn partition(mut episodes: Vec<Episode>, latest_count: usize) -> Self {
        let split_at = latest_count.min(episodes.len());
        let all_episodes = episodes.split_off(split_at);
        Self {
            latest_episodes: episodes,
            all_episodes,
        }
    }

    /// Latest followed by the remaining episodes, the order the page enqueues them in.
    pub fn episode_list(&self) -> Rc<[Episode]> {
        self.latest_episodes
            .iter()
            .chain(self.all_episodes.iter())
            .cloned()
            .collect()
    }
}

/// Whole seconds as `HH:MM:SS`.
pub fn duration_as_string(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

pub fn parse_duration_seconds(value: &RawDuration) -> Result<u64, FormatError> {
    let (seconds, original) = match value {
        RawDuration::Seconds(seconds) => (*seconds, seconds.to_string()),
        RawDuration::Text(text) => {
            let trimmed = text.trim();
            let parsed = trimmed
                .parse::<f64>()
                .map_err(|_| FormatError::InvalidDuration(text.clone()))?;
            (parsed, text.clone())
        }
    };

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(FormatError::InvalidDuration(original));
    }
    Ok(seconds.trunc() as u64)
}

/// Parses the calendar date of an ISO-8601 timestamp; the time part is dropped.
pub fn parse_published_at(value: &str) -> Result<NaiveDate, FormatError> {
    let trimmed = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    for layout in PUBLISHED_AT_LAYOUTS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(timestamp.date());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| FormatError::InvalidDate(value.to_string()))
}

/// `d MMM yy` in the display locale, e.g. `22 jan 21`.
pub fn format_published_at(value: &str) -> Result<String, FormatError> {
    let date = parse_published_at(value)?;
    Ok(format_localized_date(date, PUBLISHED_AT_FORMAT))
}

/// Weekday, day and month name shown in the page header, e.g. `sex, 22 janeiro`.
pub fn format_header_date(date: NaiveDate) -> String {
    format_localized_date(date, HEADER_DATE_FORMAT)
}

fn format_localized_date(date: NaiveDate, format: &str) -> String {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
        .format_localized(format, DISPLAY_LOCALE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_episode(id: &str, published_at: &str, duration: RawDuration) -> RawEpisode {
        RawEpisode {
            id: id.to_string(),
            title: format!("Episode {id}"),
            thumbnail: format!("https://cdn.example.com/{id}.jpg"),
            members: "Diego e Richard".to_string(),
            published_at: published_at.to_string(),
            file: RawEpisodeFile {
                duration,
                url: format!("https://cdn.example.com/{id}.m4a"),
            },
            description: "<p>Notes</p>".to_string(),
        }
    }

    #[test]
    fn duration_as_string_pads_each_field() {
        assert_eq!(duration_as_string(0), "00:00:00");
        assert_eq!(duration_as_string(59), "00:00:59");
        assert_eq!(duration_as_string(61), "00:01:01");
        assert_eq!(duration_as_string(5400), "01:30:00");
        assert_eq!(duration_as_string(3981), "01:06:21");
        assert_eq!(duration_as_string(86_399), "23:59:59");
    }

    #[test]
    fn duration_as_string_does_not_cap_hours() {
        assert_eq!(duration_as_string(360_000), "100:00:00");
    }

    #[test]
    fn duration_as_string_matches_div_mod_fields() {
        for seconds in [1u64, 7, 600, 3599, 3600, 3661, 45_296, 99_999] {
            let expected = format!(
                "{:02}:{:02}:{:02}",
                seconds / 3600,
                (seconds % 3600) / 60,
                seconds % 60
            );
            assert_eq!(duration_as_string(seconds), expected);
        }
    }

    #[test]
    fn parse_duration_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_duration_seconds(&RawDuration::Seconds(3981.0)), Ok(3981));
        assert_eq!(
            parse_duration_seconds(&RawDuration::Text(" 1200 ".to_string())),
            Ok(1200)
        );
        assert_eq!(
            parse_duration_seconds(&RawDuration::Text("89.9".to_string())),
            Ok(89)
        );
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert!(matches!(
            parse_duration_seconds(&RawDuration::Text("1h20".to_string())),
            Err(FormatError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration_seconds(&RawDuration::Seconds(-4.0)),
            Err(FormatError::InvalidDuration(_))
        ));
    }

    #[test]
    fn published_at_uses_short_portuguese_month() {
        assert_eq!(format_published_at("2021-01-22 19:00:00").unwrap(), "22 jan 21");
        assert_eq!(format_published_at("2021-02-08T12:30:00Z").unwrap(), "8 fev 21");
        assert_eq!(format_published_at("2020-12-01").unwrap(), "1 dez 20");
    }

    #[test]
    fn published_at_layouts_agree() {
        let expected = format_published_at("2021-01-15 10:00:00").unwrap();
        assert_eq!(format_published_at("2021-01-15T10:00:00").unwrap(), expected);
        assert_eq!(format_published_at("2021-01-15T10:00:00.250").unwrap(), expected);
        assert_eq!(format_published_at("2021-01-15T10:00:00-03:00").unwrap(), expected);
    }

    #[test]
    fn malformed_published_at_is_an_error() {
        assert_eq!(
            format_published_at("22/01/2021"),
            Err(FormatError::InvalidDate("22/01/2021".to_string()))
        );
    }

    #[test]
    fn header_date_spells_out_weekday_and_month() {
        let date = NaiveDate::from_ymd_opt(2021, 4, 22).unwrap();
        assert_eq!(format_header_date(date), "qui, 22 abril");
    }

    #[test]
    fn raw_episode_becomes_display_episode() {
        let episode = Episode::try_from(raw_episode(
            "a-importancia-da-contribuicao-em-open-source",
            "2021-01-22 19:00:00",
            RawDuration::Seconds(3981.0),
        ))
        .unwrap();

        assert_eq!(episode.duration, 3981);
        assert_eq!(episode.duration_as_string, "01:06:21");
        assert_eq!(episode.published_at, "22 jan 21");
        assert_eq!(
            episode.url,
            "https://cdn.example.com/a-importancia-da-contribuicao-em-open-source.m4a"
        );
    }

    #[test]
    fn raw_episode_deserializes_from_api_json() {
        let json = r#"{
            "id": "como-comecar-na-programacao-em-2021-do-jeito-certo",
            "title": "Como começar na programação em 2021 do jeito certo",
            "members": "Diego Fernandes, Mayk Brito",
            "published_at": "2021-01-21 18:00:00",
            "thumbnail": "https://example.com/thumb.jpg",
            "description": "<p>Descrição</p>",
            "file": { "url": "https://example.com/ep.m4a", "type": "audio/x-m4a", "duration": "2567" }
        }"#;

        let raw: RawEpisode = serde_json::from_str(json).unwrap();
        assert_eq!(raw.file.duration, RawDuration::Text("2567".to_string()));

        let episode = Episode::try_from(raw).unwrap();
        assert_eq!(episode.duration_as_string, "00:42:47");
        assert_eq!(episode.published_at, "21 jan 21");
    }

    #[test]
    fn partition_splits_latest_from_the_rest() {
        let episodes: Vec<Episode> = (0..12)
            .map(|n| {
                Episode::try_from(raw_episode(
                    &n.to_string(),
                    "2021-01-01",
                    RawDuration::Seconds(60.0),
                ))
                .unwrap()
            })
            .collect();

        let page = HomePageData::partition(episodes, 2);
        assert_eq!(page.latest_episodes.len(), 2);
        assert_eq!(page.all_episodes.len(), 10);
        assert_eq!(page.latest_episodes[0].id, "0");
        assert_eq!(page.all_episodes[0].id, "2");

        let list = page.episode_list();
        assert_eq!(list.len(), 12);
        assert_eq!(list[11].id, "11");
    }

    #[test]
    fn partition_handles_short_lists() {
        let episode =
            Episode::try_from(raw_episode("only", "2021-01-01", RawDuration::Seconds(1.0)))
                .unwrap();
        let page = HomePageData::partition(vec![episode], 2);
        assert_eq!(page.latest_episodes.len(), 1);
        assert!(page.all_episodes.is_empty());
    }
}
