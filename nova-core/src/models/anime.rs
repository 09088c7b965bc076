use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A catalogue entry from the anime extractor.
///
/// Extractors disagree on shape: `title` may be a plain string or a
/// localized object, and the artwork may be named `poster` or `image`.
/// Both are normalized on the way in; other fields pass through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAnimeResult")]
pub struct AnimeResult {
    pub id: String,
    pub title: String,
    pub poster: String,
    #[serde(rename = "tvInfo", skip_serializing_if = "Option::is_none")]
    pub tv_info: Option<TvInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub dub: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub eps: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawAnimeResult {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    title: Option<AnimeTitle>,
    #[serde(default)]
    poster: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(rename = "tvInfo", default)]
    tv_info: Option<TvInfo>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawAnimeResult> for AnimeResult {
    fn from(raw: RawAnimeResult) -> Self {
        let title = raw
            .title
            .and_then(AnimeTitle::preferred)
            .unwrap_or_else(|| "Unknown".to_string());
        let poster = raw
            .poster
            .filter(|p| !p.is_empty())
            .or(raw.image)
            .unwrap_or_default();

        Self {
            id: raw.id,
            title,
            poster,
            tv_info: raw.tv_info,
            extra: raw.extra,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AnimeTitle {
    Plain(String),
    Localized {
        #[serde(default)]
        english: Option<String>,
        #[serde(default)]
        native: Option<String>,
        #[serde(default)]
        romaji: Option<String>,
    },
}

impl AnimeTitle {
    fn preferred(self) -> Option<String> {
        match self {
            AnimeTitle::Plain(title) => Some(title),
            AnimeTitle::Localized {
                english,
                native,
                romaji,
            } => english.or(native).or(romaji),
        }
        .filter(|title| !title.trim().is_empty())
    }
}

/// Landing payload for the anime section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeHome {
    pub trending: Vec<AnimeResult>,
    pub spotlights: Vec<AnimeResult>,
    pub latest_episodes: Vec<AnimeResult>,
    pub most_popular: Vec<AnimeResult>,
}

/// List responses from the extractor are wrapped as `{results: [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ResultsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}
