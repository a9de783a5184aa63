//! Model listing: paginated fetch, suitability filter, ranking and display
//! names.

use std::cmp::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::CatalogError;
use crate::llm::completion_client::{excerpt, APP_TITLE};

pub const MAX_PAGES: usize = 15;
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(15);
pub const PAGE_PAUSE: Duration = Duration::from_millis(200);
const DISPLAY_NAME_LIMIT: usize = 50;
const DISPLAY_NAME_KEEP: usize = 47;
const UNRANKED: u8 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub context_length: Option<u64>,
}

impl ModelInfo {
    pub fn display_name(&self) -> String {
        format_model_name(self)
    }

    /// Context window for listings: `128k`, `512`, or `?` when unreported.
    pub fn context_label(&self) -> String {
        match self.context_length {
            Some(tokens) if tokens >= 1000 => format!("{}k", tokens / 1000),
            Some(tokens) => tokens.to_string(),
            None => "?".to_owned(),
        }
    }
}

/// One page of the listing, as raw JSON.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<Value, CatalogError>;
}

pub struct HttpCatalogSource {
    http: Client,
    api_key: String,
    page_timeout: Duration,
}

impl HttpCatalogSource {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            page_timeout: PAGE_TIMEOUT,
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_page(&self, url: &str) -> Result<Value, CatalogError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .header("X-Title", APP_TITLE)
            .header("Accept", "application/json")
            .timeout(self.page_timeout)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &text));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}

fn classify_transport(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        CatalogError::Timeout
    } else {
        CatalogError::Transport(err.to_string())
    }
}

pub(crate) fn classify_status(status: u16, body: &str) -> CatalogError {
    match status {
        401 => CatalogError::InvalidCredential,
        429 => CatalogError::RateLimited,
        s if s >= 500 => CatalogError::ServerError,
        s => CatalogError::Other {
            status: s,
            body: excerpt(body, 100),
        },
    }
}

/// Pacing for the page loop.
#[derive(Debug, Clone, Copy)]
pub struct CatalogOptions {
    pub max_pages: usize,
    pub page_pause: Duration,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            max_pages: MAX_PAGES,
            page_pause: PAGE_PAUSE,
        }
    }
}

/// Fetch every page starting at `<base_url>/models`, then filter and rank.
pub async fn fetch_models(
    source: &dyn CatalogSource,
    base_url: &str,
    options: CatalogOptions,
) -> Result<Vec<ModelInfo>, CatalogError> {
    let mut next_url = Some(format!("{}/models", base_url.trim_end_matches('/')));
    let mut all = Vec::new();
    let mut pages = 0usize;

    while let Some(url) = next_url.take() {
        if pages >= options.max_pages {
            debug!(pages, "page cap reached, stopping");
            break;
        }

        let page = source.fetch_page(&url).await?;
        let items = page_items(&page);
        debug!(page = pages + 1, items = items.len(), "fetched model page");
        all.extend(items);
        pages += 1;

        next_url = next_link(&page);
        if next_url.is_some() && !options.page_pause.is_zero() {
            tokio::time::sleep(options.page_pause).await;
        }
    }

    let ranked = filter_and_rank_models(all);
    info!(pages, models = ranked.len(), "model catalog loaded");
    Ok(ranked)
}

fn page_items(page: &Value) -> Vec<ModelInfo> {
    let items = match page {
        Value::Array(items) => items.as_slice(),
        other => other
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
    };
    items
        .iter()
        .filter_map(|item| ModelInfo::deserialize(item).ok())
        .collect()
}

fn next_link(page: &Value) -> Option<String> {
    [
        page.get("next"),
        page.get("links").and_then(|l| l.get("next")),
        page.get("meta").and_then(|m| m.get("next")),
    ]
    .into_iter()
    .flatten()
    .find_map(|v| v.as_str().filter(|s| !s.is_empty()).map(str::to_owned))
}

const EXCLUDED_ID_FRAGMENTS: &[&str] = &[
    "image",
    "vision",
    "dalle",
    "midjourney",
    "stable-diffusion",
    "embed",
    "moderation",
    "moderate",
    "gpt-3.5-turbo-instruct",
    "text-davinci",
];
const EXCLUDED_NAME_FRAGMENTS: &[&str] = &["image", "vision"];

/// Drop models unsuited to text chess play.
pub fn is_suitable(model: &ModelInfo) -> bool {
    let id = model.id.to_lowercase();
    if id.is_empty() {
        return false;
    }
    let name = model.name.as_deref().unwrap_or_default().to_lowercase();

    !EXCLUDED_ID_FRAGMENTS.iter().any(|f| id.contains(f))
        && !EXCLUDED_NAME_FRAGMENTS.iter().any(|f| name.contains(f))
}

/// Lower is better; unknown families share the last tier.
pub fn model_priority(id: &str) -> u8 {
    let id = id.to_lowercase();
    let has = |fragments: &[&str]| fragments.iter().any(|f| id.contains(f));

    if has(&["gpt-5", "o1-preview", "o1-mini"]) {
        1
    } else if has(&["gpt-4o", "gpt-4-turbo"]) {
        2
    } else if has(&["claude-3-opus", "claude-3.5-sonnet"]) {
        3
    } else if has(&["gpt-4"]) && !has(&["vision"]) {
        4
    } else if has(&["claude-3-sonnet"]) {
        5
    } else if has(&["gemini-pro", "gemini-1.5"]) {
        6
    } else if has(&["claude-3-haiku"]) {
        7
    } else if has(&["llama-3", "llama-70b", "llama-405b"]) {
        8
    } else if has(&["mixtral", "mistral"]) {
        9
    } else if has(&["gpt-3.5-turbo"]) {
        10
    } else {
        UNRANKED
    }
}

pub fn filter_and_rank_models(models: Vec<ModelInfo>) -> Vec<ModelInfo> {
    let mut kept: Vec<ModelInfo> = models.into_iter().filter(is_suitable).collect();
    kept.sort_by(|a, b| match model_priority(&a.id).cmp(&model_priority(&b.id)) {
        Ordering::Equal => a.id.cmp(&b.id),
        other => other,
    });
    kept
}

static NAME_REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        ("gpt-4o", "GPT-4 Omni"),
        ("gpt-4", "GPT-4"),
        ("gpt-5", "GPT-5"),
        ("claude-3-opus", "Claude 3 Opus"),
        ("claude-3-sonnet", "Claude 3 Sonnet"),
        ("claude-3-haiku", "Claude 3 Haiku"),
        ("gemini-pro", "Gemini Pro"),
        ("llama", "Llama"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        let regex = Regex::new(&format!("(?i){}", regex::escape(pattern)))
            .expect("name rewrite literal should compile");
        (regex, replacement)
    })
    .collect()
});

/// Readable label: the name (or id) with common family names expanded,
/// shortened to 47 characters plus `...` past 50.
pub fn format_model_name(model: &ModelInfo) -> String {
    let raw = model
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(&model.id);

    let mut name = raw.to_owned();
    for (regex, replacement) in NAME_REWRITES.iter() {
        name = regex.replace_all(&name, *replacement).into_owned();
    }

    if name.chars().count() > DISPLAY_NAME_LIMIT {
        let mut short: String = name.chars().take(DISPLAY_NAME_KEEP).collect();
        short.push_str("...");
        short
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use serde_json::json;

    fn model(id: &str, name: Option<&str>) -> ModelInfo {
        ModelInfo {
            id: id.to_owned(),
            name: name.map(str::to_owned),
            context_length: None,
        }
    }

    struct ScriptedSource {
        pages: HashMap<String, Value>,
        requested: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(pages: &[(&str, Value)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, page)| ((*url).to_owned(), page.clone()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().expect("lock should not be poisoned").clone()
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedSource {
        async fn fetch_page(&self, url: &str) -> Result<Value, CatalogError> {
            self.requested
                .lock()
                .expect("lock should not be poisoned")
                .push(url.to_owned());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| classify_status(404, "not found"))
        }
    }

    /// Serves an endless chain of pages.
    struct EndlessSource {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl CatalogSource for EndlessSource {
        async fn fetch_page(&self, _url: &str) -> Result<Value, CatalogError> {
            let mut calls = self.calls.lock().expect("lock should not be poisoned");
            *calls += 1;
            Ok(json!({
                "data": [{"id": format!("vendor/model-{}", *calls)}],
                "next": format!("https://example.test/models?page={}", *calls + 1),
            }))
        }
    }

    fn no_pause() -> CatalogOptions {
        CatalogOptions {
            page_pause: Duration::ZERO,
            ..CatalogOptions::default()
        }
    }

    #[tokio::test]
    async fn follows_each_next_link_shape() {
        let source = ScriptedSource::new(&[
            (
                "https://example.test/api/models",
                json!({"data": [{"id": "openai/gpt-4o"}], "next": "https://example.test/p2"}),
            ),
            (
                "https://example.test/p2",
                json!({"data": [{"id": "mistralai/mixtral-8x7b"}], "links": {"next": "https://example.test/p3"}}),
            ),
            (
                "https://example.test/p3",
                json!({"data": [{"id": "openai/dalle-3"}, {"id": "x/image-gen"}], "meta": {"next": "https://example.test/p4"}}),
            ),
            (
                "https://example.test/p4",
                json!([{"id": "meta-llama/llama-3-70b", "name": "Llama 3 70B"}]),
            ),
        ]);

        let models = fetch_models(&source, "https://example.test/api/", no_pause())
            .await
            .expect("catalog should load");

        assert_eq!(source.requested().len(), 4);
        let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["openai/gpt-4o", "meta-llama/llama-3-70b", "mistralai/mixtral-8x7b"]
        );
    }

    #[tokio::test]
    async fn stops_after_page_cap() {
        let source = EndlessSource {
            calls: Mutex::new(0),
        };
        let models = fetch_models(&source, "https://example.test", no_pause())
            .await
            .expect("catalog should load");

        assert_eq!(*source.calls.lock().expect("lock should not be poisoned"), MAX_PAGES);
        assert_eq!(models.len(), MAX_PAGES);
    }

    #[tokio::test]
    async fn page_failure_is_surfaced() {
        let source = ScriptedSource::new(&[(
            "https://example.test/models",
            json!({"data": [{"id": "a/b"}], "next": "https://example.test/missing"}),
        )]);
        let err = fetch_models(&source, "https://example.test", no_pause())
            .await
            .expect_err("missing page should fail the listing");
        assert!(matches!(err, CatalogError::Other { status: 404, .. }));
    }

    #[test]
    fn status_classification() {
        assert!(matches!(classify_status(401, ""), CatalogError::InvalidCredential));
        assert!(matches!(classify_status(429, ""), CatalogError::RateLimited));
        assert!(matches!(classify_status(503, ""), CatalogError::ServerError));
        assert_eq!(
            classify_status(418, "teapot").to_string(),
            "API error 418: teapot"
        );
    }

    #[test]
    fn filter_drops_unsuitable_models() {
        let models = vec![
            model("", Some("Nameless")),
            model("openai/gpt-4-vision-preview", None),
            model("openai/text-embedding-3", None),
            model("openai/omni-moderation", None),
            model("openai/gpt-3.5-turbo-instruct", None),
            model("vendor/chat", Some("Image Studio")),
            model("anthropic/claude-3-haiku", None),
        ];
        let kept = filter_and_rank_models(models);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "anthropic/claude-3-haiku");
    }

    #[test]
    fn ranking_uses_priority_then_id() {
        let models = vec![
            model("zeta/unknown", None),
            model("openai/gpt-3.5-turbo", None),
            model("google/gemini-pro", None),
            model("anthropic/claude-3.5-sonnet", None),
            model("openai/gpt-4-turbo", None),
            model("openai/gpt-4o", None),
            model("openai/o1-mini", None),
            model("alpha/unknown", None),
        ];
        let ids: Vec<String> = filter_and_rank_models(models)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "openai/o1-mini",
                "openai/gpt-4-turbo",
                "openai/gpt-4o",
                "anthropic/claude-3.5-sonnet",
                "google/gemini-pro",
                "openai/gpt-3.5-turbo",
                "alpha/unknown",
                "zeta/unknown",
            ]
        );
    }

    #[test]
    fn context_length_is_read_from_listing_items() {
        let items = page_items(&json!({"data": [
            {"id": "a/long", "context_length": 128000},
            {"id": "b/short", "context_length": 512},
            {"id": "c/unknown"},
        ]}));
        let labels: Vec<String> = items.iter().map(ModelInfo::context_label).collect();
        assert_eq!(labels, vec!["128k", "512", "?"]);
    }

    #[test]
    fn display_names() {
        assert_eq!(format_model_name(&model("openai/gpt-4o", None)), "openai/GPT-4 Omni");
        assert_eq!(
            format_model_name(&model("x", Some("Meta: llama 3"))),
            "Meta: Llama 3"
        );
        assert_eq!(format_model_name(&model("x", Some(""))), "x");

        let long = model(&"m".repeat(60), None);
        let shown = format_model_name(&long);
        assert_eq!(shown.chars().count(), 50);
        assert!(shown.ends_with("..."));

        let exactly_fifty = model(&"m".repeat(50), None);
        assert_eq!(format_model_name(&exactly_fifty), "m".repeat(50));
    }
}
