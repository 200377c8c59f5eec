//! Moon images: NASA image library search, then the built-in catalog.

use echoes_types::{DataOrigin, PhaseName};
use serde_json::Value;
use tracing::{debug, warn};

use crate::attempt::{SourceAttempt, bounded};
use crate::catalog;
use crate::config::{EchoesConfig, NasaImagesConfig};
use crate::error::SourceError;

const ORIGIN: DataOrigin = DataOrigin::NasaImages;

/// Backend for the NASA image and video library search API.
#[derive(Debug, Clone)]
pub struct NasaImageSource {
    client: reqwest::Client,
    api_url: String,
}

impl NasaImageSource {
    /// Create a client from its config section.
    pub fn new(config: &NasaImagesConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
        }
    }

    /// Search for an image of `phase`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the request fails, the status is not
    /// a success, or no result carries a link.
    pub async fn fetch(&self, phase: PhaseName) -> Result<String, SourceError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("q", search_query(phase).as_str()),
                ("media_type", "image"),
                ("page", "1"),
                ("page_size", "10"),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Http {
                origin: ORIGIN,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                origin: ORIGIN,
                status: status.as_u16(),
            });
        }

        let json: Value = response.json().await.map_err(|e| SourceError::Http {
            origin: ORIGIN,
            message: format!("response parse failed: {e}"),
        })?;

        first_image_link(&json)
    }
}

/// Search text for a phase, e.g. `"moon phase waxing gibbous"`.
pub fn search_query(phase: PhaseName) -> String {
    format!("moon phase {}", phase.label().to_lowercase())
}

/// The first `collection.items[].links[0].href` in a search response.
///
/// # Errors
///
/// Returns [`SourceError::Malformed`] if no item has a link.
pub fn first_image_link(json: &Value) -> Result<String, SourceError> {
    json.get("collection")
        .and_then(|c| c.get("items"))
        .and_then(Value::as_array)
        .and_then(|items| {
            items.iter().find_map(|item| {
                item.get("links")
                    .and_then(|links| links.get(0))
                    .and_then(|link| link.get("href"))
                    .and_then(Value::as_str)
                    .filter(|href| !href.trim().is_empty())
            })
        })
        .map(ToOwned::to_owned)
        .ok_or_else(|| SourceError::malformed(ORIGIN, "no search result carries an image link"))
}

/// One image source and its deadline.
pub type ImageAttempt = SourceAttempt<NasaImageSource>;

/// Remote image sources ending in the built-in catalog.
#[derive(Debug, Clone, Default)]
pub struct ImageChain {
    attempts: Vec<ImageAttempt>,
}

impl ImageChain {
    /// A chain that always uses the catalog.
    pub const fn catalog_only() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    /// A chain that tries `attempts` in order before the catalog.
    pub const fn new(attempts: Vec<ImageAttempt>) -> Self {
        Self { attempts }
    }

    /// Build the chain described by the `images` config section.
    pub fn from_config(config: &EchoesConfig) -> Self {
        let nasa = &config.images.nasa;
        let mut chain = Self::catalog_only();
        if nasa.enabled {
            chain
                .attempts
                .push(ImageAttempt::with_timeout_ms(NasaImageSource::new(nasa), nasa.timeout_ms));
        }
        chain
    }

    /// Number of remote attempts before the catalog.
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    /// Whether the chain is catalog-only.
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Image URL for `phase` and the source that supplied it. Never fails.
    pub async fn resolve(&self, phase: PhaseName) -> (String, DataOrigin) {
        for attempt in &self.attempts {
            match bounded(ORIGIN, attempt.timeout, attempt.source.fetch(phase)).await {
                Ok(url) => {
                    debug!(%phase, "image found");
                    return (url, ORIGIN);
                }
                Err(e) => warn!(%phase, error = %e, "image source failed, using next"),
            }
        }
        (catalog::image_for(phase).to_owned(), DataOrigin::Catalog)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn query_uses_lowercase_label() {
        assert_eq!(search_query(PhaseName::WaxingGibbous), "moon phase waxing gibbous");
    }

    #[test]
    fn first_linked_item_wins() {
        let body = json!({"collection": {"items": [
            {"data": [{"title": "no links"}]},
            {"links": [{"href": "https://images-assets.nasa.gov/image/a.jpg"}]},
            {"links": [{"href": "https://images-assets.nasa.gov/image/b.jpg"}]}
        ]}});
        assert_eq!(
            first_image_link(&body),
            Ok("https://images-assets.nasa.gov/image/a.jpg".to_owned())
        );
    }

    #[test]
    fn empty_results_are_malformed() {
        for body in [
            json!({"collection": {"items": []}}),
            json!({"collection": {}}),
            json!({"collection": {"items": [{"links": [{"href": "  "}]}]}}),
        ] {
            assert!(matches!(first_image_link(&body), Err(SourceError::Malformed { .. })));
        }
    }

    #[tokio::test]
    async fn catalog_only_chain_uses_catalog() {
        let (url, origin) = ImageChain::catalog_only().resolve(PhaseName::NewMoon).await;
        assert_eq!(origin, DataOrigin::Catalog);
        assert_eq!(url, catalog::image_for(PhaseName::NewMoon));
    }

    #[test]
    fn disabled_config_is_catalog_only() {
        let mut config = EchoesConfig::default();
        config.images.nasa.enabled = false;
        assert!(ImageChain::from_config(&config).is_empty());
        assert_eq!(ImageChain::from_config(&EchoesConfig::default()).len(), 1);
    }
}
