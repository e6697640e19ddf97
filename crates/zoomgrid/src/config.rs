//! Gallery configuration
//!
//! Caller options are merged over the defaults once, when a gallery is
//! created. The merged [`GalleryConfig`] never changes afterwards.

use serde::Deserialize;

use crate::GalleryResult;

/// Resolved, immutable gallery configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    /// Maximum number of overlay nodes kept for reuse
    pub cache_size: usize,
    /// Grid root holding the items
    pub grid_selector: String,
    /// One grid item
    pub grid_item_selector: String,
    /// Zoomable element inside an item; receives the click handler
    pub grid_image_selector: String,
    /// Image inside an item carrying `data-highres-image`
    pub item_image_selector: String,
    /// Class put on the enlarged image
    pub image_zoomed: String,
    /// Class marking the active overlay
    pub state_zoom: String,
    /// Class marking the grid while an overlay covers it
    pub state_inactive: String,
    /// Element clicked when the location asks for `picture=<id>`
    pub zoom_trigger_selector: String,
    /// Item id prefix: `picture=12` opens `#picture12`
    pub picture_id_prefix: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            cache_size: 10,
            grid_selector: ".gallery-items".to_string(),
            grid_item_selector: ".gallery-item".to_string(),
            grid_image_selector: ".gallery-image".to_string(),
            item_image_selector: "img".to_string(),
            image_zoomed: "image-zoomed".to_string(),
            state_zoom: "state-zoom".to_string(),
            state_inactive: "state-inactive".to_string(),
            zoom_trigger_selector: ".image-zoom".to_string(),
            picture_id_prefix: "picture".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Shallow merge: every option the caller set wins over the default.
    pub fn merge(options: &GalleryOptions) -> Self {
        let defaults = Self::default();
        let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);

        Self {
            cache_size: options.cache_size.unwrap_or(defaults.cache_size),
            grid_selector: pick(&options.grid_selector, defaults.grid_selector),
            grid_item_selector: pick(&options.grid_item_selector, defaults.grid_item_selector),
            grid_image_selector: pick(&options.grid_image_selector, defaults.grid_image_selector),
            item_image_selector: pick(&options.item_image_selector, defaults.item_image_selector),
            image_zoomed: pick(&options.image_zoomed, defaults.image_zoomed),
            state_zoom: pick(&options.state_zoom, defaults.state_zoom),
            state_inactive: pick(&options.state_inactive, defaults.state_inactive),
            zoom_trigger_selector: pick(
                &options.zoom_trigger_selector,
                defaults.zoom_trigger_selector,
            ),
            picture_id_prefix: pick(&options.picture_id_prefix, defaults.picture_id_prefix),
        }
    }
}

/// Caller-supplied overrides. Unknown keys are ignored when
/// deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GalleryOptions {
    pub cache_size: Option<usize>,
    pub grid_selector: Option<String>,
    pub grid_item_selector: Option<String>,
    pub grid_image_selector: Option<String>,
    pub item_image_selector: Option<String>,
    pub image_zoomed: Option<String>,
    pub state_zoom: Option<String>,
    pub state_inactive: Option<String>,
    pub zoom_trigger_selector: Option<String>,
    pub picture_id_prefix: Option<String>,
}

impl GalleryOptions {
    /// Read options from a JSON object, e.g. a `data-gallery` attribute
    pub fn from_json(json: &str) -> GalleryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override the cache size
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = Some(cache_size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GalleryError;

    #[test]
    fn test_defaults() {
        let config = GalleryConfig::merge(&GalleryOptions::default());
        assert_eq!(config, GalleryConfig::default());
        assert_eq!(config.cache_size, 10);
        assert_eq!(config.state_zoom, "state-zoom");
        assert_eq!(config.state_inactive, "state-inactive");
    }

    #[test]
    fn test_caller_wins() {
        let options = GalleryOptions {
            state_zoom: Some("is-open".to_string()),
            ..Default::default()
        }
        .with_cache_size(3);

        let config = GalleryConfig::merge(&options);
        assert_eq!(config.cache_size, 3);
        assert_eq!(config.state_zoom, "is-open");
        assert_eq!(config.grid_selector, ".gallery-items");
    }

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let options = GalleryOptions::from_json(
            r#"{"cache_size": 2, "grid_item_selector": ".tile", "animate": true}"#,
        )
        .unwrap();

        assert_eq!(options.cache_size, Some(2));
        assert_eq!(options.grid_item_selector.as_deref(), Some(".tile"));
        assert_eq!(options.state_zoom, None);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            GalleryOptions::from_json("{\"cache_size\": "),
            Err(GalleryError::Options(_))
        ));
    }
}
