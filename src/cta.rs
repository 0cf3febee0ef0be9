//! Affiliate referral links and the mobile sticky call-to-action

use crate::config::ReferralConfig;
use log::debug;
use std::collections::HashMap;
use url::{form_urlencoded, Url};

/// Storage key remembering that the visitor closed the sticky CTA
pub const STICKY_DISMISSED_KEY: &str = "sticky-cta-dismissed";

/// Scroll fraction past which the sticky CTA appears
pub const STICKY_SCROLL_THRESHOLD: f64 = 0.3;

/// Tracking link to the legal services partner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralLink {
    pub base_url: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_content: Option<String>,
}

impl ReferralLink {
    pub fn new(config: &ReferralConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            utm_source: config.utm_source.clone(),
            utm_medium: "referral".to_string(),
            utm_content: None,
        }
    }

    pub fn medium(mut self, medium: impl Into<String>) -> Self {
        self.utm_medium = medium.into();
        self
    }

    /// Identify the placement, e.g. `expat-profiles-hub`
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.utm_content = Some(content.into());
        self
    }

    /// Tracking URL with UTM query parameters
    ///
    /// The base is validated but kept as written, so no trailing `/` is
    /// added to a bare host.
    pub fn to_url(&self) -> Result<String, url::ParseError> {
        let base = Url::parse(&self.base_url)?;

        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("utm_source", &self.utm_source);
        query.append_pair("utm_medium", &self.utm_medium);
        if let Some(content) = &self.utm_content {
            query.append_pair("utm_content", content);
        }

        let separator = if base.query().is_some() { '&' } else { '?' };
        Ok(format!("{}{}{}", self.base_url, separator, query.finish()))
    }
}

impl Default for ReferralLink {
    fn default() -> Self {
        Self::new(&ReferralConfig::default())
    }
}

/// Minimal key-value persistence, e.g. browser local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory [`KeyValueStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Sticky CTA visibility. Once dismissed it stays hidden, across visits
/// sharing the same store.
#[derive(Debug)]
pub struct StickyCta<S: KeyValueStore> {
    store: S,
    visible: bool,
    dismissed: bool,
}

impl<S: KeyValueStore> StickyCta<S> {
    pub fn new(store: S) -> Self {
        let dismissed = store.get(STICKY_DISMISSED_KEY).as_deref() == Some("true");
        Self {
            store,
            visible: false,
            dismissed,
        }
    }

    /// Update visibility from the page scroll position. Ignored once dismissed.
    pub fn on_scroll(&mut self, scroll_y: f64, document_height: f64, viewport_height: f64) {
        if self.dismissed {
            return;
        }
        let scrollable = document_height - viewport_height;
        let fraction = if scrollable > 0.0 {
            scroll_y / scrollable
        } else {
            0.0
        };
        self.visible = fraction > STICKY_SCROLL_THRESHOLD;
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
        self.store.set(STICKY_DISMISSED_KEY, "true");
        debug!("Sticky CTA dismissed");
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn is_shown(&self) -> bool {
        self.visible && !self.dismissed
    }

    /// Give the store back, e.g. to persist it
    pub fn into_store(self) -> S {
        self.store
    }
}
