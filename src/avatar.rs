//! Deterministic placeholder avatar URLs.

#[cfg(test)]
#[path = "avatar_test.rs"]
mod avatar_test;

use url::{Url, form_urlencoded};

use crate::config::ConfigError;
use crate::consts::DEFAULT_AVATAR_BASE_URL;
use crate::roster::Student;

/// Builds avatar image URLs seeded by a string, usually the student's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarGenerator {
    base: String,
}

impl AvatarGenerator {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAvatarUrl`] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidAvatarUrl { url: base_url.to_string(), reason: e.to_string() })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidAvatarUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical URL".into(),
            });
        }
        Ok(Self { base: base_url.to_string() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Avatar URL for `seed`. The same seed always yields the same URL.
    ///
    /// The seed is form-encoded, so names with spaces or commas never leak a
    /// raw delimiter into exported CSV.
    #[must_use]
    pub fn url(&self, seed: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(seed.as_bytes()).collect();
        let sep = if self.base.contains('?') { '&' } else { '?' };
        format!("{}{sep}seed={encoded}", self.base)
    }

    /// Image to show when `student`'s own photo fails to load.
    #[must_use]
    pub fn fallback_photo(&self, student: &Student) -> String {
        self.url(&student.name)
    }
}

impl Default for AvatarGenerator {
    fn default() -> Self {
        Self { base: DEFAULT_AVATAR_BASE_URL.to_string() }
    }
}
