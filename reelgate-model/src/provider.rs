//! Streaming provider definitions.
//!
//! A provider is a named pair of URL templates pointing at a third-party
//! embeddable player. The movie template carries an `{id}` placeholder; the
//! TV template carries `{id}`, `{season}` and `{episode}`.

use crate::error::{ModelError, Result};
use crate::media_type::MediaKind;

/// A named external playback template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Provider {
    /// Unique name within a registry.
    pub name: String,
    /// Optional logo URL, display only.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "blank_as_none"
        )
    )]
    pub logo: Option<String>,
    /// Movie template, expected to contain `{id}`.
    pub url: String,
    /// Episodic template, expected to contain `{id}`, `{season}` and `{episode}`.
    pub tv_url: String,
}

impl Provider {
    /// Build a provider, rejecting blank required fields.
    ///
    /// Surrounding whitespace is trimmed from every field.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        tv_url: impl Into<String>,
    ) -> Result<Self> {
        let name = required("name", name.into())?;
        let url = required("url", url.into())?;
        let tv_url = required("tv_url", tv_url.into())?;
        Ok(Self {
            name,
            logo: None,
            url,
            tv_url,
        })
    }

    /// Attach a logo; blank strings leave the provider without one.
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        let logo = logo.into();
        let trimmed = logo.trim();
        self.logo = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Re-apply the [`Provider::new`] rules to a value built some other way,
    /// such as one read from storage or an import file.
    pub fn normalized(self) -> Result<Self> {
        let provider = Self::new(self.name, self.url, self.tv_url)?;
        Ok(match self.logo {
            Some(logo) => provider.with_logo(logo),
            None => provider,
        })
    }

    /// Template used for the given kind of content.
    pub fn template(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Movie => &self.url,
            MediaKind::Tv => &self.tv_url,
        }
    }
}

fn required(field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelError::InvalidProvider { field });
    }
    Ok(trimmed.to_string())
}

// Older stores wrote `"logo": ""` for providers without artwork.
#[cfg(feature = "serde")]
fn blank_as_none<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.filter(|logo| !logo.trim().is_empty()))
}
