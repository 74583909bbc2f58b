//! [`ImageUrl`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

/// Publicly accessible URL of an uploaded image.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`] if the given `url` is an absolute HTTP(S)
    /// URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: &str) -> bool {
        is_http_url(url)
    }
}

/// Checks whether the given `url` is an absolute HTTP(S) URL without
/// whitespace.
pub(crate) fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|r| !r.is_empty() && !r.contains(char::is_whitespace))
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

impl<'de> Deserialize<'de> for ImageUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod spec {
    use super::ImageUrl;

    #[test]
    fn accepts_only_absolute_http_urls() {
        assert!(ImageUrl::new("https://cdn.example.com/a.jpg").is_some());
        assert!(ImageUrl::new("http://localhost:54321/x.png").is_some());

        assert!(ImageUrl::new("").is_none());
        assert!(ImageUrl::new("https://").is_none());
        assert!(ImageUrl::new("/relative.jpg").is_none());
        assert!(ImageUrl::new("ftp://example.com/a.jpg").is_none());
        assert!(ImageUrl::new("https://example.com/a b.jpg").is_none());
    }
}
