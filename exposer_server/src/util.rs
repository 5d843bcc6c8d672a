use serde::Deserialize;

use std::str::FromStr;

use exposer_core::Error as ExposerError;

pub const DEFAULT_POST_LIMIT: u32 = 20;
pub const DEFAULT_TAG_LIMIT: u32 = 200;
pub const DEFAULT_ARTIST_LIMIT: u32 = 50;
pub const DEFAULT_AUTOCOMPLETE_LIMIT: u32 = 10;

/// Raw query pairs in request order. Keys may repeat (`tags=a&tags=b`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(pub Vec<(String, String)>);

impl QueryParams {
    /// Every value given for `key`.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// The first value for `key`, or `default` when the key is absent.
    /// A key given with an empty value yields the empty string.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or(default)
    }

    /// Parse the first value for `key`, if present.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<Option<T>, ExposerError> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.parse::<T>())
            .transpose()
            .map_err(|_| ExposerError::InvalidParameter(key.to_string()))
    }

    /// Parse the first value for `key`, falling back to `default` when absent.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, ExposerError> {
        Ok(self.parse(key)?.unwrap_or(default))
    }
}
