use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Cross-origin settings for browser clients of the speech API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins, `"*"` for any
    #[serde(default)]
    pub origins: AllowList,
    /// Allowed methods, `"*"` for any
    #[serde(default)]
    pub methods: AllowList,
    /// Allowed request headers, `"*"` for any
    #[serde(default)]
    pub headers: AllowList,
    /// Preflight cache lifetime in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl CorsConfig {
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

/// A wildcard or an explicit set of values
///
/// Accepts a single string or an array of strings. Any `"*"` entry
/// collapses the whole list to [`AllowList::Any`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AllowList {
    #[default]
    Any,
    Only(Vec<String>),
}

impl<'de> Deserialize<'de> for AllowList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        let values = match Raw::deserialize(deserializer)? {
            Raw::One(value) => vec![value],
            Raw::Many(values) => values,
        };

        if values.iter().any(|value| value == "*") {
            Ok(Self::Any)
        } else {
            Ok(Self::Only(values))
        }
    }
}
