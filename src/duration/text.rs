//! String-only serde hook for config formats (TOML)
//!
//! ```rust
//! use funks::Duration;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Settings {
//!     #[serde(with = "funks::duration::text")]
//!     poll_interval: Duration,
//! }
//!
//! let settings: Settings = toml::from_str("poll_interval = \"2m30s\"").unwrap();
//! assert_eq!(settings.poll_interval.to_string(), "2m30s");
//! assert!(toml::from_str::<Settings>("poll_interval = 150").is_err());
//! ```

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Serializer;

use super::Duration;
use crate::error::Result;

impl Duration {
    /// Decode the raw text of a string-typed config field
    pub fn from_text(text: &str) -> Result<Self> {
        Duration::parse(text)
    }
}

pub fn serialize<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(duration)
}

pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(TextVisitor)
}

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = Duration;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a duration string such as \"5s\"")
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Duration::from_text(value).map_err(E::custom)
    }
}

/// Same hook for `Option<Duration>` fields
///
/// Pair with `#[serde(default, skip_serializing_if = "Option::is_none")]`,
/// TOML has no null.
pub mod option {
    use super::*;

    pub fn serialize<S>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.collect_str(d),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionVisitor)
    }

    struct OptionVisitor;

    impl<'de> Visitor<'de> for OptionVisitor {
        type Value = Option<Duration>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an optional duration string")
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            super::deserialize(deserializer).map(Some)
        }
    }
}
