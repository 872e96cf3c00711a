//! Event ID - position of a row in the audit log
//!
//! The audit trigger assigns event IDs from a single sequence, so they
//! establish a total order over every captured action across all tables.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Monotonically increasing audit event identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EventId(i64);

impl EventId {
    /// Create a new EventId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, EventIdParseError> {
        s.trim()
            .parse::<i64>()
            .map(EventId)
            .map_err(|_| EventIdParseError::InvalidFormat)
    }
}

/// Error when parsing an EventId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EventIdParseError {
    #[error("invalid event id format")]
    InvalidFormat,
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<EventId> for i64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl std::str::FromStr for EventId {
    type Err = EventIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventId::parse(s)
    }
}

// bigserial values can exceed JavaScript's safe integer range
impl Serialize for EventId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct EventIdVisitor;

        impl Visitor<'_> for EventIdVisitor {
            type Value = EventId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing an event ID")
            }

            fn visit_i64<E>(self, value: i64) -> Result<EventId, E>
            where
                E: de::Error,
            {
                Ok(EventId(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<EventId, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(EventId)
                    .map_err(|_| de::Error::custom("event id out of range"))
            }

            fn visit_str<E>(self, value: &str) -> Result<EventId, E>
            where
                E: de::Error,
            {
                EventId::parse(value).map_err(|_| de::Error::custom("invalid event id string"))
            }
        }

        deserializer.deserialize_any(EventIdVisitor)
    }
}
