//! Slot names and slot values
//!
//! The form collects a fixed, closed set of slots. Values flowing through
//! extraction and validation are either free text or a boolean; numbers
//! coming from entity extractors are kept in their textual form.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

/// Bookkeeping slot holding the name of the slot the form asked for last
pub const REQUESTED_SLOT: &str = "requested_slot";

/// Slots collected by the restaurant form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    Cuisine,
    NumPeople,
    OutdoorSeating,
    Preferences,
    Feedback,
}

impl SlotName {
    /// All slots, in the order the form asks for them
    pub const ALL: [SlotName; 5] = [
        SlotName::Cuisine,
        SlotName::NumPeople,
        SlotName::OutdoorSeating,
        SlotName::Preferences,
        SlotName::Feedback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::Cuisine => "cuisine",
            SlotName::NumPeople => "num_people",
            SlotName::OutdoorSeating => "outdoor_seating",
            SlotName::Preferences => "preferences",
            SlotName::Feedback => "feedback",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotName::ALL
            .iter()
            .copied()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| FormError::UnknownSlot(s.to_string()))
    }
}

/// A candidate or stored slot value
///
/// Unset slots are represented as `Option::None` by the tracker, so there is
/// no null variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValue {
    Text(String),
    Bool(bool),
}

impl SlotValue {
    pub fn text(value: impl Into<String>) -> Self {
        SlotValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlotValue::Text(s) => Some(s),
            SlotValue::Bool(_) => None,
        }
    }

    /// True for empty text; booleans are never empty
    pub fn is_empty(&self) -> bool {
        matches!(self, SlotValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Text(s) => f.write_str(s),
            SlotValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for SlotValue {
    fn from(s: &str) -> Self {
        SlotValue::Text(s.to_string())
    }
}

impl From<String> for SlotValue {
    fn from(s: String) -> Self {
        SlotValue::Text(s)
    }
}

impl From<bool> for SlotValue {
    fn from(b: bool) -> Self {
        SlotValue::Bool(b)
    }
}

impl Serialize for SlotValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SlotValue::Text(s) => serializer.serialize_str(s),
            SlotValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

struct SlotValueVisitor;

impl<'de> Visitor<'de> for SlotValueVisitor {
    type Value = SlotValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean slot value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<SlotValue, E> {
        Ok(SlotValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<SlotValue, E> {
        Ok(SlotValue::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<SlotValue, E> {
        Ok(SlotValue::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<SlotValue, E> {
        Ok(SlotValue::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SlotValue, E> {
        Ok(SlotValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<SlotValue, E> {
        Ok(SlotValue::Text(v))
    }
}

impl<'de> Deserialize<'de> for SlotValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SlotValueVisitor)
    }
}
