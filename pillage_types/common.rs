use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::errors::GameError;

pub type VillageId = u64;

/// The closed set of resources a village can stock.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum ResourceKind {
    Wood,
    Stone,
    Hop,
    Beer,
}

/// Amounts per resource kind. Missing keys on the wire default to zero and
/// unknown keys are ignored, so costs can list only what they need.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceGroup {
    pub wood: u32,
    pub stone: u32,
    pub hop: u32,
    pub beer: u32,
}

impl ResourceGroup {
    pub const fn new(wood: u32, stone: u32, hop: u32, beer: u32) -> Self {
        Self {
            wood,
            stone,
            hop,
            beer,
        }
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Hop => self.hop,
            ResourceKind::Beer => self.beer,
        }
    }

    pub fn set(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Wood => self.wood = amount,
            ResourceKind::Stone => self.stone = amount,
            ResourceKind::Hop => self.hop = amount,
            ResourceKind::Beer => self.beer = amount,
        }
    }

    /// Iterates in the fixed order Wood, Stone, Hop, Beer.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::iter().map(|kind| (kind, self.get(kind)))
    }

    /// Checks that every component of `cost` is covered by these stocks.
    /// The error names the first resource (in iteration order) that falls short.
    pub fn check_resources(&self, cost: &ResourceGroup) -> Result<(), GameError> {
        for (resource, required) in cost.iter() {
            let available = self.get(resource);
            if available < required {
                return Err(GameError::InsufficientResources {
                    resource,
                    required,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Removes resources, never going below zero.
    pub fn remove_resources(&mut self, cost: &ResourceGroup) {
        for (resource, amount) in cost.iter() {
            self.set(resource, self.get(resource).saturating_sub(amount));
        }
    }

    /// Caps every component at `limit`.
    pub fn clamp_to(&mut self, limit: u32) {
        for kind in ResourceKind::iter() {
            self.set(kind, self.get(kind).min(limit));
        }
    }

    /// How many times `cost` fits into these stocks. `None` when the cost is empty.
    pub fn times_affordable(&self, cost: &ResourceGroup) -> Option<u32> {
        cost.iter()
            .filter(|(_, required)| *required > 0)
            .map(|(resource, required)| self.get(resource) / required)
            .min()
    }
}

impl core::ops::Mul<u32> for ResourceGroup {
    type Output = ResourceGroup;

    // Saturates: a cost that overflows can never be afforded anyway.
    fn mul(self, rhs: u32) -> Self::Output {
        ResourceGroup::new(
            self.wood.saturating_mul(rhs),
            self.stone.saturating_mul(rhs),
            self.hop.saturating_mul(rhs),
            self.beer.saturating_mul(rhs),
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid duration {0:?}, expected HH:MM:SS")]
pub struct ParseDurationError(pub String);

/// A game duration, written on the wire as `HH:MM:SS`.
///
/// Hours are not wrapped at 24, so long constructions render as `123:00:00`.
/// Integer seconds are accepted when deserializing.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GameDuration {
    secs: u64,
}

impl GameDuration {
    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    pub const fn as_secs(&self) -> u64 {
        self.secs
    }
}

impl fmt::Display for GameDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.secs / 3600;
        let minutes = (self.secs % 3600) / 60;
        let seconds = self.secs % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl FromStr for GameDuration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDurationError(s.to_string());
        let mut parts = s.trim().split(':');

        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err());
        };

        let hours: u64 = h.parse().map_err(|_| err())?;
        let minutes: u64 = m.parse().map_err(|_| err())?;
        let seconds: u64 = sec.parse().map_err(|_| err())?;
        if minutes >= 60 || seconds >= 60 {
            return Err(err());
        }

        hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .map(GameDuration::from_secs)
            .ok_or_else(err)
    }
}

impl Serialize for GameDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DurationVisitor;

        impl de::Visitor<'_> for DurationVisitor {
            type Value = GameDuration;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a HH:MM:SS string or a number of seconds")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(GameDuration::from_secs(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(GameDuration::from_secs)
                    .map_err(|_| E::custom(format!("negative duration: {v}")))
            }
        }

        deserializer.deserialize_any(DurationVisitor)
    }
}
