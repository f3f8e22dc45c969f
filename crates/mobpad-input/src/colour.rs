//! Colour keys: RGBA tuples used purely as region identifiers.

use core::fmt;
use core::str::FromStr;

use mobpad_errors::InputError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An exact RGBA8 pixel value identifying a hit region.
///
/// The text form is `"r,g,b,a"`, the format layouts are authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColourKey(pub [u8; 4]);

impl ColourKey {
    /// Build a key from its four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Build a fully opaque key.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Read a key from the first four bytes of an RGBA slice.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [r, g, b, a, ..] => Some(Self([*r, *g, *b, *a])),
            _ => None,
        }
    }

    /// Channel values in RGBA order.
    pub const fn channels(&self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for ColourKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "{r},{g},{b},{a}")
    }
}

impl FromStr for ColourKey {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut channels = [0u8; 4];
        let mut parts = s.split(',');
        for channel in channels.iter_mut() {
            let part = parts
                .next()
                .ok_or_else(|| InputError::invalid_colour_key(s))?;
            *channel = part
                .trim()
                .parse::<u8>()
                .ok()
                .ok_or_else(|| InputError::invalid_colour_key(s))?;
        }
        if parts.next().is_some() {
            return Err(InputError::invalid_colour_key(s));
        }
        Ok(Self(channels))
    }
}

impl Serialize for ColourKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColourKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One or more colour keys treated as a single region.
///
/// A sampled colour matches if it equals any member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompositeKey(Vec<ColourKey>);

impl CompositeKey {
    /// Build a composite from its members. Duplicates are dropped.
    pub fn new(keys: impl IntoIterator<Item = ColourKey>) -> Self {
        let mut members: Vec<ColourKey> = Vec::new();
        for key in keys {
            if !members.contains(&key) {
                members.push(key);
            }
        }
        Self(members)
    }

    /// Whether `colour` equals any member.
    pub fn matches(&self, colour: ColourKey) -> bool {
        self.0.contains(&colour)
    }

    /// Member keys.
    pub fn keys(&self) -> &[ColourKey] {
        &self.0
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the composite has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ColourKey> for CompositeKey {
    fn from(key: ColourKey) -> Self {
        Self(vec![key])
    }
}
