use crate::constants::{DEFAULT_MOBILE, DEFAULT_TABLET};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One responsive tier below desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Tablet,
    Mobile,
}

impl Tier {
    pub const ALL: [Self; 2] = [Self::Tablet, Self::Mobile];

    /// Pixel width the bundled stylesheet hardcodes for this tier.
    #[must_use]
    pub const fn builtin(self) -> u32 {
        match self {
            Self::Tablet => DEFAULT_TABLET,
            Self::Mobile => DEFAULT_MOBILE,
        }
    }

    /// Placeholder token accepted in place of a concrete media query.
    #[must_use]
    pub const fn shortcut(self) -> &'static str {
        match self {
            Self::Tablet => "@media tablet",
            Self::Mobile => "@media mobile",
        }
    }

    /// Canonical media query a [`Tier::shortcut`] expands to.
    #[must_use]
    pub const fn expansion(self) -> &'static str {
        match self {
            Self::Tablet => "@media only screen and (max-width: 1024px)",
            Self::Mobile => "@media only screen and (max-width: 768px)",
        }
    }

    #[must_use]
    pub const fn flag(self) -> Tiers {
        match self {
            Self::Tablet => Tiers::TABLET,
            Self::Mobile => Tiers::MOBILE,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// A set of tiers, e.g. the tiers carrying a user override.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Tiers: u8 {
        const TABLET = 1 << 0;
        const MOBILE = 1 << 1;
    }
}

/// A `{tablet, mobile}` pair of pixel widths.
///
/// Values stay strings: an empty string means "unset", and anything else is passed
/// through verbatim, even if it is not a number. Persisted records may carry plain
/// numbers, which are read as their decimal text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    #[serde(deserialize_with = "string_or_number")]
    pub tablet: String,
    #[serde(deserialize_with = "string_or_number")]
    pub mobile: String,
}

impl Breakpoints {
    pub fn new(tablet: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self { tablet: tablet.into(), mobile: mobile.into() }
    }

    /// The literal `{1024, 768}` seed.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(DEFAULT_TABLET.to_string(), DEFAULT_MOBILE.to_string())
    }

    #[must_use]
    pub fn get(&self, tier: Tier) -> &str {
        match tier {
            Tier::Tablet => &self.tablet,
            Tier::Mobile => &self.mobile,
        }
    }

    pub fn set(&mut self, tier: Tier, value: impl Into<String>) {
        match tier {
            Tier::Tablet => self.tablet = value.into(),
            Tier::Mobile => self.mobile = value.into(),
        }
    }

    /// Only the empty string counts as unset; whitespace is a value like any other.
    #[must_use]
    pub fn is_set(&self, tier: Tier) -> bool {
        !self.get(tier).is_empty()
    }

    /// Tiers holding a non-empty value.
    #[must_use]
    pub fn set_tiers(&self) -> Tiers {
        Tier::ALL
            .into_iter()
            .filter(|tier| self.is_set(*tier))
            .fold(Tiers::empty(), |acc, tier| acc | tier.flag())
    }
}

/// The merged breakpoint pair used for one request.
///
/// Both values are always populated; `custom` records which tiers came from a
/// user override rather than from the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBreakpoints {
    #[serde(flatten)]
    values: Breakpoints,
    custom: Tiers,
}

impl ResolvedBreakpoints {
    #[must_use]
    pub const fn new(values: Breakpoints, custom: Tiers) -> Self {
        Self { values, custom }
    }

    /// The uncustomized `{1024, 768}` pair.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Breakpoints::builtin(), Tiers::empty())
    }

    #[must_use]
    pub fn tablet(&self) -> &str {
        &self.values.tablet
    }

    #[must_use]
    pub fn mobile(&self) -> &str {
        &self.values.mobile
    }

    #[must_use]
    pub fn get(&self, tier: Tier) -> &str {
        self.values.get(tier)
    }

    #[must_use]
    pub const fn values(&self) -> &Breakpoints {
        &self.values
    }

    #[must_use]
    pub const fn custom_tiers(&self) -> Tiers {
        self.custom
    }

    /// True when at least one tier carries an override.
    #[must_use]
    pub const fn has_custom_breakpoints(&self) -> bool {
        !self.custom.is_empty()
    }

    /// Literal comparison against `"1024"` / `"768"`; `"1024.0"` does not match.
    #[must_use]
    pub fn matches_builtin(&self) -> bool {
        Tier::ALL.into_iter().all(|tier| self.get(tier) == tier.builtin().to_string())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Integer(number)) => number.to_string(),
        Some(Raw::Float(number)) => number.to_string(),
        None => String::new(),
    })
}
