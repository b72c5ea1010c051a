//! Country records and the fixed set of quiz regions.
//!
//! A `Country` is an immutable value. Identity is its `name`: two records
//! with the same name are the same country, whatever their other fields say.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::QuizError;

/// Geographic region a country belongs to.
///
/// The set is closed: Region mode only offers these six.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Europe,
    Asia,
    Africa,
    NorthAmerica,
    SouthAmerica,
    Oceania,
}

impl Region {
    /// All regions in display order.
    pub const ALL: [Region; 6] = [
        Region::Europe,
        Region::Asia,
        Region::Africa,
        Region::NorthAmerica,
        Region::SouthAmerica,
        Region::Oceania,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::Africa => "Africa",
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
            Region::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = QuizError;

    /// Accepts the display name or the snake_case key, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Region::ALL
            .into_iter()
            .find(|region| {
                region.name().eq_ignore_ascii_case(wanted)
                    || region.name().replace(' ', "_").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| QuizError::UnknownRegion(s.to_string()))
    }
}

/// A country as presented by the quiz.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Unique key within a catalog.
    pub name: String,

    /// Raster flag image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_png: Option<String>,

    /// Vector flag image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_svg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

impl Country {
    /// Create a country with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flag_png: None,
            flag_svg: None,
            region: None,
            capital: None,
            language: None,
            population: None,
        }
    }

    /// Set both flag image references (builder pattern).
    #[must_use]
    pub fn with_flags(mut self, png: impl Into<String>, svg: impl Into<String>) -> Self {
        self.flag_png = Some(png.into());
        self.flag_svg = Some(svg.into());
        self
    }

    /// Set the region (builder pattern).
    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Set the capital (builder pattern).
    #[must_use]
    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital = Some(capital.into());
        self
    }

    /// Set the main language (builder pattern).
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the population (builder pattern).
    #[must_use]
    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    /// Same country by identity (exact name match).
    #[must_use]
    pub fn same_as(&self, other: &Country) -> bool {
        self.name == other.name
    }

    /// Capital, treating an empty string as missing.
    #[must_use]
    pub fn capital(&self) -> Option<&str> {
        self.capital.as_deref().filter(|c| !c.is_empty())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
