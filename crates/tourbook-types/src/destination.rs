//! Destinations shown to visitors

use crate::error::{TypeError, TypeResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How demanding a trip is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    /// Suitable for anyone
    Easy,
    /// Some walking or altitude
    Moderate,
    /// Expedition-grade
    Challenging,
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Moderate => write!(f, "moderate"),
            Self::Challenging => write!(f, "challenging"),
        }
    }
}

impl FromStr for DifficultyLevel {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "moderate" => Ok(Self::Moderate),
            "challenging" => Ok(Self::Challenging),
            _ => Err(TypeError::UnknownDifficulty {
                value: s.to_string(),
            }),
        }
    }
}

/// A sellable trip product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    /// Backend identifier
    pub id: i64,

    /// Display name
    pub name: String,

    /// URL slug, also used as the booking form value
    #[serde(default)]
    pub slug: String,

    /// Hero image
    #[serde(default)]
    pub image_url: Option<String>,

    /// Marketing description
    #[serde(default)]
    pub description: Option<String>,

    /// Duration label such as `3 days`
    #[serde(default)]
    pub duration: Option<String>,

    /// Highlight tags
    #[serde(default)]
    pub highlights: Vec<String>,

    /// Price range label
    #[serde(default)]
    pub price_range: Option<String>,

    /// Difficulty level
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub difficulty_level: Option<DifficultyLevel>,

    /// Best season to travel
    #[serde(default)]
    pub best_time_to_visit: Option<String>,

    /// Shown on the landing page
    #[serde(default)]
    pub is_featured: bool,

    /// Number of detail page views
    #[serde(default)]
    pub view_count: u64,

    /// Creation timestamp
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

// Older rows carry an empty string instead of null.
fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<DifficultyLevel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}
