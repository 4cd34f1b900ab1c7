//! Category keyword map
//!
//! Normalizes free-text transaction categories into the fixed budget buckets.
//! The mapping is data, not code: an ordered list of keyword rules loaded from
//! TOML, so it can be unit-tested exhaustively and overridden per install.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/steady/config/categories.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/categories.toml");

/// The fixed category buckets every transaction is normalized into.
///
/// `Growth` is the savings bucket appended only in growth mode; the keyword
/// map never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    Essentials,
    /// Fuel, vehicle, phone - the cost of doing gig work
    FuelWork,
    Subscriptions,
    Discretionary,
    /// Savings set-aside, growth mode only
    Growth,
}

impl CategoryId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essentials => "essentials",
            Self::FuelWork => "fuel_work",
            Self::Subscriptions => "subscriptions",
            Self::Discretionary => "discretionary",
            Self::Growth => "growth",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Essentials => "Essentials",
            Self::FuelWork => "Fuel & Work",
            Self::Subscriptions => "Subscriptions",
            Self::Discretionary => "Discretionary",
            Self::Growth => "Growth Savings",
        }
    }

    /// The four spending buckets every plan carries (excludes the growth
    /// savings bucket)
    pub fn base_categories() -> &'static [CategoryId] {
        &[
            Self::Essentials,
            Self::FuelWork,
            Self::Subscriptions,
            Self::Discretionary,
        ]
    }
}

impl std::str::FromStr for CategoryId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "essentials" => Ok(Self::Essentials),
            "fuel_work" | "fuelwork" => Ok(Self::FuelWork),
            "subscriptions" => Ok(Self::Subscriptions),
            "discretionary" => Ok(Self::Discretionary),
            "growth" => Ok(Self::Growth),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw TOML config shape
#[derive(Debug, Deserialize)]
struct MapFile {
    fallback: CategoryId,
    #[serde(rename = "rule", default)]
    rules: Vec<MapRuleFile>,
}

#[derive(Debug, Deserialize)]
struct MapRuleFile {
    category: CategoryId,
    keywords: Vec<String>,
}

/// One keyword rule: any keyword substring-matches the (lowercased) source
/// category string
#[derive(Debug, Clone)]
pub struct MapRule {
    pub category: CategoryId,
    pub keywords: Vec<String>,
}

/// Ordered keyword rules mapping free-text categories to budget buckets
#[derive(Debug, Clone)]
pub struct CategoryMap {
    rules: Vec<MapRule>,
    fallback: CategoryId,
}

impl CategoryMap {
    /// Load the map: data-dir override if present, embedded defaults otherwise
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::override_path() {
            if path.exists() {
                tracing::info!(path = %path.display(), "Loading category map override");
                let content = fs::read_to_string(&path)?;
                return Self::from_toml(&content);
            }
        }
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Parse a map from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: MapFile = toml::from_str(content)?;
        if file.fallback == CategoryId::Growth {
            return Err(Error::Config(
                "fallback category cannot be the growth savings bucket".to_string(),
            ));
        }
        let rules = file
            .rules
            .into_iter()
            .map(|r| MapRule {
                category: r.category,
                keywords: r.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect::<Vec<_>>();
        for rule in &rules {
            if rule.category == CategoryId::Growth {
                return Err(Error::Config(
                    "keyword rules cannot target the growth savings bucket".to_string(),
                ));
            }
        }
        Ok(Self {
            rules,
            fallback: file.fallback,
        })
    }

    /// Path of the optional override file in the platform data dir
    fn override_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("steady").join("config").join("categories.toml"))
    }

    /// Normalize a free-text category into a budget bucket.
    ///
    /// First rule with a matching keyword wins; unmatched strings map to the
    /// fallback bucket (discretionary by default).
    pub fn classify(&self, raw_category: &str) -> CategoryId {
        let lowered = raw_category.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|k| lowered.contains(k.as_str())) {
                return rule.category;
            }
        }
        self.fallback
    }

    pub fn rules(&self) -> &[MapRule] {
        &self.rules
    }

    pub fn fallback(&self) -> CategoryId {
        self.fallback
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        // Embedded config is validated by tests; parsing it cannot fail
        Self::from_toml(DEFAULT_CONFIG).unwrap_or(Self {
            rules: vec![],
            fallback: CategoryId::Discretionary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let map = CategoryMap::from_toml(DEFAULT_CONFIG).unwrap();
        assert!(!map.rules().is_empty());
        assert_eq!(map.fallback(), CategoryId::Discretionary);
    }

    #[test]
    fn test_classify_known_keywords() {
        let map = CategoryMap::default();
        assert_eq!(map.classify("Groceries"), CategoryId::Essentials);
        assert_eq!(map.classify("RENT PAYMENT"), CategoryId::Essentials);
        assert_eq!(map.classify("Fuel stop"), CategoryId::FuelWork);
        assert_eq!(map.classify("netflix monthly"), CategoryId::Subscriptions);
        assert_eq!(map.classify("Dining out"), CategoryId::Discretionary);
    }

    #[test]
    fn test_classify_unmatched_falls_back_to_discretionary() {
        let map = CategoryMap::default();
        assert_eq!(map.classify("mystery merchant"), CategoryId::Discretionary);
        assert_eq!(map.classify(""), CategoryId::Discretionary);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let map = CategoryMap::default();
        assert_eq!(map.classify("GROCERY OUTLET"), map.classify("grocery outlet"));
    }

    #[test]
    fn test_custom_map_rule_order_wins() {
        let map = CategoryMap::from_toml(
            r#"
            fallback = "discretionary"

            [[rule]]
            category = "fuel_work"
            keywords = ["station"]

            [[rule]]
            category = "essentials"
            keywords = ["station"]
            "#,
        )
        .unwrap();
        assert_eq!(map.classify("gas station"), CategoryId::FuelWork);
    }

    #[test]
    fn test_growth_rules_rejected() {
        let err = CategoryMap::from_toml(
            r#"
            fallback = "discretionary"

            [[rule]]
            category = "growth"
            keywords = ["savings"]
            "#,
        );
        assert!(err.is_err());
    }
}
