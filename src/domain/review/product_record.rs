// ============================================================
// PRODUCT RECORD
// ============================================================
// Labeled, displayable output unit for one product group

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Overall sentiment of a product group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parse a sentiment label, ignoring case. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Example phrases and mention count for one product feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInsight {
    #[serde(rename = "positive")]
    pub positive_examples: Vec<String>,

    #[serde(rename = "negative")]
    pub negative_examples: Vec<String>,

    #[serde(rename = "mentions")]
    pub mention_count: u32,
}

/// Feature name to insight, kept in insertion order.
///
/// Serialized as a JSON object whose key order matches insertion order, so an
/// exported document parses back into an identical map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureMap(Vec<(String, FeatureInsight)>);

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Insert or replace a feature, keeping the original position on replace
    pub fn insert(&mut self, name: impl Into<String>, insight: FeatureInsight) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = insight,
            None => self.0.push((name, insight)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureInsight> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, insight)| insight)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureInsight)> {
        self.0.iter().map(|(name, insight)| (name.as_str(), insight))
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FeatureMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, insight)| (name, insight)))
    }
}

impl<'de> Deserialize<'de> for FeatureMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct FeatureMapVisitor;

        impl<'de> Visitor<'de> for FeatureMapVisitor {
            type Value = FeatureMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of feature names to feature insights")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<FeatureMap, A::Error> {
                let mut map = FeatureMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, insight)) = access.next_entry::<String, FeatureInsight>()? {
                    map.insert(name, insight);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(FeatureMapVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub most_appreciated: Vec<String>,
    pub least_appreciated: Vec<String>,
    pub overall_sentiment: Sentiment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub product_name: String,
    pub category: String,
    pub features: FeatureMap,
    pub summary: ProductSummary,

    /// Number of raw rows grouped under this product
    pub review_count: usize,
}

impl ProductRecord {
    /// Plain-text card used by the copy action
    pub fn format_plain_text(&self) -> String {
        let features = self
            .features
            .iter()
            .map(|(name, insight)| format!("{}: {} mentions", name, insight.mention_count))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{} ({})\nFeatures: {}\nMost Appreciated: {}\nLeast Appreciated: {}",
            self.product_name,
            self.category,
            features,
            self.summary.most_appreciated.join(", "),
            self.summary.least_appreciated.join(", ")
        )
    }
}
