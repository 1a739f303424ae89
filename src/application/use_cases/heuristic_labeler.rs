// ============================================================
// HEURISTIC LABELER
// ============================================================
// Category rules, canned feature templates, and sentiment tally

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::product_grouper::ProductGroup;
use crate::domain::review::{
    FeatureInsight, FeatureMap, ProductRecord, ProductSummary, RawRow, Sentiment, COL_CATEGORY,
    COL_RATING, COL_SENTIMENT,
};
use crate::infrastructure::random::RandomSource;

/// Leading decimal number, the way a lenient float parse reads "4.5/5"
static LEADING_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap());

pub const FALLBACK_CATEGORY: &str = "General Product";

/// One keyword rule: matches when the product name contains any of
/// `name_keywords` or the joined review text contains any of `review_keywords`.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub label: &'static str,
    pub name_keywords: &'static [&'static str],
    pub review_keywords: &'static [&'static str],
}

impl CategoryRule {
    /// Both inputs must already be lower-cased
    pub fn matches(&self, name: &str, review_text: &str) -> bool {
        self.name_keywords.iter().any(|k| name.contains(k))
            || self.review_keywords.iter().any(|k| review_text.contains(k))
    }
}

/// Evaluated in order, first match wins
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        label: "Electronics - Smartphone",
        name_keywords: &["phone", "smartphone"],
        review_keywords: &["battery", "camera"],
    },
    CategoryRule {
        label: "Electronics - Computer",
        name_keywords: &["laptop", "computer"],
        review_keywords: &["processor", "screen"],
    },
    CategoryRule {
        label: "Clothing",
        name_keywords: &["shirt", "dress"],
        review_keywords: &["fabric", "fit"],
    },
    CategoryRule {
        label: "Furniture",
        name_keywords: &["chair", "table"],
        review_keywords: &["wood", "assembly"],
    },
];

#[derive(Debug, Clone, Copy)]
pub struct FeatureTemplate {
    pub name: &'static str,
    pub positive: &'static [&'static str],
    pub negative: &'static [&'static str],
    pub min_mentions: u32,
    pub max_mentions: u32,
}

const ELECTRONICS_FEATURES: &[FeatureTemplate] = &[
    FeatureTemplate {
        name: "Battery Life",
        positive: &["Long lasting", "All day usage"],
        negative: &["Drains quickly"],
        min_mentions: 5,
        max_mentions: 14,
    },
    FeatureTemplate {
        name: "Display Quality",
        positive: &["Sharp display", "Vivid colors"],
        negative: &["Too bright"],
        min_mentions: 3,
        max_mentions: 10,
    },
    FeatureTemplate {
        name: "Performance",
        positive: &["Fast processing", "Smooth operation"],
        negative: &["Occasional lag"],
        min_mentions: 7,
        max_mentions: 18,
    },
];

const CLOTHING_FEATURES: &[FeatureTemplate] = &[
    FeatureTemplate {
        name: "Material Quality",
        positive: &["Soft fabric", "Durable"],
        negative: &["Thin material"],
        min_mentions: 4,
        max_mentions: 13,
    },
    FeatureTemplate {
        name: "Fit",
        positive: &["Perfect fit", "True to size"],
        negative: &["Too tight"],
        min_mentions: 8,
        max_mentions: 22,
    },
    FeatureTemplate {
        name: "Comfort",
        positive: &["Very comfortable", "Breathable"],
        negative: &["Itchy"],
        min_mentions: 5,
        max_mentions: 12,
    },
];

const GENERAL_FEATURES: &[FeatureTemplate] = &[
    FeatureTemplate {
        name: "Build Quality",
        positive: &["Well made", "Sturdy"],
        negative: &["Flimsy"],
        min_mentions: 6,
        max_mentions: 15,
    },
    FeatureTemplate {
        name: "Value",
        positive: &["Great price", "Worth it"],
        negative: &["Overpriced"],
        min_mentions: 4,
        max_mentions: 15,
    },
];

/// Feature template for a category (case-sensitive match on the label)
pub fn feature_templates(category: &str) -> &'static [FeatureTemplate] {
    if category.contains("Electronics") {
        ELECTRONICS_FEATURES
    } else if category.contains("Clothing") {
        CLOTHING_FEATURES
    } else {
        GENERAL_FEATURES
    }
}

/// Broad bucket used for the most/least appreciated phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppreciationBucket {
    Electronics,
    Clothing,
    Other,
}

impl AppreciationBucket {
    pub fn for_category(category: &str) -> Self {
        let category = category.to_lowercase();
        if ["electronic", "phone", "laptop"]
            .iter()
            .any(|k| category.contains(k))
        {
            AppreciationBucket::Electronics
        } else if ["clothing", "fashion"].iter().any(|k| category.contains(k)) {
            AppreciationBucket::Clothing
        } else {
            AppreciationBucket::Other
        }
    }

    pub fn most_appreciated(&self) -> &'static [&'static str] {
        match self {
            AppreciationBucket::Electronics => &[
                "Excellent performance",
                "Great build quality",
                "Good value for money",
            ],
            AppreciationBucket::Clothing => {
                &["Comfortable fit", "Quality material", "Stylish design"]
            }
            AppreciationBucket::Other => &["Great quality", "Good value", "Reliable product"],
        }
    }

    pub fn least_appreciated(&self) -> &'static [&'static str] {
        match self {
            AppreciationBucket::Electronics => &[
                "Battery life could be better",
                "Slow customer service",
                "Limited warranty",
            ],
            AppreciationBucket::Clothing => &["Sizing issues", "Color fading", "Shipping delays"],
            AppreciationBucket::Other => {
                &["Higher price", "Delivery time", "Packaging could improve"]
            }
        }
    }
}

/// Category from keyword rules over the product name and all review texts
pub fn infer_category(product_name: &str, rows: &[RawRow]) -> String {
    let name = product_name.to_lowercase();
    let review_text = rows
        .iter()
        .map(RawRow::review_text)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(&name, &review_text))
        .map(|rule| rule.label)
        .unwrap_or(FALLBACK_CATEGORY)
        .to_string()
}

/// Overall sentiment: explicit labels first, then mean rating, else positive
pub fn overall_sentiment(rows: &[RawRow]) -> Sentiment {
    if rows.is_empty() {
        return Sentiment::Neutral;
    }

    let labels: Vec<Sentiment> = rows
        .iter()
        .filter_map(|row| row.get(COL_SENTIMENT).and_then(Sentiment::from_label))
        .collect();

    if !labels.is_empty() {
        let positive = labels.iter().filter(|s| **s == Sentiment::Positive).count();
        let negative = labels.iter().filter(|s| **s == Sentiment::Negative).count();

        return if positive > negative {
            Sentiment::Positive
        } else if negative > positive {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };
    }

    let ratings: Vec<f64> = rows
        .iter()
        .filter_map(|row| row.get(COL_RATING).and_then(parse_leading_number))
        .collect();

    if !ratings.is_empty() {
        let average = ratings.iter().sum::<f64>() / ratings.len() as f64;
        return if average >= 4.0 {
            Sentiment::Positive
        } else if average <= 2.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };
    }

    Sentiment::Positive
}

/// Parse the numeric prefix of `value`, ignoring leading whitespace
fn parse_leading_number(value: &str) -> Option<f64> {
    LEADING_NUMBER_PATTERN
        .find(value.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Assigns category, features, and summary to product groups
pub struct HeuristicLabeler {
    random: Arc<dyn RandomSource>,
}

impl HeuristicLabeler {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Label one product group
    pub fn label(&self, group: &ProductGroup) -> ProductRecord {
        let category = group
            .rows
            .first()
            .and_then(|row| row.non_empty(COL_CATEGORY))
            .map(str::to_string)
            .unwrap_or_else(|| infer_category(&group.display_name, &group.rows));

        tracing::debug!(
            product = %group.display_name,
            reviews = group.review_count(),
            category = %category,
            "Processing product"
        );

        let bucket = AppreciationBucket::for_category(&category);
        let features = self.extract_features(&category);

        ProductRecord {
            product_name: group.display_name.clone(),
            features,
            summary: ProductSummary {
                most_appreciated: to_owned_list(bucket.most_appreciated()),
                least_appreciated: to_owned_list(bucket.least_appreciated()),
                overall_sentiment: overall_sentiment(&group.rows),
            },
            review_count: group.review_count(),
            category,
        }
    }

    pub fn label_all(&self, groups: &[ProductGroup]) -> Vec<ProductRecord> {
        groups.iter().map(|group| self.label(group)).collect()
    }

    /// Canned features for `category`, each with a freshly drawn mention count
    pub fn extract_features(&self, category: &str) -> FeatureMap {
        let templates = feature_templates(category);
        let mut features = FeatureMap::with_capacity(templates.len());

        for template in templates {
            features.insert(
                template.name,
                FeatureInsight {
                    positive_examples: to_owned_list(template.positive),
                    negative_examples: to_owned_list(template.negative),
                    mention_count: self
                        .random
                        .next_in_range(template.min_mentions, template.max_mentions),
                },
            );
        }

        features
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
