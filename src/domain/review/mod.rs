// ============================================================
// REVIEW DOMAIN LAYER
// ============================================================
// Core types for review grouping and labeling
// No I/O, no async

mod analysis_config;
mod notification;
mod product_record;
mod raw_row;

pub use analysis_config::AnalysisConfig;
pub use notification::{Notification, NotificationKind};
pub use product_record::{FeatureInsight, FeatureMap, ProductRecord, ProductSummary, Sentiment};
pub use raw_row::RawRow;

pub const COL_PRODUCT_ID: &str = "product_id";
pub const COL_PRODUCT_TITLE: &str = "product_title";
pub const COL_REVIEW_TEXT: &str = "review_text";
/// Legacy review column, only consulted for category inference
pub const COL_REVIEW: &str = "review";
pub const COL_CATEGORY: &str = "category";
pub const COL_RATING: &str = "rating";
pub const COL_SENTIMENT: &str = "sentiment";

/// Grouping key used when a row has neither a product id nor a title
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
