// ============================================================
// HEADER VALIDATOR
// ============================================================
// Normalize the header line and check required columns

use crate::domain::error::{AppError, Result};
use crate::domain::review::{COL_PRODUCT_ID, COL_PRODUCT_TITLE, COL_REVIEW_TEXT};

/// Normalized header names, in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    pub names: Vec<String>,
}

impl HeaderSet {
    /// Lower-case and trim `tokens`, then require `review_text` and at least
    /// one of `product_id` / `product_title`.
    pub fn validate(tokens: Vec<String>) -> Result<Self> {
        let names: Vec<String> = tokens
            .into_iter()
            .map(|token| token.trim().to_lowercase())
            .collect();
        let has = |column: &str| names.iter().any(|name| name == column);

        if !has(COL_REVIEW_TEXT) {
            return Err(AppError::MissingRequiredColumn(format!(
                "'{}'",
                COL_REVIEW_TEXT
            )));
        }

        if !has(COL_PRODUCT_ID) && !has(COL_PRODUCT_TITLE) {
            return Err(AppError::MissingRequiredColumn(format!(
                "either '{}' or '{}'",
                COL_PRODUCT_ID, COL_PRODUCT_TITLE
            )));
        }

        Ok(Self { names })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_normalizes_names() {
        let headers = HeaderSet::validate(tokens(&[" Product_ID ", "REVIEW_TEXT", "Rating"])).unwrap();

        assert_eq!(headers.names, vec!["product_id", "review_text", "rating"]);
    }

    #[test]
    fn test_missing_review_text() {
        let err = HeaderSet::validate(tokens(&["product_id", "product_title", "rating"])).unwrap_err();
        assert_eq!(
            err,
            AppError::MissingRequiredColumn("'review_text'".to_string())
        );
    }

    #[test]
    fn test_missing_product_identity() {
        let err = HeaderSet::validate(tokens(&["review_text", "category"])).unwrap_err();
        assert!(matches!(err, AppError::MissingRequiredColumn(_)));
        assert!(err.to_string().contains("'product_id' or 'product_title'"));
    }

    #[test]
    fn test_title_alone_is_enough() {
        let headers = HeaderSet::validate(tokens(&["product_title", "review_text", "sentiment", "category"])).unwrap();
        assert_eq!(
            headers.names,
            vec!["product_title", "review_text", "sentiment", "category"]
        );
    }
}
