// ============================================================
// RESULT EXPORT
// ============================================================
// JSON export document and plain-text copy template

use std::path::{Path, PathBuf};

use crate::domain::error::Result;
use crate::domain::review::ProductRecord;
use crate::infrastructure::config::ExportConfig;
use crate::infrastructure::storage::{resolve_export_path, write_document};

/// Pretty JSON document for the full result sequence
pub fn to_json(products: &[ProductRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(products)?)
}

/// Parse a document produced by [`to_json`]
pub fn from_json(document: &str) -> Result<Vec<ProductRecord>> {
    Ok(serde_json::from_str(document)?)
}

/// Copy text for a single card
pub fn to_plain_text(product: &ProductRecord) -> String {
    product.format_plain_text()
}

/// Copy-all text: every card followed by a blank line
pub fn to_plain_text_all(products: &[ProductRecord]) -> String {
    products
        .iter()
        .map(|product| format!("{}\n\n", to_plain_text(product)))
        .collect()
}

pub struct ResultExporter {
    config: ExportConfig,
}

impl ResultExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn file_name(&self) -> &str {
        &self.config.file_name
    }

    /// Write the JSON document to `target` (a file, or a directory that gets
    /// the configured file name) and return the written path
    pub fn write_export(&self, products: &[ProductRecord], target: &Path) -> Result<PathBuf> {
        let path = resolve_export_path(target, &self.config.file_name);
        write_document(&path, &to_json(products)?)?;

        tracing::info!(path = %path.display(), products = products.len(), "Exported analysis");
        Ok(path)
    }
}

impl Default for ResultExporter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::heuristic_labeler::HeuristicLabeler;
    use crate::application::use_cases::product_grouper::group_by_product;
    use crate::domain::error::AppError;
    use crate::domain::review::RawRow;
    use crate::infrastructure::random::SeededRandom;
    use std::sync::Arc;

    fn products() -> Vec<ProductRecord> {
        let rows = vec![
            RawRow::from_pairs(0, [("product_id", "S1"), ("product_title", "Linen Shirt"), ("review_text", "soft")]),
            RawRow::from_pairs(1, [("product_id", "L1"), ("product_title", "Work Laptop"), ("review_text", "fast")]),
            RawRow::from_pairs(2, [("product_id", "S1"), ("product_title", "Linen Shirt"), ("review_text", "itchy")]),
        ];
        let labeler = HeuristicLabeler::new(Arc::new(SeededRandom::new(5)));
        labeler.label_all(&group_by_product(rows))
    }

    #[test]
    fn test_json_round_trip() {
        let products = products();
        let document = to_json(&products).unwrap();

        assert!(document.contains("\n  {"));
        assert_eq!(from_json(&document).unwrap(), products);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = from_json("{ not json").unwrap_err();
        assert!(matches!(err, AppError::SerializationError(_)));
    }

    #[test]
    fn test_plain_text_all() {
        let products = products();
        let text = to_plain_text_all(&products);

        assert!(text.starts_with("Linen Shirt (Clothing)\nFeatures: Material Quality: "));
        assert!(text.contains("\n\nWork Laptop (Electronics - Computer)\n"));
        assert!(text.ends_with("Limited warranty\n\n"));
        assert_eq!(text.matches("Most Appreciated: ").count(), 2);
        assert!(text.starts_with(&to_plain_text(&products[0])));
    }

    #[test]
    fn test_write_export_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ResultExporter::default();

        let path = exporter.write_export(&products(), dir.path()).unwrap();
        assert_eq!(path, dir.path().join("product-features-analysis.json"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(from_json(&written).unwrap(), products());
    }
}
