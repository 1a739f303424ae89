// ============================================================
// RECORD GROUPER
// ============================================================
// Partition raw rows by product key, first-seen order

use std::collections::HashMap;

use crate::domain::review::RawRow;

/// Rows sharing one product key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductGroup {
    pub key: String,
    /// First row's product title, else the key
    pub display_name: String,
    pub rows: Vec<RawRow>,
}

impl ProductGroup {
    fn start(first: RawRow) -> Self {
        let key = first.product_key().to_string();
        let display_name = first.product_title().unwrap_or(&key).to_string();

        Self {
            key,
            display_name,
            rows: vec![first],
        }
    }

    pub fn review_count(&self) -> usize {
        self.rows.len()
    }
}

/// Group rows by product key.
///
/// Groups come out in the order their key was first seen and each group keeps
/// its rows in input order.
pub fn group_by_product(rows: Vec<RawRow>) -> Vec<ProductGroup> {
    let mut groups: Vec<ProductGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        match positions.get(row.product_key()) {
            Some(&position) => groups[position].rows.push(row),
            None => {
                positions.insert(row.product_key().to_string(), groups.len());
                groups.push(ProductGroup::start(row));
            }
        }
    }

    tracing::info!(
        products = groups.len(),
        keys = ?groups.iter().map(|g| g.key.as_str()).collect::<Vec<_>>(),
        "Product groups created"
    );

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::UNKNOWN_PRODUCT;

    fn row(index: usize, id: &str, title: &str) -> RawRow {
        RawRow::from_pairs(
            index,
            [
                ("product_id", id),
                ("product_title", title),
                ("review_text", "text"),
            ],
        )
    }

    #[test]
    fn test_same_id_different_titles_share_group() {
        let groups = group_by_product(vec![
            row(0, "A1", "Pixel 8"),
            row(1, "A1", "Google Pixel 8 128GB"),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].display_name, "Pixel 8");
        assert_eq!(groups[0].review_count(), 2);
    }

    #[test]
    fn test_first_seen_order_and_stable_rows() {
        let groups = group_by_product(vec![
            row(0, "B", "Chair"),
            row(1, "A", "Lamp"),
            row(2, "B", "Chair"),
            row(3, "C", "Desk"),
            row(4, "A", "Lamp"),
        ]);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["B", "A", "C"]);

        let b_rows: Vec<usize> = groups[0].rows.iter().map(|r| r.index).collect();
        assert_eq!(b_rows, vec![0, 2]);
    }

    #[test]
    fn test_display_name_falls_back_to_key() {
        let groups = group_by_product(vec![row(0, "SKU-9", ""), row(1, "", "")]);

        assert_eq!(groups[0].display_name, "SKU-9");
        assert_eq!(groups[1].key, UNKNOWN_PRODUCT);
        assert_eq!(groups[1].display_name, UNKNOWN_PRODUCT);
    }

    #[test]
    fn test_every_row_lands_in_one_group() {
        let rows: Vec<RawRow> = (0..10)
            .map(|i| row(i, &format!("P{}", i % 3), "Thing"))
            .collect();
        let groups = group_by_product(rows);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups.iter().map(ProductGroup::review_count).sum::<usize>(), 10);
    }
}
