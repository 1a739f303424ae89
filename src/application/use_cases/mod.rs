pub mod heuristic_labeler;
pub mod product_grouper;
pub mod result_export;
pub mod review_analysis;
