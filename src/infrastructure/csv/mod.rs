// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Line splitting, header validation, and byte decoding

mod header_validator;
mod line_splitter;
mod review_parser;

pub use header_validator::HeaderSet;
pub use line_splitter::split_line;
pub use review_parser::{ParsedReviews, ReviewCsvParser};
