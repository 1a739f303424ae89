pub mod error;

// Review grouping and labeling
pub mod review;
