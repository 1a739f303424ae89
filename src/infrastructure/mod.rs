pub mod config;
pub mod csv;
pub mod random;
pub mod storage;
