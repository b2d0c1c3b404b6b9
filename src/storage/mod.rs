mod repository;

pub use repository::*;

/// Default location of the wallet data file.
pub const DEFAULT_DATA_FILE: &str = "data.json";
