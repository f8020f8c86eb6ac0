//! Data module - loading, cleaning, filtering, and aggregation

pub mod filter;
pub mod loader;
pub mod model;
pub mod processor;

pub use filter::{filtered_indices, YearRange, YEAR_MAX, YEAR_MIN};
pub use loader::{CacheStatus, DataLoader, LoaderError};
pub use model::{PaperRecord, PaperSet};
