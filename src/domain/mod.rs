// Domain types and value objects
mod asset;
mod sort;
mod trend;

// Re-export commonly used types to the world
pub use asset::{AssetPatch, AssetRecord};
pub use sort::{FieldAccessor, FieldValue, SortDirection, SortDirective, SortField};
pub use trend::TrendSeries;

#[cfg(test)]
pub(crate) use asset::tests::record as test_record;
