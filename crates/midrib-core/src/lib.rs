//! Shared data model for midrib: features, attribute records, layers.

mod feature;

pub use feature::{AttrValue, Crs, Feature, Layer, Record};
