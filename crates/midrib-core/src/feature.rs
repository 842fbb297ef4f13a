use geo::Geometry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single attribute value carried alongside a geometry.
///
/// Mirrors the value space of GeoJSON properties; anything richer stays in
/// the host format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// Ordered attribute record. Field order is preserved from the source layer
/// and propagated unchanged to the output.
pub type Record = IndexMap<String, AttrValue>;

/// Coordinate reference system descriptor.
///
/// The pipeline only needs one distinction: planar map units (distances and
/// Voronoi geometry are meaningful) versus geographic degrees (they are not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crs {
    #[default]
    Projected,
    Geographic,
}

impl Crs {
    /// Classify an authority identifier such as `EPSG:4326` or `OGC:CRS84`.
    ///
    /// Unknown identifiers are assumed projected; the common geographic
    /// identifiers are the ones worth rejecting early.
    pub fn from_authority(name: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        let geographic = upper.ends_with("EPSG:4326")
            || upper.ends_with("EPSG::4326")
            || upper.ends_with("CRS84")
            || upper.ends_with("EPSG:4258")
            || upper.ends_with("EPSG:4267");
        if geographic {
            Self::Geographic
        } else {
            Self::Projected
        }
    }

    pub fn is_geographic(self) -> bool {
        self == Self::Geographic
    }
}

/// One input or output feature: a geometry plus its attribute record.
#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: Geometry<f64>,
    pub attributes: Record,
}

impl Feature {
    #[must_use]
    pub fn new(geometry: Geometry<f64>, attributes: Record) -> Self {
        Self {
            geometry,
            attributes,
        }
    }
}

/// An in-memory vector layer: a CRS and an ordered feature collection.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub crs: Crs,
    pub features: Vec<Feature>,
}

impl Layer {
    #[must_use]
    pub fn new(crs: Crs) -> Self {
        Self {
            crs,
            features: Vec::new(),
        }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crs_classifies_common_geographic_authorities() {
        assert!(Crs::from_authority("EPSG:4326").is_geographic());
        assert!(Crs::from_authority("urn:ogc:def:crs:OGC:1.3:CRS84").is_geographic());
        assert!(Crs::from_authority("OGC:CRS84").is_geographic());
        assert!(!Crs::from_authority("EPSG:2169").is_geographic());
        assert!(!Crs::from_authority("EPSG:32632").is_geographic());
    }

    #[test]
    fn records_preserve_field_order() {
        let mut record = Record::new();
        record.insert("name".to_string(), AttrValue::from("Ettelbruck"));
        record.insert("area".to_string(), AttrValue::from(41.3));
        record.insert("rank".to_string(), AttrValue::from(7i64));

        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "area", "rank"]);
    }

    #[test]
    fn attr_values_round_trip_through_json() {
        let values = vec![
            AttrValue::Null,
            AttrValue::Bool(true),
            AttrValue::Int(42),
            AttrValue::Float(1.5),
            AttrValue::Text("label".to_string()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        let back: Vec<AttrValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(values, back);
    }
}
