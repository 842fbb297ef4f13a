//! Minimal GeoJSON reader and writer.
//!
//! Only what the tool needs: FeatureCollections of Polygon or MultiPolygon
//! geometries in, LineString features out. The legacy `crs` member is
//! honored on input so geographic layers can be rejected up front.

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, Geometry, LineString, MultiPolygon, Polygon};
use midrib_core::{AttrValue, Crs, Feature, Layer, Record};
use serde_json::{json, Map, Value};

pub fn read_layer(text: &str) -> Result<Layer> {
    let root: Value = serde_json::from_str(text).context("invalid JSON")?;
    if root.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        bail!("expected a GeoJSON FeatureCollection");
    }

    let crs = match crs_name(&root) {
        Some(name) => Crs::from_authority(name),
        // Per RFC 7946 the default CRS is geographic WGS 84, but files
        // produced by desktop GIS tools routinely omit the member while
        // carrying projected coordinates. Assume projected when absent.
        None => Crs::Projected,
    };

    let mut layer = Layer::new(crs);
    let features = root
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("FeatureCollection has no features array"))?;
    for (index, feature) in features.iter().enumerate() {
        let geometry = feature
            .get("geometry")
            .filter(|g| !g.is_null())
            .ok_or_else(|| anyhow!("feature {index} has no geometry"))?;
        let geometry =
            parse_geometry(geometry).with_context(|| format!("feature {index}"))?;
        let attributes = feature
            .get("properties")
            .and_then(Value::as_object)
            .map(parse_properties)
            .unwrap_or_default();
        layer.push(Feature::new(geometry, attributes));
    }
    Ok(layer)
}

pub fn write_layer(layer: &Layer) -> Result<String> {
    let mut features = Vec::with_capacity(layer.len());
    for feature in &layer.features {
        let Geometry::LineString(line) = &feature.geometry else {
            bail!("output layer contains a non-linestring geometry");
        };
        let coordinates: Vec<Value> = line.0.iter().map(|c| json!([c.x, c.y])).collect();
        let properties = serde_json::to_value(&feature.attributes)
            .context("serializing feature properties")?;
        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": coordinates },
            "properties": properties,
        }));
    }
    let collection = json!({ "type": "FeatureCollection", "features": features });
    serde_json::to_string_pretty(&collection).context("serializing FeatureCollection")
}

/// Name from the legacy `crs` member, e.g.
/// `{"type": "name", "properties": {"name": "EPSG:2169"}}`.
fn crs_name(root: &Value) -> Option<&str> {
    root.get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()
}

fn parse_geometry(value: &Value) -> Result<Geometry<f64>> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("geometry has no type"))?;
    let coordinates = value
        .get("coordinates")
        .ok_or_else(|| anyhow!("geometry has no coordinates"))?;
    match kind {
        "Polygon" => Ok(Geometry::Polygon(parse_polygon(coordinates)?)),
        "MultiPolygon" => {
            let parts = coordinates
                .as_array()
                .ok_or_else(|| anyhow!("MultiPolygon coordinates must be an array"))?
                .iter()
                .map(parse_polygon)
                .collect::<Result<Vec<_>>>()?;
            Ok(Geometry::MultiPolygon(MultiPolygon::new(parts)))
        }
        other => bail!("unsupported geometry type {other:?}, expected Polygon"),
    }
}

fn parse_polygon(coordinates: &Value) -> Result<Polygon<f64>> {
    let rings = coordinates
        .as_array()
        .ok_or_else(|| anyhow!("Polygon coordinates must be an array of rings"))?;
    let mut parsed = rings.iter().map(parse_ring);
    let exterior = parsed
        .next()
        .ok_or_else(|| anyhow!("Polygon has no rings"))??;
    let interiors = parsed.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(value: &Value) -> Result<LineString<f64>> {
    let positions = value
        .as_array()
        .ok_or_else(|| anyhow!("ring must be an array of positions"))?;
    let mut coords = Vec::with_capacity(positions.len());
    for position in positions {
        let pair = position
            .as_array()
            .filter(|p| p.len() >= 2)
            .ok_or_else(|| anyhow!("position must be an [x, y] array"))?;
        let x = pair[0]
            .as_f64()
            .ok_or_else(|| anyhow!("non-numeric coordinate"))?;
        let y = pair[1]
            .as_f64()
            .ok_or_else(|| anyhow!("non-numeric coordinate"))?;
        coords.push(Coord { x, y });
    }
    Ok(LineString::new(coords))
}

fn parse_properties(object: &Map<String, Value>) -> Record {
    let mut record = Record::new();
    for (key, value) in object {
        let attr = match value {
            Value::Null => AttrValue::Null,
            Value::Bool(b) => AttrValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => AttrValue::Int(i),
                None => AttrValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => AttrValue::Text(s.clone()),
            // Nested values are kept as their JSON text.
            other => AttrValue::Text(other.to_string()),
        };
        record.insert(key.clone(), attr);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_polygon_collection_with_crs_and_properties() {
        let text = r#"{
            "type": "FeatureCollection",
            "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::2169" } },
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0,0],[10,0],[10,2],[0,2],[0,0]]]
                },
                "properties": { "name": "strip", "rank": 2, "score": 0.5 }
            }]
        }"#;
        let layer = read_layer(text).unwrap();
        assert_eq!(layer.crs, Crs::Projected);
        assert_eq!(layer.len(), 1);
        assert!(matches!(layer.features[0].geometry, Geometry::Polygon(_)));
        assert_eq!(layer.features[0].attributes["name"], AttrValue::from("strip"));
        assert_eq!(layer.features[0].attributes["rank"], AttrValue::Int(2));
        assert_eq!(layer.features[0].attributes["score"], AttrValue::Float(0.5));
    }

    #[test]
    fn wgs84_crs_is_classified_geographic() {
        let text = r#"{
            "type": "FeatureCollection",
            "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:OGC:1.3:CRS84" } },
            "features": []
        }"#;
        assert_eq!(read_layer(text).unwrap().crs, Crs::Geographic);
    }

    #[test]
    fn unsupported_geometry_types_are_rejected() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [1, 2] },
                "properties": {}
            }]
        }"#;
        let err = read_layer(text).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported geometry type"));
    }

    #[test]
    fn writes_linestrings_with_properties() {
        let mut layer = Layer::new(Crs::Projected);
        let mut record = Record::new();
        record.insert("name".to_string(), AttrValue::from("strip"));
        layer.push(Feature::new(
            Geometry::LineString(LineString::from(vec![(0.0, 1.0), (10.0, 1.0)])),
            record,
        ));

        let text = write_layer(&layer).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["geometry"]["type"], "LineString");
        assert_eq!(
            value["features"][0]["geometry"]["coordinates"][1],
            json!([10.0, 1.0])
        );
        assert_eq!(value["features"][0]["properties"]["name"], "strip");
    }

    #[test]
    fn multipolygon_and_null_properties_are_read() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[0,0],[1,0],[1,1],[0,1],[0,0]]]]
                },
                "properties": null
            }]
        }"#;
        let layer = read_layer(text).unwrap();
        assert!(matches!(
            layer.features[0].geometry,
            Geometry::MultiPolygon(_)
        ));
        assert!(layer.features[0].attributes.is_empty());
    }
}
