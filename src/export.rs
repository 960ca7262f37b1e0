use geo_types::{LineString, Polygon};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::dataset::{Dataset, RegionId};
use crate::error::{DivideError, Result};
use crate::partition::Partition;
use crate::shapes::ShapeTable;

/// One polygon feature per region, tagged with its `region` id and `part` index
/// (or `"islands"`).
pub fn partition_to_geojson(
    partition: &Partition,
    shapes: &ShapeTable,
    dataset: &Dataset,
) -> Result<FeatureCollection> {
    let mut features = Vec::new();
    for (index, part) in partition.parts.iter().enumerate() {
        for &region in part {
            features.push(region_feature(region, JsonValue::from(index), shapes, dataset)?);
        }
    }
    for &region in &partition.islands {
        features.push(region_feature(region, JsonValue::from("islands"), shapes, dataset)?);
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn region_feature(
    region: RegionId,
    part: JsonValue,
    shapes: &ShapeTable,
    dataset: &Dataset,
) -> Result<Feature> {
    let shape = shapes
        .get(region)
        .ok_or_else(|| DivideError::MissingReference(format!("shape of relation {}", region)))?;

    let exterior = LineString::new(dataset.coords(&shape.outer)?);
    let interiors = shape
        .inner
        .iter()
        .map(|ring| dataset.coords(ring).map(LineString::new))
        .collect::<Result<Vec<_>>>()?;
    let polygon = Polygon::new(exterior, interiors);

    let mut properties = JsonObject::new();
    properties.insert("region".to_string(), JsonValue::from(region));
    properties.insert("part".to_string(), part);

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&polygon))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}
