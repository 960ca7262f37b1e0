use geo_types::Coord;
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{DivideError, Result};

// OSM object ids. Tables are keyed by these and iterate in ascending order.
pub type PointId = i64;
pub type SegmentId = i64;
pub type RegionId = i64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl From<Point> for Coord<f64> {
    fn from(p: Point) -> Self {
        Coord { x: p.lon, y: p.lat }
    }
}

/// Member ways of one relation, split by role and kept in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionMembers {
    pub outer: Vec<SegmentId>,
    pub inner: Vec<SegmentId>,
}

/// In-memory tables of points, segments (ways) and regions (relations).
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub points: BTreeMap<PointId, Point>,
    pub segments: BTreeMap<SegmentId, Vec<PointId>>,
    pub regions: BTreeMap<RegionId, RegionMembers>,
}

#[derive(Deserialize)]
struct OsmDocument {
    elements: Vec<OsmElement>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OsmElement {
    Node {
        id: PointId,
        lat: f64,
        lon: f64,
    },
    Way {
        id: SegmentId,
        #[serde(default)]
        nodes: Vec<PointId>,
    },
    Relation {
        id: RegionId,
        #[serde(default)]
        members: Vec<OsmMember>,
        #[serde(default)]
        action: Option<String>,
    },
}

#[derive(Deserialize)]
struct OsmMember {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "ref")]
    reference: i64,
    #[serde(default)]
    role: String,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an OSM JSON document (`{"elements": [...]}`).
    /// Relations carrying `"action": "delete"` are left out of the regions table.
    /// Overpass output never has `action`. It only shows up in JSON converted from
    /// JOSM `.osm` files, where deleted but unsaved objects keep the attribute.
    pub fn from_osm_json<R: Read>(reader: R) -> Result<Self> {
        let document: OsmDocument = serde_json::from_reader(reader)?;
        let mut dataset = Dataset::new();

        for element in document.elements {
            match element {
                OsmElement::Node { id, lat, lon } => dataset.insert_point(id, lat, lon),
                OsmElement::Way { id, nodes } => dataset.insert_segment(id, nodes),
                OsmElement::Relation { id, members, action } => {
                    if action.as_deref() == Some("delete") {
                        continue;
                    }
                    let mut region = RegionMembers::default();
                    for member in members.into_iter().filter(|m| m.kind == "way") {
                        match member.role.as_str() {
                            "outer" => region.outer.push(member.reference),
                            "inner" => region.inner.push(member.reference),
                            _ => {}
                        }
                    }
                    dataset.regions.insert(id, region);
                }
            }
        }

        info!(
            "rels: {}, ways: {}, nodes: {}",
            dataset.regions.len(),
            dataset.segments.len(),
            dataset.points.len()
        );
        Ok(dataset)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_osm_json(BufReader::new(file))
    }

    pub fn insert_point(&mut self, id: PointId, lat: f64, lon: f64) {
        self.points.insert(id, Point { lat, lon });
    }

    pub fn insert_segment(&mut self, id: SegmentId, points: Vec<PointId>) {
        self.segments.insert(id, points);
    }

    pub fn insert_region(&mut self, id: RegionId, outer: Vec<SegmentId>, inner: Vec<SegmentId>) {
        self.regions.insert(id, RegionMembers { outer, inner });
    }

    /// Point list of a way; a usable way has at least two points.
    pub fn segment(&self, id: SegmentId) -> Result<&[PointId]> {
        let points = self
            .segments
            .get(&id)
            .ok_or_else(|| DivideError::MissingReference(format!("way {}", id)))?;
        if points.len() < 2 {
            return Err(DivideError::InvalidInput(format!(
                "way {} has {} point(s)",
                id,
                points.len()
            )));
        }
        Ok(points)
    }

    pub fn point(&self, id: PointId) -> Result<Point> {
        self.points
            .get(&id)
            .copied()
            .ok_or_else(|| DivideError::MissingReference(format!("node {}", id)))
    }

    /// Resolves point ids to coordinates (x = longitude, y = latitude).
    pub fn coords(&self, ids: &[PointId]) -> Result<Vec<Coord<f64>>> {
        ids.iter().map(|&id| self.point(id).map(Coord::from)).collect()
    }
}
