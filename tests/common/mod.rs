#![allow(dead_code)]

use geo_divide::dataset::{Dataset, RegionId};
use geo_divide::graph::NeighborGraph;
use geo_divide::shapes::ShapeTable;
use geo_divide::Partition;
use serde_json::{json, Value};
use std::collections::BTreeSet;

pub const CELL: f64 = 0.01;

fn point_id(cols: i64, r: i64, c: i64) -> i64 {
    r * (cols + 1) + c + 1
}

fn horizontal(cols: i64, r: i64, c: i64) -> i64 {
    10_000 + r * cols + c
}

fn vertical(cols: i64, r: i64, c: i64) -> i64 {
    20_000 + r * (cols + 1) + c
}

pub fn cell_id(cols: i64, r: i64, c: i64) -> RegionId {
    r * cols + c + 1
}

/// rows x cols square cells centered on the equator. Neighboring cells share one
/// way (two points); diagonal cells share a single corner point.
pub fn grid_dataset(rows: i64, cols: i64) -> Dataset {
    let mut dataset = Dataset::new();
    let south = -(rows as f64) * CELL / 2.0;
    for r in 0..=rows {
        for c in 0..=cols {
            dataset.insert_point(point_id(cols, r, c), south + r as f64 * CELL, c as f64 * CELL);
        }
    }
    for r in 0..=rows {
        for c in 0..=cols {
            if c < cols {
                let ends = vec![point_id(cols, r, c), point_id(cols, r, c + 1)];
                dataset.insert_segment(horizontal(cols, r, c), ends);
            }
            if r < rows {
                let ends = vec![point_id(cols, r, c), point_id(cols, r + 1, c)];
                dataset.insert_segment(vertical(cols, r, c), ends);
            }
        }
    }
    for r in 0..rows {
        for c in 0..cols {
            let outer = vec![
                horizontal(cols, r, c),
                vertical(cols, r, c + 1),
                horizontal(cols, r + 1, c),
                vertical(cols, r, c),
            ];
            dataset.insert_region(cell_id(cols, r, c), outer, vec![]);
        }
    }
    dataset
}

/// The dataset as an OSM JSON document.
pub fn to_osm_json(dataset: &Dataset) -> Value {
    let mut elements = Vec::new();
    for (id, p) in &dataset.points {
        elements.push(json!({"type": "node", "id": id, "lat": p.lat, "lon": p.lon}));
    }
    for (id, nodes) in &dataset.segments {
        elements.push(json!({"type": "way", "id": id, "nodes": nodes}));
    }
    for (id, members) in &dataset.regions {
        let mut list = Vec::new();
        for way in &members.outer {
            list.push(json!({"type": "way", "ref": way, "role": "outer"}));
        }
        for way in &members.inner {
            list.push(json!({"type": "way", "ref": way, "role": "inner"}));
        }
        elements.push(json!({
            "type": "relation",
            "id": id,
            "tags": {"type": "boundary", "boundary": "administrative"},
            "members": list
        }));
    }
    json!({"version": 0.6, "elements": elements})
}

pub fn assert_coverage(partition: &Partition, shapes: &ShapeTable) {
    let mut seen = BTreeSet::new();
    for part in &partition.parts {
        assert!(!part.is_empty(), "empty part in {:?}", partition);
        for &region in part {
            assert!(seen.insert(region), "region {} assigned twice", region);
        }
    }
    for &region in &partition.islands {
        assert!(seen.insert(region), "island {} also in a part", region);
    }
    assert_eq!(seen, shapes.region_ids().into_iter().collect::<BTreeSet<_>>());
}

pub fn is_connected(part: &[RegionId], shapes: &ShapeTable) -> bool {
    let graph = NeighborGraph::build(part, shapes);
    part.len() == 1 || (graph.len() == part.len() && graph.is_connected())
}

pub fn part_area(part: &[RegionId], shapes: &ShapeTable) -> f64 {
    part.iter().map(|&id| shapes.area(id)).sum()
}
