use log::{debug, info, warn};
use std::collections::BTreeMap;

use crate::dataset::{Dataset, RegionId};
use crate::error::Result;
use crate::ring::{assemble_rings, largest_ring, Ring};

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Effective outer boundary: the biggest ring of the outer ways.
    pub outer: Ring,
    /// Every ring of the inner ways.
    pub inner: Vec<Ring>,
    /// Area of the outer ring in square meters.
    pub area: f64,
}

/// Assembled shapes of the working set, keyed by region id.
#[derive(Clone, Debug, Default)]
pub struct ShapeTable {
    shapes: BTreeMap<RegionId, Shape>,
}

impl ShapeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges outer and inner ways of every region into rings and computes areas.
    /// Regions without outer ways are left out of the working set.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        info!("merge ways into rings and calc area");
        let mut table = ShapeTable::new();

        for (&id, members) in &dataset.regions {
            let Some((outer, area)) = largest_ring(id, &members.outer, dataset)? else {
                warn!("relation {} has no outer ways, skipped", id);
                continue;
            };
            let inner = assemble_rings(id, &members.inner, dataset)?;
            debug!("area {:10} {:10.2} km2", id, area / 1_000_000.0);
            table.insert(id, Shape { outer, inner, area });
        }

        Ok(table)
    }

    pub fn insert(&mut self, id: RegionId, shape: Shape) {
        self.shapes.insert(id, shape);
    }

    pub fn get(&self, id: RegionId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Area of a region, zero for regions outside the table.
    pub fn area(&self, id: RegionId) -> f64 {
        self.shapes.get(&id).map_or(0.0, |s| s.area)
    }

    /// Region ids in ascending order.
    pub fn region_ids(&self) -> Vec<RegionId> {
        self.shapes.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Shape)> {
        self.shapes.iter().map(|(&id, shape)| (id, shape))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
