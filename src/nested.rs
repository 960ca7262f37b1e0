use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::dataset::{Dataset, PointId, RegionId, SegmentId};
use crate::error::Result;
use crate::graph::MIN_SHARED_POINTS;

/// Which regions sit (at least partly) inside the holes of other regions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NestedShapes {
    containers: BTreeMap<RegionId, Vec<RegionId>>,
}

impl NestedShapes {
    /// Matches outer ways of every region against inner ways of the others.
    ///
    /// Works on all points of the member ways rather than on assembled rings, so a
    /// small outer ring dropped in favour of a bigger one still counts.
    pub fn resolve(dataset: &Dataset) -> Result<Self> {
        info!("get nested shapes");
        let mut outer: HashMap<PointId, BTreeSet<RegionId>> = HashMap::new();
        let mut inner: HashMap<PointId, BTreeSet<RegionId>> = HashMap::new();
        for (&id, members) in &dataset.regions {
            mark_points(dataset, id, &members.outer, &mut outer)?;
            mark_points(dataset, id, &members.inner, &mut inner)?;
        }

        // (container with the hole, region inside) -> shared points
        let mut shared: BTreeMap<(RegionId, RegionId), usize> = BTreeMap::new();
        for (point, holes) in &inner {
            let Some(shapes) = outer.get(point) else {
                continue;
            };
            for &container in holes {
                for &region in shapes.iter().filter(|&&r| r != container) {
                    *shared.entry((container, region)).or_insert(0) += 1;
                }
            }
        }

        let mut containers: BTreeMap<RegionId, Vec<RegionId>> = BTreeMap::new();
        for ((container, region), count) in shared {
            if count >= MIN_SHARED_POINTS {
                containers.entry(region).or_default().push(container);
            }
        }
        for list in containers.values_mut() {
            list.sort_unstable();
        }
        debug!("nested shapes: {}", containers.len());

        Ok(Self { containers })
    }

    /// Regions with a hole that `region` lies in, ascending.
    pub fn containers(&self, region: RegionId) -> &[RegionId] {
        self.containers.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Regions that lie in some hole, ascending.
    pub fn nested_regions(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.containers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

fn mark_points(
    dataset: &Dataset,
    region: RegionId,
    ways: &[SegmentId],
    membership: &mut HashMap<PointId, BTreeSet<RegionId>>,
) -> Result<()> {
    for &way in ways {
        for &p in dataset.segment(way)? {
            membership.entry(p).or_default().insert(region);
        }
    }
    Ok(())
}
