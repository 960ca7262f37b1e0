use std::collections::{BTreeSet, VecDeque};

use crate::dataset::RegionId;
use crate::error::{DivideError, Result};
use crate::graph::NeighborGraph;

impl NeighborGraph {
    /// Breadth-first visiting order from `start`, `start` included.
    pub fn bfs_order(&self, start: RegionId) -> Vec<RegionId> {
        if !self.contains(start) {
            return Vec::new();
        }
        let mut visited = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut order = Vec::new();
        while let Some(region) = queue.pop_front() {
            for &n in self.neighbors(region) {
                if visited.insert(n) {
                    queue.push_back(n);
                }
            }
            order.push(region);
        }
        order
    }

    /// The region visited last by a breadth-first search from `start`,
    /// i.e. one of the regions with the most hops from it.
    pub fn farthest_from(&self, start: RegionId) -> Result<RegionId> {
        self.bfs_order(start)
            .last()
            .copied()
            .ok_or(DivideError::InvalidGraphSeed(start))
    }

    /// Two far apart regions: the farthest region from the first graph region,
    /// then the farthest region from that one. `None` on an empty graph.
    pub fn seed_pair(&self) -> Option<(RegionId, RegionId)> {
        let start = self.first_region()?;
        let s1 = *self.bfs_order(start).last()?;
        let s2 = *self.bfs_order(s1).last()?;
        Some((s1, s2))
    }

    /// Regions reachable from `start`.
    pub fn component(&self, start: RegionId) -> BTreeSet<RegionId> {
        self.bfs_order(start).into_iter().collect()
    }

    pub fn is_connected(&self) -> bool {
        match self.first_region() {
            Some(start) => self.component(start).len() == self.len(),
            None => true,
        }
    }
}
