use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::dataset::{PointId, RegionId};
use crate::shapes::ShapeTable;

/// Regions sharing fewer boundary points than this are not neighbors.
/// A single common corner does not make two regions adjacent.
pub const MIN_SHARED_POINTS: usize = 2;

/// Undirected adjacency graph of regions.
/// Neighbor lists are sorted and free of duplicates once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeighborGraph {
    adjacency: BTreeMap<RegionId, Vec<RegionId>>,
}

// Point -> regions whose boundary passes through it.
type PointMembership = HashMap<PointId, Vec<RegionId>>;

impl NeighborGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph of the given regions from their shared boundary points.
    ///
    /// The first pass only looks at outer rings. Regions left without neighbors
    /// get a second chance where inner rings count too, which links a region
    /// sitting inside another region's hole to its surrounding region.
    pub fn build(regions: &[RegionId], shapes: &ShapeTable) -> Self {
        let mut outer_points = PointMembership::new();
        let mut all_points = PointMembership::new();
        for &id in regions {
            let Some(shape) = shapes.get(id) else {
                continue;
            };
            for &p in &shape.outer {
                outer_points.entry(p).or_default().push(id);
                all_points.entry(p).or_default().push(id);
            }
            for &p in shape.inner.iter().flatten() {
                all_points.entry(p).or_default().push(id);
            }
        }

        let mut graph = NeighborGraph::new();
        for ((a, b), count) in count_shared_points(outer_points) {
            if count >= MIN_SHARED_POINTS {
                graph.add_edge(a, b);
            }
        }

        let isolated: BTreeSet<RegionId> = regions
            .iter()
            .copied()
            .filter(|id| !graph.contains(*id))
            .collect();
        if !isolated.is_empty() {
            debug!("isolated after outer pass: {}", isolated.len());
            for ((a, b), count) in count_shared_points(all_points) {
                if count >= MIN_SHARED_POINTS && (isolated.contains(&a) || isolated.contains(&b)) {
                    graph.add_edge(a, b);
                }
            }
        }

        graph.normalize();
        graph
    }

    /// Adds an undirected edge. Call [`NeighborGraph::normalize`] after a batch of edges.
    pub fn add_edge(&mut self, a: RegionId, b: RegionId) {
        if a == b {
            return;
        }
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
    }

    pub fn normalize(&mut self) {
        for neighbors in self.adjacency.values_mut() {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
    }

    pub fn neighbors(&self, id: RegionId) -> &[RegionId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Regions in ascending id order.
    pub fn regions(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn first_region(&self) -> Option<RegionId> {
        self.adjacency.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// The graph restricted to the given regions.
    pub fn subgraph(&self, keep: &BTreeSet<RegionId>) -> NeighborGraph {
        let adjacency = self
            .adjacency
            .iter()
            .filter(|(id, _)| keep.contains(id))
            .map(|(&id, neighbors)| {
                let kept = neighbors.iter().copied().filter(|n| keep.contains(n)).collect();
                (id, kept)
            })
            .collect();
        NeighborGraph { adjacency }
    }
}

/// Number of distinct shared points per unordered region pair, ordered by (smaller, bigger) id.
fn count_shared_points(membership: PointMembership) -> BTreeMap<(RegionId, RegionId), usize> {
    let mut shared = BTreeMap::new();
    for (_, mut regions) in membership {
        regions.sort_unstable();
        regions.dedup();
        for (i, &a) in regions.iter().enumerate() {
            for &b in &regions[i + 1..] {
                *shared.entry((a, b)).or_insert(0) += 1;
            }
        }
    }
    shared
}
