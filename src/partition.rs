use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::bisect::bisect;
use crate::dataset::{Dataset, RegionId};
use crate::error::Result;
use crate::graph::NeighborGraph;
use crate::nested::NestedShapes;
use crate::shapes::ShapeTable;

/// Final grouping: connected parts of similar area plus the regions without neighbors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Partition {
    pub parts: Vec<Vec<RegionId>>,
    pub islands: Vec<RegionId>,
}

impl Partition {
    /// Index of the part holding `region`.
    pub fn part_of(&self, region: RegionId) -> Option<usize> {
        self.parts.iter().position(|part| part.contains(&region))
    }
}

fn write_ids(f: &mut fmt::Formatter<'_>, ids: &[RegionId]) -> fmt::Result {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", id)?;
    }
    writeln!(f)
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, part) in self.parts.iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            write!(f, "{}: ", index)?;
            write_ids(f, part)?;
        }
        if !self.islands.is_empty() {
            write!(f, "islands: ")?;
            write_ids(f, &self.islands)?;
        }
        Ok(())
    }
}

pub struct Partitioner {
    /// Number of bisection rounds, giving up to 2^rounds parts.
    pub rounds: u32,
}

impl Default for Partitioner {
    fn default() -> Self {
        Self::new()
    }
}

impl Partitioner {
    pub fn new() -> Self {
        Self { rounds: 1 }
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Runs the whole pipeline on a dataset: rings and areas, nested shapes, partition.
    pub fn divide_dataset(&self, dataset: &Dataset) -> Result<Partition> {
        let shapes = ShapeTable::from_dataset(dataset)?;
        let nested = NestedShapes::resolve(dataset)?;
        self.divide(&shapes, &nested)
    }

    /// Bisects every part `rounds` times, then folds regions that ended up
    /// without a part into the part of the region whose hole holds them.
    pub fn divide(&self, shapes: &ShapeTable, nested: &NestedShapes) -> Result<Partition> {
        let all = shapes.region_ids();
        let mut parts = if all.is_empty() { Vec::new() } else { vec![all] };

        for round in 0..self.rounds {
            debug!("partition {}", round);
            let mut next = Vec::with_capacity(parts.len() * 2);
            for part in parts {
                if part.len() < 2 {
                    next.push(part);
                    continue;
                }
                next.extend(self.split(&part, shapes)?);
            }
            parts = next;
        }

        Ok(fold_islands(parts, shapes, nested))
    }

    fn split(&self, part: &[RegionId], shapes: &ShapeTable) -> Result<Vec<Vec<RegionId>>> {
        info!("create graph");
        debug!("number of shapes: {}", part.len());
        let graph = NeighborGraph::build(part, shapes);
        debug!("graph size: {}", graph.len());

        let Some(start) = graph.first_region() else {
            warn!("no adjacent regions among {} shapes", part.len());
            return Ok(Vec::new());
        };
        let component = graph.component(start);
        let graph = if component.len() < graph.len() {
            warn!(
                "graph is not connected, {} of {} regions left out",
                graph.len() - component.len(),
                graph.len()
            );
            graph.subgraph(&component)
        } else {
            graph
        };

        let Some((s1, s2)) = graph.seed_pair() else {
            return Ok(Vec::new());
        };
        info!("divide graph");
        let halves = bisect(&graph, |id| shapes.area(id), s1, s2)?;
        Ok(halves.into_iter().filter(|half| !half.is_empty()).collect())
    }
}

fn fold_islands(
    mut parts: Vec<Vec<RegionId>>,
    shapes: &ShapeTable,
    nested: &NestedShapes,
) -> Partition {
    let mut owner: HashMap<RegionId, usize> = HashMap::new();
    for (index, part) in parts.iter().enumerate() {
        for &region in part {
            owner.insert(region, index);
        }
    }
    let mut islands: BTreeSet<RegionId> = shapes
        .region_ids()
        .into_iter()
        .filter(|id| !owner.contains_key(id))
        .collect();

    // An island inside a folded island follows it on the next pass.
    loop {
        let mut moved = Vec::new();
        for &island in &islands {
            let container = nested
                .containers(island)
                .iter()
                .find_map(|c| owner.get(c).copied());
            if let Some(index) = container {
                parts[index].push(island);
                owner.insert(island, index);
                moved.push(island);
            }
        }
        if moved.is_empty() {
            break;
        }
        for island in moved {
            islands.remove(&island);
        }
    }

    for (index, part) in parts.iter_mut().enumerate() {
        part.sort_unstable();
        debug!("part {}: {}", index, part.len());
    }
    if !islands.is_empty() {
        debug!("islands: {}", islands.len());
    }

    Partition {
        parts,
        islands: islands.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Shape;

    fn shape(outer: Vec<i64>) -> Shape {
        Shape { outer, inner: vec![], area: 1.0 }
    }

    /// A 1 x n strip of cells.
    fn strip(n: i64) -> ShapeTable {
        let mut table = ShapeTable::new();
        for i in 0..n {
            // Top points 2i, 2i+2; bottom points 2i+1, 2i+3.
            table.insert(i + 1, shape(vec![2 * i, 2 * i + 2, 2 * i + 3, 2 * i + 1]));
        }
        table
    }

    #[test]
    fn test_display() {
        let partition = Partition {
            parts: vec![vec![1, 2], vec![], vec![3]],
            islands: vec![7, 9],
        };
        assert_eq!(partition.to_string(), "0: 1, 2\n2: 3\nislands: 7, 9\n");
        assert_eq!(Partition::default().to_string(), "");
    }

    #[test]
    fn test_rounds() {
        let shapes = strip(8);
        let nested = NestedShapes::default();

        let zero = Partitioner::new().with_rounds(0).divide(&shapes, &nested).unwrap();
        assert_eq!(zero.parts, vec![(1..=8).collect::<Vec<_>>()]);

        let one = Partitioner::new().divide(&shapes, &nested).unwrap();
        assert_eq!(one.parts.len(), 2);

        let three = Partitioner::new().with_rounds(3).divide(&shapes, &nested).unwrap();
        assert_eq!(three.parts.len(), 8);
        assert!(three.parts.iter().all(|p| p.len() == 1));

        // Singletons stop splitting.
        let many = Partitioner::new().with_rounds(5).divide(&shapes, &nested).unwrap();
        assert_eq!(many.parts, three.parts);
        assert!(many.islands.is_empty());
    }

    #[test]
    fn test_disconnected_regions_become_islands() {
        let mut shapes = strip(4);
        shapes.insert(20, shape(vec![100, 101, 102, 103]));
        shapes.insert(21, shape(vec![102, 103, 104, 105]));
        shapes.insert(30, shape(vec![200, 201, 202, 203]));

        let partition = Partitioner::new().divide(&shapes, &NestedShapes::default()).unwrap();
        assert_eq!(partition.parts.len(), 2);
        assert_eq!(partition.islands, vec![20, 21, 30]);
    }

    #[test]
    fn test_empty_table() {
        let partition = Partitioner::new()
            .divide(&ShapeTable::new(), &NestedShapes::default())
            .unwrap();
        assert_eq!(partition, Partition::default());
    }
}
