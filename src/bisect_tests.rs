use super::*;
use std::collections::BTreeSet;

/// rows x cols grid of cells, id = r * cols + c + 1, edges between orthogonal neighbors.
fn grid(rows: i64, cols: i64) -> NeighborGraph {
    let id = |r: i64, c: i64| r * cols + c + 1;
    let mut graph = NeighborGraph::new();
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                graph.add_edge(id(r, c), id(r, c + 1));
            }
            if r + 1 < rows {
                graph.add_edge(id(r, c), id(r + 1, c));
            }
        }
    }
    graph.normalize();
    graph
}

fn path(n: i64) -> NeighborGraph {
    grid(1, n)
}

fn assert_connected(graph: &NeighborGraph, part: &[RegionId]) {
    let keep: BTreeSet<RegionId> = part.iter().copied().collect();
    let sub = graph.subgraph(&keep);
    assert!(sub.is_connected(), "part {:?} is not connected", part);
}

fn assert_covers(graph: &NeighborGraph, parts: &[Vec<RegionId>]) {
    let mut seen = BTreeSet::new();
    for part in parts {
        assert!(!part.is_empty());
        for &region in part {
            assert!(seen.insert(region), "region {} assigned twice", region);
        }
    }
    assert_eq!(seen, graph.regions().collect::<BTreeSet<_>>());
}

#[test]
fn test_two_by_two_grid() {
    let graph = grid(2, 2);
    let (s1, s2) = graph.seed_pair().unwrap();
    assert_eq!((s1, s2), (4, 1));

    let [a, b] = bisect(&graph, |_| 1.0, s1, s2).unwrap();
    assert_eq!(a, vec![3, 4]);
    assert_eq!(b, vec![1, 2]);
}

#[test]
fn test_bisection_covers_connected_balanced() {
    for (rows, cols) in [(6, 6), (5, 7), (8, 8), (3, 10), (1, 9)] {
        let graph = grid(rows, cols);
        let (s1, s2) = graph.seed_pair().unwrap();
        let parts = bisect(&graph, |_| 1.0, s1, s2).unwrap();

        assert_covers(&graph, &parts);
        assert_connected(&graph, &parts[0]);
        assert_connected(&graph, &parts[1]);
        assert!(parts[0].contains(&s1) && parts[1].contains(&s2));

        let diff = (parts[0].len() as i64 - parts[1].len() as i64).abs();
        assert!(diff <= 1, "{}x{} grid split {} / {}", rows, cols, parts[0].len(), parts[1].len());
    }
}

#[test]
fn test_smaller_side_grows() {
    let graph = path(4);
    let areas = [10.0, 1.0, 1.0, 1.0];
    let [heavy, light] = bisect(&graph, |id| areas[(id - 1) as usize], 1, 4).unwrap();
    assert_eq!(heavy, vec![1]);
    assert_eq!(light, vec![2, 3, 4]);
}

#[test]
fn test_invalid_seeds() {
    let graph = path(3);
    assert!(matches!(bisect(&graph, |_| 1.0, 1, 7), Err(DivideError::InvalidGraphSeed(7))));
    assert!(matches!(bisect(&graph, |_| 1.0, 2, 2), Err(DivideError::InvalidGraphSeed(2))));
    assert!(matches!(grow_parts(&graph, |_| 1.0, &[0]), Err(DivideError::InvalidGraphSeed(0))));
}

#[test]
fn test_grow_parts_on_path() {
    let graph = path(9);
    let parts = grow_parts(&graph, |_| 1.0, &[1, 5, 9]).unwrap();
    assert_eq!(parts, vec![vec![1, 2, 3, 4], vec![5, 6, 7], vec![8, 9]]);
}

#[test]
fn test_grow_parts_boxed_in_seed() {
    let graph = grid(4, 4);
    let parts = grow_parts(&graph, |_| 1.0, &[1, 16, 4]).unwrap();

    assert_covers(&graph, &parts);
    for part in &parts {
        assert_connected(&graph, part);
    }
    // The corner seed is surrounded before its turn comes.
    assert_eq!(parts[2], vec![4]);
}

#[test]
fn test_grow_parts_degenerate_counts() {
    let graph = path(5);
    assert!(grow_parts(&graph, |_| 1.0, &[]).unwrap().is_empty());
    assert_eq!(grow_parts(&graph, |_| 1.0, &[3]).unwrap(), vec![vec![1, 2, 3, 4, 5]]);
}
