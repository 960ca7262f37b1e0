use log::debug;
use std::collections::{BTreeMap, VecDeque};

use crate::dataset::RegionId;
use crate::error::{DivideError, Result};
use crate::graph::NeighborGraph;

/// Growing region of one part: queue of labeled regions still to expand and their area.
#[derive(Debug)]
struct Frontier {
    queue: VecDeque<RegionId>,
    area: f64,
}

impl Frontier {
    fn seeded(seed: RegionId, area: f64) -> Self {
        Self {
            queue: VecDeque::from([seed]),
            area,
        }
    }
}

fn check_seeds(graph: &NeighborGraph, seeds: &[RegionId]) -> Result<BTreeMap<RegionId, usize>> {
    let mut labels = BTreeMap::new();
    for (part, &seed) in seeds.iter().enumerate() {
        if !graph.contains(seed) || labels.insert(seed, part).is_some() {
            return Err(DivideError::InvalidGraphSeed(seed));
        }
    }
    Ok(labels)
}

fn collect_parts(labels: BTreeMap<RegionId, usize>, parts: usize) -> Vec<Vec<RegionId>> {
    let mut result = vec![Vec::new(); parts];
    for (region, part) in labels {
        result[part].push(region);
    }
    result
}

/// Splits a connected graph into two connected parts of similar area, grown from `p1` and `p2`.
///
/// Both parts grow breadth-first. The part with the smaller area expands next, and a part
/// that overtakes the other one while the other can still grow stops expanding its current
/// region and hands over. Returns `[part of p1, part of p2]`, each sorted.
pub fn bisect<F>(
    graph: &NeighborGraph,
    area: F,
    p1: RegionId,
    p2: RegionId,
) -> Result<[Vec<RegionId>; 2]>
where
    F: Fn(RegionId) -> f64,
{
    let mut labels = check_seeds(graph, &[p1, p2])?;
    let mut sides = [Frontier::seeded(p1, area(p1)), Frontier::seeded(p2, area(p2))];

    loop {
        let side = match (sides[0].queue.is_empty(), sides[1].queue.is_empty()) {
            (true, true) => break,
            (false, true) => 0,
            (true, false) => 1,
            (false, false) if sides[0].area < sides[1].area => 0,
            (false, false) => 1,
        };
        let other = 1 - side;

        let Some(current) = sides[side].queue.pop_front() else {
            continue;
        };
        for &n in graph.neighbors(current) {
            if labels.contains_key(&n) {
                continue;
            }
            labels.insert(n, side);
            sides[side].area += area(n);
            sides[side].queue.push_back(n);

            if sides[side].area > sides[other].area && !sides[other].queue.is_empty() {
                // Put it back where it came from, its other neighbors wait for the next turn.
                sides[side].queue.push_front(current);
                break;
            }
        }
    }
    debug!("areas: [{:.2}, {:.2}]", sides[0].area, sides[1].area);

    // Ascending label order keeps both parts sorted.
    let mut parts: [Vec<RegionId>; 2] = Default::default();
    for (region, side) in labels {
        parts[side].push(region);
    }
    Ok(parts)
}

/// Grows one part per seed, in seed order.
///
/// Part `i` grows alone until its area reaches half of the area still unclaimed when
/// it started. Then part `i + 1` starts and grows exclusively, with part `i` paused,
/// until it has no more work. Only after that does part `i` pick up the rest. A part
/// that runs out of work early starts its successor right away. Returns the parts in
/// seed order, each sorted.
pub fn grow_parts<F>(
    graph: &NeighborGraph,
    area: F,
    seeds: &[RegionId],
) -> Result<Vec<Vec<RegionId>>>
where
    F: Fn(RegionId) -> f64,
{
    let mut labels = check_seeds(graph, seeds)?;
    if seeds.is_empty() {
        return Ok(Vec::new());
    }

    let total: f64 = graph.regions().map(&area).sum();
    let mut frontiers: Vec<Frontier> = seeds
        .iter()
        .map(|&s| Frontier::seeded(s, area(s)))
        .collect();
    let mut targets = vec![0.0; seeds.len()];
    targets[0] = total / 2.0;

    // Active parts, innermost last. Only the innermost one grows.
    let mut active = vec![0];
    let mut started = 1;

    while let Some(&part) = active.last() {
        let may_start_next = part + 1 == started && started < seeds.len();

        let Some(current) = frontiers[part].queue.pop_front() else {
            active.pop();
            if may_start_next {
                targets[started] = unclaimed(total, &frontiers[..started]) / 2.0;
                active.push(started);
                started += 1;
            }
            continue;
        };

        for &n in graph.neighbors(current) {
            if labels.contains_key(&n) {
                continue;
            }
            if may_start_next && frontiers[part].area >= targets[part] {
                frontiers[part].queue.push_front(current);
                targets[started] = unclaimed(total, &frontiers[..started]) / 2.0;
                active.push(started);
                started += 1;
                break;
            }
            labels.insert(n, part);
            frontiers[part].area += area(n);
            frontiers[part].queue.push_back(n);
        }
    }

    Ok(collect_parts(labels, seeds.len()))
}

fn unclaimed(total: f64, claimed: &[Frontier]) -> f64 {
    total - claimed.iter().map(|f| f.area).sum::<f64>()
}

#[cfg(test)]
#[path = "bisect_tests.rs"]
mod tests;
