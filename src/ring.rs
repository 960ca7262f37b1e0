use log::{debug, warn};
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::area::ring_area;
use crate::dataset::{Dataset, PointId, RegionId, SegmentId};
use crate::error::{DivideError, Result};

/// Closed ring of point ids. The closing point is not repeated.
pub type Ring = Vec<PointId>;

// Index into the segment list being merged, so a way listed twice counts twice.
type SegmentIdx = usize;

/// Merges the given ways into closed rings.
///
/// Every way is an edge between its two end points. The walk starts at the first
/// end point, follows unused ways end to end and closes a ring when it comes back
/// to its start. Remaining ways start a new ring at the earliest unused end point.
/// A point with more than two way ends, or a dead end, is a ring assembly error.
pub fn assemble_rings(
    region: RegionId,
    segment_ids: &[SegmentId],
    dataset: &Dataset,
) -> Result<Vec<Ring>> {
    let segments = segment_ids
        .iter()
        .map(|&id| dataset.segment(id))
        .collect::<Result<Vec<_>>>()?;

    // End point -> incident way ends, plus first-seen order of the end points.
    let mut ends: HashMap<PointId, SmallVec<[SegmentIdx; 2]>> = HashMap::new();
    let mut order: Vec<PointId> = Vec::new();
    for (idx, points) in segments.iter().enumerate() {
        for end in [points[0], points[points.len() - 1]] {
            let incident = ends.entry(end).or_insert_with(|| {
                order.push(end);
                SmallVec::new()
            });
            incident.push(idx);
        }
    }

    let fault = |reason: String| DivideError::RingAssembly { region, reason };

    let mut rings = Vec::new();
    let mut next_start = 0;
    while let Some(start) = order[next_start..].iter().position(|p| ends.contains_key(p)) {
        next_start += start;
        let start = order[next_start];

        let mut ring: Ring = vec![start];
        let mut node = start;
        let mut incoming: Option<SegmentIdx> = None;

        loop {
            let incident = ends.get(&node).cloned().ok_or_else(|| {
                fault(format!("node {} is reached twice (selfintersections?)", node))
            })?;
            if incident.len() > 2 {
                return Err(fault(format!(
                    "node {} ends {} ways (selfintersections?)",
                    node,
                    incident.len()
                )));
            }

            let outgoing = match (incoming, incident.as_slice()) {
                (None, &[rest, first]) => {
                    // The other way end closes the ring later.
                    ends.insert(node, SmallVec::from_slice(&[rest]));
                    first
                }
                (Some(w), &[only]) if only == w => {
                    ends.remove(&node);
                    break;
                }
                (Some(w), &[a, b]) if a == w || b == w => {
                    ends.remove(&node);
                    if a == w {
                        b
                    } else {
                        a
                    }
                }
                _ => {
                    return Err(fault(format!(
                        "node {} is a dead end (unclosed ring?)",
                        node
                    )))
                }
            };

            let points = segments[outgoing];
            if points[0] == node {
                ring.extend_from_slice(&points[1..]);
            } else {
                ring.extend(points[..points.len() - 1].iter().rev());
            }
            node = ring[ring.len() - 1];
            incoming = Some(outgoing);
        }

        // Drop the repeated start point.
        ring.pop();
        rings.push(ring);
    }

    Ok(rings)
}

/// Merges the ways and keeps only the ring with the biggest area.
/// Returns `None` when there are no ways to merge.
pub fn largest_ring(
    region: RegionId,
    segment_ids: &[SegmentId],
    dataset: &Dataset,
) -> Result<Option<(Ring, f64)>> {
    let rings = assemble_rings(region, segment_ids, dataset)?;
    if rings.len() > 1 {
        warn!(
            "relation {}: {} disjoint rings, using only biggest ring",
            region,
            rings.len()
        );
    }

    let mut biggest: Option<(Ring, f64)> = None;
    for ring in rings {
        let area = ring_area(&ring, dataset)?;
        debug!("area: {:15.2} points: {:5}", area, ring.len());
        if biggest.as_ref().map_or(true, |(_, max_area)| area > *max_area) {
            biggest = Some((ring, area));
        }
    }
    Ok(biggest)
}

#[cfg(test)]
#[path = "ring_tests.rs"]
mod tests;
