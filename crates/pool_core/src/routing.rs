//! Route ordering over pickup sets.
//!
//! Below a small ceiling the optimizer enumerates every pickup ordering and
//! keeps the global optimum; above it, a farthest-first sweep approximates
//! one. Either way the result carries a per-member detour analysis the
//! matching core checks tolerances against.

use std::collections::HashMap;

use crate::domain::{RequestId, Route};
use crate::spatial::{distance_km, GeoPoint};

/// Exhaustive-search ceiling. 6! = 720 orderings is cheap, and group capacity
/// keeps real inputs at four or fewer; the bound is still enforced here
/// rather than assumed of callers.
pub const MAX_EXHAUSTIVE_PICKUPS: usize = 6;

/// Estimated travel minutes per kilometre of route distance. A stand-in for
/// a real travel-time model; callers must not read more into the unit.
pub const DURATION_MIN_PER_KM: f64 = 2.0;

/// A pickup point awaiting sequencing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub request: RequestId,
    pub location: GeoPoint,
}

/// Order `pickups` into the shortest route ending at `destination`.
pub fn optimize_route(pickups: &[Pickup], destination: GeoPoint) -> Route {
    if pickups.is_empty() {
        return Route {
            waypoints: Vec::new(),
            total_distance_km: 0.0,
            estimated_duration_min: 0.0,
            detour_by_request: HashMap::new(),
        };
    }

    let best_order = if pickups.len() <= MAX_EXHAUSTIVE_PICKUPS {
        best_permutation(pickups, destination)
    } else {
        farthest_first(pickups, destination)
    };

    let total_distance_km = route_distance(&best_order, destination);
    let detour_by_request = detour_analysis(&best_order, destination);
    let waypoints = best_order
        .iter()
        .map(|p| p.location)
        .chain(std::iter::once(destination))
        .collect();

    Route {
        waypoints,
        total_distance_km,
        estimated_duration_min: total_distance_km * DURATION_MIN_PER_KM,
        detour_by_request,
    }
}

/// Total path distance: legs between consecutive pickups, then the final leg
/// to `end`.
fn route_distance(order: &[Pickup], end: GeoPoint) -> f64 {
    let mut total = 0.0;
    for pair in order.windows(2) {
        total += distance_km(pair[0].location, pair[1].location);
    }
    if let Some(last) = order.last() {
        total += distance_km(last.location, end);
    }
    total
}

/// Enumerate every ordering (Heap's algorithm) and keep the first minimum
/// found; strict comparison makes enumeration order the tie-break.
fn best_permutation(pickups: &[Pickup], destination: GeoPoint) -> Vec<Pickup> {
    let mut scratch = pickups.to_vec();
    let mut best: Vec<Pickup> = Vec::new();
    let mut best_distance = f64::INFINITY;
    let len = scratch.len();

    for_each_order(&mut scratch, len, &mut |order| {
        let dist = route_distance(order, destination);
        if dist < best_distance {
            best_distance = dist;
            best = order.to_vec();
        }
    });

    best
}

fn for_each_order<F: FnMut(&[Pickup])>(items: &mut [Pickup], k: usize, visit: &mut F) {
    if k <= 1 {
        visit(items);
        return;
    }
    for i in 0..k - 1 {
        for_each_order(items, k - 1, visit);
        if k % 2 == 0 {
            items.swap(i, k - 1);
        } else {
            items.swap(0, k - 1);
        }
    }
    for_each_order(items, k - 1, visit);
}

/// Greedy fallback above the permutation ceiling: visit the farthest pickup
/// from the destination first and sweep inward.
fn farthest_first(pickups: &[Pickup], destination: GeoPoint) -> Vec<Pickup> {
    let mut order = pickups.to_vec();
    order.sort_by(|a, b| {
        distance_km(b.location, destination).total_cmp(&distance_km(a.location, destination))
    });
    order
}

/// Per-pickup detour: the distance actually travelled from the pickup's slot
/// in the visiting order (through the remaining pickups, then to the
/// destination) against the direct pickup→destination distance. Zero when
/// the direct distance is zero.
fn detour_analysis(order: &[Pickup], destination: GeoPoint) -> HashMap<RequestId, f64> {
    let mut detours = HashMap::with_capacity(order.len());
    for (index, pickup) in order.iter().enumerate() {
        let direct = distance_km(pickup.location, destination);
        let actual = route_distance(&order[index..], destination);
        let detour_pct = if direct > 0.0 {
            (actual - direct) / direct * 100.0
        } else {
            0.0
        };
        detours.insert(pickup.request, detour_pct);
    }
    detours
}
