//! Density clustering of candidate samples.
//!
//! DBSCAN-style expansion with one intentional difference from the
//! textbook algorithm: a sample that was already dismissed as noise is
//! never pulled back into a cluster that forms later, even when it sits
//! within `eps` of one of that cluster's core points. The gap polygons
//! published on the map depend on this behavior, so it is part of the
//! contract. Results are deterministic in input order.

use reading_map_gaps_models::SamplePoint;

use crate::coverage::planar_distance;

/// Indices of all samples within `eps` of `points[idx]`, excluding the
/// sample itself. Duplicate coordinates sit at distance zero and are
/// always neighbors of each other.
fn neighbors_of(points: &[SamplePoint], idx: usize, eps: f64) -> Vec<usize> {
    let origin = points[idx];
    (0..points.len())
        .filter(|&i| {
            i != idx
                && planar_distance(points[i].lng, points[i].lat, origin.lng, origin.lat) <= eps
        })
        .collect()
}

/// Groups `points` into density clusters.
///
/// Returns clusters as lists of indices into `points`, in the order the
/// clusters were seeded. A sample whose neighborhood holds fewer than
/// `min_cluster_size` other samples cannot seed a cluster; it either
/// joins a cluster as a border member during expansion or stays
/// unclustered for good.
#[must_use]
pub fn cluster_points(
    points: &[SamplePoint],
    eps: f64,
    min_cluster_size: usize,
) -> Vec<Vec<usize>> {
    let mut visited = vec![false; points.len()];
    let mut clusters = Vec::new();

    for seed in 0..points.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;

        let frontier = neighbors_of(points, seed, eps);
        if frontier.len() < min_cluster_size {
            // Noise. Stays unclustered even if a later cluster reaches it.
            continue;
        }

        clusters.push(expand_cluster(points, seed, frontier, &mut visited, eps, min_cluster_size));
    }

    clusters
}

/// Grows one cluster outward from a core seed.
///
/// Every unvisited frontier sample joins the cluster; only samples that
/// are themselves core extend the frontier further.
fn expand_cluster(
    points: &[SamplePoint],
    seed: usize,
    mut frontier: Vec<usize>,
    visited: &mut [bool],
    eps: f64,
    min_cluster_size: usize,
) -> Vec<usize> {
    let mut cluster = vec![seed];
    let mut cursor = 0;

    while cursor < frontier.len() {
        let current = frontier[cursor];
        cursor += 1;

        if visited[current] {
            continue;
        }
        visited[current] = true;

        let reachable = neighbors_of(points, current, eps);
        if reachable.len() >= min_cluster_size {
            for neighbor in reachable {
                if !visited[neighbor] && !frontier.contains(&neighbor) {
                    frontier.push(neighbor);
                }
            }
        }

        cluster.push(current);
    }

    cluster
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(center_lng: f64, center_lat: f64, count: usize, spread: f64) -> Vec<SamplePoint> {
        (0..count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let offset = spread * (i as f64) / (count as f64);
                SamplePoint::new(center_lng + offset, center_lat - offset, 90.0)
            })
            .collect()
    }

    #[test]
    fn single_blob_forms_one_cluster() {
        let points = blob(112.4, 34.6, 6, 0.001);
        let clusters = cluster_points(&points, 0.003, 5);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 6);
    }

    #[test]
    fn disjoint_blobs_form_separate_clusters() {
        let mut points = blob(0.0, 0.0, 5, 0.001);
        points.extend(blob(1.0, 1.0, 5, 0.001));
        let clusters = cluster_points(&points, 0.003, 4);
        assert_eq!(clusters.len(), 2);
        assert!(clusters[0].iter().all(|&i| i < 5));
        assert!(clusters[1].iter().all(|&i| i >= 5));
    }

    #[test]
    fn too_few_neighbors_means_no_cluster() {
        // 4 mutually close samples, but each has only 3 neighbors.
        let points = blob(0.0, 0.0, 4, 0.001);
        let clusters = cluster_points(&points, 0.003, 5);
        assert!(clusters.is_empty());
    }

    #[test]
    fn duplicate_coordinates_cluster_together() {
        let points = vec![SamplePoint::new(0.5, 0.5, 90.0); 6];
        let clusters = cluster_points(&points, 0.003, 5);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 6);
    }

    #[test]
    fn noise_is_not_reabsorbed() {
        // Index 0 is visited first and dismissed: its only neighbor is
        // index 1. The remaining three samples then form a cluster whose
        // core reaches index 0, but it must stay out.
        let points = vec![
            SamplePoint::new(0.0, 0.0, 90.0),
            SamplePoint::new(0.001, 0.0, 90.0),
            SamplePoint::new(0.002, 0.0, 90.0),
            SamplePoint::new(0.002, 0.001, 90.0),
        ];
        let clusters = cluster_points(&points, 0.0015, 2);
        assert_eq!(clusters.len(), 1);
        assert!(!clusters[0].contains(&0), "noise sample was reabsorbed");
    }

    #[test]
    fn deterministic_across_runs() {
        let mut points = blob(112.4, 34.6, 8, 0.002);
        points.extend(blob(112.5, 34.7, 8, 0.002));
        let first = cluster_points(&points, 0.003, 5);
        let second = cluster_points(&points, 0.003, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_eps_clusters_only_exact_duplicates() {
        let mut points = vec![SamplePoint::new(0.5, 0.5, 90.0); 3];
        points.push(SamplePoint::new(0.6, 0.5, 90.0));
        let clusters = cluster_points(&points, 0.0, 2);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 3);
    }
}
