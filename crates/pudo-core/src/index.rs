//! Planar k-d tree over PUDO coordinates.
//!
//! Latitude and longitude are indexed as raw degrees on a flat plane. This is
//! the fast candidate stage of the join; the reported distance is always the
//! haversine distance to the selected candidate. Near the poles and across
//! the antimeridian the planar nearest point can differ from the spherical
//! nearest point.

use std::collections::HashSet;
use std::fmt;

use kiddo::SquaredEuclidean;
use kiddo::float::kdtree::KdTree;
use pudo_model::Coordinate;

use crate::error::{JoinError, Result};

/// Bucket size of the tree leaves.
const BUCKET_SIZE: usize = 256;

type PointTree = KdTree<f64, u64, 2, BUCKET_SIZE, u32>;

/// Nearest-point index built once per join run.
pub struct SpatialIndex {
    tree: PointTree,
    len: usize,
    distinct: usize,
}

impl SpatialIndex {
    /// Build the index over `coordinates`.
    ///
    /// Exact duplicates are stored once, under the position of their first
    /// occurrence, so ties resolve toward the lowest input position.
    ///
    /// # Errors
    ///
    /// Returns [`JoinError::EmptyTargetSet`] when `coordinates` is empty.
    pub fn build(coordinates: &[Coordinate]) -> Result<Self> {
        if coordinates.is_empty() {
            return Err(JoinError::EmptyTargetSet);
        }

        let mut seen: HashSet<(u64, u64)> = HashSet::with_capacity(coordinates.len());
        let mut tree = PointTree::with_capacity(coordinates.len());
        for (position, coordinate) in coordinates.iter().enumerate() {
            if !seen.insert(point_key(coordinate)) {
                continue;
            }
            tree.add(&coordinate.as_array(), position as u64);
        }

        Ok(Self {
            tree,
            len: coordinates.len(),
            distinct: seen.len(),
        })
    }

    /// Position in the build input of the planar-nearest coordinate.
    pub fn query(&self, point: Coordinate) -> usize {
        let nearest = self
            .tree
            .nearest_one::<SquaredEuclidean>(&point.as_array());
        nearest.item as usize
    }

    /// Number of coordinates the index was built from, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; an empty index cannot be built.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct points stored in the tree.
    pub fn distinct_points(&self) -> usize {
        self.distinct
    }
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.len)
            .field("distinct", &self.distinct)
            .finish_non_exhaustive()
    }
}

// -0.0 and 0.0 are the same point.
fn point_key(coordinate: &Coordinate) -> (u64, u64) {
    (
        (coordinate.latitude + 0.0).to_bits(),
        (coordinate.longitude + 0.0).to_bits(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_nearest(coordinates: &[Coordinate], point: Coordinate) -> usize {
        let mut best = 0;
        let mut best_d2 = f64::INFINITY;
        for (idx, c) in coordinates.iter().enumerate() {
            let dlat = c.latitude - point.latitude;
            let dlon = c.longitude - point.longitude;
            let d2 = dlat * dlat + dlon * dlon;
            if d2 < best_d2 {
                best_d2 = d2;
                best = idx;
            }
        }
        best
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = SpatialIndex::build(&[]).unwrap_err();
        assert_eq!(err, JoinError::EmptyTargetSet);
    }

    #[test]
    fn single_point_always_wins() {
        let index = SpatialIndex::build(&[Coordinate::new(10.0, 20.0)]).unwrap();
        assert_eq!(index.query(Coordinate::new(-80.0, 170.0)), 0);
        assert_eq!(index.len(), 1);
        assert!(!index.is_empty());
    }

    #[test]
    fn returns_input_position() {
        let coordinates = vec![
            Coordinate::new(-23.55, -46.63),
            Coordinate::new(-22.90, -43.17),
            Coordinate::new(-19.92, -43.94),
            Coordinate::new(-30.03, -51.23),
        ];
        let index = SpatialIndex::build(&coordinates).unwrap();
        assert_eq!(index.query(Coordinate::new(-22.95, -43.20)), 1);
        assert_eq!(index.query(Coordinate::new(-29.0, -51.0)), 3);
        assert_eq!(index.query(Coordinate::new(-23.50, -46.60)), 0);
    }

    #[test]
    fn duplicates_resolve_to_first_occurrence() {
        let coordinates = vec![
            Coordinate::new(5.0, 5.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(-0.0, 3.0),
            Coordinate::new(0.0, 3.0),
        ];
        let index = SpatialIndex::build(&coordinates).unwrap();
        assert_eq!(index.len(), 5);
        assert_eq!(index.distinct_points(), 3);
        assert_eq!(index.query(Coordinate::new(1.0, 1.0)), 1);
        assert_eq!(index.query(Coordinate::new(0.0, 3.1)), 3);
    }

    #[test]
    fn many_points_on_one_latitude() {
        let coordinates: Vec<Coordinate> = (0..600)
            .map(|i| Coordinate::new(-23.0, -50.0 + f64::from(i) * 0.01))
            .collect();
        let index = SpatialIndex::build(&coordinates).unwrap();
        for point in [Coordinate::new(-23.1, -48.996), Coordinate::new(-22.5, -45.123)] {
            assert_eq!(index.query(point), brute_force_nearest(&coordinates, point));
        }
    }

    #[test]
    fn many_points_on_one_longitude() {
        let coordinates: Vec<Coordinate> = (0..600)
            .map(|i| Coordinate::new(-30.0 + f64::from(i) * 0.01, -46.0))
            .collect();
        let index = SpatialIndex::build(&coordinates).unwrap();
        let point = Coordinate::new(-27.004, -46.2);
        assert_eq!(index.query(point), brute_force_nearest(&coordinates, point));
    }

    #[test]
    fn matches_brute_force_on_grid() {
        let coordinates: Vec<Coordinate> = (0..40)
            .flat_map(|i| {
                (0..40).map(move |j| {
                    Coordinate::new(-33.0 + f64::from(i) * 0.73, -73.0 + f64::from(j) * 0.91)
                })
            })
            .collect();
        let index = SpatialIndex::build(&coordinates).unwrap();
        for point in [
            Coordinate::new(-20.111, -50.222),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(-33.4, -73.4),
            Coordinate::new(-5.55, -40.01),
        ] {
            assert_eq!(index.query(point), brute_force_nearest(&coordinates, point));
        }
    }
}
