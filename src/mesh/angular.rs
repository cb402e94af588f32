//! Anticlockwise ordering of directions about an axis.
//!
//! Directions are projected onto the plane normal to the axis and ordered by
//! the angle they sweep, right-hand rule about the axis, starting from a zero
//! direction. Viewed from the tip of the axis looking back at the origin this
//! is an anticlockwise sweep.

use std::cmp::Ordering;
use std::f64::consts::TAU;

use nalgebra::{Unit, Vector3};

/// Projections shorter than this are treated as parallel to the axis.
const PARALLEL_EPS: f64 = 1e-12;

/// A total order over directions, anticlockwise about an axis.
#[derive(Debug, Clone, Copy)]
pub struct AnticlockwiseOrder {
    axis: Unit<Vector3<f64>>,
    /// First in-plane basis vector; angle zero.
    tangent_x: Vector3<f64>,
    /// `axis × tangent_x`; angle π/2.
    tangent_y: Vector3<f64>,
}

impl AnticlockwiseOrder {
    /// Create an ordering about `axis` that starts at `zero`.
    ///
    /// If `zero` has no component perpendicular to the axis (vertices use the
    /// negated position, which never does), a fixed tangent derived from the
    /// axis is used instead. The order is then still total and depends only
    /// on the axis.
    ///
    /// # Panics
    /// Panics if `axis` is zero.
    pub fn new(axis: Vector3<f64>, zero: Vector3<f64>) -> Self {
        let axis = Unit::new_normalize(axis);
        assert!(axis.iter().all(|c| c.is_finite()), "axis must be non-zero");

        let in_plane = zero - axis.into_inner() * axis.dot(&zero);
        let tangent_x = if in_plane.norm() > PARALLEL_EPS {
            in_plane.normalize()
        } else {
            let up = if axis.y.abs() < 0.9 {
                Vector3::y()
            } else {
                Vector3::x()
            };
            axis.cross(&up).normalize()
        };
        let tangent_y = axis.cross(&tangent_x);

        Self {
            axis,
            tangent_x,
            tangent_y,
        }
    }

    /// The unit axis.
    #[inline]
    pub fn axis(&self) -> Vector3<f64> {
        self.axis.into_inner()
    }

    /// Angle of `dir` from the zero direction, in `[0, 2π)`.
    ///
    /// A direction collinear with the axis has no defined angle; zero is
    /// returned.
    pub fn angle_of(&self, dir: &Vector3<f64>) -> f64 {
        let x = dir.dot(&self.tangent_x);
        let y = dir.dot(&self.tangent_y);
        if x.abs() < PARALLEL_EPS && y.abs() < PARALLEL_EPS {
            return 0.0;
        }
        let angle = y.atan2(x);
        if angle < 0.0 {
            angle + TAU
        } else {
            angle
        }
    }

    /// Compare two directions by their angle.
    pub fn compare(&self, a: &Vector3<f64>, b: &Vector3<f64>) -> Ordering {
        self.angle_of(a).total_cmp(&self.angle_of(b))
    }

    /// Sort `items` anticlockwise by the direction `key` maps each one to.
    pub fn sort_by_direction<T, F>(&self, items: &mut [T], mut key: F)
    where
        F: FnMut(&T) -> Vector3<f64>,
    {
        items.sort_by_cached_key(|item| OrderedAngle(self.angle_of(&key(item))));
    }
}

/// Angle wrapper with a total order for cached-key sorting.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrderedAngle(f64);

impl Eq for OrderedAngle {}

impl PartialOrd for OrderedAngle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedAngle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_about_z() {
        let order = AnticlockwiseOrder::new(Vector3::z(), Vector3::x());

        assert!(order.angle_of(&Vector3::x()).abs() < 1e-12);
        assert!((order.angle_of(&Vector3::y()) - TAU / 4.0).abs() < 1e-12);
        assert!((order.angle_of(&-Vector3::x()) - TAU / 2.0).abs() < 1e-12);
        assert!((order.angle_of(&-Vector3::y()) - 3.0 * TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_axis_component_is_ignored() {
        let order = AnticlockwiseOrder::new(Vector3::z(), Vector3::x());
        let flat = Vector3::new(1.0, 1.0, 0.0);
        let raised = Vector3::new(1.0, 1.0, 5.0);
        assert!((order.angle_of(&flat) - order.angle_of(&raised)).abs() < 1e-12);
    }

    #[test]
    fn test_sort_is_anticlockwise() {
        let order = AnticlockwiseOrder::new(Vector3::z(), Vector3::x());
        let mut dirs = vec![
            Vector3::new(0.0, -1.0, 0.3),
            Vector3::new(-1.0, 0.1, -0.2),
            Vector3::new(1.0, 0.2, 0.0),
            Vector3::new(0.1, 1.0, 0.0),
        ];
        order.sort_by_direction(&mut dirs, |d| *d);

        // Consecutive cross products point along +z
        for i in 0..dirs.len() {
            let a = dirs[i];
            let b = dirs[(i + 1) % dirs.len()];
            let (a, b) = (Vector3::new(a.x, a.y, 0.0), Vector3::new(b.x, b.y, 0.0));
            assert!(a.cross(&b).z > 0.0, "{:?} -> {:?} is not anticlockwise", a, b);
        }
    }

    #[test]
    fn test_collinear_zero_falls_back() {
        let axis = Vector3::new(0.3, -0.4, 0.8);
        let order = AnticlockwiseOrder::new(axis, -axis);

        // Fallback basis is orthonormal and right-handed
        assert!(order.tangent_x.dot(&order.axis()).abs() < 1e-12);
        assert!((order.tangent_x.norm() - 1.0).abs() < 1e-12);
        assert!((order.tangent_x.cross(&order.tangent_y) - order.axis()).norm() < 1e-12);
    }

    #[test]
    fn test_compare_is_total() {
        let order = AnticlockwiseOrder::new(Vector3::z(), Vector3::x());
        let a = Vector3::new(1.0, 0.5, 0.0);
        let b = Vector3::new(-1.0, 0.5, 0.0);
        assert_eq!(order.compare(&a, &b), Ordering::Less);
        assert_eq!(order.compare(&b, &a), Ordering::Greater);
        assert_eq!(order.compare(&a, &a), Ordering::Equal);
    }
}
