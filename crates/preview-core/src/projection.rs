//! Oblique 3D to 2D projection for the wireframe strategy.

use nalgebra::{Point2, Point3};

/// Project a 3D vertex onto the 2D drawing plane.
///
/// Fixed oblique projection:
///
/// ```text
/// screen_x = x + 0.5 * z
/// screen_y = y + 0.5 * z
/// ```
///
/// No perspective division, clipping, or hidden-surface removal; projected
/// edges and faces may overlap and that is an accepted approximation. Pure
/// and stateless, applied independently to every vertex.
#[inline]
pub fn project(vertex: &Point3<f64>) -> Point2<f64> {
    Point2::new(vertex.x + 0.5 * vertex.z, vertex.y + 0.5 * vertex.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_formula() {
        let p = project(&Point3::new(1.0, 2.0, 4.0));
        assert_eq!(p, Point2::new(3.0, 4.0));

        let p = project(&Point3::new(-2.0, 0.5, -1.0));
        assert_eq!(p, Point2::new(-2.5, 0.0));
    }

    #[test]
    fn test_projection_is_pure() {
        let v = Point3::new(0.25, -3.5, 7.75);
        assert_eq!(project(&v), project(&v));
    }

    #[test]
    fn test_z_zero_is_identity() {
        // A vertex in the z = 0 plane projects to its own x/y coordinates.
        let p = project(&Point3::new(0.7, 0.3, 0.0));
        assert_eq!(p, Point2::new(0.7, 0.3));
    }
}
