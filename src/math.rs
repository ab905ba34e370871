use bevy::math::{Vec2, Vec3};

pub type Real = f32;

/// Simulation space is three dimensional; depth feeds the perspective projection.
pub type Vector = Vec3;
/// Screen space after projection.
pub type Point = Vec2;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vec3::ZERO
}

/// Distance between two simulation positions ignoring depth.
#[inline(always)]
pub fn planar_distance(a: Vector, b: Vector) -> Real {
    a.truncate().distance(b.truncate())
}

/// Uniform Catmull-Rom spline through `p1..p2`, using `p0` and `p3` as tangent guides.
///
/// `t = 0` yields `p1` and `t = 1` yields `p2`.
#[inline]
pub fn catmull_rom(p0: Point, p1: Point, p2: Point, p3: Point, t: Real) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    p0 * (-0.5 * t3 + t2 - 0.5 * t)
        + p1 * (1.5 * t3 - 2.5 * t2 + 1.0)
        + p2 * (-1.5 * t3 + 2.0 * t2 + 0.5 * t)
        + p3 * (0.5 * t3 - 0.5 * t2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn catmull_rom_hits_control_points() {
        let (p0, p1, p2, p3) = (
            Vec2::new(-1.0, 3.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(5.0, -2.0),
        );
        assert_eq!(catmull_rom(p0, p1, p2, p3, 0.0), p1);
        assert_eq!(catmull_rom(p0, p1, p2, p3, 1.0), p2);
    }

    #[test]
    fn catmull_rom_on_a_straight_line_stays_on_it() {
        let mid = catmull_rom(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
            0.5,
        );
        assert!(approx_eq!(f32, mid.x, 1.5, epsilon = 1e-6));
        assert!(approx_eq!(f32, mid.y, 0.0, epsilon = 1e-6));
    }

    #[test]
    fn planar_distance_ignores_depth() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 4.0, 100.0);
        assert!(approx_eq!(f32, planar_distance(a, b), 5.0, ulps = 2));
    }
}
