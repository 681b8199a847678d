//! Geometric primitives used to query and index the mesh: rays, spheres and
//! triangles.

use cgmath::{prelude::*, Matrix4, Point3, Vector3};


/// A half line starting at `origin`. The direction is always normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3<f32>,
    direction: Vector3<f32>,
}

impl Ray {
    /// Creates a ray. Panics if `direction` has zero length.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        assert!(direction.magnitude2() > 0.0, "ray direction must not be zero");
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    /// The point at distance `t` from the origin.
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Returns this ray mapped by `matrix`. The direction is renormalized, so
    /// distances along the returned ray are measured in the target space.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        Self::new(
            matrix.transform_point(self.origin),
            matrix.transform_vector(self.direction),
        )
    }
}


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "negative sphere radius {}", radius);
        Self { center, radius }
    }

    pub fn contains(&self, p: Point3<f32>) -> bool {
        p.distance2(self.center) <= self.radius * self.radius
    }
}


/// A triangle given by its three corners (counter clockwise when looking at
/// the front side).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point3<f32>,
    pub b: Point3<f32>,
    pub c: Point3<f32>,
}

impl Triangle {
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self { a, b, c }
    }

    pub fn corners(&self) -> [Point3<f32>; 3] {
        [self.a, self.b, self.c]
    }

    pub fn centroid(&self) -> Point3<f32> {
        Point3::centroid(&[self.a, self.b, self.c])
    }

    /// Unnormalized normal; its length is twice the area.
    pub fn cross(&self) -> Vector3<f32> {
        (self.b - self.a).cross(self.c - self.a)
    }

    /// Unit normal or the zero vector for degenerate triangles.
    pub fn normal(&self) -> Vector3<f32> {
        let n = self.cross();
        if n.magnitude2() > 0.0 {
            n.normalize()
        } else {
            Vector3::new(0.0, 0.0, 0.0)
        }
    }

    pub fn area(&self) -> f32 {
        self.cross().magnitude() / 2.0
    }

    /// Returns this triangle with all corners mapped by `matrix`.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        Self::new(
            matrix.transform_point(self.a),
            matrix.transform_point(self.b),
            matrix.transform_point(self.c),
        )
    }

    /// Sphere around the centroid that touches the farthest corner. This is
    /// the volume the octree uses to place the triangle.
    pub fn bounding_sphere(&self) -> Sphere {
        let center = self.centroid();
        let radius = self.corners()
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0, f32::max);

        Sphere { center, radius }
    }

    /// Inner angle at corner `i` (0 → `a`, 1 → `b`, 2 → `c`).
    pub fn angle_at(&self, i: usize) -> f32 {
        let corners = self.corners();
        let p = corners[i];
        let u = corners[(i + 1) % 3] - p;
        let v = corners[(i + 2) % 3] - p;
        if u.magnitude2() == 0.0 || v.magnitude2() == 0.0 {
            return 0.0;
        }

        u.angle(v).0
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn triangle_basics() {
        let t = unit_triangle();
        assert_eq!(t.normal(), Vector3::new(0.0, 0.0, 1.0));
        assert!((t.area() - 0.5).abs() < 1e-6);

        let c = t.centroid();
        assert!((c.x - 1.0 / 3.0).abs() < 1e-6);
        assert!((c.y - 1.0 / 3.0).abs() < 1e-6);

        let angle_sum: f32 = (0..3).map(|i| t.angle_at(i)).sum();
        assert!((angle_sum - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn bounding_sphere_contains_corners() {
        let t = unit_triangle();
        let s = t.bounding_sphere();
        for &p in &t.corners() {
            assert!(p.distance(s.center) <= s.radius + 1e-6);
        }
    }

    #[test]
    fn transformed_triangle() {
        let m = Matrix4::from_translation(Vector3::new(0.0, 0.0, 2.0))
            * Matrix4::from_nonuniform_scale(3.0, 1.0, 1.0);
        let t = unit_triangle().transformed(&m);
        assert_eq!(t.a, Point3::new(0.0, 0.0, 2.0));
        assert_eq!(t.b, Point3::new(3.0, 0.0, 2.0));
        assert_eq!(t.c, Point3::new(0.0, 1.0, 2.0));
    }

    #[test]
    fn degenerate_normal_is_zero() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let t = Triangle::new(p, p, p);
        assert_eq!(t.normal(), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(t.angle_at(0), 0.0);
    }

    #[test]
    fn ray_is_normalized() {
        let r = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(r.direction(), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(r.point_at(2.0), Point3::new(0.0, 0.0, 2.0));
    }
}
