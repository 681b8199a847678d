//! Exact intersection tests between the primitives in [`crate::primitive`] and
//! axis aligned cubes.
//!
//! Cubes are given as `(center, width)` where `width` is the full edge
//! length.

use boolinator::Boolinator;
use cgmath::{prelude::*, Point3, Vector3};

use crate::primitive::{Ray, Sphere, Triangle};


const EPSILON: f32 = 1e-7;

/// Returns the distance along `ray` at which it hits `tri`, if it does. Both
/// sides of the triangle are hit.
///
/// Reference: Möller, Tomas, and Ben Trumbore. "Fast, minimum storage
/// ray-triangle intersection." Journal of graphics tools 2.1 (1997): 21-28.
pub fn ray_triangle(ray: &Ray, tri: &Triangle) -> Option<f32> {
    let e1 = tri.b - tri.a;
    let e2 = tri.c - tri.a;
    let p = ray.direction().cross(e2);
    let det = e1.dot(p);

    // Ray is parallel to the triangle plane
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin() - tri.a;
    let u = s.dot(p) * inv_det;
    if u < 0.0 || u > 1.0 {
        return None;
    }

    let q = s.cross(e1);
    let v = ray.direction().dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(q) * inv_det;
    (t >= 0.0).as_some(t)
}

/// Returns the point on `tri` closest to `p`.
///
/// Reference: Ericson, Christer. Real-time collision detection. CRC Press,
/// 2004. Section 5.1.5.
pub fn closest_point_on_triangle(p: Point3<f32>, tri: &Triangle) -> Point3<f32> {
    let (a, b, c) = (tri.a, tri.b, tri.c);
    let ab = b - a;
    let ac = c - a;

    // Vertex region of `a`
    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    // Vertex region of `b`
    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    // Edge region of `ab`
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    // Vertex region of `c`
    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    // Edge region of `ac`
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    // Edge region of `bc`
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    // Inside the face region
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

/// Returns `true` if the (solid) sphere touches the triangle.
pub fn sphere_triangle(sphere: &Sphere, tri: &Triangle) -> bool {
    sphere.contains(closest_point_on_triangle(sphere.center, tri))
}

/// Returns `true` if `ray` hits the cube (including rays starting inside).
pub fn ray_cube(ray: &Ray, center: Point3<f32>, width: f32) -> bool {
    let half = width / 2.0;
    let min = center - Vector3::new(half, half, half);
    let max = center + Vector3::new(half, half, half);

    let origin = ray.origin();
    let dir = ray.direction();
    let mut t_min = 0.0f32;
    let mut t_max = std::f32::INFINITY;

    for axis in 0..3 {
        if dir[axis].abs() < EPSILON {
            // Parallel to this slab: the origin has to be inside of it
            if origin[axis] < min[axis] || origin[axis] > max[axis] {
                return false;
            }
        } else {
            let inv = 1.0 / dir[axis];
            let mut t0 = (min[axis] - origin[axis]) * inv;
            let mut t1 = (max[axis] - origin[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
    }

    true
}

/// Returns `true` if the sphere and the cube overlap.
pub fn sphere_cube(sphere: &Sphere, center: Point3<f32>, width: f32) -> bool {
    let half = width / 2.0;
    let mut dist2 = 0.0;
    for axis in 0..3 {
        let d = (sphere.center[axis] - center[axis]).abs() - half;
        if d > 0.0 {
            dist2 += d * d;
        }
    }

    dist2 <= sphere.radius * sphere.radius
}

/// Returns `true` if the sphere lies completely inside the cube.
pub fn cube_contains_sphere(center: Point3<f32>, width: f32, sphere: &Sphere) -> bool {
    let half = width / 2.0;
    (0..3).all(|axis| (sphere.center[axis] - center[axis]).abs() + sphere.radius <= half)
}
