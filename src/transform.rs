use cgmath::{Matrix4, SquareMatrix, Vector3};


/// Placement of a whole mesh in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Matrix4<f32>,
    pub scaling: Vector3<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Matrix4::identity(),
            scaling: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// `translation * rotation * scaling`: maps mesh space into world space.
    pub fn world_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * self.rotation
            * Matrix4::from_nonuniform_scale(self.scaling.x, self.scaling.y, self.scaling.z)
    }

    /// Maps world space into mesh space. `None` if the transform is singular
    /// (e.g. a scaling of 0).
    pub fn inverse_world_matrix(&self) -> Option<Matrix4<f32>> {
        self.world_matrix().invert()
    }

    /// Smallest absolute scaling factor.
    pub fn min_scale(&self) -> f32 {
        self.scaling.x.abs().min(self.scaling.y.abs()).min(self.scaling.z.abs())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}


#[cfg(test)]
mod tests {
    use cgmath::{Deg, InnerSpace, Point3, Transform as _};
    use super::*;

    #[test]
    fn world_matrix_order() {
        let t = Transform {
            position: Vector3::new(1.0, 0.0, 0.0),
            rotation: Matrix4::from_angle_z(Deg(90.0)),
            scaling: Vector3::new(2.0, 2.0, 2.0),
        };

        // Scaled first, then rotated, then translated
        let p = t.world_matrix().transform_point(Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(1.0, 2.0, 0.0)).magnitude() < 1e-5);

        let back = t.inverse_world_matrix().unwrap().transform_point(p);
        assert!((back - Point3::new(1.0, 0.0, 0.0)).magnitude() < 1e-5);
        assert_eq!(t.min_scale(), 2.0);
    }

    #[test]
    fn singular() {
        let t = Transform { scaling: Vector3::new(1.0, 0.0, 1.0), ..Transform::identity() };
        assert!(t.inverse_world_matrix().is_none());
    }
}
