
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

use super::*;

impl SpatialVector {
    #[inline(always)]
    /// Returns the dot product of two vectors
    pub fn dot(self, rhs: Self) -> Float {
        self[0] * rhs[0] + self[1] * rhs[1] + self[2] * rhs[2]
    }

    #[inline(always)]
    /// Returns the length of the vector squared, which is equal to the dot product of the vector
    /// with itself
    pub fn length_squared(self) -> Float {
        self[0] * self[0] + self[1] * self[1] + self[2] * self[2]
    }

    #[inline(always)]
    /// Returns the length of the vector
    pub fn length(self) -> Float {
        self.length_squared().sqrt()
    }

    #[inline(always)]
    /// Returns a normalized version of the vector
    pub fn normalize(&self) -> Self {
        let length: Float = self.length();

        if length > 0.0 {
            let mut result = [0.0; VECTOR_LENGTH];

            for i in 0..VECTOR_LENGTH {
                result[i] = self[i] / length;
            }

            Self(result)
        }
        else {
            Self::default()
        }
    }

    #[inline(always)]
    /// Returns the cross product of two vectors
    pub fn cross(self, rhs: Self) -> Self {
        let x = self[1] * rhs[2] - self[2] * rhs[1];
        let y = self[2] * rhs[0] - self[0] * rhs[2];
        let z = self[0] * rhs[1] - self[1] * rhs[0];

        Self::new(x, y, z)
    }

    #[inline(always)]
    /// Vector projection, as described in <https://en.wikipedia.org/wiki/Vector_projection>
    pub fn project(self, rhs: Self) -> Self {
        let rhs_normalized = rhs.normalize();

        rhs_normalized * self.dot(rhs_normalized)
    }

    #[inline(always)]
    /// Projects the vector onto a plane defined by the normal vector
    pub fn project_on_plane(self, plane_normal: Self) -> Self {
        self - self.project(plane_normal)
    }
}
