
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Tangential gradient of a per-panel scalar field.

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;
use vortexmath::matrix::Matrix;

use super::Surface;

impl Surface {
    /// Tangential gradient of a per-panel scalar field at the given panel.
    ///
    /// The gradient is estimated by least squares over the finite differences towards the
    /// edge-shared neighbour panels, with the normal direction pinned to zero. The scalar values
    /// are read from `coefficients` starting at `offset`, which allows slicing a surface out of a
    /// global coefficient vector. Panels with fewer than two neighbours, or with neighbours that
    /// do not span the panel plane, get a zero gradient.
    pub fn scalar_field_gradient(
        &self,
        coefficients: &[Float],
        offset: usize,
        i_panel: usize,
    ) -> SpatialVector {
        let neighbours = &self.neighbours[i_panel];

        if neighbours.len() < 2 {
            return SpatialVector::default();
        }

        let x0 = self.collocation_points[i_panel];
        let value0 = coefficients[offset + i_panel];

        let normal = self.normals[i_panel];

        let mut normal_equations = Matrix::<Float>::new_default([3, 3]);
        let mut rhs = [0.0; 3];

        for &i_neighbour in neighbours {
            let direction = self.collocation_points[i_neighbour] - x0;
            let value_difference = coefficients[offset + i_neighbour] - value0;

            for a in 0..3 {
                for b in 0..3 {
                    normal_equations[[a, b]] += direction[a] * direction[b];
                }

                rhs[a] += value_difference * direction[a];
            }
        }

        // Pin the normal component of the gradient to zero
        for a in 0..3 {
            for b in 0..3 {
                normal_equations[[a, b]] += normal[a] * normal[b];
            }
        }

        let determinant = determinant_3x3(&normal_equations);

        let scale = (normal_equations[[0, 0]] + normal_equations[[1, 1]] + normal_equations[[2, 2]]) / 3.0;

        if determinant.abs() < 1e-9 * scale * scale * scale {
            return SpatialVector::default();
        }

        let gradient = normal_equations.solve_gaussian_elimination(&rhs);

        SpatialVector::new(gradient[0], gradient[1], gradient[2]).project_on_plane(normal)
    }
}

fn determinant_3x3(matrix: &Matrix<Float>) -> Float {
    matrix[[0, 0]] * (matrix[[1, 1]] * matrix[[2, 2]] - matrix[[1, 2]] * matrix[[2, 1]]) -
    matrix[[0, 1]] * (matrix[[1, 0]] * matrix[[2, 2]] - matrix[[1, 2]] * matrix[[2, 0]]) +
    matrix[[0, 2]] * (matrix[[1, 0]] * matrix[[2, 1]] - matrix[[1, 1]] * matrix[[2, 0]])
}
