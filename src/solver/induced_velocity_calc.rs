
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Velocity and velocity potential evaluations at arbitrary field points.

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;

use super::Solver;

impl Solver {
    /// Disturbance velocity induced at the given point by all registered panels and all wake
    /// panels
    pub fn disturbance_velocity(&self, point: SpatialVector) -> SpatialVector {
        let mut velocity = SpatialVector::default();

        for binding in &self.bindings {
            let surface = self.surface(binding);

            for i_panel in 0..binding.nr_panels {
                let source_strength = self.source_coefficients[binding.panel_offset + i_panel];
                let doublet_strength = self.doublet_coefficients[binding.panel_offset + i_panel];

                if source_strength != 0.0 {
                    velocity += source_strength * surface.source_unit_velocity(point, i_panel);
                }

                if doublet_strength != 0.0 {
                    velocity += doublet_strength * surface.vortex_ring_unit_velocity(point, i_panel);
                }
            }
        }

        for body in &self.bodies {
            for bundle in &body.lifting_surfaces {
                let wake = &bundle.wake;

                for i_panel in 0..wake.nr_panels() {
                    let doublet_strength = wake.doublet_coefficients[i_panel];

                    if doublet_strength != 0.0 {
                        velocity += doublet_strength *
                            wake.surface.vortex_ring_unit_velocity(point, i_panel);
                    }
                }
            }
        }

        velocity
    }

    /// Total velocity at the given field point
    pub fn velocity(&self, point: SpatialVector) -> SpatialVector {
        self.freestream_velocity + self.disturbance_velocity(point)
    }

    /// Disturbance velocity potential at the given point, induced by all registered panels and
    /// all wake panels
    pub fn disturbance_velocity_potential(&self, point: SpatialVector) -> Float {
        let mut potential = 0.0;

        for binding in &self.bindings {
            let surface = self.surface(binding);

            for i_panel in 0..binding.nr_panels {
                let source_strength = self.source_coefficients[binding.panel_offset + i_panel];
                let doublet_strength = self.doublet_coefficients[binding.panel_offset + i_panel];

                let (source_influence, doublet_influence) =
                    surface.source_and_doublet_influence(point, i_panel);

                // The source influence is signed for the right-hand side of the Dirichlet
                // system; the physical source potential is its negative
                potential += doublet_strength * doublet_influence -
                    source_strength * source_influence;
            }
        }

        for body in &self.bodies {
            for bundle in &body.lifting_surfaces {
                let wake = &bundle.wake;

                for i_panel in 0..wake.nr_panels() {
                    let doublet_strength = wake.doublet_coefficients[i_panel];

                    if doublet_strength != 0.0 {
                        potential += doublet_strength * wake.doublet_influence(point, i_panel);
                    }
                }
            }
        }

        potential
    }

    /// Total velocity potential at the given field point
    pub fn velocity_potential(&self, point: SpatialVector) -> Float {
        self.freestream_velocity.dot(point) + self.disturbance_velocity_potential(point)
    }
}
