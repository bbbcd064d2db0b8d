
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Integrated forces and moments on the registered bodies.

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;

use super::{Solver, SurfaceBinding, SurfaceSlot};

impl Solver {
    fn dynamic_pressure(&self, body_index: usize) -> Float {
        let body = &self.bodies[body_index];

        0.5 * self.fluid_density *
            (body.linear_velocity - self.freestream_velocity).length_squared()
    }

    /// Force contribution of one panel: the pressure acting against the outward normal, plus the
    /// wall friction stress over the panel area
    fn panel_force(
        &self,
        binding: &SurfaceBinding,
        i_local_panel: usize,
        dynamic_pressure: Float,
    ) -> SpatialVector {
        let surface = self.surface(binding);

        let area = surface.panel_surface_area(i_local_panel);
        let normal = surface.panel_normal(i_local_panel);

        let pressure_coefficient =
            self.pressure_coefficients[binding.panel_offset + i_local_panel];

        let mut force = -dynamic_pressure * area * pressure_coefficient * normal;

        if let SurfaceSlot::Lifting(i_lifting) = binding.slot {
            let boundary_layer =
                &self.bodies[binding.body_index].lifting_surfaces[i_lifting].boundary_layer;

            force += area * boundary_layer.friction(i_local_panel);
        }

        force
    }

    /// Integrated force on a body from the current pressure distribution and wall friction
    pub fn force(&self, body_index: usize) -> SpatialVector {
        let dynamic_pressure = self.dynamic_pressure(body_index);

        let mut force = SpatialVector::default();

        for binding in &self.bindings {
            if binding.body_index != body_index {
                continue;
            }

            for i_panel in 0..binding.nr_panels {
                force += self.panel_force(binding, i_panel, dynamic_pressure);
            }
        }

        force
    }

    /// Integrated moment on a body around the given reference point
    pub fn moment(&self, body_index: usize, reference_point: SpatialVector) -> SpatialVector {
        let dynamic_pressure = self.dynamic_pressure(body_index);

        let mut moment = SpatialVector::default();

        for binding in &self.bindings {
            if binding.body_index != body_index {
                continue;
            }

            let surface = self.surface(binding);

            for i_panel in 0..binding.nr_panels {
                let force = self.panel_force(binding, i_panel, dynamic_pressure);

                let moment_arm = surface.panel_collocation_point(i_panel, false) - reference_point;

                moment += moment_arm.cross(force);
            }
        }

        moment
    }
}
