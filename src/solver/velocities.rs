
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Post-processing of a solved doublet distribution: surface velocities, surface velocity
//! potentials and pressure coefficients.

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::Solver;

impl Solver {
    #[cfg(not(feature = "parallel"))]
    pub(crate) fn compute_surface_velocities(&mut self) {
        self.surface_velocities = (0..self.nr_panels_total)
            .map(|i_global| self.panel_surface_velocity(i_global))
            .collect();
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn compute_surface_velocities(&mut self) {
        self.surface_velocities = (0..self.nr_panels_total)
            .into_par_iter()
            .map(|i_global| self.panel_surface_velocity(i_global))
            .collect();
    }

    /// Surface velocity of one panel, relative to the body.
    ///
    /// The tangential disturbance velocity follows from the doublet distribution: either as its
    /// negative tangential gradient, or with the Marcov formula, which combines the full field
    /// disturbance velocity at the collocation point with a corrective half tangential gradient.
    /// The apparent velocity is subtracted and the normal component, carried by the source
    /// distribution, is projected out.
    fn panel_surface_velocity(&self, i_global_panel: usize) -> SpatialVector {
        let (binding, i_local) = self.locate_panel(i_global_panel);

        let body = &self.bodies[binding.body_index];
        let surface = self.surface(binding);

        let collocation_point = surface.panel_collocation_point(i_local, false);

        let tangential_gradient = surface.scalar_field_gradient(
            &self.doublet_coefficients,
            binding.panel_offset,
            i_local,
        );

        let mut velocity = if self.parameters.marcov_surface_velocity {
            self.disturbance_velocity(collocation_point) - 0.5 * tangential_gradient
        } else {
            -tangential_gradient
        };

        velocity -= body.kinematic_velocity(collocation_point) - self.freestream_velocity;

        let normal = surface.panel_normal(i_local);

        velocity - velocity.dot(normal) * normal
    }

    #[cfg(not(feature = "parallel"))]
    pub(crate) fn compute_surface_velocity_potentials(&mut self) {
        self.surface_velocity_potentials = (0..self.nr_panels_total)
            .map(|i_global| self.panel_surface_velocity_potential(i_global))
            .collect();
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn compute_surface_velocity_potentials(&mut self) {
        self.surface_velocity_potentials = (0..self.nr_panels_total)
            .into_par_iter()
            .map(|i_global| self.panel_surface_velocity_potential(i_global))
            .collect();
    }

    /// Surface velocity potential of one panel.
    ///
    /// In Marcov mode the full disturbance potential is evaluated at the above-surface
    /// collocation point - the potential jumps across the singularity sheet, so the evaluation
    /// point must stay on the flow side - and the free stream contribution is added. Otherwise
    /// the potential follows directly from the doublet strength: the disturbance potential on
    /// the outer side of a panel is the negative of its doublet strength, and the onset flow
    /// contributes through the apparent velocity.
    fn panel_surface_velocity_potential(&self, i_global_panel: usize) -> Float {
        let (binding, i_local) = self.locate_panel(i_global_panel);

        let surface = self.surface(binding);
        let collocation_point = surface.panel_collocation_point(i_local, false);

        if self.parameters.marcov_surface_velocity {
            let above_surface_point = surface.panel_collocation_point(i_local, true);

            return self.disturbance_velocity_potential(above_surface_point) +
                self.freestream_velocity.dot(above_surface_point);
        }

        let body = &self.bodies[binding.body_index];

        let apparent_velocity = body.kinematic_velocity(collocation_point) -
            self.freestream_velocity;

        -self.doublet_coefficients[i_global_panel] - apparent_velocity.dot(collocation_point)
    }

    #[cfg(not(feature = "parallel"))]
    pub(crate) fn compute_pressure_coefficients(&mut self, time_step: Float) {
        self.pressure_coefficients = (0..self.nr_panels_total)
            .map(|i_global| self.panel_pressure_coefficient(i_global, time_step))
            .collect();
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn compute_pressure_coefficients(&mut self, time_step: Float) {
        self.pressure_coefficients = (0..self.nr_panels_total)
            .into_par_iter()
            .map(|i_global| self.panel_pressure_coefficient(i_global, time_step))
            .collect();
    }

    /// Pressure coefficient of one panel from the Bernoulli equation, with the time derivative
    /// of the surface potential retained when the unsteady term is enabled and the time step is
    /// positive
    fn panel_pressure_coefficient(&self, i_global_panel: usize, time_step: Float) -> Float {
        let (binding, _) = self.locate_panel(i_global_panel);

        let body = &self.bodies[binding.body_index];

        let reference_velocity_squared =
            (body.linear_velocity - self.freestream_velocity).length_squared();

        if reference_velocity_squared == 0.0 {
            return 0.0;
        }

        let potential_time_derivative = if self.parameters.unsteady_bernoulli && time_step > 0.0 {
            (self.surface_velocity_potentials[i_global_panel] -
                self.previous_surface_velocity_potentials[i_global_panel]) / time_step
        } else {
            0.0
        };

        let velocity_squared = self.surface_velocities[i_global_panel].length_squared();

        1.0 - (velocity_squared + 2.0 * potential_time_derivative) / reference_velocity_squared
    }
}
