
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Assembly of the source boundary condition and the dense influence coefficient system.

use vortexmath::type_aliases::Float;
use vortexmath::matrix::Matrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{Solver, SurfaceSlot};

impl Solver {
    #[cfg(not(feature = "parallel"))]
    /// Computes the source coefficients of all registered panels
    pub(crate) fn compute_source_coefficients(&self, include_wake_influence: bool) -> Vec<Float> {
        (0..self.nr_panels_total)
            .map(|i_global| self.panel_source_coefficient(i_global, include_wake_influence))
            .collect()
    }

    #[cfg(feature = "parallel")]
    /// Computes the source coefficients of all registered panels
    pub(crate) fn compute_source_coefficients(&self, include_wake_influence: bool) -> Vec<Float> {
        (0..self.nr_panels_total)
            .into_par_iter()
            .map(|i_global| self.panel_source_coefficient(i_global, include_wake_influence))
            .collect()
    }

    /// Source coefficient of one panel: the normal component of the apparent panel velocity,
    /// less the boundary layer blowing velocity.
    ///
    /// With `include_wake_influence` set and wake convection enabled, the velocity induced by all
    /// already shed wake panels - everything but the newest strip - is folded into the apparent
    /// velocity. The inviscid solve uses this form; the pressure evaluation recomputes the
    /// distribution without it (the Giesing formulation).
    fn panel_source_coefficient(&self, i_global_panel: usize, include_wake_influence: bool) -> Float {
        let (binding, i_local) = self.locate_panel(i_global_panel);

        let body = &self.bodies[binding.body_index];
        let surface = self.surface(binding);

        let collocation_point = surface.panel_collocation_point(i_local, false);

        let mut velocity = body.kinematic_velocity(collocation_point) - self.freestream_velocity;

        if self.parameters.convect_wake && include_wake_influence {
            for other_body in &self.bodies {
                for bundle in &other_body.lifting_surfaces {
                    let wake = &bundle.wake;

                    for i_wake_panel in wake.frozen_panels() {
                        let strength = wake.doublet_coefficients[i_wake_panel];

                        if strength != 0.0 {
                            velocity -= strength *
                                wake.surface.vortex_ring_unit_velocity_on(surface, i_local, i_wake_panel);
                        }
                    }
                }
            }
        }

        let blowing_velocity = match binding.slot {
            SurfaceSlot::Lifting(i_lifting) => {
                body.lifting_surfaces[i_lifting].boundary_layer.blowing_velocity(i_local)
            },
            SurfaceSlot::NonLifting(_) => 0.0,
        };

        velocity.dot(surface.panel_normal(i_local)) - blowing_velocity
    }

    #[cfg(not(feature = "parallel"))]
    fn compute_influence_rows(&self) -> Vec<(Vec<Float>, Vec<Float>)> {
        (0..self.nr_panels_total)
            .map(|i_global| self.influence_matrix_row(i_global))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn compute_influence_rows(&self) -> Vec<(Vec<Float>, Vec<Float>)> {
        (0..self.nr_panels_total)
            .into_par_iter()
            .map(|i_global| self.influence_matrix_row(i_global))
            .collect()
    }

    /// Assembles the dense doublet and source influence matrices `(A, Sigma)` of the Dirichlet
    /// formulation `A mu = Sigma sigma`.
    ///
    /// The doublet influence of the newest wake strip of every lifting surface is folded into
    /// the columns of the trailing edge panels: added to the upper column and subtracted from
    /// the lower one, which ties the wake strength to the trailing edge doublet jump.
    pub(crate) fn assemble_influence_system(&self) -> (Matrix<Float>, Matrix<Float>) {
        let nr_panels = self.nr_panels_total;

        let rows = self.compute_influence_rows();

        let mut doublet_influence_matrix = Matrix::new_default([nr_panels, nr_panels]);
        let mut source_influence_matrix = Matrix::new_default([nr_panels, nr_panels]);

        for (i_row, (doublet_row, source_row)) in rows.into_iter().enumerate() {
            doublet_influence_matrix.row_mut(i_row).copy_from_slice(&doublet_row);
            source_influence_matrix.row_mut(i_row).copy_from_slice(&source_row);
        }

        (doublet_influence_matrix, source_influence_matrix)
    }

    /// One row of the influence system: the influence of every registered panel and every newest
    /// wake strip panel on the observing panel's collocation point
    fn influence_matrix_row(&self, i_global_panel: usize) -> (Vec<Float>, Vec<Float>) {
        let (observer_binding, i_observer) = self.locate_panel(i_global_panel);
        let observer_surface = self.surface(observer_binding);

        let mut doublet_row = vec![0.0; self.nr_panels_total];
        let mut source_row = vec![0.0; self.nr_panels_total];

        for binding in &self.bindings {
            let surface = self.surface(binding);

            for i_panel in 0..binding.nr_panels {
                let (source_influence, doublet_influence) = surface
                    .source_and_doublet_influence_on(observer_surface, i_observer, i_panel);

                doublet_row[binding.panel_offset + i_panel] = doublet_influence;
                source_row[binding.panel_offset + i_panel] = source_influence;
            }

            let i_lifting = match binding.slot {
                SurfaceSlot::Lifting(i_lifting) => i_lifting,
                SurfaceSlot::NonLifting(_) => continue,
            };

            let bundle = &self.bodies[binding.body_index].lifting_surfaces[i_lifting];

            for (i_spanwise, i_wake_panel) in bundle.wake.newest_strip().enumerate() {
                let wake_influence = bundle.wake.doublet_influence_on(
                    observer_surface,
                    i_observer,
                    i_wake_panel,
                );

                let i_upper = binding.panel_offset +
                    bundle.lifting_surface.trailing_edge_upper_panel(i_spanwise);
                let i_lower = binding.panel_offset +
                    bundle.lifting_surface.trailing_edge_lower_panel(i_spanwise);

                doublet_row[i_upper] += wake_influence;
                doublet_row[i_lower] -= wake_influence;
            }
        }

        (doublet_row, source_row)
    }
}
