
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! The unsteady source-doublet panel method solver.
//!
//! The solver owns the bodies it is given and keeps dense per-panel coefficient vectors for all
//! registered non-wake surfaces, indexed by a global panel offset scheme: surfaces appear in the
//! order their bodies were added, and within a body the non-lifting surfaces precede the lifting
//! surfaces.
//!
//! A time step consists of a call to [Solver::solve], which runs the boundary layer coupled
//! Dirichlet solve and the pressure evaluation, followed by a call to [Solver::update_wakes].
//! The caller advances the body kinematics in between steps. Before the first step,
//! [Solver::initialize_wakes] must be called once to establish the first wake layer behind every
//! trailing edge.

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;
use vortexmath::matrix::linalg::IterativeSolverSettings;

use crate::parameters::Parameters;
use crate::surface::Surface;
use crate::body::Body;
use crate::error::Error;

pub mod assembly;
pub mod velocities;
pub mod induced_velocity_calc;
pub mod forces_and_moments;
pub mod wakes;
pub mod output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which of a body's surface lists a registered surface lives in
pub enum SurfaceSlot {
    NonLifting(usize),
    Lifting(usize),
}

#[derive(Debug, Clone, Copy)]
/// Precomputed location of a registered surface in the global panel offset scheme
pub struct SurfaceBinding {
    pub body_index: usize,
    pub slot: SurfaceSlot,
    pub panel_offset: usize,
    pub nr_panels: usize,
}

#[derive(Debug)]
pub struct Solver {
    pub parameters: Parameters,
    pub freestream_velocity: SpatialVector,
    pub fluid_density: Float,
    /// Doublet strength of every registered panel; the primary unknown
    pub doublet_coefficients: Vec<Float>,
    /// Source strength of every registered panel, prescribed by the boundary condition
    pub source_coefficients: Vec<Float>,
    /// Surface velocity potential of every registered panel
    pub surface_velocity_potentials: Vec<Float>,
    /// Surface velocity potentials of the previous time step, for the unsteady pressure term
    pub previous_surface_velocity_potentials: Vec<Float>,
    /// Pressure coefficient of every registered panel
    pub pressure_coefficients: Vec<Float>,
    /// Surface velocity of every registered panel
    pub surface_velocities: Vec<SpatialVector>,
    log_folder: String,
    bodies: Vec<Body>,
    bindings: Vec<SurfaceBinding>,
    nr_panels_total: usize,
}

impl Solver {
    pub fn new(parameters: Parameters) -> Self {
        Self {
            parameters,
            freestream_velocity: SpatialVector::default(),
            fluid_density: 1.0,
            doublet_coefficients: Vec::new(),
            source_coefficients: Vec::new(),
            surface_velocity_potentials: Vec::new(),
            previous_surface_velocity_potentials: Vec::new(),
            pressure_coefficients: Vec::new(),
            surface_velocities: Vec::new(),
            log_folder: String::new(),
            bodies: Vec::new(),
            bindings: Vec::new(),
            nr_panels_total: 0,
        }
    }

    pub fn set_freestream_velocity(&mut self, freestream_velocity: SpatialVector) {
        self.freestream_velocity = freestream_velocity;
    }

    pub fn set_fluid_density(&mut self, fluid_density: Float) {
        self.fluid_density = fluid_density;
    }

    pub fn set_log_folder(&mut self, log_folder: String) {
        self.log_folder = log_folder;
    }

    /// Registers a body and takes ownership of it.
    ///
    /// The body's non-lifting surfaces are appended to the global offset scheme first, then its
    /// lifting surfaces. All coefficient vectors are resized and zeroed. Adding the same geometry
    /// twice duplicates its entries.
    pub fn add_body(&mut self, body: Body) {
        let body_index = self.bodies.len();

        for i_surface in 0..body.non_lifting_surfaces.len() {
            let nr_panels = body.non_lifting_surfaces[i_surface].nr_panels();

            self.bindings.push(SurfaceBinding {
                body_index,
                slot: SurfaceSlot::NonLifting(i_surface),
                panel_offset: self.nr_panels_total,
                nr_panels,
            });

            self.nr_panels_total += nr_panels;
        }

        for i_surface in 0..body.lifting_surfaces.len() {
            let nr_panels = body.lifting_surfaces[i_surface].lifting_surface.nr_panels();

            self.bindings.push(SurfaceBinding {
                body_index,
                slot: SurfaceSlot::Lifting(i_surface),
                panel_offset: self.nr_panels_total,
                nr_panels,
            });

            self.nr_panels_total += nr_panels;
        }

        self.bodies.push(body);

        self.doublet_coefficients = vec![0.0; self.nr_panels_total];
        self.source_coefficients = vec![0.0; self.nr_panels_total];
        self.surface_velocity_potentials = vec![0.0; self.nr_panels_total];
        self.previous_surface_velocity_potentials = vec![0.0; self.nr_panels_total];
        self.pressure_coefficients = vec![0.0; self.nr_panels_total];
        self.surface_velocities = vec![SpatialVector::default(); self.nr_panels_total];
    }

    pub fn nr_bodies(&self) -> usize {
        self.bodies.len()
    }

    pub fn body(&self, body_index: usize) -> &Body {
        &self.bodies[body_index]
    }

    /// Mutable access to a body, for advancing its kinematic state between steps
    pub fn body_mut(&mut self, body_index: usize) -> &mut Body {
        &mut self.bodies[body_index]
    }

    pub fn nr_panels(&self) -> usize {
        self.nr_panels_total
    }

    pub fn nr_surfaces(&self) -> usize {
        self.bindings.len()
    }

    pub fn surface_bindings(&self) -> &[SurfaceBinding] {
        &self.bindings
    }

    /// Resolves a binding to its surface
    pub fn surface(&self, binding: &SurfaceBinding) -> &Surface {
        let body = &self.bodies[binding.body_index];

        match binding.slot {
            SurfaceSlot::NonLifting(i_surface) => &body.non_lifting_surfaces[i_surface],
            SurfaceSlot::Lifting(i_surface) => {
                &body.lifting_surfaces[i_surface].lifting_surface.surface
            },
        }
    }

    /// Index of the body owning the surface with the given identity, covering both registered
    /// surfaces and their wakes. Resolved against the live bodies, so it stays correct when a
    /// wake is rebuilt.
    pub fn body_index_of_surface(&self, surface_id: usize) -> Option<usize> {
        for (body_index, body) in self.bodies.iter().enumerate() {
            for surface in &body.non_lifting_surfaces {
                if surface.id == surface_id {
                    return Some(body_index);
                }
            }

            for bundle in &body.lifting_surfaces {
                if bundle.lifting_surface.surface.id == surface_id ||
                    bundle.wake.surface.id == surface_id
                {
                    return Some(body_index);
                }
            }
        }

        None
    }

    /// Locates the surface binding and local panel index of a global panel index
    pub fn locate_panel(&self, i_global_panel: usize) -> (&SurfaceBinding, usize) {
        for binding in &self.bindings {
            if i_global_panel < binding.panel_offset + binding.nr_panels {
                return (binding, i_global_panel - binding.panel_offset);
            }
        }

        panic!("Global panel index {} out of bounds", i_global_panel);
    }

    fn checked_panel_offset(&self, i_surface: usize, i_panel: usize) -> Option<usize> {
        if i_surface >= self.bindings.len() || i_panel >= self.bindings[i_surface].nr_panels {
            eprintln!(
                "Solver: no panel {} on surface {} is registered; returning zero",
                i_panel, i_surface
            );

            return None;
        }

        Some(self.bindings[i_surface].panel_offset + i_panel)
    }

    /// Doublet coefficient of a panel, addressed by registered surface and panel index. An
    /// unknown pair is reported on standard error and yields zero.
    pub fn doublet_coefficient(&self, i_surface: usize, i_panel: usize) -> Float {
        match self.checked_panel_offset(i_surface, i_panel) {
            Some(offset) => self.doublet_coefficients[offset],
            None => 0.0,
        }
    }

    /// Source coefficient of a panel; see [Solver::doublet_coefficient] for the lookup policy
    pub fn source_coefficient(&self, i_surface: usize, i_panel: usize) -> Float {
        match self.checked_panel_offset(i_surface, i_panel) {
            Some(offset) => self.source_coefficients[offset],
            None => 0.0,
        }
    }

    /// Surface velocity potential of a panel; see [Solver::doublet_coefficient] for the lookup
    /// policy
    pub fn surface_velocity_potential(&self, i_surface: usize, i_panel: usize) -> Float {
        match self.checked_panel_offset(i_surface, i_panel) {
            Some(offset) => self.surface_velocity_potentials[offset],
            None => 0.0,
        }
    }

    /// Pressure coefficient of a panel; see [Solver::doublet_coefficient] for the lookup policy
    pub fn pressure_coefficient(&self, i_surface: usize, i_panel: usize) -> Float {
        match self.checked_panel_offset(i_surface, i_panel) {
            Some(offset) => self.pressure_coefficients[offset],
            None => 0.0,
        }
    }

    /// Surface velocity of a panel; see [Solver::doublet_coefficient] for the lookup policy
    pub fn surface_velocity(&self, i_surface: usize, i_panel: usize) -> SpatialVector {
        match self.checked_panel_offset(i_surface, i_panel) {
            Some(offset) => self.surface_velocities[offset],
            None => SpatialVector::default(),
        }
    }

    /// Runs one time step of the coupled Dirichlet solve and evaluates the surface pressures.
    ///
    /// The outer loop re-solves the system with updated blowing velocities until the doublet
    /// vector increment drops below the coupling tolerance. Bodies without a non-trivial
    /// boundary layer converge in a single pass. A diverging linear solve aborts the step with an
    /// error and without rolling back the solver state.
    ///
    /// When wake convection is enabled, the pressure evaluation recomputes the source
    /// distribution without the influence of the already shed wake panels: the doublet solve
    /// couples the shed vorticity into the Neumann condition, while the pressure treats it as
    /// passive shedding that the velocity field has already paid for.
    pub fn solve(&mut self, time_step: Float) -> Result<(), Error> {
        let linear_solver_settings = IterativeSolverSettings {
            tolerance: self.parameters.linear_solver_tolerance,
            max_iterations: self.parameters.linear_solver_max_iterations,
        };

        let mut iteration = 0;

        loop {
            self.source_coefficients = self.compute_source_coefficients(true);

            let (doublet_influence_matrix, source_influence_matrix) =
                self.assemble_influence_system();

            let rhs = source_influence_matrix.vector_multiply(&self.source_coefficients);

            let solution = doublet_influence_matrix.solve_bicgstab(
                &rhs,
                &self.doublet_coefficients,
                &linear_solver_settings,
            );

            if !solution.converged {
                eprintln!(
                    "Solver: linear solver diverged after {} iterations with an estimated \
                     relative residual of {}",
                    solution.iterations, solution.residual
                );

                return Err(Error::LinearSolverDiverged {
                    iterations: solution.iterations,
                    residual: solution.residual,
                });
            }

            println!(
                "Solver: doublet distribution solved in {} iterations, estimated relative \
                 residual {:e}",
                solution.iterations, solution.residual
            );

            // Convergence of the outer coupling loop is measured on the doublet increment, but
            // not on the first pass, where the baseline is stale from the previous solve call
            let mut converged = false;

            if iteration > 0 {
                let increment_norm = self.doublet_coefficients.iter()
                    .zip(solution.x.iter())
                    .map(|(old, new)| (new - old) * (new - old))
                    .sum::<Float>()
                    .sqrt();

                if increment_norm < self.parameters.boundary_layer_iteration_tolerance {
                    converged = true;
                }
            }

            self.doublet_coefficients = solution.x;

            self.close_kutta_condition();
            self.compute_surface_velocities();

            if converged {
                break;
            }

            if iteration > self.parameters.max_boundary_layer_iterations {
                eprintln!(
                    "Solver: boundary layer coupling did not converge within {} iterations; \
                     continuing with the current doublet distribution",
                    self.parameters.max_boundary_layer_iterations
                );

                break;
            }

            if !self.recalculate_boundary_layers() {
                break;
            }

            iteration += 1;
        }

        if self.parameters.convect_wake {
            self.source_coefficients = self.compute_source_coefficients(false);
        }

        self.compute_surface_velocity_potentials();
        self.compute_pressure_coefficients(time_step);

        self.previous_surface_velocity_potentials = self.surface_velocity_potentials.clone();

        Ok(())
    }

    /// Writes the newest wake strip doublet strengths from the trailing edge doublet jump
    fn close_kutta_condition(&mut self) {
        for binding in &self.bindings {
            let i_lifting = match binding.slot {
                SurfaceSlot::Lifting(i_lifting) => i_lifting,
                SurfaceSlot::NonLifting(_) => continue,
            };

            let bundle = &mut self.bodies[binding.body_index].lifting_surfaces[i_lifting];

            let strip_start = bundle.wake.newest_strip().start;

            for i_spanwise in 0..bundle.lifting_surface.nr_spanwise_panels() {
                let i_upper = binding.panel_offset +
                    bundle.lifting_surface.trailing_edge_upper_panel(i_spanwise);
                let i_lower = binding.panel_offset +
                    bundle.lifting_surface.trailing_edge_lower_panel(i_spanwise);

                bundle.wake.doublet_coefficients[strip_start + i_spanwise] =
                    self.doublet_coefficients[i_upper] - self.doublet_coefficients[i_lower];
            }
        }
    }

    /// Feeds the current surface velocities back into the non-trivial boundary layers. Returns
    /// whether any non-trivial boundary layer existed.
    fn recalculate_boundary_layers(&mut self) -> bool {
        let mut any_nontrivial = false;

        for binding in &self.bindings {
            let i_lifting = match binding.slot {
                SurfaceSlot::Lifting(i_lifting) => i_lifting,
                SurfaceSlot::NonLifting(_) => continue,
            };

            let bundle = &mut self.bodies[binding.body_index].lifting_surfaces[i_lifting];

            if !bundle.boundary_layer.is_nontrivial() {
                continue;
            }

            any_nontrivial = true;

            let velocities = &self.surface_velocities[
                binding.panel_offset..binding.panel_offset + binding.nr_panels
            ];

            bundle.boundary_layer.recalculate(velocities);
        }

        any_nontrivial
    }
}

#[cfg(test)]
mod tests;
