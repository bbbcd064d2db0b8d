
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Boundary layer models coupled to the inviscid solution.
//!
//! A boundary layer acts on the solver through two per-panel quantities: a blowing velocity that
//! enters the source boundary condition as a surrogate for the displacement thickness, and a wall
//! friction stress that enters the force integration. The solver feeds surface velocities back
//! into the model through an outer fixed-point iteration.

use std::fmt::Debug;

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;

pub trait BoundaryLayer: Debug + Send + Sync {
    /// Updates the model from the surface velocities of the owning lifting surface, one entry
    /// per panel
    fn recalculate(&mut self, surface_velocities: &[SpatialVector]);

    /// Blowing velocity at the given panel, entering the source boundary condition
    fn blowing_velocity(&self, i_panel: usize) -> Float;

    /// Wall friction stress vector at the given panel, as force per unit area
    fn friction(&self, i_panel: usize) -> SpatialVector;

    /// Whether the model feeds anything back into the solution. The outer coupling iteration
    /// only runs for non-trivial models.
    fn is_nontrivial(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default)]
/// The null boundary layer: no blowing, no friction, nothing to iterate on
pub struct NoBoundaryLayer;

impl BoundaryLayer for NoBoundaryLayer {
    fn recalculate(&mut self, _surface_velocities: &[SpatialVector]) {}

    fn blowing_velocity(&self, _i_panel: usize) -> Float {
        0.0
    }

    fn friction(&self, _i_panel: usize) -> SpatialVector {
        SpatialVector::default()
    }

    fn is_nontrivial(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default)]
/// A boundary layer with externally prescribed blowing velocities and friction stresses.
///
/// Useful for coupling to a viscous code that runs outside the solver loop, and for exercising
/// the blowing velocity path of the source boundary condition. The prescribed values are not
/// changed by `recalculate`, so the outer iteration converges after a single pass.
pub struct PrescribedBoundaryLayer {
    pub blowing_velocities: Vec<Float>,
    pub frictions: Vec<SpatialVector>,
}

impl PrescribedBoundaryLayer {
    pub fn new(nr_panels: usize) -> Self {
        Self {
            blowing_velocities: vec![0.0; nr_panels],
            frictions: vec![SpatialVector::default(); nr_panels],
        }
    }
}

impl BoundaryLayer for PrescribedBoundaryLayer {
    fn recalculate(&mut self, _surface_velocities: &[SpatialVector]) {}

    fn blowing_velocity(&self, i_panel: usize) -> Float {
        self.blowing_velocities[i_panel]
    }

    fn friction(&self, i_panel: usize) -> SpatialVector {
        self.frictions[i_panel]
    }
}
