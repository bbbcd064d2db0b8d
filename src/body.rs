
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A body: one kinematic frame grouping the surfaces that move with it.

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;

use crate::surface::Surface;
use crate::lifting_surface::LiftingSurface;
use crate::wake::Wake;
use crate::boundary_layer::{BoundaryLayer, NoBoundaryLayer};

#[derive(Debug)]
/// A lifting surface together with the wake it sheds and the boundary layer acting on it
pub struct LiftingSurfaceBundle {
    pub lifting_surface: LiftingSurface,
    pub wake: Wake,
    pub boundary_layer: Box<dyn BoundaryLayer>,
}

#[derive(Debug)]
/// A kinematic frame with exclusive ownership of its non-lifting surfaces and its lifting
/// surface bundles.
///
/// The kinematic state describes the motion of the body frame: a reference position, a linear
/// velocity and a rotational velocity around the reference position. Panel and node velocities
/// follow as `v + omega x r`. Callers advance the kinematic state (and move the surfaces
/// accordingly) between solver steps; wakes stay in the fluid frame and are only moved by the
/// wake convection of the solver.
pub struct Body {
    pub id: String,
    pub position: SpatialVector,
    pub linear_velocity: SpatialVector,
    pub rotational_velocity: SpatialVector,
    pub non_lifting_surfaces: Vec<Surface>,
    pub lifting_surfaces: Vec<LiftingSurfaceBundle>,
}

impl Body {
    pub fn new(id: String) -> Self {
        Self {
            id,
            position: SpatialVector::default(),
            linear_velocity: SpatialVector::default(),
            rotational_velocity: SpatialVector::default(),
            non_lifting_surfaces: Vec::new(),
            lifting_surfaces: Vec::new(),
        }
    }

    pub fn add_non_lifting_surface(&mut self, surface: Surface) {
        self.non_lifting_surfaces.push(surface);
    }

    /// Adds a lifting surface with a fresh wake and the null boundary layer
    pub fn add_lifting_surface(&mut self, lifting_surface: LiftingSurface) {
        self.add_lifting_surface_with_boundary_layer(
            lifting_surface,
            Box::new(NoBoundaryLayer)
        );
    }

    /// Adds a lifting surface with a fresh wake and the given boundary layer model
    pub fn add_lifting_surface_with_boundary_layer(
        &mut self,
        lifting_surface: LiftingSurface,
        boundary_layer: Box<dyn BoundaryLayer>,
    ) {
        let wake = Wake::new(&lifting_surface);

        self.lifting_surfaces.push(LiftingSurfaceBundle {
            lifting_surface,
            wake,
            boundary_layer,
        });
    }

    pub fn set_position(&mut self, position: SpatialVector) {
        self.position = position;
    }

    pub fn set_linear_velocity(&mut self, linear_velocity: SpatialVector) {
        self.linear_velocity = linear_velocity;
    }

    pub fn set_rotational_velocity(&mut self, rotational_velocity: SpatialVector) {
        self.rotational_velocity = rotational_velocity;
    }

    /// Kinematic velocity of a point moving with the body frame
    pub fn kinematic_velocity(&self, point: SpatialVector) -> SpatialVector {
        self.linear_velocity + self.rotational_velocity.cross(point - self.position)
    }

    /// Moves the body frame and all owned surfaces by the given displacement. Wakes are shed
    /// vorticity in the fluid frame and stay where they are.
    pub fn translate(&mut self, displacement: SpatialVector) {
        self.position += displacement;

        for surface in self.non_lifting_surfaces.iter_mut() {
            surface.translate(displacement);
        }

        for bundle in self.lifting_surfaces.iter_mut() {
            bundle.lifting_surface.surface.translate(displacement);
        }
    }

    /// Rotates the body and all owned surfaces around the given axis through the body position.
    /// Wakes stay in the fluid frame.
    pub fn rotate_around_axis(&mut self, angle: Float, axis: SpatialVector) {
        for surface in self.non_lifting_surfaces.iter_mut() {
            surface.rotate_around_axis(angle, axis, self.position);
        }

        for bundle in self.lifting_surfaces.iter_mut() {
            bundle.lifting_surface.surface.rotate_around_axis(angle, axis, self.position);
        }
    }
}
