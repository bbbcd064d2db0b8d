// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

#![doc(html_no_source)]

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod parameters;
pub mod surface;
pub mod lifting_surface;
pub mod wake;
pub mod body;
pub mod boundary_layer;
pub mod solver;
pub mod surface_writer;
pub mod error;
pub mod io_utils;

/// Typical imports when using the panel method
pub mod prelude {
    pub use vortexmath::type_aliases::Float;
    pub use vortexmath::spatial_vector::SpatialVector;

    pub use crate::parameters::Parameters;
    pub use crate::surface::Surface;
    pub use crate::lifting_surface::LiftingSurface;
    pub use crate::wake::Wake;
    pub use crate::body::{Body, LiftingSurfaceBundle};
    pub use crate::boundary_layer::{BoundaryLayer, NoBoundaryLayer, PrescribedBoundaryLayer};
    pub use crate::solver::Solver;
    pub use crate::surface_writer::SurfaceWriter;
    pub use crate::surface_writer::vtk::VtkSurfaceWriter;
    pub use crate::surface_writer::gmsh::GmshSurfaceWriter;
    pub use crate::error::Error;
}
