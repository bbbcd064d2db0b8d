
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Numeric tunables and mode switches for the panel method solver.
//!
//! The parameters are collected in a single immutable record that is handed to the solver at
//! construction time and read on the hot path. Changing parameters in the middle of a simulation
//! is not supported; build a new solver instead.

use serde::{Serialize, Deserialize};

use vortexmath::type_aliases::Float;

use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    /// Whether wake panels convect with the local velocity field. When disabled, the wake is
    /// repositioned as a static sheet behind the trailing edge at every step.
    #[serde(default="Parameters::default_convect_wake")]
    pub convect_wake: bool,
    /// The length of the static wake sheet behind the trailing edge
    #[serde(default="Parameters::default_static_wake_length")]
    pub static_wake_length: Float,
    /// Whether newly emitted wake nodes leave the trailing edge along its bisector instead of
    /// along the apparent velocity
    #[serde(default="Parameters::default_wake_emission_follow_bisector")]
    pub wake_emission_follow_bisector: bool,
    /// Fraction of the convection distance that newly emitted wake nodes are placed away from
    /// the trailing edge
    #[serde(default="Parameters::default_wake_emission_distance_factor")]
    pub wake_emission_distance_factor: Float,
    /// Whether the time derivative of the surface potential is retained in the pressure equation
    #[serde(default="Parameters::default_unsteady_bernoulli")]
    pub unsteady_bernoulli: bool,
    /// Whether surface velocities are evaluated with the Marcov formula instead of the plain
    /// tangential doublet gradient
    #[serde(default="Parameters::default_marcov_surface_velocity")]
    pub marcov_surface_velocity: bool,
    /// Maximum number of outer iterations for the boundary layer coupling loop
    #[serde(default="Parameters::default_max_boundary_layer_iterations")]
    pub max_boundary_layer_iterations: usize,
    /// Tolerance on the Euclidean norm of the doublet vector increment between outer iterations
    #[serde(default="Parameters::default_boundary_layer_iteration_tolerance")]
    pub boundary_layer_iteration_tolerance: Float,
    /// Maximum number of iterations for the linear equation solver
    #[serde(default="Parameters::default_linear_solver_max_iterations")]
    pub linear_solver_max_iterations: usize,
    /// Tolerance on the relative residual of the linear equation solver
    #[serde(default="Parameters::default_linear_solver_tolerance")]
    pub linear_solver_tolerance: Float,
}

impl Parameters {
    pub fn default_convect_wake() -> bool {true}
    pub fn default_static_wake_length() -> Float {100.0}
    pub fn default_wake_emission_follow_bisector() -> bool {true}
    pub fn default_wake_emission_distance_factor() -> Float {0.25}
    pub fn default_unsteady_bernoulli() -> bool {false}
    pub fn default_marcov_surface_velocity() -> bool {false}
    pub fn default_max_boundary_layer_iterations() -> usize {20}
    pub fn default_boundary_layer_iteration_tolerance() -> Float {1e-6}
    pub fn default_linear_solver_max_iterations() -> usize {1000}
    pub fn default_linear_solver_tolerance() -> Float {1e-8}

    /// Creates a new parameter record by parsing the string as a JSON object. The parsing is done
    /// using the serde_json library. Missing fields fall back to their defaults.
    pub fn new_from_string(string: &str) -> Result<Self, Error> {
        let parameters = serde_json::from_str(string)?;

        Ok(parameters)
    }

    /// Creates a new parameter record by reading the file at the given path and parsing the
    /// content with [Parameters::new_from_string].
    pub fn new_from_file(file_path: &str) -> Result<Self, Error> {
        let string = std::fs::read_to_string(file_path)?;

        Self::new_from_string(&string)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            convect_wake: Parameters::default_convect_wake(),
            static_wake_length: Parameters::default_static_wake_length(),
            wake_emission_follow_bisector: Parameters::default_wake_emission_follow_bisector(),
            wake_emission_distance_factor: Parameters::default_wake_emission_distance_factor(),
            unsteady_bernoulli: Parameters::default_unsteady_bernoulli(),
            marcov_surface_velocity: Parameters::default_marcov_surface_velocity(),
            max_boundary_layer_iterations: Parameters::default_max_boundary_layer_iterations(),
            boundary_layer_iteration_tolerance: Parameters::default_boundary_layer_iteration_tolerance(),
            linear_solver_max_iterations: Parameters::default_linear_solver_max_iterations(),
            linear_solver_tolerance: Parameters::default_linear_solver_tolerance(),
        }
    }
}
