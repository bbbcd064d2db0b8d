
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Wake lifecycle: initialization, convection and static repositioning.

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::parameters::Parameters;
use crate::wake::Wake;

use super::Solver;

/// Displacement per unit time of a newly emitted wake node: a fraction of the convection
/// distance, either along the trailing edge bisector or against the apparent velocity
fn emission_displacement(
    parameters: &Parameters,
    apparent_velocity: SpatialVector,
    bisector: SpatialVector,
) -> SpatialVector {
    let emission_velocity = if parameters.wake_emission_follow_bisector {
        apparent_velocity.length() * bisector
    } else {
        -apparent_velocity
    };

    parameters.wake_emission_distance_factor * emission_velocity
}

/// Direction of the static wake sheet: downstream of the apparent body velocity, falling back to
/// the trailing edge bisector when the body is at rest relative to the fluid
fn static_wake_direction(
    apparent_velocity: SpatialVector,
    bisector: SpatialVector,
) -> SpatialVector {
    if apparent_velocity.length_squared() > 0.0 {
        -apparent_velocity.normalize()
    } else {
        bisector
    }
}

impl Solver {
    /// Establishes the two-row wake invariant behind every trailing edge: one strip of panels
    /// whose doublet strengths the first solve will determine through the Kutta condition.
    ///
    /// Each wake is rebuilt from its lifting surface, its first node row is positioned by one
    /// emission displacement step (convecting mode) or at the static wake length downstream
    /// (static mode), and an empty layer is appended on the trailing edge.
    pub fn initialize_wakes(&mut self, time_step: Float) {
        for i_body in 0..self.bodies.len() {
            let position = self.bodies[i_body].position;
            let linear_velocity = self.bodies[i_body].linear_velocity;
            let rotational_velocity = self.bodies[i_body].rotational_velocity;

            let freestream_velocity = self.freestream_velocity;

            for i_lifting in 0..self.bodies[i_body].lifting_surfaces.len() {
                let bundle = &mut self.bodies[i_body].lifting_surfaces[i_lifting];

                bundle.wake = Wake::new(&bundle.lifting_surface);

                for i_spanwise in 0..bundle.wake.nr_spanwise_nodes {
                    let trailing_edge_point = bundle.lifting_surface.trailing_edge_point(i_spanwise);
                    let bisector = bundle.lifting_surface.trailing_edge_bisector(i_spanwise);

                    let kinematic_velocity = linear_velocity +
                        rotational_velocity.cross(trailing_edge_point - position);
                    let apparent_velocity = kinematic_velocity - freestream_velocity;

                    bundle.wake.surface.nodes[i_spanwise] = if self.parameters.convect_wake {
                        trailing_edge_point + time_step *
                            emission_displacement(&self.parameters, apparent_velocity, bisector)
                    } else {
                        trailing_edge_point + self.parameters.static_wake_length *
                            static_wake_direction(apparent_velocity, bisector)
                    };
                }

                bundle.wake.add_layer(&bundle.lifting_surface);
            }
        }
    }

    /// Convects the wakes with the current velocity field and emits a fresh layer, or
    /// repositions the static wake sheets.
    ///
    /// In convecting mode the full velocity field is sampled at every wake node first; the
    /// trailing edge coincident nodes are then displaced off the trailing edge with the emission
    /// displacement function, the remaining nodes convect with their cached velocities, and a
    /// fresh layer is appended.
    pub fn update_wakes(&mut self, time_step: Float) {
        if self.parameters.convect_wake {
            self.convect_wakes(time_step);
        } else {
            self.reposition_static_wakes();
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn sample_wake_node_velocities(&self, wake: &Wake) -> Vec<SpatialVector> {
        wake.surface.nodes.iter()
            .map(|&node| self.velocity(node))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn sample_wake_node_velocities(&self, wake: &Wake) -> Vec<SpatialVector> {
        wake.surface.nodes.par_iter()
            .map(|&node| self.velocity(node))
            .collect()
    }

    fn convect_wakes(&mut self, time_step: Float) {
        // Sample the velocity field at every wake node before any node moves
        let mut cached_velocities: Vec<Vec<SpatialVector>> = Vec::new();

        for body in &self.bodies {
            for bundle in &body.lifting_surfaces {
                cached_velocities.push(self.sample_wake_node_velocities(&bundle.wake));
            }
        }

        let mut i_wake = 0;

        for i_body in 0..self.bodies.len() {
            let position = self.bodies[i_body].position;
            let linear_velocity = self.bodies[i_body].linear_velocity;
            let rotational_velocity = self.bodies[i_body].rotational_velocity;

            let freestream_velocity = self.freestream_velocity;

            for i_lifting in 0..self.bodies[i_body].lifting_surfaces.len() {
                let cached = &cached_velocities[i_wake];
                i_wake += 1;

                let bundle = &mut self.bodies[i_body].lifting_surfaces[i_lifting];

                let nr_nodes = bundle.wake.nr_nodes();
                let nr_spanwise_nodes = bundle.wake.nr_spanwise_nodes;
                let first_trailing_edge_node = nr_nodes - nr_spanwise_nodes;

                // The newest row leaves the trailing edge by the displacement function, before
                // the remaining nodes convect
                let emitted_positions: Vec<SpatialVector> = (0..nr_spanwise_nodes)
                    .map(|i_spanwise| {
                        let trailing_edge_point =
                            bundle.lifting_surface.trailing_edge_point(i_spanwise);
                        let bisector = bundle.lifting_surface.trailing_edge_bisector(i_spanwise);

                        let kinematic_velocity = linear_velocity +
                            rotational_velocity.cross(trailing_edge_point - position);
                        let apparent_velocity = kinematic_velocity - freestream_velocity;

                        trailing_edge_point + time_step *
                            emission_displacement(&self.parameters, apparent_velocity, bisector)
                    })
                    .collect();

                for i_spanwise in 0..nr_spanwise_nodes {
                    bundle.wake.surface.nodes[first_trailing_edge_node + i_spanwise] =
                        emitted_positions[i_spanwise];
                }

                Self::convect_wake_nodes(
                    &mut bundle.wake.surface.nodes[..first_trailing_edge_node],
                    &cached[..first_trailing_edge_node],
                    time_step,
                );

                bundle.wake.update_properties(time_step);
                bundle.wake.add_layer(&bundle.lifting_surface);
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn convect_wake_nodes(
        nodes: &mut [SpatialVector],
        velocities: &[SpatialVector],
        time_step: Float,
    ) {
        for (node, &velocity) in nodes.iter_mut().zip(velocities.iter()) {
            *node += velocity * time_step;
        }
    }

    #[cfg(feature = "parallel")]
    fn convect_wake_nodes(
        nodes: &mut [SpatialVector],
        velocities: &[SpatialVector],
        time_step: Float,
    ) {
        nodes.par_iter_mut()
            .zip(velocities.par_iter())
            .for_each(|(node, &velocity)| {
                *node += velocity * time_step;
            });
    }

    /// Ignores the velocity field: the newest node row is pinned to the trailing edge and all
    /// earlier rows are placed one static wake length downstream of it
    fn reposition_static_wakes(&mut self) {
        for i_body in 0..self.bodies.len() {
            let position = self.bodies[i_body].position;
            let linear_velocity = self.bodies[i_body].linear_velocity;
            let rotational_velocity = self.bodies[i_body].rotational_velocity;

            let freestream_velocity = self.freestream_velocity;

            for i_lifting in 0..self.bodies[i_body].lifting_surfaces.len() {
                let bundle = &mut self.bodies[i_body].lifting_surfaces[i_lifting];

                let nr_rows = bundle.wake.nr_node_rows();
                let nr_spanwise_nodes = bundle.wake.nr_spanwise_nodes;

                for i_spanwise in 0..nr_spanwise_nodes {
                    let trailing_edge_point =
                        bundle.lifting_surface.trailing_edge_point(i_spanwise);
                    let bisector = bundle.lifting_surface.trailing_edge_bisector(i_spanwise);

                    let kinematic_velocity = linear_velocity +
                        rotational_velocity.cross(trailing_edge_point - position);
                    let apparent_velocity = kinematic_velocity - freestream_velocity;

                    let upstream_point = trailing_edge_point +
                        self.parameters.static_wake_length *
                        static_wake_direction(apparent_velocity, bisector);

                    for i_row in 0..nr_rows {
                        let i_node = bundle.wake.node_index(i_row, i_spanwise);

                        bundle.wake.surface.nodes[i_node] = if i_row + 1 == nr_rows {
                            trailing_edge_point
                        } else {
                            upstream_point
                        };
                    }
                }

                bundle.wake.compute_geometry();
            }
        }
    }
}
