
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Tests of the Kutta condition, the wake lifecycle and the boundary layer coupling on a
//! rectangular wing.

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;

use crate::prelude::*;

use super::test_setup::{rectangular_wing, freestream_at_angle_of_attack};

fn wing_solver(angle_of_attack: Float, convect_wake: bool) -> Solver {
    let mut body = Body::new("wing".to_string());

    body.add_lifting_surface(rectangular_wing(6, 5, 4.0, 0.1));

    let mut parameters = Parameters::default();

    parameters.convect_wake = convect_wake;

    let mut solver = Solver::new(parameters);

    solver.add_body(body);
    solver.set_freestream_velocity(freestream_at_angle_of_attack(angle_of_attack));
    solver.set_fluid_density(1.0);

    solver.initialize_wakes(1.0);

    solver
}

/// Newest wake strip doublet strengths against the trailing edge doublet jump, which must match
/// exactly
fn assert_kutta_closure(solver: &Solver) {
    let bundle = &solver.body(0).lifting_surfaces[0];

    let strip_start = bundle.wake.newest_strip().start;

    for i_spanwise in 0..bundle.lifting_surface.nr_spanwise_panels() {
        let doublet_jump =
            solver.doublet_coefficient(0, bundle.lifting_surface.trailing_edge_upper_panel(i_spanwise)) -
            solver.doublet_coefficient(0, bundle.lifting_surface.trailing_edge_lower_panel(i_spanwise));

        assert_eq!(
            bundle.wake.doublet_coefficients[strip_start + i_spanwise],
            doublet_jump,
            "Kutta closure violated at spanwise station {}", i_spanwise
        );
    }
}

#[test]
fn test_kutta_closure_law() {
    let mut solver = wing_solver(5.0_f64.to_radians() as Float, false);

    solver.solve(1.0).unwrap();
    assert_kutta_closure(&solver);

    solver.update_wakes(1.0);

    solver.solve(1.0).unwrap();
    assert_kutta_closure(&solver);
}

#[test]
fn test_symmetric_wing_at_zero_incidence() {
    let mut solver = wing_solver(0.0, false);

    solver.solve(1.0).unwrap();

    // No lift, and no doublet jump across any trailing edge station
    let force = solver.force(0);

    assert!(force[2].abs() < 1e-3, "Lift at zero incidence is {}", force[2]);

    let bundle = &solver.body(0).lifting_surfaces[0];

    for strength in &bundle.wake.doublet_coefficients {
        assert!(strength.abs() < 1e-4);
    }

    // The pressure distribution is symmetric between the upper and the lower side: chordwise
    // panel i mirrors panel nc - 1 - i within each strip
    let nr_chordwise = bundle.lifting_surface.nr_chordwise_panels;

    for i_strip in 0..bundle.lifting_surface.nr_spanwise_panels() {
        for i_chord in 0..nr_chordwise / 2 {
            let lower = i_strip * nr_chordwise + i_chord;
            let upper = i_strip * nr_chordwise + nr_chordwise - 1 - i_chord;

            let difference = solver.pressure_coefficient(0, lower) -
                solver.pressure_coefficient(0, upper);

            assert!(
                difference.abs() < 1e-4,
                "Pressure asymmetry of {} between panels {} and {}", difference, lower, upper
            );
        }
    }
}

#[test]
fn test_wing_at_incidence_produces_lift() {
    let angle_of_attack = 5.0_f64.to_radians() as Float;

    let mut solver = wing_solver(angle_of_attack, false);

    solver.solve(1.0).unwrap();

    let force = solver.force(0);

    // Lift coefficient against the classic finite wing estimate 2 pi alpha / (1 + 2 / AR),
    // with a generous band for the coarse grid
    let dynamic_pressure = 0.5;
    let wing_area = 4.0;

    let lift_coefficient = force[2] / (dynamic_pressure * wing_area);

    dbg!(lift_coefficient);

    assert!(
        lift_coefficient > 0.15 && lift_coefficient < 0.6,
        "Lift coefficient is {}", lift_coefficient
    );

    // The bound circulation sense: negative doublet jump at the trailing edge for positive lift
    let bundle = &solver.body(0).lifting_surfaces[0];

    for strength in &bundle.wake.doublet_coefficients {
        assert!(*strength < 0.0);
    }
}

#[test]
fn test_convecting_wake_lifecycle() {
    let angle_of_attack = 5.0_f64.to_radians() as Float;

    let mut solver = wing_solver(angle_of_attack, true);

    let nr_spanwise = solver.body(0).lifting_surfaces[0].wake.nr_spanwise_panels;

    assert_eq!(solver.body(0).lifting_surfaces[0].wake.nr_panels(), nr_spanwise);

    solver.solve(1.0).unwrap();

    let first_strip: Vec<Float> =
        solver.body(0).lifting_surfaces[0].wake.doublet_coefficients.clone();

    solver.update_wakes(1.0);

    {
        let wake = &solver.body(0).lifting_surfaces[0].wake;

        // One more strip, still a multiple of the spanwise panel count, fresh strip empty
        assert_eq!(wake.nr_panels(), 2 * nr_spanwise);
        assert_eq!(wake.nr_panels() % nr_spanwise, 0);

        for i_panel in wake.newest_strip() {
            assert_eq!(wake.doublet_coefficients[i_panel], 0.0);
        }

        // The strip shed by the first step is frozen with its Kutta strengths
        for (i_panel, expected) in wake.frozen_panels().zip(first_strip.iter()) {
            assert_eq!(wake.doublet_coefficients[i_panel], *expected);
        }
    }

    solver.solve(1.0).unwrap();
    assert_kutta_closure(&solver);

    // The second solve must not touch the frozen strip
    let wake = &solver.body(0).lifting_surfaces[0].wake;

    for (i_panel, expected) in wake.frozen_panels().zip(first_strip.iter()) {
        assert_eq!(wake.doublet_coefficients[i_panel], *expected);
    }
}

#[test]
fn test_wake_nodes_trail_downstream() {
    let mut solver = wing_solver(0.0, true);

    solver.solve(1.0).unwrap();

    for _ in 0..3 {
        solver.update_wakes(1.0);
        solver.solve(1.0).unwrap();
    }

    // All wake nodes lie at or behind the trailing edge, and the oldest row has convected
    // furthest downstream
    let wake = &solver.body(0).lifting_surfaces[0].wake;

    for node in &wake.surface.nodes {
        assert!(node[0] > 1.0 - 1e-6, "Wake node at {} is upstream of the trailing edge", node);
    }

    let oldest_row_x = wake.surface.nodes[0][0];
    let newest_row_x = wake.surface.nodes[wake.nr_nodes() - 1][0];

    assert!(oldest_row_x > newest_row_x + 1.0);
}

#[derive(Debug)]
/// Boundary layer stub that switches on a uniform blowing velocity once it has seen the surface
/// velocities, to exercise the outer coupling iteration
struct UniformBlowingBoundaryLayer {
    blowing_velocity: Float,
    active: bool,
}

impl BoundaryLayer for UniformBlowingBoundaryLayer {
    fn recalculate(&mut self, _surface_velocities: &[SpatialVector]) {
        self.active = true;
    }

    fn blowing_velocity(&self, _i_panel: usize) -> Float {
        if self.active {
            self.blowing_velocity
        } else {
            0.0
        }
    }

    fn friction(&self, _i_panel: usize) -> SpatialVector {
        SpatialVector::default()
    }
}

#[test]
fn test_boundary_layer_coupling_iteration() {
    let mut body = Body::new("wing".to_string());

    body.add_lifting_surface_with_boundary_layer(
        rectangular_wing(6, 5, 4.0, 0.1),
        Box::new(UniformBlowingBoundaryLayer {
            blowing_velocity: 0.01,
            active: false,
        }),
    );

    let mut parameters = Parameters::default();

    parameters.convect_wake = false;

    let mut solver = Solver::new(parameters);

    solver.add_body(body);
    solver.set_freestream_velocity(SpatialVector::new(1.0, 0.0, 0.0));

    solver.initialize_wakes(1.0);

    solver.solve(1.0).unwrap();

    // The converged source distribution includes the blowing velocity switched on during the
    // coupling loop
    let surface = &solver.body(0).lifting_surfaces[0].lifting_surface.surface;

    for i_panel in 0..surface.nr_panels() {
        let apparent_normal_velocity =
            -solver.freestream_velocity.dot(surface.panel_normal(i_panel));

        let expected = apparent_normal_velocity - 0.01;

        assert!(
            (solver.source_coefficient(0, i_panel) - expected).abs() < 1e-12,
            "Source coefficient at panel {} does not include the blowing velocity", i_panel
        );
    }
}

#[test]
fn test_prescribed_boundary_layer_friction_enters_the_force() {
    let mut boundary_layer = PrescribedBoundaryLayer::new(rectangular_wing(6, 5, 4.0, 0.1).nr_panels());

    for friction in boundary_layer.frictions.iter_mut() {
        *friction = SpatialVector::new(0.5, 0.0, 0.0);
    }

    let mut body = Body::new("wing".to_string());

    body.add_lifting_surface_with_boundary_layer(
        rectangular_wing(6, 5, 4.0, 0.1),
        Box::new(boundary_layer),
    );

    let mut parameters = Parameters::default();

    parameters.convect_wake = false;

    let mut solver = Solver::new(parameters);

    solver.add_body(body);
    solver.set_freestream_velocity(SpatialVector::new(1.0, 0.0, 0.0));

    solver.initialize_wakes(1.0);
    solver.solve(1.0).unwrap();

    let force = solver.force(0);

    let total_area: Float = {
        let surface = &solver.body(0).lifting_surfaces[0].lifting_surface.surface;

        (0..surface.nr_panels()).map(|i_panel| surface.panel_surface_area(i_panel)).sum()
    };

    // The friction contribution is the stress times the total panel area; the pressure force on
    // the symmetric wing at zero incidence carries no x-component to speak of
    let force_without_friction = force[0] - 0.5 * total_area;

    assert!(
        force_without_friction.abs() < 0.05,
        "Friction force unaccounted for: {}", force_without_friction
    );
}
