
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Tests against the analytic potential flow solution for a sphere in uniform flow: surface
//! potential `3/2 U x`, maximum surface speed `3/2 U` at the equator, and zero net force.

use vortexmath::type_aliases::Float;

use crate::prelude::*;

use super::test_setup::sphere_surface;

fn sphere_solver(nr_azimuthal: usize, nr_polar: usize) -> Solver {
    let mut body = Body::new("sphere".to_string());

    body.add_non_lifting_surface(sphere_surface(nr_azimuthal, nr_polar));

    let mut solver = Solver::new(Parameters::default());

    solver.add_body(body);
    solver.set_freestream_velocity(SpatialVector::new(1.0, 0.0, 0.0));
    solver.set_fluid_density(1.0);

    solver
}

#[test]
fn test_sphere_doublet_distribution() {
    let mut solver = sphere_solver(16, 8);

    solver.solve(1.0).unwrap();

    // The disturbance potential on the sphere surface is U x / 2, and the surface potential
    // relation gives mu = -U x / 2
    for i_panel in 0..solver.nr_panels() {
        let collocation_point = solver.body(0).non_lifting_surfaces[0]
            .panel_collocation_point(i_panel, false);

        let expected = -0.5 * collocation_point[0];

        let error = (solver.doublet_coefficient(0, i_panel) - expected).abs();

        assert!(
            error < 0.05,
            "Doublet coefficient at panel {} is {} instead of {}",
            i_panel, solver.doublet_coefficient(0, i_panel), expected
        );

        // Total surface potential of the analytic solution: 3/2 U x
        let potential_error =
            (solver.surface_velocity_potential(0, i_panel) - 1.5 * collocation_point[0]).abs();

        assert!(
            potential_error < 0.1,
            "Surface potential at panel {} is {}",
            i_panel, solver.surface_velocity_potential(0, i_panel)
        );
    }
}

#[test]
fn test_sphere_with_marcov_surface_velocity() {
    let mut solver = sphere_solver(16, 8);

    solver.parameters.marcov_surface_velocity = true;

    solver.solve(1.0).unwrap();

    let mut total_error = 0.0;

    for i_panel in 0..solver.nr_panels() {
        let collocation_point = solver.body(0).non_lifting_surfaces[0]
            .panel_collocation_point(i_panel, false);

        let radial = collocation_point.normalize();

        let expected = 1.0 - 2.25 * (1.0 - radial[0] * radial[0]);

        total_error += (solver.pressure_coefficient(0, i_panel) - expected).abs();
    }

    let mean_error = total_error / solver.nr_panels() as Float;

    dbg!(mean_error);

    assert!(
        mean_error < 0.1,
        "Mean pressure coefficient error in Marcov mode is {}", mean_error
    );
}

#[test]
fn test_sphere_pressure_distribution() {
    let mut solver = sphere_solver(16, 8);

    solver.solve(1.0).unwrap();

    // Cp = 1 - (9/4) sin^2(alpha), with alpha the angle from the stagnation direction
    let mut total_error = 0.0;

    let mut max_pressure_coefficient = Float::MIN;
    let mut min_pressure_coefficient = Float::MAX;

    for i_panel in 0..solver.nr_panels() {
        let collocation_point = solver.body(0).non_lifting_surfaces[0]
            .panel_collocation_point(i_panel, false);

        let radial = collocation_point.normalize();

        let expected = 1.0 - 2.25 * (1.0 - radial[0] * radial[0]);

        let pressure_coefficient = solver.pressure_coefficient(0, i_panel);

        let error = (pressure_coefficient - expected).abs();

        assert!(
            error < 0.2,
            "Pressure coefficient at panel {} is {} instead of {}",
            i_panel, pressure_coefficient, expected
        );

        total_error += error;

        max_pressure_coefficient = max_pressure_coefficient.max(pressure_coefficient);
        min_pressure_coefficient = min_pressure_coefficient.min(pressure_coefficient);
    }

    let mean_error = total_error / solver.nr_panels() as Float;

    dbg!(mean_error);

    assert!(mean_error < 0.05, "Mean pressure coefficient error is {}", mean_error);

    // Close to 1 at the stagnation points, close to -5/4 at the equator, limited by how close
    // the collocation points get to either
    assert!(max_pressure_coefficient > 0.7 && max_pressure_coefficient < 1.05);
    assert!(min_pressure_coefficient > -1.45 && min_pressure_coefficient < -1.0);
}

#[test]
fn test_sphere_net_force_vanishes() {
    let mut solver = sphere_solver(16, 8);

    solver.solve(1.0).unwrap();

    let force = solver.force(0);

    assert!(force.length() < 1e-6, "Net force on the sphere is {}", force);
}

#[test]
fn test_surface_velocity_is_tangential() {
    let mut solver = sphere_solver(12, 6);

    solver.solve(1.0).unwrap();

    for i_panel in 0..solver.nr_panels() {
        let normal = solver.body(0).non_lifting_surfaces[0].panel_normal(i_panel);

        let normal_component = solver.surface_velocity(0, i_panel).dot(normal);

        assert!(normal_component.abs() < 1e-10);
    }
}

#[test]
fn test_zero_flow_gives_zero_solution() {
    let mut body = Body::new("sphere".to_string());

    body.add_non_lifting_surface(sphere_surface(8, 4));

    let mut solver = Solver::new(Parameters::default());

    solver.add_body(body);

    solver.solve(1.0).unwrap();

    for i_panel in 0..solver.nr_panels() {
        assert!(solver.doublet_coefficient(0, i_panel).abs() < 1e-12);
        assert!(solver.source_coefficient(0, i_panel).abs() < 1e-12);
        assert!(solver.pressure_coefficient(0, i_panel).abs() < 1e-12);
        assert!(solver.surface_velocity(0, i_panel).length() < 1e-12);
    }

    assert!(solver.force(0).length() < 1e-12);
}

#[test]
fn test_force_is_idempotent() {
    let mut solver = sphere_solver(8, 4);

    solver.solve(1.0).unwrap();

    let first = solver.force(0);
    let second = solver.force(0);

    assert_eq!(first, second);

    let first_moment = solver.moment(0, SpatialVector::new(0.5, 0.0, 0.0));
    let second_moment = solver.moment(0, SpatialVector::new(0.5, 0.0, 0.0));

    assert_eq!(first_moment, second_moment);
}

#[test]
fn test_force_is_translation_invariant() {
    let mut solver = sphere_solver(8, 4);

    solver.solve(1.0).unwrap();

    let force = solver.force(0);

    let mut translated_body = Body::new("sphere".to_string());

    translated_body.add_non_lifting_surface(sphere_surface(8, 4));
    translated_body.translate(SpatialVector::new(10.0, 5.0, -3.0));

    let mut translated_solver = Solver::new(Parameters::default());

    translated_solver.add_body(translated_body);
    translated_solver.set_freestream_velocity(SpatialVector::new(1.0, 0.0, 0.0));
    translated_solver.set_fluid_density(1.0);

    translated_solver.solve(1.0).unwrap();

    let translated_force = translated_solver.force(0);

    assert!(
        (force - translated_force).length() < 1e-8,
        "Forces differ: {} != {}", force, translated_force
    );
}

#[test]
fn test_unsteady_bernoulli_term() {
    // Two solvers through the same sequence of states; the doublet solution does not depend on
    // the unsteady flag, so the pressures must differ by exactly the potential time derivative
    // term
    let mut unsteady_solver = sphere_solver(8, 4);
    let mut steady_solver = sphere_solver(8, 4);

    unsteady_solver.parameters.unsteady_bernoulli = true;

    unsteady_solver.solve(0.5).unwrap();
    steady_solver.solve(0.5).unwrap();

    let previous_potentials = steady_solver.surface_velocity_potentials.clone();

    let freestream = SpatialVector::new(1.0, 0.0, 0.2);

    unsteady_solver.set_freestream_velocity(freestream);
    steady_solver.set_freestream_velocity(freestream);

    let time_step = 0.5;

    unsteady_solver.solve(time_step).unwrap();
    steady_solver.solve(time_step).unwrap();

    let reference_velocity_squared = freestream.length_squared();

    for i_panel in 0..steady_solver.nr_panels() {
        let potential_time_derivative =
            (steady_solver.surface_velocity_potentials[i_panel] - previous_potentials[i_panel]) /
            time_step;

        let expected = steady_solver.pressure_coefficient(0, i_panel) -
            2.0 * potential_time_derivative / reference_velocity_squared;

        assert!(
            (unsteady_solver.pressure_coefficient(0, i_panel) - expected).abs() < 1e-10,
            "Unsteady pressure mismatch at panel {}", i_panel
        );
    }
}

#[test]
fn test_pressure_has_no_history_without_unsteady_term() {
    let mut solver = sphere_solver(8, 4);

    solver.solve(1.0).unwrap();

    let first: Vec<Float> = solver.pressure_coefficients.clone();

    // A second solve starts from different previous potentials; without the unsteady Bernoulli
    // term the pressures must not couple to them
    solver.solve(1.0).unwrap();

    for i_panel in 0..solver.nr_panels() {
        assert!((solver.pressure_coefficients[i_panel] - first[i_panel]).abs() < 1e-10);
    }

    // With the unsteady term enabled but a zero time step, the history term stays switched off
    let mut unsteady_solver = sphere_solver(8, 4);

    unsteady_solver.parameters.unsteady_bernoulli = true;

    unsteady_solver.solve(0.0).unwrap();

    for i_panel in 0..unsteady_solver.nr_panels() {
        assert!((unsteady_solver.pressure_coefficients[i_panel] - first[i_panel]).abs() < 1e-10);
    }
}
