
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Tests of the surface registration and the global panel offset scheme.

use crate::prelude::*;

use super::test_setup::{sphere_surface, rectangular_wing};

#[test]
fn test_offset_table() {
    let mut body = Body::new("body".to_string());

    body.add_non_lifting_surface(sphere_surface(6, 3));
    body.add_lifting_surface(rectangular_wing(3, 3, 2.0, 0.1));

    let mut other_body = Body::new("other_body".to_string());

    other_body.add_non_lifting_surface(sphere_surface(4, 3));

    let mut solver = Solver::new(Parameters::default());

    solver.add_body(body);
    solver.add_body(other_body);

    assert_eq!(solver.nr_surfaces(), 3);

    // Offsets are strictly increasing in insertion order, non-lifting surfaces first within a
    // body, and stay within the total panel count
    let bindings = solver.surface_bindings();

    let mut expected_offset = 0;

    for binding in bindings {
        assert_eq!(binding.panel_offset, expected_offset);

        expected_offset += binding.nr_panels;
    }

    assert_eq!(expected_offset, solver.nr_panels());
    assert_eq!(solver.doublet_coefficients.len(), solver.nr_panels());
    assert_eq!(solver.surface_velocities.len(), solver.nr_panels());

    assert_eq!(bindings[0].body_index, 0);
    assert_eq!(bindings[1].body_index, 0);
    assert_eq!(bindings[2].body_index, 1);

    // Surface identities resolve to their owning bodies, wakes included
    let first_surface_id = solver.body(0).non_lifting_surfaces[0].id;
    let wake_id = solver.body(0).lifting_surfaces[0].wake.surface.id;
    let other_surface_id = solver.body(1).non_lifting_surfaces[0].id;

    assert_eq!(solver.body_index_of_surface(first_surface_id), Some(0));
    assert_eq!(solver.body_index_of_surface(wake_id), Some(0));
    assert_eq!(solver.body_index_of_surface(other_surface_id), Some(1));
    assert_eq!(solver.body_index_of_surface(usize::MAX), None);
}

#[test]
fn test_unknown_panel_lookup_returns_zero() {
    let mut body = Body::new("body".to_string());

    body.add_non_lifting_surface(sphere_surface(6, 3));

    let mut solver = Solver::new(Parameters::default());

    solver.add_body(body);

    assert_eq!(solver.pressure_coefficient(7, 0), 0.0);
    assert_eq!(solver.doublet_coefficient(0, 100_000), 0.0);
    assert_eq!(solver.surface_velocity(7, 0), SpatialVector::default());
}
