
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Tests of the per-step surface output.

use crate::prelude::*;

use super::test_setup::{sphere_surface, rectangular_wing};

fn temporary_log_folder(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("vortexje_{}_{}", name, std::process::id()))
}

#[test]
fn test_log_writes_the_persisted_layout() {
    let mut body = Body::new("test_body".to_string());

    body.add_non_lifting_surface(sphere_surface(6, 3));
    body.add_lifting_surface(rectangular_wing(3, 3, 2.0, 0.1));

    let mut parameters = Parameters::default();

    parameters.convect_wake = false;

    let mut solver = Solver::new(parameters);

    solver.add_body(body);
    solver.set_freestream_velocity(SpatialVector::new(1.0, 0.0, 0.0));

    solver.initialize_wakes(1.0);
    solver.solve(1.0).unwrap();

    let log_folder = temporary_log_folder("log_layout");

    solver.set_log_folder(log_folder.to_string_lossy().to_string());

    solver.log(0, &VtkSurfaceWriter).unwrap();
    solver.log(0, &GmshSurfaceWriter).unwrap();

    for expected in [
        "test_body/non_lifting_surface_0/step_0.vtp",
        "test_body/lifting_surface_0/step_0.vtp",
        "test_body/wake_0/step_0.vtp",
        "test_body/non_lifting_surface_0/step_0.msh",
        "test_body/lifting_surface_0/step_0.msh",
        "test_body/wake_0/step_0.msh",
    ] {
        let path = log_folder.join(expected);

        assert!(path.exists(), "Missing log file {}", path.display());
    }

    let gmsh_content = std::fs::read_to_string(
        log_folder.join("test_body/lifting_surface_0/step_0.msh")
    ).unwrap();

    assert!(gmsh_content.contains("$ElementData"));
    assert!(gmsh_content.contains("\"DoubletDistribution\""));
    assert!(gmsh_content.contains("\"PressureDistribution\""));

    let wake_content = std::fs::read_to_string(
        log_folder.join("test_body/wake_0/step_0.msh")
    ).unwrap();

    assert!(wake_content.contains("\"DoubletDistribution\""));
    assert!(!wake_content.contains("\"PressureDistribution\""));

    let _ = std::fs::remove_dir_all(&log_folder);
}
