
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A quadrilateral panel mesh with the geometric quantities and potential theory influence
//! coefficients needed by the panel method solver.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;
use vortexmath::spatial_vector::geometry_functions;

pub mod influence;
pub mod gradient;

/// Fraction of the panel diameter used to offset the above-surface collocation point along the
/// panel normal.
pub const COLLOCATION_POINT_DELTA: Float = 1e-3;

static NEXT_SURFACE_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone)]
/// A surface made up of quadrilateral panels.
///
/// Panel corner nodes are ordered counter-clockwise when seen from the flow side, such that the
/// panel normal follows from the right-hand rule and points out of the body. Triangular panels
/// are represented by repeating one corner node; zero-length edges are skipped by the influence
/// integrals.
///
/// All derived per-panel quantities are computed by [Surface::compute_geometry], which must be
/// called again after the node positions have been changed in place.
pub struct Surface {
    /// Stable identity assigned at construction; clones share it
    pub id: usize,
    /// The corner points of the panels
    pub nodes: Vec<SpatialVector>,
    /// Node indices of each panel
    pub panels: Vec<[usize; 4]>,
    /// Panel centroids, where the boundary condition is collocated
    pub collocation_points: Vec<SpatialVector>,
    /// Outward unit normals
    pub normals: Vec<SpatialVector>,
    /// Panel surface areas
    pub areas: Vec<Float>,
    /// Characteristic panel diameters, used for the far field switch
    pub diameters: Vec<Float>,
    /// Orthonormal in-plane panel directions; together with the normal they form the local
    /// panel frame used by the influence integrals
    pub tangents: Vec<[SpatialVector; 2]>,
    /// Indices of the panels that share an edge with each panel
    pub neighbours: Vec<Vec<usize>>,
}

impl Surface {
    pub fn new(nodes: Vec<SpatialVector>, panels: Vec<[usize; 4]>) -> Self {
        let mut surface = Self {
            id: NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed),
            nodes,
            panels,
            collocation_points: Vec::new(),
            normals: Vec::new(),
            areas: Vec::new(),
            diameters: Vec::new(),
            tangents: Vec::new(),
            neighbours: Vec::new(),
        };

        surface.compute_geometry();
        surface.compute_topology();

        surface
    }

    pub fn nr_panels(&self) -> usize {
        self.panels.len()
    }

    pub fn nr_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the four corner points of a panel
    pub fn panel_nodes(&self, i_panel: usize) -> [SpatialVector; 4] {
        let indices = self.panels[i_panel];

        [
            self.nodes[indices[0]],
            self.nodes[indices[1]],
            self.nodes[indices[2]],
            self.nodes[indices[3]],
        ]
    }

    pub fn panel_normal(&self, i_panel: usize) -> SpatialVector {
        self.normals[i_panel]
    }

    pub fn panel_surface_area(&self, i_panel: usize) -> Float {
        self.areas[i_panel]
    }

    pub fn panel_diameter(&self, i_panel: usize) -> Float {
        self.diameters[i_panel]
    }

    /// Returns the collocation point of a panel.
    ///
    /// With `above_surface` set, the point is offset a small distance along the panel normal into
    /// the flow, for field evaluations that must not land exactly on the singularity sheet.
    pub fn panel_collocation_point(&self, i_panel: usize, above_surface: bool) -> SpatialVector {
        if above_surface {
            self.collocation_points[i_panel] +
                COLLOCATION_POINT_DELTA * self.diameters[i_panel] * self.normals[i_panel]
        } else {
            self.collocation_points[i_panel]
        }
    }

    pub fn panel_neighbours(&self, i_panel: usize) -> &[usize] {
        &self.neighbours[i_panel]
    }

    /// Recomputes all derived per-panel geometry from the current node positions
    pub fn compute_geometry(&mut self) {
        let nr_panels = self.panels.len();

        self.collocation_points = Vec::with_capacity(nr_panels);
        self.normals = Vec::with_capacity(nr_panels);
        self.areas = Vec::with_capacity(nr_panels);
        self.diameters = Vec::with_capacity(nr_panels);
        self.tangents = Vec::with_capacity(nr_panels);

        for i_panel in 0..nr_panels {
            let corner_points = self.panel_nodes(i_panel);

            let centroid = geometry_functions::centroid_of_quadrilateral(&corner_points);
            let normal = geometry_functions::normal_of_quadrilateral(&corner_points);
            let area = geometry_functions::area_of_quadrilateral(&corner_points);

            let diagonal_a = (corner_points[2] - corner_points[0]).length();
            let diagonal_b = (corner_points[3] - corner_points[1]).length();

            // In-plane frame: first edge direction with the normal component removed
            let mut tangent = (corner_points[1] - corner_points[0]).project_on_plane(normal);

            if tangent.length_squared() == 0.0 {
                tangent = (corner_points[2] - corner_points[0]).project_on_plane(normal);
            }

            let tangent = tangent.normalize();
            let bitangent = normal.cross(tangent);

            self.collocation_points.push(centroid);
            self.normals.push(normal);
            self.areas.push(area);
            self.diameters.push(diagonal_a.max(diagonal_b));
            self.tangents.push([tangent, bitangent]);
        }
    }

    /// Builds the edge-shared neighbour lists. The topology only depends on the panel indices and
    /// therefore stays valid when nodes move; it must be recomputed when panels are added.
    pub fn compute_topology(&mut self) {
        let mut edge_map: HashMap<(usize, usize), Vec<usize>> = HashMap::new();

        for (i_panel, panel) in self.panels.iter().enumerate() {
            for i_corner in 0..4 {
                let a = panel[i_corner];
                let b = panel[(i_corner + 1) % 4];

                if a == b {
                    continue;
                }

                let edge = (a.min(b), a.max(b));

                edge_map.entry(edge).or_default().push(i_panel);
            }
        }

        self.neighbours = vec![Vec::new(); self.panels.len()];

        for panels_on_edge in edge_map.values() {
            for &i in panels_on_edge {
                for &j in panels_on_edge {
                    if i != j && !self.neighbours[i].contains(&j) {
                        self.neighbours[i].push(j);
                    }
                }
            }
        }
    }

    /// Moves all nodes by the given displacement
    pub fn translate(&mut self, displacement: SpatialVector) {
        for node in self.nodes.iter_mut() {
            *node += displacement;
        }

        self.compute_geometry();
    }

    /// Rotates all nodes around the given axis through the given origin
    pub fn rotate_around_axis(&mut self, angle: Float, axis: SpatialVector, origin: SpatialVector) {
        for node in self.nodes.iter_mut() {
            *node = origin + (*node - origin).rotate_around_axis(angle, axis);
        }

        self.compute_geometry();
    }
}
