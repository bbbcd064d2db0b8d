
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! The wake shed from the trailing edge of a lifting surface.
//!
//! The wake is a structured strip mesh that grows by one spanwise strip per time step. Node rows
//! are ordered oldest first, so the newest row - the one lying on the trailing edge - is the last
//! one. The doublet strength of the newest strip is set by the Kutta condition of the current
//! solve; all earlier strips carry the frozen strengths of the steps that shed them.

use std::ops::Range;

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;

use crate::surface::Surface;
use crate::lifting_surface::LiftingSurface;

#[derive(Debug, Clone)]
pub struct Wake {
    pub surface: Surface,
    /// Doublet strength of each wake panel, indexed parallel to the panels
    pub doublet_coefficients: Vec<Float>,
    pub nr_spanwise_panels: usize,
    pub nr_spanwise_nodes: usize,
}

impl Wake {
    /// Creates a wake with a single node row on the trailing edge of the lifting surface and no
    /// panels yet
    pub fn new(lifting_surface: &LiftingSurface) -> Self {
        let nr_spanwise_nodes = lifting_surface.nr_spanwise_nodes();

        let mut nodes = Vec::with_capacity(nr_spanwise_nodes);

        for i_spanwise in 0..nr_spanwise_nodes {
            nodes.push(lifting_surface.trailing_edge_point(i_spanwise));
        }

        Self {
            surface: Surface::new(nodes, Vec::new()),
            doublet_coefficients: Vec::new(),
            nr_spanwise_panels: lifting_surface.nr_spanwise_panels(),
            nr_spanwise_nodes,
        }
    }

    pub fn nr_panels(&self) -> usize {
        self.surface.nr_panels()
    }

    pub fn nr_nodes(&self) -> usize {
        self.surface.nr_nodes()
    }

    pub fn nr_node_rows(&self) -> usize {
        self.surface.nr_nodes() / self.nr_spanwise_nodes
    }

    pub fn nr_strips(&self) -> usize {
        self.surface.nr_panels() / self.nr_spanwise_panels
    }

    #[inline(always)]
    /// Returns a flat index for the wake nodes. The nodes are ordered streamwise-major, oldest
    /// row first.
    pub fn node_index(&self, i_row: usize, i_spanwise: usize) -> usize {
        i_row * self.nr_spanwise_nodes + i_spanwise
    }

    /// Whether the node with the given flat index lies in the newest row, which coincides with
    /// the trailing edge
    pub fn is_trailing_edge_node(&self, i_node: usize) -> bool {
        i_node + self.nr_spanwise_nodes >= self.surface.nr_nodes()
    }

    /// Panel index range of the newest strip, whose doublet strengths the current solve
    /// determines through the Kutta condition
    pub fn newest_strip(&self) -> Range<usize> {
        let nr_panels = self.surface.nr_panels();

        nr_panels.saturating_sub(self.nr_spanwise_panels)..nr_panels
    }

    /// Panel index range of the frozen part of the wake: everything but the newest strip
    pub fn frozen_panels(&self) -> Range<usize> {
        0..self.surface.nr_panels().saturating_sub(self.nr_spanwise_panels)
    }

    /// Appends a fresh node row on the trailing edge and a strip of panels connecting the
    /// previous last row to it, with zero doublet strength.
    ///
    /// The panel corner order continues the upper surface side, so that the Kutta condition signs
    /// (`+` into the upper column, `-` into the lower column) hold.
    pub fn add_layer(&mut self, lifting_surface: &LiftingSurface) {
        for i_spanwise in 0..self.nr_spanwise_nodes {
            self.surface.nodes.push(lifting_surface.trailing_edge_point(i_spanwise));
        }

        let nr_rows = self.nr_node_rows();

        let older_row_start = self.node_index(nr_rows - 2, 0);
        let newer_row_start = self.node_index(nr_rows - 1, 0);

        for i_spanwise in 0..self.nr_spanwise_panels {
            self.surface.panels.push([
                older_row_start + i_spanwise,
                older_row_start + i_spanwise + 1,
                newer_row_start + i_spanwise + 1,
                newer_row_start + i_spanwise,
            ]);

            self.doublet_coefficients.push(0.0);
        }

        self.surface.compute_geometry();
        self.surface.compute_topology();
    }

    /// Refreshes the derived panel geometry after the nodes have been moved in place
    pub fn compute_geometry(&mut self) {
        self.surface.compute_geometry();
    }

    /// Lets the wake update any internal properties after its nodes have been convected
    pub fn update_properties(&mut self, _time_step: Float) {
        self.compute_geometry();
    }

    /// Potential influence coefficient of a unit doublet strength on the given wake panel
    pub fn doublet_influence(&self, point: SpatialVector, i_panel: usize) -> Float {
        self.surface.doublet_influence(point, i_panel)
    }

    /// Matrix form of [Wake::doublet_influence]
    pub fn doublet_influence_on(
        &self,
        observer: &Surface,
        i_observer_panel: usize,
        i_panel: usize,
    ) -> Float {
        self.surface.doublet_influence_on(observer, i_observer_panel, i_panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wedge_wing() -> LiftingSurface {
        let contour: Vec<[Float; 2]> = vec![
            [1.0, 0.0],
            [0.5, -0.05],
            [0.0, 0.0],
            [0.5, 0.05],
        ];

        let mut nodes = Vec::new();

        for i_span in 0..3 {
            let y = i_span as Float;

            for point in &contour {
                nodes.push(SpatialVector::new(point[0], y, point[1]));
            }
        }

        LiftingSurface::from_structured_nodes(nodes, contour.len(), 3)
    }

    #[test]
    fn test_layer_growth() {
        let wing = wedge_wing();

        let mut wake = Wake::new(&wing);

        assert_eq!(wake.nr_panels(), 0);
        assert_eq!(wake.nr_node_rows(), 1);

        // Displace the first row downstream so that the first strip has a finite area
        for i_node in 0..wake.nr_nodes() {
            wake.surface.nodes[i_node] += SpatialVector::new(1.0, 0.0, 0.0);
        }

        wake.add_layer(&wing);

        assert_eq!(wake.nr_panels(), wake.nr_spanwise_panels);
        assert_eq!(wake.nr_node_rows(), 2);
        assert_eq!(wake.newest_strip(), 0..2);
        assert!(wake.frozen_panels().is_empty());

        wake.add_layer(&wing);

        assert_eq!(wake.nr_panels(), 2 * wake.nr_spanwise_panels);
        assert_eq!(wake.doublet_coefficients.len(), wake.nr_panels());
        assert_eq!(wake.newest_strip(), 2..4);
        assert_eq!(wake.frozen_panels(), 0..2);

        // The wake panel count stays a multiple of the spanwise panel count
        assert_eq!(wake.nr_panels() % wake.nr_spanwise_panels, 0);
    }

    #[test]
    fn test_wake_panel_orientation_continues_the_upper_side() {
        let wing = wedge_wing();

        let mut wake = Wake::new(&wing);

        for i_node in 0..wake.nr_nodes() {
            wake.surface.nodes[i_node] += SpatialVector::new(1.0, 0.0, 0.0);
        }

        wake.add_layer(&wing);

        for i_panel in 0..wake.nr_panels() {
            assert!(
                wake.surface.panel_normal(i_panel)[2] > 0.9,
                "Wake panel normal is {}", wake.surface.panel_normal(i_panel)
            );
        }
    }

    #[test]
    fn test_trailing_edge_node_detection() {
        let wing = wedge_wing();

        let mut wake = Wake::new(&wing);

        wake.add_layer(&wing);

        for i_node in 0..wake.nr_nodes() {
            let expected = i_node >= wake.nr_spanwise_nodes;

            assert_eq!(wake.is_trailing_edge_node(i_node), expected);
        }
    }
}
