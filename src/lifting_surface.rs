
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! A surface with the spanwise trailing edge topology needed to shed a wake.

use vortexmath::spatial_vector::SpatialVector;

use crate::surface::Surface;

#[derive(Debug, Clone)]
/// A lifting surface: a panel surface with a structured spanwise/chordwise layout.
///
/// The structured layout contract: section contours run from the trailing edge node along the
/// lower side to the nose and back over the upper side, wrapping back to the trailing edge;
/// stations are ordered along the span. Panels are stored chordwise-major per spanwise strip.
/// This puts exactly one upper and one lower panel adjacent to the trailing edge at every
/// spanwise station: the first and the last chordwise panel of the strip.
pub struct LiftingSurface {
    pub surface: Surface,
    pub nr_chordwise_panels: usize,
    pub nr_spanwise_panels: usize,
}

impl LiftingSurface {
    /// Wraps an existing surface whose panel layout follows the structured contract
    pub fn new(surface: Surface, nr_chordwise_panels: usize, nr_spanwise_panels: usize) -> Self {
        assert_eq!(
            surface.nr_panels(),
            nr_chordwise_panels * nr_spanwise_panels,
            "Panel count does not match the structured layout"
        );
        assert_eq!(
            surface.nr_nodes(),
            nr_chordwise_panels * (nr_spanwise_panels + 1),
            "Node count does not match the structured layout"
        );

        let mut lifting_surface = Self {
            surface,
            nr_chordwise_panels,
            nr_spanwise_panels,
        };

        lifting_surface.cut_trailing_edge_neighbour_links();

        lifting_surface
    }

    /// Builds the wrapped panel layout from structured section nodes.
    ///
    /// `nodes` holds `nr_spanwise_nodes` section contours of `nr_chordwise_nodes` points each,
    /// station-major, every contour starting at the trailing edge and running over the lower side
    /// first. The wrap segment from the last contour point back to the trailing edge closes the
    /// section, so the number of chordwise panels equals the number of contour points.
    pub fn from_structured_nodes(
        nodes: Vec<SpatialVector>,
        nr_chordwise_nodes: usize,
        nr_spanwise_nodes: usize,
    ) -> Self {
        assert_eq!(
            nodes.len(),
            nr_chordwise_nodes * nr_spanwise_nodes,
            "Node count does not match the structured dimensions"
        );
        assert!(nr_spanwise_nodes > 1, "A lifting surface needs at least two spanwise stations");

        let nr_spanwise_panels = nr_spanwise_nodes - 1;

        let node_index = |i_chord: usize, i_span: usize| i_span * nr_chordwise_nodes + i_chord;

        let mut panels = Vec::with_capacity(nr_chordwise_nodes * nr_spanwise_panels);

        for i_span in 0..nr_spanwise_panels {
            for i_chord in 0..nr_chordwise_nodes {
                let i_chord_next = (i_chord + 1) % nr_chordwise_nodes;

                panels.push([
                    node_index(i_chord, i_span),
                    node_index(i_chord_next, i_span),
                    node_index(i_chord_next, i_span + 1),
                    node_index(i_chord, i_span + 1),
                ]);
            }
        }

        Self::new(Surface::new(nodes, panels), nr_chordwise_nodes, nr_spanwise_panels)
    }

    /// The doublet distribution jumps across the trailing edge by the shed wake strength, so the
    /// upper and lower trailing edge panels must not appear in each other's scalar field
    /// gradient stencils even though they share the trailing edge
    fn cut_trailing_edge_neighbour_links(&mut self) {
        for i_spanwise in 0..self.nr_spanwise_panels {
            let i_upper = self.trailing_edge_upper_panel(i_spanwise);
            let i_lower = self.trailing_edge_lower_panel(i_spanwise);

            self.surface.neighbours[i_upper].retain(|&i_panel| i_panel != i_lower);
            self.surface.neighbours[i_lower].retain(|&i_panel| i_panel != i_upper);
        }
    }

    pub fn nr_panels(&self) -> usize {
        self.surface.nr_panels()
    }

    pub fn nr_spanwise_panels(&self) -> usize {
        self.nr_spanwise_panels
    }

    pub fn nr_spanwise_nodes(&self) -> usize {
        self.nr_spanwise_panels + 1
    }

    /// Index of the panel adjacent to the trailing edge on the upper side of the given spanwise
    /// strip
    pub fn trailing_edge_upper_panel(&self, i_spanwise: usize) -> usize {
        i_spanwise * self.nr_chordwise_panels + self.nr_chordwise_panels - 1
    }

    /// Index of the panel adjacent to the trailing edge on the lower side of the given spanwise
    /// strip
    pub fn trailing_edge_lower_panel(&self, i_spanwise: usize) -> usize {
        i_spanwise * self.nr_chordwise_panels
    }

    /// Index of the trailing edge node at the given spanwise station
    pub fn trailing_edge_node(&self, i_spanwise: usize) -> usize {
        i_spanwise * self.nr_chordwise_panels
    }

    /// Position of the trailing edge node at the given spanwise station
    pub fn trailing_edge_point(&self, i_spanwise: usize) -> SpatialVector {
        self.surface.nodes[self.trailing_edge_node(i_spanwise)]
    }

    /// Local spanwise direction of the trailing edge at the given spanwise station
    fn trailing_edge_span_direction(&self, i_spanwise: usize) -> SpatialVector {
        let i_previous = if i_spanwise == 0 { 0 } else { i_spanwise - 1 };
        let i_next = (i_spanwise + 1).min(self.nr_spanwise_panels);

        (self.trailing_edge_point(i_next) - self.trailing_edge_point(i_previous)).normalize()
    }

    /// Unit vector bisecting the upper and lower trailing edge panel planes at the given spanwise
    /// station, pointing away from the body.
    ///
    /// Estimated from the directions of the trailing edge node relative to the adjacent upper and
    /// lower panel collocation points, with the local spanwise direction projected out, averaged
    /// over the neighbouring strips for interior stations.
    pub fn trailing_edge_bisector(&self, i_spanwise: usize) -> SpatialVector {
        let first_strip = if i_spanwise == 0 { 0 } else { i_spanwise - 1 };
        let last_strip = i_spanwise.min(self.nr_spanwise_panels - 1);

        let trailing_edge_point = self.trailing_edge_point(i_spanwise);
        let span_direction = self.trailing_edge_span_direction(i_spanwise);

        let mut bisector = SpatialVector::default();

        for i_strip in first_strip..=last_strip {
            let upper_collocation = self.surface.panel_collocation_point(
                self.trailing_edge_upper_panel(i_strip), false
            );
            let lower_collocation = self.surface.panel_collocation_point(
                self.trailing_edge_lower_panel(i_strip), false
            );

            bisector += (trailing_edge_point - upper_collocation)
                .project_on_plane(span_direction)
                .normalize();
            bisector += (trailing_edge_point - lower_collocation)
                .project_on_plane(span_direction)
                .normalize();
        }

        bisector.normalize()
    }
}

#[cfg(test)]
mod tests {
    use vortexmath::type_aliases::Float;

    use super::*;

    /// A thin symmetric wedge section extruded along the span
    fn wedge_wing(nr_spanwise_nodes: usize) -> LiftingSurface {
        let contour: Vec<[Float; 2]> = vec![
            [1.0, 0.0],    // trailing edge
            [0.5, -0.05],  // lower side
            [0.0, 0.0],    // nose
            [0.5, 0.05],   // upper side
        ];

        let mut nodes = Vec::new();

        for i_span in 0..nr_spanwise_nodes {
            let y = i_span as Float;

            for point in &contour {
                nodes.push(SpatialVector::new(point[0], y, point[1]));
            }
        }

        LiftingSurface::from_structured_nodes(nodes, contour.len(), nr_spanwise_nodes)
    }

    #[test]
    fn test_trailing_edge_topology() {
        let wing = wedge_wing(4);

        assert_eq!(wing.nr_spanwise_panels(), 3);
        assert_eq!(wing.nr_spanwise_nodes(), 4);
        assert_eq!(wing.nr_panels(), 12);

        for i_spanwise in 0..wing.nr_spanwise_panels() {
            let upper = wing.trailing_edge_upper_panel(i_spanwise);
            let lower = wing.trailing_edge_lower_panel(i_spanwise);

            assert!(upper != lower);

            // The upper panel normal points up, the lower panel normal points down
            assert!(wing.surface.panel_normal(upper)[2] > 0.0);
            assert!(wing.surface.panel_normal(lower)[2] < 0.0);

            // Both panels touch the trailing edge nodes of the strip
            let te_a = wing.trailing_edge_node(i_spanwise);
            let te_b = wing.trailing_edge_node(i_spanwise + 1);

            for i_panel in [upper, lower] {
                let corner_nodes = wing.surface.panels[i_panel];

                assert!(corner_nodes.contains(&te_a));
                assert!(corner_nodes.contains(&te_b));
            }
        }
    }

    #[test]
    fn test_trailing_edge_bisector_points_downstream() {
        let wing = wedge_wing(3);

        for i_spanwise in 0..wing.nr_spanwise_nodes() {
            let bisector = wing.trailing_edge_bisector(i_spanwise);

            assert!(
                bisector[0] > 0.9,
                "Bisector at station {} is {}", i_spanwise, bisector
            );
            assert!(bisector[2].abs() < 0.1);
        }
    }
}
