
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Unit strength influence coefficients of source and doublet panels.
//!
//! The coefficients are signed such that the Dirichlet system of the solver reads `A μ = Σ σ`:
//! the doublet entry is the potential per unit doublet strength and its interior side self limit
//! is `+1/2`; the source entry is the *negative* of the physical unit source potential. Velocity
//! influences are physical: a positive source strength blows outwards, and the velocity of a unit
//! doublet equals that of a vortex ring of unit circulation along the panel edges.
//!
//! Near field values use the edge logarithm terms of the Hess quadrilateral formulas with the
//! solid angle part evaluated per triangle by the Van Oosterom-Strackee arctangent, which has no
//! vertical-edge singularity and handles warped panels. Beyond [FAR_FIELD_RATIO] panel diameters
//! both degrade to point singularity expressions.

use vortexmath::type_aliases::Float;
use vortexmath::spatial_vector::SpatialVector;
use vortexmath::consts::PI;

use super::Surface;

const FOUR_PI_INVERSE: Float = 1.0 / (4.0 * PI);

/// Distance, in panel diameters, beyond which the point singularity approximations are used
pub const FAR_FIELD_RATIO: Float = 5.0;

const EDGE_EPSILON: Float = 1e-12;

/// Signed solid angle of a triangle seen from the origin of the given corner vectors.
///
/// Source: <https://en.wikipedia.org/wiki/Solid_angle#Tetrahedron>
fn triangle_solid_angle(r1: SpatialVector, r2: SpatialVector, r3: SpatialVector) -> Float {
    let l1 = r1.length();
    let l2 = r2.length();
    let l3 = r3.length();

    if l1 < EDGE_EPSILON || l2 < EDGE_EPSILON || l3 < EDGE_EPSILON {
        return 0.0;
    }

    let numerator = r1.dot(r2.cross(r3));

    let denominator = l1 * l2 * l3 +
        r1.dot(r2) * l3 +
        r2.dot(r3) * l1 +
        r3.dot(r1) * l2;

    // A point in the panel plane subtends no solid angle
    if numerator == 0.0 {
        return 0.0;
    }

    2.0 * numerator.atan2(denominator)
}

impl Surface {
    /// Signed solid angle of a panel at the given point, split into two triangles. Negative on
    /// the side the normal points to.
    pub fn panel_solid_angle(&self, point: SpatialVector, i_panel: usize) -> Float {
        let corner_points = self.panel_nodes(i_panel);

        let r0 = corner_points[0] - point;
        let r1 = corner_points[1] - point;
        let r2 = corner_points[2] - point;
        let r3 = corner_points[3] - point;

        triangle_solid_angle(r0, r1, r2) + triangle_solid_angle(r0, r2, r3)
    }

    /// Potential influence coefficients of unit source and doublet strengths on the given panel,
    /// evaluated at an arbitrary point
    pub fn source_and_doublet_influence(
        &self,
        point: SpatialVector,
        i_panel: usize,
    ) -> (Float, Float) {
        let translated_point = point - self.collocation_points[i_panel];
        let distance_squared = translated_point.length_squared();

        let far_field_length = FAR_FIELD_RATIO * self.diameters[i_panel];

        if distance_squared > far_field_length * far_field_length {
            let distance = distance_squared.sqrt();
            let normal_height = translated_point.dot(self.normals[i_panel]);

            let area_term = self.areas[i_panel] * FOUR_PI_INVERSE;

            let source_influence = area_term / distance;
            let doublet_influence = -area_term * normal_height /
                (distance_squared * distance);

            return (source_influence, doublet_influence);
        }

        let solid_angle = self.panel_solid_angle(point, i_panel);

        let doublet_influence = FOUR_PI_INVERSE * solid_angle;

        // Edge logarithm terms in the local panel frame
        let [tangent, bitangent] = self.tangents[i_panel];
        let normal = self.normals[i_panel];

        let px = translated_point.dot(tangent);
        let py = translated_point.dot(bitangent);
        let pz = translated_point.dot(normal);

        let corner_points = self.panel_nodes(i_panel);

        let mut local_corners = [[0.0; 2]; 4];

        for i_corner in 0..4 {
            let relative = corner_points[i_corner] - self.collocation_points[i_panel];

            local_corners[i_corner] = [relative.dot(tangent), relative.dot(bitangent)];
        }

        let mut edge_sum = 0.0;

        for i_corner in 0..4 {
            let [ax, ay] = local_corners[i_corner];
            let [bx, by] = local_corners[(i_corner + 1) % 4];

            let dx = bx - ax;
            let dy = by - ay;

            let d = (dx * dx + dy * dy).sqrt();

            if d < EDGE_EPSILON {
                continue;
            }

            let ra = ((px - ax) * (px - ax) + (py - ay) * (py - ay) + pz * pz).sqrt();
            let rb = ((px - bx) * (px - bx) + (py - by) * (py - by) + pz * pz).sqrt();

            let c = ((px - ax) * dy - (py - ay) * dx) / d;

            let log_argument = (ra + rb + d) / (ra + rb - d).max(EDGE_EPSILON);

            edge_sum += c * log_argument.ln();
        }

        let source_influence = FOUR_PI_INVERSE * (pz * solid_angle - edge_sum);

        (source_influence, doublet_influence)
    }

    /// Matrix form of [Surface::source_and_doublet_influence]: the influence of this surface's
    /// panel on the collocation point of a panel on the observing surface. The doublet self
    /// influence is the interior side limit `+1/2`.
    pub fn source_and_doublet_influence_on(
        &self,
        observer: &Surface,
        i_observer_panel: usize,
        i_panel: usize,
    ) -> (Float, Float) {
        let point = observer.panel_collocation_point(i_observer_panel, false);

        if self.id == observer.id && i_observer_panel == i_panel {
            let (source_influence, _) = self.source_and_doublet_influence(point, i_panel);

            return (source_influence, 0.5);
        }

        self.source_and_doublet_influence(point, i_panel)
    }

    /// Potential influence coefficient of a unit doublet strength on the given panel
    pub fn doublet_influence(&self, point: SpatialVector, i_panel: usize) -> Float {
        let (_, doublet_influence) = self.source_and_doublet_influence(point, i_panel);

        doublet_influence
    }

    /// Matrix form of [Surface::doublet_influence]
    pub fn doublet_influence_on(
        &self,
        observer: &Surface,
        i_observer_panel: usize,
        i_panel: usize,
    ) -> Float {
        let (_, doublet_influence) = self.source_and_doublet_influence_on(
            observer,
            i_observer_panel,
            i_panel,
        );

        doublet_influence
    }

    /// Velocity induced at the given point by a unit source strength on the given panel
    pub fn source_unit_velocity(&self, point: SpatialVector, i_panel: usize) -> SpatialVector {
        let translated_point = point - self.collocation_points[i_panel];
        let distance_squared = translated_point.length_squared();

        let far_field_length = FAR_FIELD_RATIO * self.diameters[i_panel];

        if distance_squared > far_field_length * far_field_length {
            let distance = distance_squared.sqrt();

            return self.areas[i_panel] * FOUR_PI_INVERSE /
                (distance_squared * distance) * translated_point;
        }

        let [tangent, bitangent] = self.tangents[i_panel];
        let normal = self.normals[i_panel];

        let px = translated_point.dot(tangent);
        let py = translated_point.dot(bitangent);
        let pz = translated_point.dot(normal);

        let corner_points = self.panel_nodes(i_panel);

        let mut local_corners = [[0.0; 2]; 4];

        for i_corner in 0..4 {
            let relative = corner_points[i_corner] - self.collocation_points[i_panel];

            local_corners[i_corner] = [relative.dot(tangent), relative.dot(bitangent)];
        }

        let mut u = 0.0;
        let mut v = 0.0;

        for i_corner in 0..4 {
            let [ax, ay] = local_corners[i_corner];
            let [bx, by] = local_corners[(i_corner + 1) % 4];

            let dx = bx - ax;
            let dy = by - ay;

            let d = (dx * dx + dy * dy).sqrt();

            if d < EDGE_EPSILON {
                continue;
            }

            let ra = ((px - ax) * (px - ax) + (py - ay) * (py - ay) + pz * pz).sqrt();
            let rb = ((px - bx) * (px - bx) + (py - by) * (py - by) + pz * pz).sqrt();

            let log_value = ((ra + rb + d) / (ra + rb - d).max(EDGE_EPSILON)).ln();

            u += dy / d * log_value;
            v += -dx / d * log_value;
        }

        let w = -self.panel_solid_angle(point, i_panel);

        FOUR_PI_INVERSE * (u * tangent + v * bitangent + w * normal)
    }

    /// Velocity induced at the given point by a vortex ring of unit circulation along the panel
    /// edges. This equals the velocity of a unit doublet strength on the panel.
    pub fn vortex_ring_unit_velocity(&self, point: SpatialVector, i_panel: usize) -> SpatialVector {
        let translated_point = point - self.collocation_points[i_panel];
        let distance_squared = translated_point.length_squared();

        let far_field_length = FAR_FIELD_RATIO * self.diameters[i_panel];

        if distance_squared > far_field_length * far_field_length {
            // Point doublet limit of the vortex ring
            let distance = distance_squared.sqrt();
            let distance_pow_5 = distance_squared * distance_squared * distance;

            let normal = self.normals[i_panel];
            let normal_height = translated_point.dot(normal);

            return self.areas[i_panel] * FOUR_PI_INVERSE *
                (3.0 * normal_height * translated_point - distance_squared * normal) /
                distance_pow_5;
        }

        let corner_points = self.panel_nodes(i_panel);

        let mut induced_velocity = SpatialVector::default();

        for i_corner in 0..4 {
            let p1 = corner_points[i_corner];
            let p2 = corner_points[(i_corner + 1) % 4];

            let r1 = point - p1;
            let r2 = point - p2;

            let cross = r1.cross(r2);
            let cross_squared = cross.length_squared();

            let edge = p2 - p1;
            let edge_length_squared = edge.length_squared();

            // Skip degenerate edges and points on the vortex line itself
            if edge_length_squared < EDGE_EPSILON ||
                cross_squared < EDGE_EPSILON * edge_length_squared
            {
                continue;
            }

            let r1_length = r1.length();
            let r2_length = r2.length();

            induced_velocity += FOUR_PI_INVERSE *
                (edge.dot(r1) / r1_length - edge.dot(r2) / r2_length) / cross_squared * cross;
        }

        induced_velocity
    }

    /// Matrix form of [Surface::vortex_ring_unit_velocity], evaluated at the collocation point of
    /// a panel on the observing surface
    pub fn vortex_ring_unit_velocity_on(
        &self,
        observer: &Surface,
        i_observer_panel: usize,
        i_panel: usize,
    ) -> SpatialVector {
        let point = observer.panel_collocation_point(i_observer_panel, false);

        self.vortex_ring_unit_velocity(point, i_panel)
    }
}
