
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

use super::*;

#[inline(always)]
/// Function that calculates the area of a quadrilateral, based on the corner points given as
/// input. Source: <https://en.wikipedia.org/wiki/Brahmagupta%27s_formula>
pub fn area_of_quadrilateral(vertices: &[SpatialVector; 4]) -> Float {
    let a = (vertices[1] - vertices[0]).length();
    let b = (vertices[2] - vertices[1]).length();
    let c = (vertices[3] - vertices[2]).length();
    let d = (vertices[0] - vertices[3]).length();

    // Calculate the semi-perimeter
    let s = (a + b + c + d) * 0.5;

    ((s - a) * (s - b) * (s - c) * (s - d)).max(0.0).sqrt()
}

#[inline(always)]
/// Function that calculates the normal of a quadrilateral, based on the corner points
pub fn normal_of_quadrilateral(vertices: &[SpatialVector; 4]) -> SpatialVector {
    let a = vertices[2] - vertices[0];
    let b = vertices[3] - vertices[1];

    a.cross(b).normalize()
}

#[inline(always)]
/// Function that calculates the centroid of a quadrilateral as the average of the corner points
pub fn centroid_of_quadrilateral(vertices: &[SpatialVector; 4]) -> SpatialVector {
    0.25 * (vertices[0] + vertices[1] + vertices[2] + vertices[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_square() {
        let vertices = [
            SpatialVector::new(0.0, 0.0, 0.0),
            SpatialVector::new(1.0, 0.0, 0.0),
            SpatialVector::new(1.0, 1.0, 0.0),
            SpatialVector::new(0.0, 1.0, 0.0),
        ];

        let area = area_of_quadrilateral(&vertices);
        let normal = normal_of_quadrilateral(&vertices);
        let centroid = centroid_of_quadrilateral(&vertices);

        assert!((area - 1.0).abs() < 1e-12);
        assert!((normal - SpatialVector::unit_z()).length() < 1e-12);
        assert!((centroid - SpatialVector::new(0.5, 0.5, 0.0)).length() < 1e-12);
    }
}
