
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

use super::*;

impl SpatialVector {
    /// Rotates the vector around the given axis by the given angle, using Rodrigues' rotation
    /// formula.
    ///
    /// The axis is assumed to be normalized. The rotation direction follows the right-hand rule.
    pub fn rotate_around_axis(self, angle: Float, axis: Self) -> Self {
        let cos_angle = angle.cos();
        let sin_angle = angle.sin();

        self * cos_angle +
        axis.cross(self) * sin_angle +
        axis * (axis.dot(self) * (1.0 - cos_angle))
    }
}
