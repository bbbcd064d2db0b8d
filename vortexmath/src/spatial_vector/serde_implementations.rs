
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Serde implementations for the spatial vector, which serializes as a plain 3-element array.

use serde::{Serialize, Serializer, Deserialize, Deserializer};

use super::*;

impl Serialize for SpatialVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SpatialVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = <[Float; VECTOR_LENGTH]>::deserialize(deserializer)?;

        Ok(Self(data))
    }
}
