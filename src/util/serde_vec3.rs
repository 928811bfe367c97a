//! `{ "x": .., "y": .., "z": .. }` encoding for [`glam::Vec3`].
//!
//! Scene documents store vectors as objects rather than glam's default
//! `[x, y, z]` arrays. Use with `#[serde(with = "crate::util::serde_vec3")]`.

use glam::Vec3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
struct Xyz {
    x: f32,
    y: f32,
    z: f32,
}

/// Serialize a vector as an `{x, y, z}` object.
///
/// # Errors
/// Whatever the serializer reports.
pub fn serialize<S: Serializer>(v: &Vec3, s: S) -> Result<S::Ok, S::Error> {
    Xyz {
        x: v.x,
        y: v.y,
        z: v.z,
    }
    .serialize(s)
}

/// Deserialize a vector from an `{x, y, z}` object.
///
/// # Errors
/// When the input is not an `{x, y, z}` object.
pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec3, D::Error> {
    let Xyz { x, y, z } = Xyz::deserialize(d)?;
    Ok(Vec3::new(x, y, z))
}

/// Same encoding for an optional vector (`null` or absent maps to `None`).
pub mod option {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Xyz;

    /// Serialize `Some(v)` as `{x, y, z}` and `None` as `null`.
    ///
    /// # Errors
    /// Whatever the serializer reports.
    pub fn serialize<S: Serializer>(
        v: &Option<Vec3>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        v.map(|v| Xyz {
            x: v.x,
            y: v.y,
            z: v.z,
        })
        .serialize(s)
    }

    /// Deserialize `null` as `None` and `{x, y, z}` as `Some`.
    ///
    /// # Errors
    /// When the input is not an `{x, y, z}` object.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Vec3>, D::Error> {
        Ok(Option::<Xyz>::deserialize(d)?.map(|Xyz { x, y, z }| Vec3::new(x, y, z)))
    }
}
