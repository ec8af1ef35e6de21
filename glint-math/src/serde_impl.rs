//! `Serialize`/`Deserialize` for the value types, as flat float sequences.
//!
//! Vectors serialize as their `N` components; matrices as 16 floats in
//! row-major reading order, the same order [`Mat4::from_rows`] takes.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::{mat4::Mat4, vector::Vector};

impl<const N: usize> Serialize for Vector<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.as_array())
    }
}

impl<'de, const N: usize> Deserialize<'de> for Vector<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let components = Vec::<f32>::deserialize(deserializer)?;
        let storage: [f32; N] = components
            .try_into()
            .map_err(|c: Vec<f32>| D::Error::invalid_length(c.len(), &"one float per vector component"))?;

        Ok(Vector::from_array(storage))
    }
}

impl Serialize for Mat4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.to_rows())
    }
}

impl<'de> Deserialize<'de> for Mat4 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<f32>::deserialize(deserializer)?;
        let rows: [f32; 16] = rows
            .try_into()
            .map_err(|r: Vec<f32>| D::Error::invalid_length(r.len(), &"16 floats in row-major order"))?;

        Ok(Mat4::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        mat4::Mat4,
        vector::{vec3, Vec3},
    };

    #[test]
    fn test_vector_serializes_as_component_list() {
        let json = serde_json::to_string(&vec3(1.0, 2.5, -3.0)).unwrap();
        assert_eq!(json, "[1.0,2.5,-3.0]");
    }

    #[test]
    fn test_vector_rejects_wrong_arity() {
        let result = serde_json::from_str::<Vec3>("[1.0, 2.0]");
        assert!(result.is_err());
    }

    #[test]
    fn test_matrix_uses_row_major_reading_order() {
        let mut m = Mat4::identity();
        m.translate((7.0, 8.0, 9.0));

        let json = serde_json::to_string(&m).unwrap();
        assert!(json.ends_with("7.0,8.0,9.0,1.0]"));

        let parsed: Mat4 = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
    }
}
