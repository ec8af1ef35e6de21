use std::fmt;

use glint_math::{
    Mat4, Mat4Array, Vec1, Vec1Array, Vec2, Vec2Array, Vec3, Vec3Array, Vec4, Vec4Array,
};

use crate::{
    error::Error,
    gl::{UniformContext, GL},
    sampler::{Sampler, SamplerArray, SamplerKind},
    uniform::Uniform,
};

/// GLSL uniform types with a storage representation in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
    Sampler(SamplerKind),
}

impl UniformType {
    /// Maps a GL type enum to a supported uniform type.
    pub fn from_gl(type_tag: u32) -> Option<Self> {
        let uniform_type = match type_tag {
            GL::FLOAT => UniformType::Float,
            GL::FLOAT_VEC2 => UniformType::Vec2,
            GL::FLOAT_VEC3 => UniformType::Vec3,
            GL::FLOAT_VEC4 => UniformType::Vec4,
            GL::FLOAT_MAT4 => UniformType::Mat4,
            GL::SAMPLER_2D => UniformType::Sampler(SamplerKind::Texture2D),
            GL::SAMPLER_CUBE => UniformType::Sampler(SamplerKind::TextureCube),
            GL::SAMPLER_2D_ARRAY => UniformType::Sampler(SamplerKind::Texture2DArray),
            _ => return None,
        };
        Some(uniform_type)
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformType::Float => f.write_str("float"),
            UniformType::Vec2 => f.write_str("vec2"),
            UniformType::Vec3 => f.write_str("vec3"),
            UniformType::Vec4 => f.write_str("vec4"),
            UniformType::Mat4 => f.write_str("mat4"),
            UniformType::Sampler(kind) => write!(f, "{kind}"),
        }
    }
}

/// Type plus array length (`None` for a non-array) of a uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformShape {
    pub uniform_type: UniformType,
    pub array_len: Option<usize>,
}

impl fmt::Display for UniformShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.array_len {
            Some(len) => write!(f, "{}[{len}]", self.uniform_type),
            None => write!(f, "{}", self.uniform_type),
        }
    }
}

/// Storage for one uniform, shaped after its GLSL declaration.
#[derive(Debug)]
pub enum UniformValue<C: UniformContext = GL> {
    Vec1(Vec1),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    Vec1Array(Vec1Array),
    Vec2Array(Vec2Array),
    Vec3Array(Vec3Array),
    Vec4Array(Vec4Array),
    Mat4Array(Mat4Array),
    Sampler(Sampler<C>),
    SamplerArray(SamplerArray<C>),
}

impl<C: UniformContext> UniformValue<C> {
    /// Default storage for `shape`: zero vectors (`w = 1` for vec4),
    /// identity matrices, and samplers with no texture.
    pub fn for_shape(shape: UniformShape) -> Self {
        match (shape.uniform_type, shape.array_len) {
            (UniformType::Float, None) => Self::Vec1(Vec1::default()),
            (UniformType::Vec2, None) => Self::Vec2(Vec2::default()),
            (UniformType::Vec3, None) => Self::Vec3(Vec3::default()),
            (UniformType::Vec4, None) => Self::Vec4(Vec4::default()),
            (UniformType::Mat4, None) => Self::Mat4(Mat4::identity()),
            (UniformType::Sampler(kind), None) => Self::Sampler(Sampler::new(kind)),
            (UniformType::Float, Some(len)) => Self::Vec1Array(Vec1Array::new(len)),
            (UniformType::Vec2, Some(len)) => Self::Vec2Array(Vec2Array::new(len)),
            (UniformType::Vec3, Some(len)) => Self::Vec3Array(Vec3Array::new(len)),
            (UniformType::Vec4, Some(len)) => Self::Vec4Array(Vec4Array::new(len)),
            (UniformType::Mat4, Some(len)) => Self::Mat4Array(Mat4Array::new(len)),
            (UniformType::Sampler(kind), Some(len)) => {
                Self::SamplerArray(SamplerArray::new(kind, len))
            },
        }
    }

    pub fn shape(&self) -> UniformShape {
        let (uniform_type, array_len) = match self {
            Self::Vec1(_) => (UniformType::Float, None),
            Self::Vec2(_) => (UniformType::Vec2, None),
            Self::Vec3(_) => (UniformType::Vec3, None),
            Self::Vec4(_) => (UniformType::Vec4, None),
            Self::Mat4(_) => (UniformType::Mat4, None),
            Self::Sampler(s) => (UniformType::Sampler(s.kind()), None),
            Self::Vec1Array(a) => (UniformType::Float, Some(a.len())),
            Self::Vec2Array(a) => (UniformType::Vec2, Some(a.len())),
            Self::Vec3Array(a) => (UniformType::Vec3, Some(a.len())),
            Self::Vec4Array(a) => (UniformType::Vec4, Some(a.len())),
            Self::Mat4Array(a) => (UniformType::Mat4, Some(a.len())),
            Self::SamplerArray(a) => (UniformType::Sampler(a.kind()), Some(a.len())),
        };
        UniformShape { uniform_type, array_len }
    }

    /// Typed view of the value; `None` if `T` does not match its shape.
    pub fn downcast_ref<T: UniformAccess<C>>(&self) -> Option<&T> {
        T::from_value(self)
    }

    pub fn downcast_mut<T: UniformAccess<C>>(&mut self) -> Option<&mut T> {
        T::from_value_mut(self)
    }
}

impl<C: UniformContext> Uniform<C> for UniformValue<C> {
    fn commit(&self, gl: &C, location: &C::Location, texture_unit: &mut u32) -> Result<(), Error> {
        match self {
            Self::Vec1(v) => v.commit(gl, location, texture_unit),
            Self::Vec2(v) => v.commit(gl, location, texture_unit),
            Self::Vec3(v) => v.commit(gl, location, texture_unit),
            Self::Vec4(v) => v.commit(gl, location, texture_unit),
            Self::Mat4(m) => m.commit(gl, location, texture_unit),
            Self::Vec1Array(a) => a.commit(gl, location, texture_unit),
            Self::Vec2Array(a) => a.commit(gl, location, texture_unit),
            Self::Vec3Array(a) => a.commit(gl, location, texture_unit),
            Self::Vec4Array(a) => a.commit(gl, location, texture_unit),
            Self::Mat4Array(a) => a.commit(gl, location, texture_unit),
            Self::Sampler(s) => s.commit(gl, location, texture_unit),
            Self::SamplerArray(s) => s.commit(gl, location, texture_unit),
        }
    }
}

/// Types that can be looked up in a [`UniformNamespace`](crate::UniformNamespace)
/// by their concrete storage type.
pub trait UniformAccess<C: UniformContext>: Sized {
    fn from_value(value: &UniformValue<C>) -> Option<&Self>;
    fn from_value_mut(value: &mut UniformValue<C>) -> Option<&mut Self>;

    /// A throwaway instance that absorbs writes to a missing or mistyped
    /// uniform.
    fn discarded(scratch: &mut Scratch<C>) -> &mut Self;
}

/// Write sinks handed out by fail-soft lookups. Nothing in here is ever
/// committed.
#[derive(Debug)]
pub struct Scratch<C: UniformContext> {
    vec1: Vec1,
    vec2: Vec2,
    vec3: Vec3,
    vec4: Vec4,
    mat4: Mat4,
    vec1_array: Vec1Array,
    vec2_array: Vec2Array,
    vec3_array: Vec3Array,
    vec4_array: Vec4Array,
    mat4_array: Mat4Array,
    sampler: Sampler<C>,
    sampler_array: SamplerArray<C>,
    value: Option<Box<UniformValue<C>>>,
    pub(crate) namespace: Option<Box<crate::namespace::UniformNamespace<C>>>,
}

impl<C: UniformContext> Default for Scratch<C> {
    fn default() -> Self {
        Self {
            vec1: Vec1::default(),
            vec2: Vec2::default(),
            vec3: Vec3::default(),
            vec4: Vec4::default(),
            mat4: Mat4::identity(),
            vec1_array: Vec1Array::new(0),
            vec2_array: Vec2Array::new(0),
            vec3_array: Vec3Array::new(0),
            vec4_array: Vec4Array::new(0),
            mat4_array: Mat4Array::new(0),
            sampler: Sampler::new(SamplerKind::Texture2D),
            sampler_array: SamplerArray::new(SamplerKind::Texture2D, 0),
            value: None,
            namespace: None,
        }
    }
}

macro_rules! impl_uniform_access {
    ($($ty:ty => $variant:ident, $scratch:ident;)*) => {$(
        impl<C: UniformContext> UniformAccess<C> for $ty {
            fn from_value(value: &UniformValue<C>) -> Option<&Self> {
                match value {
                    UniformValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_value_mut(value: &mut UniformValue<C>) -> Option<&mut Self> {
                match value {
                    UniformValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn discarded(scratch: &mut Scratch<C>) -> &mut Self {
                &mut scratch.$scratch
            }
        }
    )*};
}

impl_uniform_access! {
    Vec1 => Vec1, vec1;
    Vec2 => Vec2, vec2;
    Vec3 => Vec3, vec3;
    Vec4 => Vec4, vec4;
    Mat4 => Mat4, mat4;
    Vec1Array => Vec1Array, vec1_array;
    Vec2Array => Vec2Array, vec2_array;
    Vec3Array => Vec3Array, vec3_array;
    Vec4Array => Vec4Array, vec4_array;
    Mat4Array => Mat4Array, mat4_array;
    Sampler<C> => Sampler, sampler;
    SamplerArray<C> => SamplerArray, sampler_array;
}

impl<C: UniformContext> UniformAccess<C> for UniformValue<C> {
    fn from_value(value: &UniformValue<C>) -> Option<&Self> {
        Some(value)
    }

    fn from_value_mut(value: &mut UniformValue<C>) -> Option<&mut Self> {
        Some(value)
    }

    fn discarded(scratch: &mut Scratch<C>) -> &mut Self {
        scratch
            .value
            .get_or_insert_with(|| Box::new(UniformValue::Vec1(Vec1::default())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RecordingContext;

    type Value = UniformValue<RecordingContext>;

    fn shape(uniform_type: UniformType, array_len: Option<usize>) -> UniformShape {
        UniformShape { uniform_type, array_len }
    }

    #[test]
    fn test_gl_type_mapping() {
        assert_eq!(UniformType::from_gl(GL::FLOAT_VEC3), Some(UniformType::Vec3));
        assert_eq!(
            UniformType::from_gl(GL::SAMPLER_CUBE),
            Some(UniformType::Sampler(SamplerKind::TextureCube))
        );
        assert_eq!(UniformType::from_gl(GL::FLOAT_MAT3), None);
        assert_eq!(UniformType::from_gl(GL::INT), None);
    }

    #[test]
    fn test_default_storage_per_shape() {
        let value = Value::for_shape(shape(UniformType::Vec4, None));
        assert_eq!(value.downcast_ref::<Vec4>().map(|v| *v.as_array()), Some([0.0, 0.0, 0.0, 1.0]));

        let value = Value::for_shape(shape(UniformType::Mat4, Some(3)));
        let matrices = value.downcast_ref::<Mat4Array>().unwrap();
        assert_eq!(matrices.len(), 3);
        assert!(matrices.iter().all(|m| *m == Mat4::identity()));

        let value = Value::for_shape(shape(UniformType::Float, Some(5)));
        assert_eq!(value.downcast_ref::<Vec1Array>().unwrap().as_slice(), &[0.0; 5]);
    }

    #[test]
    fn test_shape_round_trips_through_storage() {
        let shapes = [
            shape(UniformType::Float, None),
            shape(UniformType::Vec2, Some(4)),
            shape(UniformType::Mat4, None),
            shape(UniformType::Sampler(SamplerKind::Texture2DArray), Some(2)),
        ];
        for s in shapes {
            assert_eq!(Value::for_shape(s).shape(), s);
        }
    }

    #[test]
    fn test_downcast_rejects_other_types() {
        let mut value = Value::for_shape(shape(UniformType::Vec3, None));
        assert!(value.downcast_ref::<Vec4>().is_none());
        assert!(value.downcast_mut::<Vec3Array>().is_none());

        value.downcast_mut::<Vec3>().unwrap().set((1.0, 2.0, 3.0));
        assert_eq!(value.downcast_ref::<Vec3>().unwrap().as_array(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(shape(UniformType::Vec3, Some(4)).to_string(), "vec3[4]");
        assert_eq!(
            shape(UniformType::Sampler(SamplerKind::Texture2D), None).to_string(),
            "sampler2D"
        );
    }
}
