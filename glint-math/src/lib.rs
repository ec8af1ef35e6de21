//! Scalar, vector and 4×4 matrix types for feeding WebGL shader uniforms.
//!
//! Everything is a plain, fixed-size `f32` buffer laid out exactly as the
//! corresponding `uniform*fv` call expects it, so uploading never copies or
//! converts. Arrays ([`VecArray`], [`Mat4Array`]) pack their elements back to
//! back and hand out zero-copy element views.
//!
//! Vectors are row vectors: they are multiplied by matrices from the right.

mod arg;
mod array;
mod homogeneous;
mod mat4;
mod mat4_array;
#[cfg(feature = "serde")]
mod serde_impl;
mod vector;

pub use arg::{Components, VecArg};
pub use array::{Vec1Array, Vec2Array, Vec3Array, Vec4Array, VecArray, VecSlice};
pub use mat4::Mat4;
pub use mat4_array::{Mat4Array, Mat4Slice};
pub use vector::{vec1, vec2, vec3, vec4, Vec1, Vec2, Vec3, Vec4, Vector};

#[cfg(test)]
pub(crate) fn assert_components_eq(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} != {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        approx::assert_relative_eq!(*a, *e, epsilon = 1e-4, max_relative = 1e-4);
    }
}
