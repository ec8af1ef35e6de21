use glint_math::{Mat4, Mat4Array, VecArray, Vector};

use crate::{error::Error, gl::UniformContext};

/// A value that can be uploaded to a uniform location of the current program.
pub trait Uniform<C: UniformContext> {
    /// Uploads `self` to `location`. Samplers bind their textures starting at
    /// `*texture_unit` and advance it by the number of units they occupy.
    fn commit(&self, gl: &C, location: &C::Location, texture_unit: &mut u32) -> Result<(), Error>;
}

macro_rules! impl_vector_uniform {
    ($($n:literal => $upload:ident),* $(,)?) => {$(
        impl<C: UniformContext> Uniform<C> for Vector<$n> {
            fn commit(&self, gl: &C, location: &C::Location, _: &mut u32) -> Result<(), Error> {
                gl.$upload(location, self.as_slice());
                Ok(())
            }
        }

        impl<C: UniformContext> Uniform<C> for VecArray<$n> {
            fn commit(&self, gl: &C, location: &C::Location, _: &mut u32) -> Result<(), Error> {
                gl.$upload(location, self.as_slice());
                Ok(())
            }
        }
    )*};
}

impl_vector_uniform!(1 => upload_vec1s, 2 => upload_vec2s, 3 => upload_vec3s, 4 => upload_vec4s);

impl<C: UniformContext> Uniform<C> for Mat4 {
    fn commit(&self, gl: &C, location: &C::Location, _: &mut u32) -> Result<(), Error> {
        gl.upload_mat4s(location, self.as_slice());
        Ok(())
    }
}

impl<C: UniformContext> Uniform<C> for Mat4Array {
    fn commit(&self, gl: &C, location: &C::Location, _: &mut u32) -> Result<(), Error> {
        gl.upload_mat4s(location, self.as_slice());
        Ok(())
    }
}
