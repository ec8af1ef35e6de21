//! WebGL2 uniform plumbing for the `glint-math` types.
//!
//! A [`ShaderProgram`] is reflected into a [`UniformNamespace`], which owns
//! typed storage for every active uniform. Application code writes to that
//! storage each frame; [`ProgramUniforms::commit`] then uploads it to the
//! program in use.
//!
//! ```ignore
//! let mut uniforms = UniformNamespace::new();
//! let program = ShaderProgram::create(&gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
//! let bindings = program.reflect_uniforms(&gl, &mut uniforms)?;
//!
//! uniforms.value_mut::<Mat4>("u_projection").set(projection.as_slice());
//! uniforms.value_mut::<Sampler>("u_atlas").set(atlas_texture);
//!
//! program.use_program(&gl);
//! bindings.commit(&gl, &uniforms)?;
//! ```

mod error;
mod gl;
mod js;
mod namespace;
mod reflection;
mod sampler;
mod uniform;
mod value;

#[cfg(test)]
mod mock;

pub use error::Error;
pub use gl::{ActiveUniform, ShaderProgram, UniformContext, GL};
pub use glint_math;
pub use namespace::{UniformEntry, UniformNamespace};
pub use reflection::{ProgramUniforms, UniformBinding};
pub use sampler::{Sampler, SamplerArray, SamplerKind};
pub use uniform::Uniform;
#[doc(hidden)]
pub use value::Scratch;
pub use value::{UniformAccess, UniformShape, UniformType, UniformValue};
