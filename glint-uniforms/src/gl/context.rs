use std::fmt::Debug;

use compact_str::CompactString;
use web_sys::{WebGlProgram, WebGlTexture, WebGlUniformLocation};

use crate::{gl::GL, sampler::SamplerKind};

/// One entry of a linked program's active uniform list.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveUniform<L> {
    /// Name as reported by the driver; arrays end in `[0]`.
    pub name: CompactString,
    /// GL type enum, e.g. `FLOAT_VEC3`.
    pub type_tag: u32,
    /// Element count; 1 for non-arrays.
    pub size: usize,
    pub location: L,
}

/// The slice of a WebGL2 context that uniform reflection and upload need.
///
/// Implemented for [`GL`]; uniform values and namespaces are generic over it
/// so they can be driven without a browser.
pub trait UniformContext {
    type Program;
    type Location: Debug;
    type Texture: Debug;

    fn upload_vec1s(&self, location: &Self::Location, data: &[f32]);
    fn upload_vec2s(&self, location: &Self::Location, data: &[f32]);
    fn upload_vec3s(&self, location: &Self::Location, data: &[f32]);
    fn upload_vec4s(&self, location: &Self::Location, data: &[f32]);
    /// `data` holds column-major matrices; no transposition is requested.
    fn upload_mat4s(&self, location: &Self::Location, data: &[f32]);
    fn upload_ints(&self, location: &Self::Location, data: &[i32]);

    /// Makes `unit` the active texture unit and binds `texture` to the target
    /// matching `kind`.
    fn bind_texture_unit(&self, unit: u32, kind: SamplerKind, texture: &Self::Texture);

    /// Lists the active uniforms of a linked program. Uniforms without a
    /// location (block members) are left out.
    fn active_uniforms(&self, program: &Self::Program) -> Vec<ActiveUniform<Self::Location>>;
}

impl UniformContext for GL {
    type Program = WebGlProgram;
    type Location = WebGlUniformLocation;
    type Texture = WebGlTexture;

    fn upload_vec1s(&self, location: &WebGlUniformLocation, data: &[f32]) {
        self.uniform1fv_with_f32_array(Some(location), data);
    }

    fn upload_vec2s(&self, location: &WebGlUniformLocation, data: &[f32]) {
        self.uniform2fv_with_f32_array(Some(location), data);
    }

    fn upload_vec3s(&self, location: &WebGlUniformLocation, data: &[f32]) {
        self.uniform3fv_with_f32_array(Some(location), data);
    }

    fn upload_vec4s(&self, location: &WebGlUniformLocation, data: &[f32]) {
        self.uniform4fv_with_f32_array(Some(location), data);
    }

    fn upload_mat4s(&self, location: &WebGlUniformLocation, data: &[f32]) {
        self.uniform_matrix4fv_with_f32_array(Some(location), false, data);
    }

    fn upload_ints(&self, location: &WebGlUniformLocation, data: &[i32]) {
        self.uniform1iv_with_i32_array(Some(location), data);
    }

    fn bind_texture_unit(&self, unit: u32, kind: SamplerKind, texture: &WebGlTexture) {
        self.active_texture(GL::TEXTURE0 + unit);
        self.bind_texture(kind.target(), Some(texture));
    }

    fn active_uniforms(&self, program: &WebGlProgram) -> Vec<ActiveUniform<WebGlUniformLocation>> {
        let count = self
            .get_program_parameter(program, GL::ACTIVE_UNIFORMS)
            .as_f64()
            .unwrap_or(0.0) as u32;

        (0..count)
            .filter_map(|index| self.get_active_uniform(program, index))
            .filter_map(|info| {
                let name = info.name();
                let location = self.get_uniform_location(program, &name)?;
                Some(ActiveUniform {
                    name: name.into(),
                    type_tag: info.type_(),
                    size: info.size().max(1) as usize,
                    location,
                })
            })
            .collect()
    }
}
