use web_sys::{WebGlProgram, WebGlShader};

use crate::{
    error::Error,
    gl::GL,
    namespace::UniformNamespace,
    reflection::ProgramUniforms,
};

/// A linked vertex + fragment shader pair.
#[derive(Debug)]
pub struct ShaderProgram {
    program: WebGlProgram,
}

impl ShaderProgram {
    pub fn create(gl: &GL, vertex_source: &str, fragment_source: &str) -> Result<Self, Error> {
        let program = gl
            .create_program()
            .ok_or_else(Error::shader_program_creation_failed)?;

        let vertex_shader = compile_shader(gl, ShaderType::Vertex, vertex_source)?;
        let fragment_shader = compile_shader(gl, ShaderType::Fragment, fragment_source)?;

        gl.attach_shader(&program, &vertex_shader);
        gl.attach_shader(&program, &fragment_shader);
        gl.link_program(&program);

        // shaders are no longer needed once the program is linked
        gl.delete_shader(Some(&vertex_shader));
        gl.delete_shader(Some(&fragment_shader));

        if let Err(error) = check_link_status(gl, &program) {
            gl.delete_program(Some(&program));
            return Err(error);
        }

        Ok(Self { program })
    }

    pub fn use_program(&self, gl: &GL) {
        gl.use_program(Some(&self.program));
    }

    pub fn program(&self) -> &WebGlProgram {
        &self.program
    }

    /// Registers this program's active uniforms in `namespace` and returns
    /// the bindings needed to commit them.
    pub fn reflect_uniforms(
        &self,
        gl: &GL,
        namespace: &mut UniformNamespace,
    ) -> Result<ProgramUniforms, Error> {
        ProgramUniforms::reflect(gl, &self.program, namespace)
    }

    pub fn delete(&self, gl: &GL) {
        gl.delete_program(Some(&self.program));
    }
}

fn compile_shader(gl: &GL, shader_type: ShaderType, source: &str) -> Result<WebGlShader, Error> {
    let shader = gl
        .create_shader(shader_type.into())
        .ok_or_else(|| Error::shader_creation_failed(shader_type.label()))?;

    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);

    if !compiled {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        return Err(Error::shader_compile_failed(format!("{}: {log}", shader_type.label())));
    }

    Ok(shader)
}

fn check_link_status(gl: &GL, program: &WebGlProgram) -> Result<(), Error> {
    let linked = gl
        .get_program_parameter(program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);

    if !linked {
        let log = gl.get_program_info_log(program).unwrap_or_default();
        return Err(Error::shader_link_failed(log));
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum ShaderType {
    Vertex,
    Fragment,
}

impl ShaderType {
    fn label(self) -> &'static str {
        match self {
            ShaderType::Vertex => "vertex shader",
            ShaderType::Fragment => "fragment shader",
        }
    }
}

impl From<ShaderType> for u32 {
    fn from(shader_type: ShaderType) -> u32 {
        match shader_type {
            ShaderType::Vertex => GL::VERTEX_SHADER,
            ShaderType::Fragment => GL::FRAGMENT_SHADER,
        }
    }
}
