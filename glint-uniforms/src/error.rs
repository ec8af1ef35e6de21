use crate::sampler::SamplerKind;

/// Error categories.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Shader compilation, linking, or program creation errors.
    #[error("Shader error: {0}")]
    Shader(String),

    /// Texture or sampler binding errors raised while committing uniforms.
    #[error("Resource error: {0}")]
    Resource(String),

    /// A program declares a uniform that clashes with one already registered.
    #[error("Reflection error: {0}")]
    Reflection(String),
}

impl Error {
    // Shader errors
    pub fn shader_creation_failed(detail: &str) -> Self {
        Self::Shader(format!("Shader creation failed: {detail}"))
    }

    pub fn shader_compile_failed(log: String) -> Self {
        Self::Shader(format!("Shader compilation failed: {log}"))
    }

    pub fn shader_program_creation_failed() -> Self {
        Self::Shader("Shader program creation failed".to_string())
    }

    pub fn shader_link_failed(log: String) -> Self {
        Self::Shader(format!("Shader linking failed: {log}"))
    }

    // Resource errors
    pub fn sampler_unbound(kind: SamplerKind) -> Self {
        Self::Resource(format!("No texture assigned to {kind} sampler"))
    }

    // Reflection errors
    pub fn uniform_type_conflict(name: &str, registered: &str, declared: &str) -> Self {
        Self::Reflection(format!(
            "Uniform '{name}' is registered as {registered} but declared as {declared}"
        ))
    }

    pub fn uniform_struct_conflict(name: &str) -> Self {
        Self::Reflection(format!("Uniform '{name}' is used both as a struct and as a value"))
    }

    /// Attaches the name of the uniform being committed to the message.
    pub(crate) fn in_uniform(self, name: &str) -> Self {
        match self {
            Self::Shader(message) => Self::Shader(format!("{message} (uniform '{name}')")),
            Self::Resource(message) => Self::Resource(format!("{message} (uniform '{name}')")),
            Self::Reflection(message) => Self::Reflection(format!("{message} (uniform '{name}')")),
        }
    }
}
