mod context;
mod program;

pub use context::{ActiveUniform, UniformContext};
pub use program::ShaderProgram;

pub type GL = web_sys::WebGl2RenderingContext;
