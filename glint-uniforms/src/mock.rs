//! A [`UniformContext`] that records every call, for driving uniforms in
//! native tests, and a log capture for asserting on warnings.

use std::{
    cell::RefCell,
    io::{self, Write},
    sync::{Mutex, Once},
};

use env_logger::{Target, WriteStyle};
use log::LevelFilter;

use crate::{
    gl::{ActiveUniform, UniformContext},
    sampler::SamplerKind,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Floats { location: u32, components: usize, data: Vec<f32> },
    Matrices { location: u32, data: Vec<f32> },
    Ints { location: u32, data: Vec<i32> },
    BindTexture { unit: u32, kind: SamplerKind, texture: u32 },
}

#[derive(Debug, Default)]
pub(crate) struct RecordingContext {
    uniforms: Vec<ActiveUniform<u32>>,
    calls: RefCell<Vec<Call>>,
}

impl RecordingContext {
    pub(crate) fn with_uniforms(uniforms: Vec<ActiveUniform<u32>>) -> Self {
        Self { uniforms, calls: RefCell::default() }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn floats(&self, location: u32, components: usize, data: &[f32]) {
        self.calls.borrow_mut().push(Call::Floats { location, components, data: data.to_vec() });
    }
}

impl UniformContext for RecordingContext {
    type Program = ();
    type Location = u32;
    type Texture = u32;

    fn upload_vec1s(&self, location: &u32, data: &[f32]) {
        self.floats(*location, 1, data);
    }

    fn upload_vec2s(&self, location: &u32, data: &[f32]) {
        self.floats(*location, 2, data);
    }

    fn upload_vec3s(&self, location: &u32, data: &[f32]) {
        self.floats(*location, 3, data);
    }

    fn upload_vec4s(&self, location: &u32, data: &[f32]) {
        self.floats(*location, 4, data);
    }

    fn upload_mat4s(&self, location: &u32, data: &[f32]) {
        self.calls
            .borrow_mut()
            .push(Call::Matrices { location: *location, data: data.to_vec() });
    }

    fn upload_ints(&self, location: &u32, data: &[i32]) {
        self.calls
            .borrow_mut()
            .push(Call::Ints { location: *location, data: data.to_vec() });
    }

    fn bind_texture_unit(&self, unit: u32, kind: SamplerKind, texture: &u32) {
        self.calls
            .borrow_mut()
            .push(Call::BindTexture { unit, kind, texture: *texture });
    }

    fn active_uniforms(&self, _program: &()) -> Vec<ActiveUniform<u32>> {
        self.uniforms.clone()
    }
}

static CAPTURED_LOGS: Mutex<Vec<u8>> = Mutex::new(Vec::new());
static INSTALL_LOGGER: Once = Once::new();

struct CaptureWriter;

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        CAPTURED_LOGS.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Routes `log` output of the whole test binary into a shared buffer.
/// Tests run in parallel, so assertions should look for messages that
/// mention names unique to the test.
pub(crate) fn capture_logs() {
    INSTALL_LOGGER.call_once(|| {
        let _ = env_logger::Builder::new()
            .filter_level(LevelFilter::Info)
            .write_style(WriteStyle::Never)
            .target(Target::Pipe(Box::new(CaptureWriter)))
            .try_init();
    });
}

pub(crate) fn logged(needle: &str) -> bool {
    String::from_utf8_lossy(&CAPTURED_LOGS.lock().unwrap()).contains(needle)
}
