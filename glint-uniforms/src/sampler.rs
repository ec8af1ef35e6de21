use std::fmt;

use crate::{
    error::Error,
    gl::{UniformContext, GL},
    uniform::Uniform,
};

/// Texture target a sampler uniform reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerKind {
    Texture2D,
    TextureCube,
    Texture2DArray,
}

impl SamplerKind {
    /// The `bindTexture` target for this kind.
    pub fn target(self) -> u32 {
        match self {
            SamplerKind::Texture2D => GL::TEXTURE_2D,
            SamplerKind::TextureCube => GL::TEXTURE_CUBE_MAP,
            SamplerKind::Texture2DArray => GL::TEXTURE_2D_ARRAY,
        }
    }
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SamplerKind::Texture2D => "sampler2D",
            SamplerKind::TextureCube => "samplerCube",
            SamplerKind::Texture2DArray => "sampler2DArray",
        })
    }
}

/// A sampler uniform: the texture to bind when the owning program is
/// committed. Texture units are handed out at commit time.
#[derive(Debug)]
pub struct Sampler<C: UniformContext = GL> {
    kind: SamplerKind,
    texture: Option<C::Texture>,
}

impl<C: UniformContext> Sampler<C> {
    pub fn new(kind: SamplerKind) -> Self {
        Self { kind, texture: None }
    }

    pub fn kind(&self) -> SamplerKind {
        self.kind
    }

    pub fn texture(&self) -> Option<&C::Texture> {
        self.texture.as_ref()
    }

    pub fn set(&mut self, texture: C::Texture) -> &mut Self {
        self.texture = Some(texture);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.texture = None;
        self
    }
}

impl<C: UniformContext> Uniform<C> for Sampler<C> {
    fn commit(&self, gl: &C, location: &C::Location, texture_unit: &mut u32) -> Result<(), Error> {
        let texture = self.texture.as_ref().ok_or(Error::sampler_unbound(self.kind))?;

        gl.bind_texture_unit(*texture_unit, self.kind, texture);
        gl.upload_ints(location, &[*texture_unit as i32]);
        *texture_unit += 1;
        Ok(())
    }
}

/// A fixed-length array of samplers of one kind, e.g. `sampler2D layers[4]`.
/// Consecutive texture units are assigned to consecutive elements.
#[derive(Debug)]
pub struct SamplerArray<C: UniformContext = GL> {
    kind: SamplerKind,
    textures: Vec<Option<C::Texture>>,
}

impl<C: UniformContext> SamplerArray<C> {
    pub fn new(kind: SamplerKind, len: usize) -> Self {
        Self { kind, textures: std::iter::repeat_with(|| None).take(len).collect() }
    }

    pub fn kind(&self) -> SamplerKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn texture(&self, index: usize) -> Option<&C::Texture> {
        self.textures.get(index).and_then(Option::as_ref)
    }

    /// Assigns the texture for element `index`; out-of-range indices are
    /// ignored.
    pub fn set(&mut self, index: usize, texture: C::Texture) -> &mut Self {
        if let Some(slot) = self.textures.get_mut(index) {
            *slot = Some(texture);
        }
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.textures.iter_mut().for_each(|slot| *slot = None);
        self
    }
}

impl<C: UniformContext> Uniform<C> for SamplerArray<C> {
    fn commit(&self, gl: &C, location: &C::Location, texture_unit: &mut u32) -> Result<(), Error> {
        if self.textures.iter().any(Option::is_none) {
            return Err(Error::sampler_unbound(self.kind));
        }

        let first_unit = *texture_unit;
        let mut units = Vec::with_capacity(self.textures.len());
        for (offset, texture) in self.textures.iter().flatten().enumerate() {
            let unit = first_unit + offset as u32;
            gl.bind_texture_unit(unit, self.kind, texture);
            units.push(unit as i32);
        }

        gl.upload_ints(location, &units);
        *texture_unit += units.len() as u32;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Call, RecordingContext};

    #[test]
    fn test_unbound_sampler_fails_to_commit() {
        let gl = RecordingContext::default();
        let sampler = Sampler::<RecordingContext>::new(SamplerKind::TextureCube);

        let mut unit = 0;
        let result = sampler.commit(&gl, &7, &mut unit);
        assert!(matches!(result, Err(Error::Resource(_))));
        assert_eq!(unit, 0);
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn test_sampler_takes_next_texture_unit() {
        let gl = RecordingContext::default();
        let mut sampler = Sampler::<RecordingContext>::new(SamplerKind::Texture2D);
        sampler.set(42);

        let mut unit = 3;
        sampler.commit(&gl, &7, &mut unit).unwrap();
        assert_eq!(unit, 4);
        assert_eq!(gl.calls(), vec![
            Call::BindTexture { unit: 3, kind: SamplerKind::Texture2D, texture: 42 },
            Call::Ints { location: 7, data: vec![3] },
        ]);
    }

    #[test]
    fn test_sampler_array_binds_consecutive_units() {
        let gl = RecordingContext::default();
        let mut samplers = SamplerArray::<RecordingContext>::new(SamplerKind::Texture2DArray, 2);
        samplers.set(0, 10).set(1, 11).set(5, 99);

        let mut unit = 1;
        samplers.commit(&gl, &2, &mut unit).unwrap();
        assert_eq!(unit, 3);
        assert_eq!(gl.calls(), vec![
            Call::BindTexture { unit: 1, kind: SamplerKind::Texture2DArray, texture: 10 },
            Call::BindTexture { unit: 2, kind: SamplerKind::Texture2DArray, texture: 11 },
            Call::Ints { location: 2, data: vec![1, 2] },
        ]);
    }

    #[test]
    fn test_partially_bound_sampler_array_fails() {
        let gl = RecordingContext::default();
        let mut samplers = SamplerArray::<RecordingContext>::new(SamplerKind::Texture2D, 2);
        samplers.set(1, 11);

        let mut unit = 0;
        assert!(samplers.commit(&gl, &2, &mut unit).is_err());
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn test_sampler_kind_targets() {
        assert_eq!(SamplerKind::Texture2D.target(), GL::TEXTURE_2D);
        assert_eq!(SamplerKind::TextureCube.target(), GL::TEXTURE_CUBE_MAP);
        assert_eq!(SamplerKind::TextureCube.to_string(), "samplerCube");
    }
}
