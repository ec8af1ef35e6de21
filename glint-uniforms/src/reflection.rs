use compact_str::CompactString;

use crate::{
    error::Error,
    gl::{UniformContext, GL},
    js,
    namespace::UniformNamespace,
    uniform::Uniform,
    value::{UniformShape, UniformType},
};

/// Where a reflected uniform lives in one program, and what it is.
#[derive(Debug)]
pub struct UniformBinding<C: UniformContext = GL> {
    name: CompactString,
    shape: UniformShape,
    location: C::Location,
}

impl<C: UniformContext> UniformBinding<C> {
    /// Namespace path of the uniform, without any `[0]` array suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> UniformShape {
        self.shape
    }

    pub fn location(&self) -> &C::Location {
        &self.location
    }
}

/// The uniforms of one linked program, bound to their storage in a
/// [`UniformNamespace`].
///
/// Built once per program by [`reflect`](Self::reflect); [`commit`](Self::commit)
/// then uploads the current namespace values while that program is in use.
#[derive(Debug)]
pub struct ProgramUniforms<C: UniformContext = GL> {
    bindings: Vec<UniformBinding<C>>,
    base_texture_unit: u32,
}

impl<C: UniformContext> ProgramUniforms<C> {
    /// Enumerates the active uniforms of `program` and declares each one in
    /// `namespace`. Uniforms of a type without storage support (ints, bools,
    /// non-4×4 matrices) are skipped with a warning.
    ///
    /// # Errors
    /// Returns [`Error::Reflection`] if a uniform clashes with a differently
    /// shaped declaration already in `namespace`, or with another uniform of
    /// the same program. `namespace` is left untouched on error.
    pub fn reflect(
        gl: &C,
        program: &C::Program,
        namespace: &mut UniformNamespace<C>,
    ) -> Result<Self, Error> {
        let mut bindings = Vec::new();

        for active in gl.active_uniforms(program) {
            let Some(uniform_type) = UniformType::from_gl(active.type_tag) else {
                js::warn(&format!(
                    "skipping uniform '{}': unsupported type 0x{:04X}",
                    active.name, active.type_tag
                ));
                continue;
            };

            let (name, array_len) = split_array_suffix(&active.name, active.size);
            bindings.push(UniformBinding {
                name: name.into(),
                shape: UniformShape { uniform_type, array_len },
                location: active.location,
            });
        }

        // validate the whole program before touching the shared namespace
        let mut staged = UniformNamespace::<C>::new();
        for binding in &bindings {
            staged.declare(&binding.name, binding.shape)?;
            namespace.check(&binding.name, binding.shape)?;
        }
        for binding in &bindings {
            namespace.declare(&binding.name, binding.shape)?;
        }

        js::info(&format!("reflected {} active uniforms", bindings.len()));
        Ok(Self { bindings, base_texture_unit: 0 })
    }

    /// First texture unit handed to sampler uniforms during commit.
    pub fn base_texture_unit(mut self, unit: u32) -> Self {
        self.base_texture_unit = unit;
        self
    }

    pub fn bindings(&self) -> &[UniformBinding<C>] {
        &self.bindings
    }

    /// Uploads every bound uniform from `namespace` to the program currently
    /// in use. Samplers receive consecutive texture units in binding order.
    /// Bindings missing from `namespace` are skipped with a warning.
    ///
    /// # Errors
    /// Returns [`Error::Resource`] if a sampler has no texture assigned.
    pub fn commit(&self, gl: &C, namespace: &UniformNamespace<C>) -> Result<(), Error> {
        let mut texture_unit = self.base_texture_unit;

        for binding in &self.bindings {
            let Some(value) = namespace.get(&binding.name) else {
                js::warn(&format!(
                    "uniform '{}' is missing from the namespace; not committed",
                    binding.name
                ));
                continue;
            };

            value
                .commit(gl, &binding.location, &mut texture_unit)
                .map_err(|e| e.in_uniform(&binding.name))?;
        }

        Ok(())
    }
}

/// Drivers report array uniforms as `name[0]`; the element count comes from
/// the reported size.
fn split_array_suffix(name: &str, size: usize) -> (&str, Option<usize>) {
    match name.strip_suffix("[0]") {
        Some(base) => (base, Some(size)),
        None if size > 1 => (name, Some(size)),
        None => (name, None),
    }
}

#[cfg(test)]
mod tests {
    use glint_math::{Mat4, Vec1Array, Vec3};

    use super::*;
    use crate::{
        gl::ActiveUniform,
        mock::{self, Call, RecordingContext},
        sampler::{Sampler, SamplerArray, SamplerKind},
    };

    fn active(name: &str, type_tag: u32, size: usize, location: u32) -> ActiveUniform<u32> {
        ActiveUniform { name: name.into(), type_tag, size, location }
    }

    fn scene_context() -> RecordingContext {
        RecordingContext::with_uniforms(vec![
            active("u_model", GL::FLOAT_MAT4, 1, 0),
            active("u_weights[0]", GL::FLOAT, 3, 1),
            active("u_atlas", GL::SAMPLER_2D_ARRAY, 1, 2),
            active("u_mode", GL::INT, 1, 3),
            active("light.position", GL::FLOAT_VEC3, 1, 4),
            active("u_layers[0]", GL::SAMPLER_2D, 2, 5),
        ])
    }

    #[test]
    fn test_split_array_suffix() {
        assert_eq!(split_array_suffix("u_weights[0]", 3), ("u_weights", Some(3)));
        assert_eq!(split_array_suffix("u_single[0]", 1), ("u_single", Some(1)));
        assert_eq!(split_array_suffix("lights[1].color", 1), ("lights[1].color", None));
        assert_eq!(split_array_suffix("u_model", 1), ("u_model", None));
    }

    #[test]
    fn test_reflect_declares_supported_uniforms() {
        let gl = scene_context();
        let mut ns = UniformNamespace::new();
        let uniforms = ProgramUniforms::reflect(&gl, &(), &mut ns).unwrap();

        let names: Vec<_> = uniforms.bindings().iter().map(UniformBinding::name).collect();
        assert_eq!(names, ["u_model", "u_weights", "u_atlas", "light.position", "u_layers"]);
        assert!(!ns.contains("u_mode"));
        assert_eq!(ns.value::<Vec1Array>("u_weights").map(|w| w.len()), Some(3));
        assert_eq!(
            ns.value::<Sampler<RecordingContext>>("u_atlas").map(Sampler::kind),
            Some(SamplerKind::Texture2DArray)
        );
        assert!(ns.value::<Vec3>("light.position").is_some());
    }

    #[test]
    fn test_commit_uploads_in_binding_order() {
        let gl = scene_context();
        let mut ns = UniformNamespace::new();
        let uniforms = ProgramUniforms::reflect(&gl, &(), &mut ns).unwrap().base_texture_unit(2);

        ns.value_mut::<Mat4>("u_model").translate((1.0, 2.0, 3.0));
        ns.value_mut::<Vec1Array>("u_weights").at_mut(1).set(0.5);
        ns.value_mut::<Sampler<RecordingContext>>("u_atlas").set(30);
        ns.value_mut::<SamplerArray<RecordingContext>>("u_layers").set(0, 40).set(1, 41);
        ns.structure_mut("light").value_mut::<Vec3>("position").set((0.0, 10.0, 0.0));

        let model = ns.value::<Mat4>("u_model").unwrap().as_slice().to_vec();
        uniforms.commit(&gl, &ns).unwrap();

        assert_eq!(gl.calls(), vec![
            Call::Matrices { location: 0, data: model },
            Call::Floats { location: 1, components: 1, data: vec![0.0, 0.5, 0.0] },
            Call::BindTexture { unit: 2, kind: SamplerKind::Texture2DArray, texture: 30 },
            Call::Ints { location: 2, data: vec![2] },
            Call::Floats { location: 4, components: 3, data: vec![0.0, 10.0, 0.0] },
            Call::BindTexture { unit: 3, kind: SamplerKind::Texture2D, texture: 40 },
            Call::BindTexture { unit: 4, kind: SamplerKind::Texture2D, texture: 41 },
            Call::Ints { location: 5, data: vec![3, 4] },
        ]);
    }

    #[test]
    fn test_commit_fails_on_unbound_sampler() {
        let gl = scene_context();
        let mut ns = UniformNamespace::new();
        let uniforms = ProgramUniforms::reflect(&gl, &(), &mut ns).unwrap();

        let error = uniforms.commit(&gl, &ns).unwrap_err();
        assert!(matches!(&error, Error::Resource(message) if message.contains("u_atlas")));
    }

    #[test]
    fn test_programs_share_a_namespace() {
        let first = RecordingContext::with_uniforms(vec![
            active("u_view", GL::FLOAT_MAT4, 1, 0),
            active("u_tint", GL::FLOAT_VEC4, 1, 1),
        ]);
        let second = RecordingContext::with_uniforms(vec![active("u_view", GL::FLOAT_MAT4, 1, 7)]);
        let conflicting = RecordingContext::with_uniforms(vec![active("u_tint", GL::FLOAT_VEC3, 1, 2)]);

        let mut ns = UniformNamespace::new();
        ProgramUniforms::reflect(&first, &(), &mut ns).unwrap();
        let shared = ProgramUniforms::reflect(&second, &(), &mut ns).unwrap();

        ns.value_mut::<Mat4>("u_view").scale((2.0, 2.0, 2.0));
        shared.commit(&second, &ns).unwrap();
        assert!(matches!(&second.calls()[0], Call::Matrices { location: 7, data } if data[0] == 2.0));

        let result = ProgramUniforms::reflect(&conflicting, &(), &mut ns);
        assert!(matches!(result, Err(Error::Reflection(_))));
    }

    #[test]
    fn test_failed_reflect_leaves_namespace_untouched() {
        let mut ns = UniformNamespace::new();
        let tinted = RecordingContext::with_uniforms(vec![active("u_tint", GL::FLOAT_VEC3, 1, 0)]);
        ProgramUniforms::reflect(&tinted, &(), &mut ns).unwrap();

        let conflicting = RecordingContext::with_uniforms(vec![
            active("u_color", GL::FLOAT_VEC4, 1, 0),
            active("glow.radius", GL::FLOAT, 1, 1),
            active("u_tint", GL::FLOAT_VEC4, 1, 2),
        ]);
        let result = ProgramUniforms::reflect(&conflicting, &(), &mut ns);
        assert!(matches!(result, Err(Error::Reflection(_))));
        assert_eq!(ns.len(), 1);
        assert!(!ns.contains("u_color"));
        assert!(!ns.contains("glow"));

        let unrelated = RecordingContext::with_uniforms(vec![active("u_color", GL::FLOAT_VEC3, 1, 0)]);
        ProgramUniforms::reflect(&unrelated, &(), &mut ns).unwrap();
        assert!(ns.value::<Vec3>("u_color").is_some());
    }

    #[test]
    fn test_reflect_rejects_uniforms_clashing_within_one_program() {
        let gl = RecordingContext::with_uniforms(vec![
            active("u_fog", GL::FLOAT, 1, 0),
            active("u_fog.density", GL::FLOAT, 1, 1),
        ]);
        let mut ns = UniformNamespace::new();
        assert!(ProgramUniforms::reflect(&gl, &(), &mut ns).is_err());
        assert!(ns.is_empty());
    }

    #[test]
    fn test_commit_warns_on_binding_missing_from_namespace() {
        mock::capture_logs();
        let gl = RecordingContext::with_uniforms(vec![active("u_exposure_scale", GL::FLOAT, 1, 0)]);
        let mut reflected = UniformNamespace::new();
        let uniforms = ProgramUniforms::reflect(&gl, &(), &mut reflected).unwrap();

        uniforms.commit(&gl, &UniformNamespace::new()).unwrap();
        assert!(gl.calls().is_empty());
        assert!(mock::logged("uniform 'u_exposure_scale' is missing from the namespace"));
    }
}
