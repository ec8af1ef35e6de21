use std::collections::HashMap;

use compact_str::CompactString;

use crate::{
    error::Error,
    gl::{UniformContext, GL},
    js,
    value::{Scratch, UniformAccess, UniformShape, UniformValue},
};

type Entries<C> = HashMap<CompactString, UniformEntry<C>>;

/// A named slot in a [`UniformNamespace`].
#[derive(Debug)]
pub enum UniformEntry<C: UniformContext = GL> {
    Value(UniformValue<C>),
    /// Members of a GLSL struct uniform, e.g. `light` in `light.position`.
    Struct(UniformNamespace<C>),
}

/// Uniform storage shared by every program reflected into it.
///
/// Names use GLSL syntax: struct members are addressed with dotted paths
/// (`light.position`) and elements of struct arrays keep their index in the
/// path segment (`lights[1].color`). Array uniforms are stored under their
/// base name without the `[0]` suffix the driver reports.
///
/// Two lookup flavors exist. [`get`](Self::get), [`get_mut`](Self::get_mut)
/// and [`value`](Self::value) return `None` on a miss. [`value_mut`](Self::value_mut)
/// and [`structure_mut`](Self::structure_mut) never fail: a miss logs a
/// warning and hands out a throwaway sink, so code setting uniforms that a
/// shader compiler optimized away keeps working.
#[derive(Debug)]
pub struct UniformNamespace<C: UniformContext = GL> {
    entries: Entries<C>,
    scratch: Option<Box<Scratch<C>>>,
}

impl<C: UniformContext> Default for UniformNamespace<C> {
    fn default() -> Self {
        Self { entries: HashMap::new(), scratch: None }
    }
}

impl<C: UniformContext> UniformNamespace<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of direct entries; struct members are not counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the direct entries, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(CompactString::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        lookup(&self.entries, path).is_some()
    }

    pub fn entry(&self, path: &str) -> Option<&UniformEntry<C>> {
        lookup(&self.entries, path)
    }

    pub fn get(&self, path: &str) -> Option<&UniformValue<C>> {
        match lookup(&self.entries, path)? {
            UniformEntry::Value(value) => Some(value),
            UniformEntry::Struct(_) => None,
        }
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut UniformValue<C>> {
        match lookup_mut(&mut self.entries, path)? {
            UniformEntry::Value(value) => Some(value),
            UniformEntry::Struct(_) => None,
        }
    }

    /// Typed strict lookup.
    pub fn value<T: UniformAccess<C>>(&self, path: &str) -> Option<&T> {
        self.get(path).and_then(T::from_value)
    }

    pub fn structure(&self, path: &str) -> Option<&UniformNamespace<C>> {
        match lookup(&self.entries, path)? {
            UniformEntry::Struct(members) => Some(members),
            UniformEntry::Value(_) => None,
        }
    }

    /// Typed fail-soft lookup. An undeclared `path`, or one whose storage is
    /// not a `T`, logs a warning and returns a sink whose writes are dropped.
    pub fn value_mut<T: UniformAccess<C>>(&mut self, path: &str) -> &mut T {
        match lookup_mut(&mut self.entries, path) {
            Some(UniformEntry::Value(value)) => {
                let shape = value.shape();
                if let Some(typed) = T::from_value_mut(value) {
                    return typed;
                }
                js::warn(&format!(
                    "uniform '{path}' is a {shape}, not a {}; writes are discarded",
                    std::any::type_name::<T>()
                ));
            },
            Some(UniformEntry::Struct(_)) => {
                js::warn(&format!("uniform '{path}' is a struct; writes are discarded"));
            },
            None => {
                js::warn(&format!("uniform '{path}' is not declared; writes are discarded"));
            },
        }

        T::discarded(self.scratch.get_or_insert_with(Default::default))
    }

    /// Fail-soft struct lookup; a miss yields an empty, detached namespace.
    pub fn structure_mut(&mut self, path: &str) -> &mut UniformNamespace<C> {
        match lookup_mut(&mut self.entries, path) {
            Some(UniformEntry::Struct(members)) => return members,
            Some(UniformEntry::Value(_)) => {
                js::warn(&format!("uniform '{path}' is not a struct; writes are discarded"));
            },
            None => {
                js::warn(&format!(
                    "uniform struct '{path}' is not declared; writes are discarded"
                ));
            },
        }

        self.scratch
            .get_or_insert_with(Default::default)
            .namespace
            .get_or_insert_with(Default::default)
    }

    /// Fails if declaring `path` with `shape` would clash with an existing
    /// entry. Does not modify the namespace.
    pub(crate) fn check(&self, path: &str, shape: UniformShape) -> Result<(), Error> {
        let mut entries = &self.entries;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            let is_leaf = segments.peek().is_none();
            match (entries.get(segment), is_leaf) {
                (None, _) => return Ok(()),
                (Some(UniformEntry::Struct(members)), false) => entries = &members.entries,
                (Some(UniformEntry::Value(value)), true) => {
                    let registered = value.shape();
                    if registered == shape {
                        return Ok(());
                    }
                    return Err(Error::uniform_type_conflict(
                        path,
                        &registered.to_string(),
                        &shape.to_string(),
                    ));
                },
                (Some(_), _) => return Err(Error::uniform_struct_conflict(path)),
            }
        }

        Ok(())
    }

    /// Declares a uniform. Redeclaring one with the same shape keeps the
    /// existing storage, so programs reflected into one namespace share it.
    /// A conflicting declaration fails without modifying the namespace.
    pub(crate) fn declare(&mut self, path: &str, shape: UniformShape) -> Result<(), Error> {
        self.check(path, shape)?;

        let mut entries = &mut self.entries;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                entries
                    .entry(segment.into())
                    .or_insert_with(|| UniformEntry::Value(UniformValue::for_shape(shape)));
                break;
            }

            let entry = entries
                .entry(segment.into())
                .or_insert_with(|| UniformEntry::Struct(UniformNamespace::new()));
            entries = match entry {
                UniformEntry::Struct(members) => &mut members.entries,
                UniformEntry::Value(_) => return Err(Error::uniform_struct_conflict(path)),
            };
        }

        Ok(())
    }
}

fn lookup<'a, C: UniformContext>(
    entries: &'a Entries<C>,
    path: &str,
) -> Option<&'a UniformEntry<C>> {
    match path.split_once('.') {
        Some((head, rest)) => match entries.get(head)? {
            UniformEntry::Struct(members) => lookup(&members.entries, rest),
            UniformEntry::Value(_) => None,
        },
        None => entries.get(path),
    }
}

fn lookup_mut<'a, C: UniformContext>(
    entries: &'a mut Entries<C>,
    path: &str,
) -> Option<&'a mut UniformEntry<C>> {
    match path.split_once('.') {
        Some((head, rest)) => match entries.get_mut(head)? {
            UniformEntry::Struct(members) => lookup_mut(&mut members.entries, rest),
            UniformEntry::Value(_) => None,
        },
        None => entries.get_mut(path),
    }
}

#[cfg(test)]
mod tests {
    use glint_math::{Mat4, Vec3, Vec3Array, Vec4};

    use super::*;
    use crate::{
        mock::{self, RecordingContext},
        sampler::{Sampler, SamplerKind},
        value::UniformType,
    };

    type Namespace = UniformNamespace<RecordingContext>;

    fn single(uniform_type: UniformType) -> UniformShape {
        UniformShape { uniform_type, array_len: None }
    }

    #[test]
    fn test_declare_and_lookup() {
        let mut ns = Namespace::new();
        ns.declare("u_color", single(UniformType::Vec4)).unwrap();
        ns.declare("u_model", single(UniformType::Mat4)).unwrap();

        assert_eq!(ns.len(), 2);
        assert!(ns.value::<Vec4>("u_color").is_some());
        assert!(ns.value::<Mat4>("u_color").is_none());
        assert!(ns.get("u_missing").is_none());
    }

    #[test]
    fn test_struct_members_are_nested() {
        let mut ns = Namespace::new();
        ns.declare("light.position", single(UniformType::Vec3)).unwrap();
        ns.declare("light.color", single(UniformType::Vec3)).unwrap();
        ns.declare("lights[1].intensity", single(UniformType::Float)).unwrap();

        assert_eq!(ns.len(), 2);
        assert_eq!(ns.structure("light").map(UniformNamespace::len), Some(2));
        assert!(ns.get("light").is_none());
        assert!(ns.contains("lights[1].intensity"));

        ns.structure_mut("light").value_mut::<Vec3>("color").set((1.0, 0.5, 0.0));
        assert_eq!(ns.value::<Vec3>("light.color").unwrap().as_array(), &[1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_compatible_redeclaration_shares_storage() {
        let mut ns = Namespace::new();
        let shape = UniformShape { uniform_type: UniformType::Vec3, array_len: Some(4) };
        ns.declare("u_offsets", shape).unwrap();
        ns.value_mut::<Vec3Array>("u_offsets").at_mut(2).set((1.0, 2.0, 3.0));

        ns.declare("u_offsets", shape).unwrap();
        let offsets = ns.value::<Vec3Array>("u_offsets").unwrap();
        assert_eq!(offsets.at(2).as_array(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_conflicting_redeclaration_fails() {
        let mut ns = Namespace::new();
        let shape = UniformShape { uniform_type: UniformType::Vec3, array_len: Some(4) };
        ns.declare("u_offsets", shape).unwrap();

        let resized = ns.declare("u_offsets", UniformShape { array_len: Some(8), ..shape });
        assert!(matches!(resized, Err(Error::Reflection(_))));
        assert!(ns.declare("u_offsets", single(UniformType::Vec3)).is_err());

        ns.declare("light.position", single(UniformType::Vec3)).unwrap();
        assert!(ns.declare("light", single(UniformType::Vec3)).is_err());
        assert!(ns.declare("u_offsets.x", single(UniformType::Float)).is_err());
    }

    #[test]
    fn test_fail_soft_lookups_absorb_writes() {
        let mut ns = Namespace::new();
        ns.declare("u_tint", single(UniformType::Vec4)).unwrap();

        ns.value_mut::<Vec3>("u_missing").set((9.0, 9.0, 9.0));
        ns.value_mut::<Mat4>("u_tint").translate((1.0, 1.0, 1.0));
        ns.structure_mut("nothing").value_mut::<Vec4>("deeper").set(3.0);
        ns.value_mut::<Sampler<RecordingContext>>("u_atlas").set(5);

        assert_eq!(ns.len(), 1);
        assert!(!ns.contains("u_missing"));
        assert_eq!(ns.value::<Vec4>("u_tint").unwrap().as_array(), &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_sampler_storage_keeps_texture() {
        let mut ns = Namespace::new();
        ns.declare("u_atlas", single(UniformType::Sampler(SamplerKind::Texture2DArray))).unwrap();
        ns.value_mut::<Sampler<RecordingContext>>("u_atlas").set(12);

        let sampler = ns.value::<Sampler<RecordingContext>>("u_atlas").unwrap();
        assert_eq!(sampler.kind(), SamplerKind::Texture2DArray);
        assert_eq!(sampler.texture(), Some(&12));
    }

    #[test]
    fn test_fail_soft_misses_log_warnings() {
        mock::capture_logs();
        let mut ns = Namespace::new();
        ns.declare("u_fog_density", single(UniformType::Float)).unwrap();

        ns.value_mut::<Vec3>("u_undeclared_haze").set(1.0);
        ns.value_mut::<Vec3>("u_fog_density").set(1.0);
        ns.structure_mut("u_fog_density");

        assert!(mock::logged("uniform 'u_undeclared_haze' is not declared"));
        assert!(mock::logged("uniform 'u_fog_density' is a float, not a"));
        assert!(mock::logged("uniform 'u_fog_density' is not a struct"));
    }

    #[test]
    fn test_check_does_not_modify_namespace() {
        let mut ns = Namespace::new();
        ns.declare("light.position", single(UniformType::Vec3)).unwrap();

        assert!(ns.check("light.color", single(UniformType::Vec3)).is_ok());
        assert!(ns.check("light.position", single(UniformType::Vec4)).is_err());
        assert!(ns.check("light.position.x", single(UniformType::Float)).is_err());
        assert!(!ns.contains("light.color"));
        assert_eq!(ns.structure("light").map(UniformNamespace::len), Some(1));
    }
}
