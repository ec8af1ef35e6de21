use crate::Vector;

/// Named components of a vector-like argument.
///
/// Every field is tri-state: `Some(0.0)` is an explicit zero and is honored as
/// such, while `None` leaves the slot to the default of the receiving
/// operation (0 for additive operations, 1 for multiplicative ones).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Components {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub w: Option<f32>,
}

impl Components {
    pub const fn new() -> Self {
        Self { x: None, y: None, z: None, w: None }
    }

    pub const fn with_x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    pub const fn with_y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    pub const fn with_z(mut self, z: f32) -> Self {
        self.z = Some(z);
        self
    }

    pub const fn with_w(mut self, w: f32) -> Self {
        self.w = Some(w);
        self
    }

    fn slots(&self) -> [Option<f32>; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

/// A vector-like operand, resolved once at the call boundary into `N` concrete
/// components.
///
/// Operations that accept `impl Into<VecArg>` can be called with:
/// * a same-arity vector: `v.add(&other)`
/// * a tuple or array of positional components: `v.add((1.0, 2.0))`
/// * named components: `v.add(Components::new().with_z(1.0))`
/// * a bare scalar, which addresses the first component only: `v.add(2.0)`
///
/// Positional and named forms may leave trailing components unspecified; those
/// take the default of the operation.
#[derive(Debug, Clone, Copy)]
pub enum VecArg<'a, const N: usize> {
    Scalar(f32),
    Components(Components),
    Vector(&'a Vector<N>),
}

impl<const N: usize> VecArg<'_, N> {
    /// Resolves the operand, taking unspecified components from `defaults`.
    pub fn resolve(&self, defaults: [f32; N]) -> [f32; N] {
        match *self {
            VecArg::Vector(v) => *v.as_array(),
            VecArg::Scalar(s) => {
                let mut out = defaults;
                if let Some(first) = out.first_mut() {
                    *first = s;
                }
                out
            }
            VecArg::Components(c) => {
                let mut out = defaults;
                for (slot, value) in out.iter_mut().zip(c.slots()) {
                    if let Some(value) = value {
                        *slot = value;
                    }
                }
                out
            }
        }
    }

    /// Resolves the operand with the same default for every component.
    pub fn resolve_or(&self, default: f32) -> [f32; N] {
        self.resolve([default; N])
    }
}

impl<const N: usize> From<f32> for VecArg<'_, N> {
    fn from(value: f32) -> Self {
        VecArg::Scalar(value)
    }
}

impl<const N: usize> From<Components> for VecArg<'_, N> {
    fn from(value: Components) -> Self {
        VecArg::Components(value)
    }
}

impl<'a, const N: usize> From<&'a Vector<N>> for VecArg<'a, N> {
    fn from(value: &'a Vector<N>) -> Self {
        VecArg::Vector(value)
    }
}

impl<'a, const N: usize> From<&'a mut Vector<N>> for VecArg<'a, N> {
    fn from(value: &'a mut Vector<N>) -> Self {
        VecArg::Vector(value)
    }
}

impl<const N: usize> From<(f32, f32)> for VecArg<'_, N> {
    fn from((x, y): (f32, f32)) -> Self {
        VecArg::Components(Components::new().with_x(x).with_y(y))
    }
}

impl<const N: usize> From<(f32, f32, f32)> for VecArg<'_, N> {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        VecArg::Components(Components::new().with_x(x).with_y(y).with_z(z))
    }
}

impl<const N: usize> From<(f32, f32, f32, f32)> for VecArg<'_, N> {
    fn from((x, y, z, w): (f32, f32, f32, f32)) -> Self {
        VecArg::Components(Components::new().with_x(x).with_y(y).with_z(z).with_w(w))
    }
}

impl<const N: usize, const M: usize> From<[f32; M]> for VecArg<'_, N> {
    fn from(values: [f32; M]) -> Self {
        let mut slots = [None; 4];
        for (slot, value) in slots.iter_mut().zip(values) {
            *slot = Some(value);
        }
        let [x, y, z, w] = slots;
        VecArg::Components(Components { x, y, z, w })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_addresses_first_component() {
        let arg: VecArg<'_, 3> = VecArg::from(2.0);
        assert_eq!(arg.resolve_or(0.0), [2.0, 0.0, 0.0]);
        assert_eq!(arg.resolve_or(1.0), [2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_explicit_zero_is_not_absent() {
        let arg: VecArg<'_, 4> = VecArg::from(Components::new().with_x(0.0).with_w(0.0));
        assert_eq!(arg.resolve_or(1.0), [0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_positional_tuple_leaves_trailing_defaults() {
        let arg: VecArg<'_, 4> = VecArg::from((3.0, 4.0));
        assert_eq!(arg.resolve([0.0, 0.0, 0.0, 1.0]), [3.0, 4.0, 0.0, 1.0]);
    }

    #[test]
    fn test_components_beyond_arity_are_ignored() {
        let arg: VecArg<'_, 2> = VecArg::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(arg.resolve_or(0.0), [1.0, 2.0]);
    }

    #[test]
    fn test_vector_operand_is_taken_verbatim() {
        let v = Vector::from_array([0.0, 5.0, 0.0]);
        let arg: VecArg<'_, 3> = VecArg::from(&v);
        assert_eq!(arg.resolve_or(1.0), [0.0, 5.0, 0.0]);
    }
}
