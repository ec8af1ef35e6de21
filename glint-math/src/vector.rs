use std::ops::{Index, IndexMut};

use crate::VecArg;

/// A fixed-size vector of `N` contiguous `f32` components.
///
/// Components `0..N` are also reachable as `x`, `y`, `z` and `w`. The layout is
/// exactly `[f32; N]`, which is what WebGL expects for `float`/`vecN` uniforms;
/// this also lets a `&mut Vector<N>` be a zero-copy view into a packed
/// [`VecArray`](crate::VecArray).
///
/// Two method families coexist:
/// * in-place (`set`, `add`, `mul`, ...) and fixed dual-operand
///   (`set_sum`, `set_product`, ...) methods write through `&mut self` and
///   return it for chaining; this is the per-frame path.
/// * `plus`, `minus`, `times`, `over`, `direction` return a new vector and
///   leave the receiver untouched.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize> {
    storage: [f32; N],
}

pub type Vec1 = Vector<1>;
pub type Vec2 = Vector<2>;
pub type Vec3 = Vector<3>;
pub type Vec4 = Vector<4>;

pub const fn vec1(x: f32) -> Vec1 {
    Vector::from_array([x])
}

pub const fn vec2(x: f32, y: f32) -> Vec2 {
    Vector::from_array([x, y])
}

pub const fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vector::from_array([x, y, z])
}

pub const fn vec4(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
    Vector::from_array([x, y, z, w])
}

impl<const N: usize> Default for Vector<N> {
    /// All zeros, except the `w` of a 4-vector which is 1.
    fn default() -> Self {
        Self::from_array(Self::unset_defaults())
    }
}

impl<const N: usize> Vector<N> {
    /// Creates a vector from a vector-like argument; see [`Vector::set`].
    pub fn new<'a>(u: impl Into<VecArg<'a, N>>) -> Self {
        let mut v = Self::default();
        v.set(u);
        v
    }

    pub const fn from_array(storage: [f32; N]) -> Self {
        Self { storage }
    }

    pub const fn zero() -> Self {
        Self::from_array([0.0; N])
    }

    /// A vector with every component drawn uniformly from `[0, 1)`.
    pub fn random() -> Self {
        Self::from_array(std::array::from_fn(|_| fastrand::f32()))
    }

    /// Reinterprets a packed component array as a vector, without copying.
    pub fn from_array_ref(storage: &[f32; N]) -> &Self {
        // SAFETY: `Vector<N>` is `repr(transparent)` over `[f32; N]`.
        unsafe { &*(storage as *const [f32; N] as *const Self) }
    }

    /// Reinterprets a packed component array as a mutable vector view.
    pub fn from_array_mut(storage: &mut [f32; N]) -> &mut Self {
        // SAFETY: `Vector<N>` is `repr(transparent)` over `[f32; N]`.
        unsafe { &mut *(storage as *mut [f32; N] as *mut Self) }
    }

    pub fn as_array(&self) -> &[f32; N] {
        &self.storage
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.storage
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.storage
    }

    pub fn x(&self) -> f32 {
        self.storage[0]
    }

    // slots left unspecified by `set`: 0, and 1 for a homogeneous w
    fn unset_defaults() -> [f32; N] {
        let mut defaults = [0.0; N];
        if N == 4 {
            defaults[3] = 1.0;
        }
        defaults
    }

    /// Overwrites the vector from a vector-like argument. Components the
    /// argument leaves unspecified become 0 (1 for the `w` of a 4-vector).
    pub fn set<'a>(&mut self, u: impl Into<VecArg<'a, N>>) -> &mut Self {
        self.storage = u.into().resolve(Self::unset_defaults());
        self
    }

    pub fn add<'a>(&mut self, u: impl Into<VecArg<'a, N>>) -> &mut Self {
        let u = u.into().resolve_or(0.0);
        self.apply(&u, |a, b| a + b)
    }

    pub fn sub<'a>(&mut self, u: impl Into<VecArg<'a, N>>) -> &mut Self {
        let u = u.into().resolve_or(0.0);
        self.apply(&u, |a, b| a - b)
    }

    /// Componentwise multiply; unspecified components multiply by 1.
    pub fn mul<'a>(&mut self, u: impl Into<VecArg<'a, N>>) -> &mut Self {
        let u = u.into().resolve_or(1.0);
        self.apply(&u, |a, b| a * b)
    }

    /// Componentwise divide; unspecified components divide by 1.
    pub fn div<'a>(&mut self, u: impl Into<VecArg<'a, N>>) -> &mut Self {
        let u = u.into().resolve_or(1.0);
        self.apply(&u, |a, b| a / b)
    }

    pub fn plus<'a>(&self, u: impl Into<VecArg<'a, N>>) -> Self {
        let mut result = *self;
        result.add(u);
        result
    }

    pub fn minus<'a>(&self, u: impl Into<VecArg<'a, N>>) -> Self {
        let mut result = *self;
        result.sub(u);
        result
    }

    pub fn times<'a>(&self, u: impl Into<VecArg<'a, N>>) -> Self {
        let mut result = *self;
        result.mul(u);
        result
    }

    pub fn over<'a>(&self, u: impl Into<VecArg<'a, N>>) -> Self {
        let mut result = *self;
        result.div(u);
        result
    }

    pub fn set_sum(&mut self, b: &Self, c: &Self) -> &mut Self {
        self.combine(b, c, |b, c| b + c)
    }

    pub fn set_difference(&mut self, b: &Self, c: &Self) -> &mut Self {
        self.combine(b, c, |b, c| b - c)
    }

    pub fn set_product(&mut self, b: &Self, c: &Self) -> &mut Self {
        self.combine(b, c, |b, c| b * c)
    }

    pub fn set_quotient(&mut self, b: &Self, c: &Self) -> &mut Self {
        self.combine(b, c, |b, c| b / c)
    }

    /// Sum of componentwise products; unspecified components count as 0.
    pub fn dot<'a>(&self, u: impl Into<VecArg<'a, N>>) -> f32 {
        let u = u.into().resolve_or(0.0);
        self.storage.iter().zip(u).map(|(a, b)| a * b).sum()
    }

    pub fn length2(&self) -> f32 {
        self.storage.iter().map(|a| a * a).sum()
    }

    pub fn length(&self) -> f32 {
        self.length2().sqrt()
    }

    /// Scales the vector to unit length in place. A zero vector yields
    /// non-finite components.
    pub fn normalize(&mut self) -> &mut Self {
        let length = self.length();
        self.storage.iter_mut().for_each(|a| *a /= length);
        self
    }

    /// The unit vector pointing the same way; the receiver is left untouched.
    pub fn direction(&self) -> Self {
        let mut result = *self;
        result.normalize();
        result
    }

    pub fn set_normalized(&mut self, b: &Self) -> &mut Self {
        self.storage = b.storage;
        self.normalize()
    }

    /// Clamps every component to `[min, max]`.
    pub fn clamp(&mut self, min: f32, max: f32) -> &mut Self {
        self.storage.iter_mut().for_each(|a| *a = clamp(*a, min, max));
        self
    }

    pub fn set_clamped(&mut self, b: &Self, min: f32, max: f32) -> &mut Self {
        self.storage = b.storage;
        self.clamp(min, max)
    }

    /// Fills every component uniformly from `[min, max)`, per axis.
    /// Unspecified lower bounds are 0 and unspecified upper bounds are 1.
    pub fn set_random<'a, 'b>(
        &mut self,
        min: impl Into<VecArg<'a, N>>,
        max: impl Into<VecArg<'b, N>>,
    ) -> &mut Self {
        let min = min.into().resolve_or(0.0);
        let max = max.into().resolve_or(1.0);
        for ((a, lo), hi) in self.storage.iter_mut().zip(min).zip(max) {
            *a = lo + fastrand::f32() * (hi - lo);
        }
        self
    }

    fn apply(&mut self, u: &[f32; N], op: impl Fn(f32, f32) -> f32) -> &mut Self {
        for (a, b) in self.storage.iter_mut().zip(u) {
            *a = op(*a, *b);
        }
        self
    }

    fn combine(&mut self, b: &Self, c: &Self, op: impl Fn(f32, f32) -> f32) -> &mut Self {
        for ((a, b), c) in self.storage.iter_mut().zip(&b.storage).zip(&c.storage) {
            *a = op(*b, *c);
        }
        self
    }
}

/// `f32::clamp` panics on NaN bounds; this passes NaN through instead.
pub(crate) fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

impl Vector<3> {
    /// Right-handed cross product; unspecified components count as 0.
    pub fn cross<'a>(&self, u: impl Into<VecArg<'a, 3>>) -> Self {
        let mut result = Self::zero();
        result.set_vector_product(self, &Self::from_array(u.into().resolve_or(0.0)));
        result
    }

    pub fn set_vector_product(&mut self, b: &Self, c: &Self) -> &mut Self {
        let [bx, by, bz] = b.storage;
        let [cx, cy, cz] = c.storage;
        self.storage = [by * cz - bz * cy, bz * cx - bx * cz, bx * cy - by * cx];
        self
    }
}

macro_rules! impl_named_components {
    ($n:literal => $($name:ident: $index:literal),+) => {
        impl Vector<$n> {
            $(
                pub fn $name(&self) -> f32 {
                    self.storage[$index]
                }
            )+
        }
    };
}

impl_named_components!(2 => y: 1);
impl_named_components!(3 => y: 1, z: 2);
impl_named_components!(4 => y: 1, z: 2, w: 3);

impl<const N: usize> From<[f32; N]> for Vector<N> {
    fn from(storage: [f32; N]) -> Self {
        Self::from_array(storage)
    }
}

impl<const N: usize> From<Vector<N>> for [f32; N] {
    fn from(v: Vector<N>) -> Self {
        v.storage
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.storage[index]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.storage[index]
    }
}
