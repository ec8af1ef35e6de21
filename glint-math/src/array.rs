use std::ops::{Deref, DerefMut};

use crate::{
    homogeneous::{xy00, xy01, xyz0, xyz1, xyzw},
    mat4::Mat4,
    vector::{clamp, Vector},
};

/// An owned, fixed-length array of `N`-component vectors packed back to back
/// in one buffer, as a `vecN[]` uniform expects it.
///
/// The array never grows or shrinks after construction. All operations live
/// on [`VecSlice`], which the array dereferences to.
#[derive(Debug, Clone, PartialEq)]
pub struct VecArray<const N: usize> {
    storage: Box<[[f32; N]]>,
}

pub type Vec1Array = VecArray<1>;
pub type Vec2Array = VecArray<2>;
pub type Vec3Array = VecArray<3>;
pub type Vec4Array = VecArray<4>;

/// A borrowed window onto consecutive elements of a [`VecArray`].
///
/// Element accessors ([`VecSlice::at_mut`], [`VecSlice::subarray_mut`]) hand
/// out views that share storage with the parent: writing through a view
/// writes the parent's buffer. The borrow checker keeps a view from
/// outliving its parent or overlapping a live mutable borrow of it.
///
/// Bulk operations write `self` from their operands. When operand lengths
/// differ, only the common prefix is processed.
#[repr(transparent)]
#[derive(Debug, PartialEq)]
pub struct VecSlice<const N: usize>([[f32; N]]);

impl<const N: usize> VecArray<N> {
    /// Creates `len` zero-filled elements.
    pub fn new(len: usize) -> Self {
        Self { storage: vec![[0.0; N]; len].into_boxed_slice() }
    }

    pub fn from_elements(elements: &[Vector<N>]) -> Self {
        Self { storage: elements.iter().map(|v| *v.as_array()).collect() }
    }
}

impl<const N: usize> Deref for VecArray<N> {
    type Target = VecSlice<N>;

    fn deref(&self) -> &VecSlice<N> {
        VecSlice::from_packed(&self.storage)
    }
}

impl<const N: usize> DerefMut for VecArray<N> {
    fn deref_mut(&mut self) -> &mut VecSlice<N> {
        VecSlice::from_packed_mut(&mut self.storage)
    }
}

impl<const N: usize> VecSlice<N> {
    pub fn from_packed(elements: &[[f32; N]]) -> &Self {
        // SAFETY: `VecSlice<N>` is `repr(transparent)` over `[[f32; N]]`.
        unsafe { &*(elements as *const [[f32; N]] as *const Self) }
    }

    pub fn from_packed_mut(elements: &mut [[f32; N]]) -> &mut Self {
        // SAFETY: `VecSlice<N>` is `repr(transparent)` over `[[f32; N]]`.
        unsafe { &mut *(elements as *mut [[f32; N]] as *mut Self) }
    }

    /// Number of vectors, not floats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The whole window as flat floats, ready for upload.
    pub fn as_slice(&self) -> &[f32] {
        self.0.as_flattened()
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        self.0.as_flattened_mut()
    }

    /// View of element `index`. Panics when out of range.
    pub fn at(&self, index: usize) -> &Vector<N> {
        Vector::from_array_ref(&self.0[index])
    }

    /// Mutable view of element `index`. Panics when out of range.
    pub fn at_mut(&mut self, index: usize) -> &mut Vector<N> {
        Vector::from_array_mut(&mut self.0[index])
    }

    pub fn get(&self, index: usize) -> Option<&Vector<N>> {
        self.0.get(index).map(Vector::from_array_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Vector<N>> {
        self.0.get_mut(index).map(Vector::from_array_mut)
    }

    /// View of elements `begin..end`. Panics when out of range.
    pub fn subarray(&self, begin: usize, end: usize) -> &VecSlice<N> {
        VecSlice::from_packed(&self.0[begin..end])
    }

    pub fn subarray_mut(&mut self, begin: usize, end: usize) -> &mut VecSlice<N> {
        VecSlice::from_packed_mut(&mut self.0[begin..end])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector<N>> {
        self.0.iter().map(Vector::from_array_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Vector<N>> {
        self.0.iter_mut().map(Vector::from_array_mut)
    }

    /// Copies `b` into `self`.
    pub fn set(&mut self, b: &VecSlice<N>) -> &mut Self {
        for (dst, src) in self.0.iter_mut().zip(&b.0) {
            *dst = *src;
        }
        self
    }

    pub fn add(&mut self, b: &VecSlice<N>, c: &VecSlice<N>) -> &mut Self {
        self.combine(b, c, |b, c| b + c)
    }

    pub fn sub(&mut self, b: &VecSlice<N>, c: &VecSlice<N>) -> &mut Self {
        self.combine(b, c, |b, c| b - c)
    }

    pub fn mul(&mut self, b: &VecSlice<N>, c: &VecSlice<N>) -> &mut Self {
        self.combine(b, c, |b, c| b * c)
    }

    pub fn div(&mut self, b: &VecSlice<N>, c: &VecSlice<N>) -> &mut Self {
        self.combine(b, c, |b, c| b / c)
    }

    /// `self[i] = b[i] + c[i]`, with the scalar `c[i]` added to every
    /// component of `b[i]`.
    pub fn add_with_vec1s(&mut self, b: &VecSlice<N>, c: &VecSlice<1>) -> &mut Self {
        self.combine_with_vec1s(b, c, |b, c| b + c)
    }

    pub fn sub_with_vec1s(&mut self, b: &VecSlice<N>, c: &VecSlice<1>) -> &mut Self {
        self.combine_with_vec1s(b, c, |b, c| b - c)
    }

    /// Scales every `b[i]` by its own factor `c[i]`.
    pub fn mul_with_vec1s(&mut self, b: &VecSlice<N>, c: &VecSlice<1>) -> &mut Self {
        self.combine_with_vec1s(b, c, |b, c| b * c)
    }

    pub fn div_with_vec1s(&mut self, b: &VecSlice<N>, c: &VecSlice<1>) -> &mut Self {
        self.combine_with_vec1s(b, c, |b, c| b / c)
    }

    /// `self[i] = b[i] + c` for a single shared vector `c`.
    pub fn add_all(&mut self, b: &VecSlice<N>, c: &Vector<N>) -> &mut Self {
        self.combine_all(b, c, |b, c| b + c)
    }

    pub fn sub_all(&mut self, b: &VecSlice<N>, c: &Vector<N>) -> &mut Self {
        self.combine_all(b, c, |b, c| b - c)
    }

    pub fn mul_all(&mut self, b: &VecSlice<N>, c: &Vector<N>) -> &mut Self {
        self.combine_all(b, c, |b, c| b * c)
    }

    pub fn div_all(&mut self, b: &VecSlice<N>, c: &Vector<N>) -> &mut Self {
        self.combine_all(b, c, |b, c| b / c)
    }

    pub fn scale(&mut self, b: &VecSlice<N>, s: f32) -> &mut Self {
        self.map_from(b, |b| b * s)
    }

    /// Raises every component of `b` to the power `s`.
    pub fn exp(&mut self, b: &VecSlice<N>, s: f32) -> &mut Self {
        self.map_from(b, |b| b.powf(s))
    }

    /// Writes the unit vector of every `b[i]`. Zero vectors become non-finite.
    pub fn normalize(&mut self, b: &VecSlice<N>) -> &mut Self {
        for (dst, src) in self.0.iter_mut().zip(&b.0) {
            Vector::from_array_mut(dst).set_normalized(Vector::from_array_ref(src));
        }
        self
    }

    /// Fills every float of the window uniformly from `[0, 1)`.
    pub fn random(&mut self) -> &mut Self {
        self.as_mut_slice().iter_mut().for_each(|a| *a = fastrand::f32());
        self
    }

    /// Clamps every float of the window to `[0, 1]`.
    pub fn clamp(&mut self) -> &mut Self {
        self.as_mut_slice().iter_mut().for_each(|a| *a = clamp(*a, 0.0, 1.0));
        self
    }

    /// `self[i] += c[i]`; the receiver is also the first operand.
    pub fn add_in_place(&mut self, c: &VecSlice<N>) -> &mut Self {
        self.update(c, |a, c| a + c)
    }

    pub fn sub_in_place(&mut self, c: &VecSlice<N>) -> &mut Self {
        self.update(c, |a, c| a - c)
    }

    pub fn mul_in_place(&mut self, c: &VecSlice<N>) -> &mut Self {
        self.update(c, |a, c| a * c)
    }

    pub fn div_in_place(&mut self, c: &VecSlice<N>) -> &mut Self {
        self.update(c, |a, c| a / c)
    }

    pub fn add_with_vec1s_in_place(&mut self, c: &VecSlice<1>) -> &mut Self {
        self.update_with_vec1s(c, |a, c| a + c)
    }

    pub fn sub_with_vec1s_in_place(&mut self, c: &VecSlice<1>) -> &mut Self {
        self.update_with_vec1s(c, |a, c| a - c)
    }

    pub fn mul_with_vec1s_in_place(&mut self, c: &VecSlice<1>) -> &mut Self {
        self.update_with_vec1s(c, |a, c| a * c)
    }

    pub fn div_with_vec1s_in_place(&mut self, c: &VecSlice<1>) -> &mut Self {
        self.update_with_vec1s(c, |a, c| a / c)
    }

    pub fn add_all_in_place(&mut self, c: &Vector<N>) -> &mut Self {
        self.update_all(c, |a, c| a + c)
    }

    pub fn sub_all_in_place(&mut self, c: &Vector<N>) -> &mut Self {
        self.update_all(c, |a, c| a - c)
    }

    pub fn mul_all_in_place(&mut self, c: &Vector<N>) -> &mut Self {
        self.update_all(c, |a, c| a * c)
    }

    pub fn div_all_in_place(&mut self, c: &Vector<N>) -> &mut Self {
        self.update_all(c, |a, c| a / c)
    }

    pub fn scale_in_place(&mut self, s: f32) -> &mut Self {
        self.map_in_place(|a| a * s)
    }

    pub fn exp_in_place(&mut self, s: f32) -> &mut Self {
        self.map_in_place(|a| a.powf(s))
    }

    pub fn normalize_in_place(&mut self) -> &mut Self {
        for dst in self.0.iter_mut() {
            Vector::from_array_mut(dst).normalize();
        }
        self
    }

    fn combine(&mut self, b: &Self, c: &Self, op: impl Fn(f32, f32) -> f32) -> &mut Self {
        let dst = self.as_mut_slice();
        for ((a, b), c) in dst.iter_mut().zip(b.as_slice()).zip(c.as_slice()) {
            *a = op(*b, *c);
        }
        self
    }

    fn combine_with_vec1s(
        &mut self,
        b: &Self,
        c: &VecSlice<1>,
        op: impl Fn(f32, f32) -> f32,
    ) -> &mut Self {
        for ((dst, b), [c]) in self.0.iter_mut().zip(&b.0).zip(&c.0) {
            for (a, b) in dst.iter_mut().zip(b) {
                *a = op(*b, *c);
            }
        }
        self
    }

    fn combine_all(&mut self, b: &Self, c: &Vector<N>, op: impl Fn(f32, f32) -> f32) -> &mut Self {
        for (dst, b) in self.0.iter_mut().zip(&b.0) {
            for ((a, b), c) in dst.iter_mut().zip(b).zip(c.as_array()) {
                *a = op(*b, *c);
            }
        }
        self
    }

    fn map_from(&mut self, b: &Self, op: impl Fn(f32) -> f32) -> &mut Self {
        let dst = self.as_mut_slice();
        for (a, b) in dst.iter_mut().zip(b.as_slice()) {
            *a = op(*b);
        }
        self
    }

    fn transform_from(
        &mut self,
        v: &Self,
        m: &Mat4,
        kernel: impl Fn(&Mat4, [f32; N]) -> [f32; N],
    ) -> &mut Self {
        for (dst, src) in self.0.iter_mut().zip(&v.0) {
            *dst = kernel(m, *src);
        }
        self
    }

    fn update(&mut self, c: &Self, op: impl Fn(f32, f32) -> f32) -> &mut Self {
        for (a, c) in self.as_mut_slice().iter_mut().zip(c.as_slice()) {
            *a = op(*a, *c);
        }
        self
    }

    fn update_with_vec1s(
        &mut self,
        c: &VecSlice<1>,
        op: impl Fn(f32, f32) -> f32,
    ) -> &mut Self {
        for (dst, [c]) in self.0.iter_mut().zip(&c.0) {
            dst.iter_mut().for_each(|a| *a = op(*a, *c));
        }
        self
    }

    fn update_all(&mut self, c: &Vector<N>, op: impl Fn(f32, f32) -> f32) -> &mut Self {
        for dst in self.0.iter_mut() {
            for (a, c) in dst.iter_mut().zip(c.as_array()) {
                *a = op(*a, *c);
            }
        }
        self
    }

    fn map_in_place(&mut self, op: impl Fn(f32) -> f32) -> &mut Self {
        self.as_mut_slice().iter_mut().for_each(|a| *a = op(*a));
        self
    }

    fn transform_in_place(
        &mut self,
        m: &Mat4,
        kernel: impl Fn(&Mat4, [f32; N]) -> [f32; N],
    ) -> &mut Self {
        for dst in self.0.iter_mut() {
            *dst = kernel(m, *dst);
        }
        self
    }
}

impl VecSlice<2> {
    /// Writes `(cos a, sin a)` for every angle in `alphas`.
    pub fn cossin(&mut self, alphas: &VecSlice<1>) -> &mut Self {
        for (dst, [alpha]) in self.0.iter_mut().zip(&alphas.0) {
            let (sin, cos) = alpha.sin_cos();
            *dst = [cos, sin];
        }
        self
    }

    /// Transforms every element of `v` as a point by `m`, with perspective
    /// division.
    pub fn xy01mul(&mut self, v: &VecSlice<2>, m: &Mat4) -> &mut Self {
        self.transform_from(v, m, xy01)
    }

    /// Transforms every element of `v` as a direction by `m`.
    pub fn xy00mul(&mut self, v: &VecSlice<2>, m: &Mat4) -> &mut Self {
        self.transform_from(v, m, xy00)
    }

    pub fn xy01mul_in_place(&mut self, m: &Mat4) -> &mut Self {
        self.transform_in_place(m, xy01)
    }

    pub fn xy00mul_in_place(&mut self, m: &Mat4) -> &mut Self {
        self.transform_in_place(m, xy00)
    }
}

impl VecSlice<3> {
    pub fn xyz1mul(&mut self, v: &VecSlice<3>, m: &Mat4) -> &mut Self {
        self.transform_from(v, m, xyz1)
    }

    pub fn xyz0mul(&mut self, v: &VecSlice<3>, m: &Mat4) -> &mut Self {
        self.transform_from(v, m, xyz0)
    }

    pub fn xyz1mul_in_place(&mut self, m: &Mat4) -> &mut Self {
        self.transform_in_place(m, xyz1)
    }

    pub fn xyz0mul_in_place(&mut self, m: &Mat4) -> &mut Self {
        self.transform_in_place(m, xyz0)
    }
}

impl VecSlice<4> {
    pub fn xyzwmul(&mut self, v: &VecSlice<4>, m: &Mat4) -> &mut Self {
        self.transform_from(v, m, xyzw)
    }

    pub fn xyzwmul_in_place(&mut self, m: &Mat4) -> &mut Self {
        self.transform_in_place(m, xyzw)
    }
}
