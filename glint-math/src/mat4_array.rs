use std::ops::{Deref, DerefMut};

use crate::mat4::Mat4;

/// An owned, fixed-length array of [`Mat4`]s packed into one buffer of
/// `16 * len` floats, as a `mat4[]` uniform expects it.
#[derive(Debug, Clone, PartialEq)]
pub struct Mat4Array {
    storage: Box<[[f32; 16]]>,
}

/// A borrowed window onto consecutive matrices of a [`Mat4Array`]; element
/// views share storage with the parent.
#[repr(transparent)]
#[derive(Debug, PartialEq)]
pub struct Mat4Slice([[f32; 16]]);

impl Mat4Array {
    /// Creates `len` identity matrices.
    pub fn new(len: usize) -> Self {
        Self { storage: vec![*Mat4::IDENTITY.as_array(); len].into_boxed_slice() }
    }

    pub fn from_elements(elements: &[Mat4]) -> Self {
        Self { storage: elements.iter().map(|m| *m.as_array()).collect() }
    }
}

impl Deref for Mat4Array {
    type Target = Mat4Slice;

    fn deref(&self) -> &Mat4Slice {
        Mat4Slice::from_packed(&self.storage)
    }
}

impl DerefMut for Mat4Array {
    fn deref_mut(&mut self) -> &mut Mat4Slice {
        Mat4Slice::from_packed_mut(&mut self.storage)
    }
}

impl Mat4Slice {
    pub fn from_packed(elements: &[[f32; 16]]) -> &Self {
        // SAFETY: `Mat4Slice` is `repr(transparent)` over `[[f32; 16]]`.
        unsafe { &*(elements as *const [[f32; 16]] as *const Self) }
    }

    pub fn from_packed_mut(elements: &mut [[f32; 16]]) -> &mut Self {
        // SAFETY: `Mat4Slice` is `repr(transparent)` over `[[f32; 16]]`.
        unsafe { &mut *(elements as *mut [[f32; 16]] as *mut Self) }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        self.0.as_flattened()
    }

    pub fn at(&self, index: usize) -> &Mat4 {
        Mat4::from_array_ref(&self.0[index])
    }

    pub fn at_mut(&mut self, index: usize) -> &mut Mat4 {
        Mat4::from_array_mut(&mut self.0[index])
    }

    pub fn get(&self, index: usize) -> Option<&Mat4> {
        self.0.get(index).map(Mat4::from_array_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Mat4> {
        self.0.get_mut(index).map(Mat4::from_array_mut)
    }

    pub fn subarray(&self, begin: usize, end: usize) -> &Mat4Slice {
        Mat4Slice::from_packed(&self.0[begin..end])
    }

    pub fn subarray_mut(&mut self, begin: usize, end: usize) -> &mut Mat4Slice {
        Mat4Slice::from_packed_mut(&mut self.0[begin..end])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mat4> {
        self.0.iter().map(Mat4::from_array_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Mat4> {
        self.0.iter_mut().map(Mat4::from_array_mut)
    }

    pub fn set(&mut self, b: &Mat4Slice) -> &mut Self {
        for (dst, src) in self.0.iter_mut().zip(&b.0) {
            *dst = *src;
        }
        self
    }
}
