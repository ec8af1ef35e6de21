//! Row-vector × [`Mat4`] transforms for vectors shorter than four components.
//!
//! The vector is padded to four components, multiplied by the matrix from the
//! right and truncated again. Naming follows the padding: `xy01` treats a 2D
//! vector as a point `(x, y, 0, 1)` and divides by the resulting `w`, `xy00`
//! treats it as a direction `(x, y, 0, 0)` that ignores translation.

use crate::{
    mat4::Mat4,
    vector::{Vec2, Vec3, Vec4},
};

pub(crate) fn xy01(m: &Mat4, [x, y]: [f32; 2]) -> [f32; 2] {
    let w = x * m.at(0, 3) + y * m.at(1, 3) + m.at(3, 3);
    [
        (x * m.at(0, 0) + y * m.at(1, 0) + m.at(3, 0)) / w,
        (x * m.at(0, 1) + y * m.at(1, 1) + m.at(3, 1)) / w,
    ]
}

pub(crate) fn xy00(m: &Mat4, [x, y]: [f32; 2]) -> [f32; 2] {
    [
        x * m.at(0, 0) + y * m.at(1, 0),
        x * m.at(0, 1) + y * m.at(1, 1),
    ]
}

pub(crate) fn xyz1(m: &Mat4, [x, y, z]: [f32; 3]) -> [f32; 3] {
    let w = x * m.at(0, 3) + y * m.at(1, 3) + z * m.at(2, 3) + m.at(3, 3);
    std::array::from_fn(|col| {
        (x * m.at(0, col) + y * m.at(1, col) + z * m.at(2, col) + m.at(3, col)) / w
    })
}

pub(crate) fn xyz0(m: &Mat4, [x, y, z]: [f32; 3]) -> [f32; 3] {
    std::array::from_fn(|col| x * m.at(0, col) + y * m.at(1, col) + z * m.at(2, col))
}

pub(crate) fn xyzw(m: &Mat4, [x, y, z, w]: [f32; 4]) -> [f32; 4] {
    std::array::from_fn(|col| {
        x * m.at(0, col) + y * m.at(1, col) + z * m.at(2, col) + w * m.at(3, col)
    })
}

impl Vec2 {
    /// Transforms the vector as a point, with perspective division.
    pub fn xy01mul(&mut self, m: &Mat4) -> &mut Self {
        *self = Self::from_array(xy01(m, *self.as_array()));
        self
    }

    /// Transforms the vector as a direction; translation has no effect.
    pub fn xy00mul(&mut self, m: &Mat4) -> &mut Self {
        *self = Self::from_array(xy00(m, *self.as_array()));
        self
    }

    pub fn xy01times(&self, m: &Mat4) -> Self {
        Self::from_array(xy01(m, *self.as_array()))
    }

    pub fn xy00times(&self, m: &Mat4) -> Self {
        Self::from_array(xy00(m, *self.as_array()))
    }
}

impl Vec3 {
    /// Transforms the vector as a point, with perspective division.
    pub fn xyz1mul(&mut self, m: &Mat4) -> &mut Self {
        *self = Self::from_array(xyz1(m, *self.as_array()));
        self
    }

    /// Transforms the vector as a direction; translation has no effect.
    pub fn xyz0mul(&mut self, m: &Mat4) -> &mut Self {
        *self = Self::from_array(xyz0(m, *self.as_array()));
        self
    }

    pub fn xyz1times(&self, m: &Mat4) -> Self {
        Self::from_array(xyz1(m, *self.as_array()))
    }

    pub fn xyz0times(&self, m: &Mat4) -> Self {
        Self::from_array(xyz0(m, *self.as_array()))
    }
}

impl Vec4 {
    /// Full homogeneous transform, `self = self * m`. No division by `w`.
    pub fn xyzwmul(&mut self, m: &Mat4) -> &mut Self {
        *self = Self::from_array(xyzw(m, *self.as_array()));
        self
    }

    pub fn xyzwtimes(&self, m: &Mat4) -> Self {
        Self::from_array(xyzw(m, *self.as_array()))
    }
}
