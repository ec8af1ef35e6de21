use std::ops::{Index, IndexMut};

use crate::{vector::Vec3, VecArg};

/// A 4×4 `f32` matrix for the row-vector convention (`v' = v * M`).
///
/// Elements are addressed and constructed in row-major reading order, but are
/// stored column-major so that [`Mat4::as_slice`] can be handed to
/// `uniformMatrix4fv` without transposing: element `(row, col)` lives at
/// storage offset `col * 4 + row`.
///
/// Composition methods (`mul`, `scale`, `rotate`, `translate`) right-multiply,
/// so each one applies *after* the transforms already accumulated.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    storage: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[rustfmt::skip]
const IDENTITY_ROWS: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

const fn offset(row: usize, col: usize) -> usize {
    col * 4 + row
}

impl Mat4 {
    // the identity is symmetric, so row-major and column-major agree
    pub const IDENTITY: Self = Self { storage: IDENTITY_ROWS };

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates a matrix from 16 values in row-major reading order.
    pub fn from_rows(rows: [f32; 16]) -> Self {
        let mut m = Self::IDENTITY;
        m.set(&rows);
        m
    }

    /// Reinterprets 16 packed column-major floats as a matrix, without copying.
    pub fn from_array_ref(storage: &[f32; 16]) -> &Self {
        // SAFETY: `Mat4` is `repr(transparent)` over `[f32; 16]`.
        unsafe { &*(storage as *const [f32; 16] as *const Self) }
    }

    /// Reinterprets 16 packed column-major floats as a mutable matrix view.
    pub fn from_array_mut(storage: &mut [f32; 16]) -> &mut Self {
        // SAFETY: `Mat4` is `repr(transparent)` over `[f32; 16]`.
        unsafe { &mut *(storage as *mut [f32; 16] as *mut Self) }
    }

    /// Overwrites the matrix from values in row-major reading order.
    ///
    /// Entries beyond the end of `rows` take the identity's value, so an empty
    /// slice resets to identity and a 12-element slice keeps `[0, 0, 0, 1]` as
    /// the last row.
    pub fn set(&mut self, rows: &[f32]) -> &mut Self {
        for (index, default) in IDENTITY_ROWS.iter().enumerate() {
            let value = rows.get(index).copied().unwrap_or(*default);
            self.storage[offset(index / 4, index % 4)] = value;
        }
        self
    }

    pub fn set_identity(&mut self) -> &mut Self {
        self.storage = IDENTITY_ROWS;
        self
    }

    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.storage[offset(row, col)]
    }

    /// The 16 values in row-major reading order.
    pub fn to_rows(&self) -> [f32; 16] {
        std::array::from_fn(|index| self.at(index / 4, index % 4))
    }

    /// Column-major storage, ready for upload.
    pub fn as_slice(&self) -> &[f32] {
        &self.storage
    }

    pub fn as_array(&self) -> &[f32; 16] {
        &self.storage
    }

    /// `self = self * m`
    pub fn mul(&mut self, m: &Mat4) -> &mut Self {
        let lhs = *self;
        self.set_product(&lhs, m)
    }

    /// `self = m * self`
    pub fn premul(&mut self, m: &Mat4) -> &mut Self {
        let rhs = *self;
        self.set_product(m, &rhs)
    }

    pub fn times(&self, m: &Mat4) -> Mat4 {
        let mut result = Self::IDENTITY;
        result.set_product(self, m);
        result
    }

    /// `self = a * b`
    pub fn set_product(&mut self, a: &Mat4, b: &Mat4) -> &mut Self {
        for row in 0..4 {
            for col in 0..4 {
                self.storage[offset(row, col)] = a.at(row, 0) * b.at(0, col)
                    + a.at(row, 1) * b.at(1, col)
                    + a.at(row, 2) * b.at(2, col)
                    + a.at(row, 3) * b.at(3, col);
            }
        }
        self
    }

    /// Appends a scale. Unspecified factors are 1.
    pub fn scale<'a>(&mut self, factors: impl Into<VecArg<'a, 3>>) -> &mut Self {
        let factors = factors.into().resolve_or(1.0);
        for row in 0..4 {
            for (col, factor) in factors.iter().enumerate() {
                self.storage[offset(row, col)] *= factor;
            }
        }
        self
    }

    /// Appends a rotation of `angle` radians around `axis`, counterclockwise
    /// when looking down the axis towards the origin.
    ///
    /// A (near) zero axis is replaced by the z axis. Axes within 1e-3 of unit
    /// squared length are used as given; anything else is normalized first.
    pub fn rotate<'a>(&mut self, angle: f32, axis: impl Into<VecArg<'a, 3>>) -> &mut Self {
        let mut axis = Vec3::from_array(axis.into().resolve_or(0.0));
        let length2 = axis.length2();
        if length2 < 1e-4 {
            axis = Vec3::from_array([0.0, 0.0, 1.0]);
        } else if (length2 - 1.0).abs() > 1e-3 {
            axis.normalize();
        }

        let [x, y, z] = *axis.as_array();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;

        // rows of the rotation block, row-vector convention
        #[rustfmt::skip]
        let r = [
            [c + x * x * t,     x * y * t + z * s, x * z * t - y * s],
            [x * y * t - z * s, c + y * y * t,     y * z * t + x * s],
            [x * z * t + y * s, y * z * t - x * s, c + z * z * t    ],
        ];

        for row in 0..4 {
            let a = [self.at(row, 0), self.at(row, 1), self.at(row, 2)];
            for col in 0..3 {
                self.storage[offset(row, col)] = a[0] * r[0][col] + a[1] * r[1][col] + a[2] * r[2][col];
            }
        }
        self
    }

    /// Appends a translation. Unspecified offsets are 0.
    pub fn translate<'a>(&mut self, offsets: impl Into<VecArg<'a, 3>>) -> &mut Self {
        let offsets = offsets.into().resolve_or(0.0);
        for row in 0..4 {
            let w = self.at(row, 3);
            for (col, t) in offsets.iter().enumerate() {
                self.storage[offset(row, col)] += w * t;
            }
        }
        self
    }

    pub fn transpose(&mut self) -> &mut Self {
        for row in 0..4 {
            for col in (row + 1)..4 {
                self.storage.swap(offset(row, col), offset(col, row));
            }
        }
        self
    }

    pub fn determinant(&self) -> f32 {
        (0..4).map(|col| self.at(0, col) * self.cofactor(0, col)).sum()
    }

    /// Inverts the matrix in place by cofactor expansion.
    ///
    /// A singular matrix (determinant exactly 0) is left unchanged; use
    /// [`Mat4::determinant`] first when that case must be detected.
    pub fn invert(&mut self) -> &mut Self {
        let det = self.determinant();
        if det == 0.0 {
            return self;
        }

        let source = *self;
        for row in 0..4 {
            for col in 0..4 {
                // inverse is the adjugate (transposed cofactors) over det
                self.storage[offset(row, col)] = source.cofactor(col, row) / det;
            }
        }
        self
    }

    fn cofactor(&self, row: usize, col: usize) -> f32 {
        let mut minor = [0.0f32; 9];
        let mut k = 0;
        for r in (0..4).filter(|&r| r != row) {
            for c in (0..4).filter(|&c| c != col) {
                minor[k] = self.at(r, c);
                k += 1;
            }
        }

        let [a, b, c, d, e, f, g, h, i] = minor;
        let det3 = a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g);
        if (row + col) % 2 == 0 {
            det3
        } else {
            -det3
        }
    }

    /// Orthographic projection mapping the given box to clip space.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut result = Self::IDENTITY;
        let data = &mut result.storage;

        data[offset(0, 0)] = 2.0 / (right - left);
        data[offset(1, 1)] = 2.0 / (top - bottom);
        data[offset(2, 2)] = -2.0 / (far - near);

        data[offset(3, 0)] = -(right + left) / (right - left);
        data[offset(3, 1)] = -(top + bottom) / (top - bottom);
        data[offset(3, 2)] = -(far + near) / (far - near);

        result
    }

    /// Perspective projection with a vertical field of view in radians.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y * 0.5).tan();
        let mut result = Self::IDENTITY;
        let data = &mut result.storage;

        data[offset(0, 0)] = f / aspect;
        data[offset(1, 1)] = f;
        data[offset(2, 2)] = (far + near) / (near - far);
        data[offset(2, 3)] = -1.0;
        data[offset(3, 2)] = 2.0 * far * near / (near - far);
        data[offset(3, 3)] = 0.0;

        result
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.storage[offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Mat4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.storage[offset(row, col)]
    }
}
