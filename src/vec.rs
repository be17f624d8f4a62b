//! 3-dimensional vector algebra.
//!
//! Only the operations the featurization engine needs are provided: subtraction, cross and dot
//! products, and normalization. Vectors are always *derived* values (differences of landmark
//! positions and their products); raw landmark input goes through [`Landmark`] instead, which
//! sanitizes its components.
//!
//! [`Landmark`]: crate::pose::Landmark

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 3-dimensional vector with [`f32`] elements.
///
/// # Examples
///
/// ```
/// # use mudra::vec::*;
/// let v = vec3(3.0, 0.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Creates a [`Vec3`] from its elements.
#[inline]
pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3 { x, y, z }
}

impl Vec3 {
    /// A vector with each element initialized to 0.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// A unit vector pointing in the X direction.
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// A unit vector pointing in the Y direction.
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// A unit vector pointing in the Z direction.
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Computes the squared length of this vector.
    ///
    /// Cheaper than [`Vec3::length`], useful for comparisons.
    #[inline]
    pub fn length2(self) -> f32 {
        self.dot(self)
    }

    /// Computes the Euclidean length of this vector.
    #[inline]
    pub fn length(self) -> f32 {
        self.length2().sqrt()
    }

    /// Computes the dot product of `self` and `other`.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product of `self` and `other`.
    ///
    /// The result is perpendicular to both operands, with right-handed orientation. Swapping the
    /// operands negates the result.
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Divides this vector by its length, yielding a unit-length vector.
    ///
    /// Returns [`None`] if the length is zero or not finite, since no meaningful direction can be
    /// derived from such a vector. Callers treat that as "no feature" rather than letting NaN
    /// components leak into classification.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mudra::vec::*;
    /// assert_eq!(vec3(0.0, -2.0, 0.0).try_normalize(), Some(-Vec3::Y));
    /// assert_eq!(Vec3::ZERO.try_normalize(), None);
    /// ```
    pub fn try_normalize(self) -> Option<Self> {
        let length = self.length();
        if length.is_normal() {
            Some(self / length)
        } else {
            None
        }
    }
}

/// Element-wise addition.
impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        vec3(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Element-wise subtraction.
impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        vec3(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Element-wise negation.
impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        vec3(-self.x, -self.y, -self.z)
    }
}

/// Scalar multiplication.
impl Mul<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        vec3(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Scalar division.
impl Div<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        vec3(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
