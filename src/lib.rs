//! Point-region Quadtree.
//! # Contracts:
//! - Every leaf holds at most one point, except at the configured maximum depth
//! - Region containment is inclusive on both edges
//!
pub mod aabb;
pub mod config;
pub mod error;
pub mod quadtree;

pub use aabb::Aabb;
pub use config::{Config, Overflow};
pub use error::InsertError;
pub use quadtree::{post_order, post_order_mut, pre_order, pre_order_mut};
pub use quadtree::{Entry, Quadrant, Quadtree};

use std::fmt;
use std::ops::{Add, AddAssign, Deref, Div, Mul, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point(pub [f64; 2]);

impl AddAssign for Point {
    fn add_assign(&mut self, p: Self) {
        self.0[0] += p.0[0];
        self.0[1] += p.0[1];
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, p: Self) {
        self.0[0] -= p.0[0];
        self.0[1] -= p.0[1];
    }
}

impl Deref for Point {
    type Target = [f64; 2];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Add for Point {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, m: f64) -> Self {
        Self([self.0[0] * m, self.0[1] * m])
    }
}

impl Div<f64> for Point {
    type Output = Self;

    fn div(self, m: f64) -> Self {
        Self([self.0[0] / m, self.0[1] / m])
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ x: {}, y: {} }}", self.0[0], self.0[1])
    }
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self([x, y])
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn dot(&self, rhs: &Self) -> f64 {
        self[0] * rhs[0] + self[1] * rhs[1]
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dist(&self, rhs: &Self) -> f64 {
        (*self - *rhs).magnitude()
    }
}
