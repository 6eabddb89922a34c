//! Axis table shared by the tools
//!
//! Each tool describes its per-axis behaviour as data (which pointer component
//! drives which world axis, with which sign) and applies it through one
//! generic path instead of branching on an axis index.

use glam::{Vec2, Vec3};

/// A principal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// X, Y, Z in the order tools scan their detectors
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// 0, 1 or 2
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Positive unit vector
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Lower-case name shown in axis labels
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Which component of the per-tick pointer delta drives a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerComponent {
    /// Pointer x (grows right)
    Horizontal,
    /// Pointer y (grows up)
    Vertical,
}

impl PointerComponent {
    /// Read this component out of a pointer delta
    pub fn of(self, delta: Vec2) -> f32 {
        match self {
            PointerComponent::Horizontal => delta.x,
            PointerComponent::Vertical => delta.y,
        }
    }
}

/// One pointer component driving motion along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDrive {
    /// Axis that moves
    pub axis: Axis,
    /// Pointer component that moves it
    pub pointer: PointerComponent,
    /// +1 or -1, matching the handle's on-screen orientation
    pub sign: f32,
}

impl AxisDrive {
    /// Describe a drive
    pub const fn new(axis: Axis, pointer: PointerComponent, sign: f32) -> Self {
        Self {
            axis,
            pointer,
            sign,
        }
    }

    /// Signed scalar amount for this tick, already multiplied by `gain`
    pub fn amount(&self, delta: Vec2, gain: f32) -> f32 {
        self.sign * self.pointer.of(delta) * gain
    }

    /// Offset vector for this tick along the drive's axis
    pub fn offset(&self, delta: Vec2, gain: f32) -> Vec3 {
        self.axis.unit() * self.amount(delta, gain)
    }
}
