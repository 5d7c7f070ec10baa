//! Length units used throughout layout and rendering.
//!
//! PDF content streams are written in points ([`Pt`]). The CP72 template is
//! specified in millimetres ([`Mm`]), so everything the composer does is in
//! millimetres and converted to points at the last moment by the surface.
//!
//! ```
//! use cp72_pdf::{Mm, Pt};
//!
//! let width: Pt = Mm(25.4).into();
//! assert!((*width - 72.0).abs() < 1e-4);
//! ```

use derive_more::{Add, AddAssign, Deref, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// A length in PDF points (1/72 of an inch)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    From,
    Into,
    Display,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

/// A length in millimetres
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    From,
    Into,
    Display,
)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Self {
        Pt(mm.0 * POINTS_PER_MM)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Self {
        Mm(pt.0 / POINTS_PER_MM)
    }
}

macro_rules! scalar_ops {
    ($unit:ident) => {
        impl Mul<f32> for $unit {
            type Output = $unit;

            fn mul(self, rhs: f32) -> $unit {
                $unit(self.0 * rhs)
            }
        }

        impl Div<f32> for $unit {
            type Output = $unit;

            fn div(self, rhs: f32) -> $unit {
                $unit(self.0 / rhs)
            }
        }

        impl Neg for $unit {
            type Output = $unit;

            fn neg(self) -> $unit {
                $unit(-self.0)
            }
        }
    };
}

scalar_ops!(Pt);
scalar_ops!(Mm);
