//! Paper sizes, in portrait orientation (width, height).

use crate::units::*;

/// Page dimensions as (width, height) in millimetres.
pub type PageSize = (Mm, Mm);

/// ISO A4, the only size the CP72 form is printed on
pub const A4: PageSize = (Mm(210.0), Mm(297.0));
