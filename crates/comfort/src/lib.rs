//! Maps temperature readings onto what the dashboard shows: a comfort
//! category, the position of the meter marker and a background colour.

pub mod band;
pub mod color;
pub mod range;
pub mod tween;

#[doc(no_inline)]
pub use band::{ComfortAssessment, ComfortBand, ComfortCategory};
#[doc(no_inline)]
pub use color::Rgb;
#[doc(no_inline)]
pub use range::DisplayRange;
#[doc(no_inline)]
pub use tween::Tween;
