//! Utilities to implement the different futures of this crate.

mod wakers;

#[doc(hidden)]
pub mod private;

pub(crate) use wakers::WakerVec;
