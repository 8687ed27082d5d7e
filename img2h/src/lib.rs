// lib.rs      img2h crate.
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Convert small RGBA images into palette-indexed byte arrays for
//! microcontroller program memory.
//!
//! Each image is decoded, every pixel is mapped to the nearest
//! [Palette] entry (or to [TRANSPARENT] when alpha is zero), and the result
//! is written as a C array prefixed by its width and height.
//!
//! [Palette]: struct.Palette.html
//! [TRANSPARENT]: constant.TRANSPARENT.html
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod decode;
mod emit;
mod error;
pub mod palette;
mod private;
mod quantize;

pub use crate::decode::Decoder;
pub use crate::emit::{emit, Fragment, FragmentEnc};
pub use crate::error::{Error, Result};
pub use crate::palette::Palette;
pub use crate::private::{Converter, FailurePolicy, Job, Report};
pub use crate::quantize::{Index, IndexStream, Quantizer, TRANSPARENT};
