// quantize.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Palette quantization of RGBA rasters
use crate::palette::Palette;
use crate::{Error, Result};
use pix::el::Pixel;
use pix::rgb::{Rgb, SRgba8};
use pix::Raster;

/// Emitted byte for transparent pixels
pub const TRANSPARENT: u8 = 255;

/// Quantized value of one pixel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Index {
    /// Drawn with a palette entry
    Opaque(u8),
    /// Not drawn
    Transparent,
}

impl Index {
    /// Flatten to the emitted byte value.
    pub fn byte(self) -> u8 {
        match self {
            Index::Opaque(i) => i,
            Index::Transparent => TRANSPARENT,
        }
    }
}

/// Row-major sequence of quantized pixels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexStream {
    width: u32,
    height: u32,
    indices: Vec<Index>,
}

impl IndexStream {
    /// Get the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the indices, row-major.
    pub fn indices(&self) -> &[Index] {
        &self.indices
    }

    /// Get the number of indices (width * height).
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if the stream is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Get an iterator of emitted bytes.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.indices.iter().map(|i| i.byte())
    }
}

/// Pixel quantizer for a fixed palette
///
/// ## Example
/// ```
/// use img2h::{Index, Palette, Quantizer};
/// use pix::rgb::SRgba8;
/// use pix::Raster;
///
/// # fn main() -> Result<(), img2h::Error> {
/// let palette = Palette::default();
/// let quantizer = Quantizer::new(&palette);
/// let mut raster = Raster::with_clear(2, 1);
/// *raster.pixel_mut(0, 0) = SRgba8::new(250, 250, 250, 255);
/// let stream = quantizer.encode_raster(&raster)?;
/// assert_eq!(stream.indices(), &[Index::Opaque(1), Index::Transparent]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Quantizer<'a> {
    /// Reference palette
    palette: &'a Palette,
}

impl<'a> Quantizer<'a> {
    /// Create a quantizer for a palette.
    pub fn new(palette: &'a Palette) -> Self {
        Quantizer { palette }
    }

    /// Get the palette.
    pub fn palette(&self) -> &'a Palette {
        self.palette
    }

    /// Classify one pixel.
    ///
    /// Alpha is binary: zero is transparent, anything else is opaque.
    pub fn classify(&self, p: SRgba8) -> Index {
        if u8::from(Pixel::alpha(p)) == 0 {
            Index::Transparent
        } else {
            Index::Opaque(self.palette.nearest(
                u8::from(Rgb::red(p)),
                u8::from(Rgb::green(p)),
                u8::from(Rgb::blue(p)),
            ))
        }
    }

    /// Classify every pixel of a raster, in row-major order.
    pub fn encode_raster(
        &self,
        raster: &Raster<SRgba8>,
    ) -> Result<IndexStream> {
        let width = raster.width();
        let height = raster.height();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }
        let indices: Vec<Index> =
            raster.pixels().iter().map(|p| self.classify(*p)).collect();
        debug_assert_eq!(indices.len(), width as usize * height as usize);
        Ok(IndexStream {
            width,
            height,
            indices,
        })
    }
}
