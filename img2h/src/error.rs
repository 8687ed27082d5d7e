// error.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
use std::fmt;
use std::io;

/// Errors encountered while converting images
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error.
    Io(io::Error),
    /// A wrapped PNG decoding error.
    Png(png::DecodingError),
    /// Image color type / bit depth cannot be normalized to RGBA8.
    UnsupportedFormat,
    /// Image has zero width or height.
    EmptyImage,
    /// Image larger than specified by
    /// [max_image_sz](struct.Decoder.html#method.max_image_sz).
    TooLargeImage,
    /// Width or height does not fit in one byte.
    DimensionsTooLarge(u32, u32),
    /// Symbol name is not a valid C identifier.
    InvalidSymbol(String),
    /// [Palette](struct.Palette.html) has no entries.
    EmptyPalette,
    /// [Palette](struct.Palette.html) has too many entries; an index would
    /// collide with the transparent sentinel.
    PaletteTooLarge(usize),
    /// Palette entry could not be parsed.
    InvalidPaletteEntry(String),
}

/// Img2h result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            Error::Png(err) => err.fmt(fmt),
            Error::DimensionsTooLarge(w, h) => {
                write!(fmt, "image dimensions {}x{} exceed 255", w, h)
            }
            Error::InvalidSymbol(s) => write!(fmt, "invalid symbol: {:?}", s),
            Error::PaletteTooLarge(n) => {
                write!(fmt, "palette has {} entries (max 255)", n)
            }
            Error::InvalidPaletteEntry(e) => {
                write!(fmt, "invalid palette entry: {:?}", e)
            }
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::Png(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<png::DecodingError> for Error {
    fn from(err: png::DecodingError) -> Self {
        match err {
            png::DecodingError::IoError(err) => Error::Io(err),
            err => Error::Png(err),
        }
    }
}
