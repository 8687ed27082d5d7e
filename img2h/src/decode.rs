// decode.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! PNG decoding into RGBA rasters
use crate::{Error, Result};
use pix::rgb::SRgba8;
use pix::Raster;
use png::{BitDepth, ColorType, Transformations};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// PNG image decoder
///
/// Channel values are kept exactly as stored: palette and `tRNS` chunks are
/// expanded and 16-bit samples stripped, but no gamma correction or alpha
/// premultiplication is done.
///
/// ## Example
/// ```no_run
/// use img2h::Decoder;
///
/// # fn main() -> Result<(), img2h::Error> {
/// let raster = Decoder::open("glasses.png")?.decode()?;
/// println!("{}x{}", raster.width(), raster.height());
/// # Ok(())
/// # }
/// ```
pub struct Decoder<R: Read> {
    /// Reader for input data
    reader: R,
    /// Maximum image size, in bytes
    max_image_sz: Option<usize>,
}

impl Decoder<BufReader<File>> {
    /// Create a decoder for a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> Decoder<R> {
    /// Create a new PNG decoder.
    pub fn new(reader: R) -> Self {
        Decoder {
            reader,
            max_image_sz: Some(1 << 25),
        }
    }

    /// Set the maximum image size (in bytes) to allow for decoding.
    pub fn max_image_sz(mut self, max_image_sz: Option<usize>) -> Self {
        self.max_image_sz = max_image_sz;
        self
    }

    /// Decode the first frame into an RGBA raster.
    pub fn decode(self) -> Result<Raster<SRgba8>> {
        let mut decoder = png::Decoder::new(self.reader);
        decoder.set_transformations(
            Transformations::EXPAND | Transformations::STRIP_16,
        );
        let mut reader = decoder.read_info()?;
        let (width, height) = {
            let info = reader.info();
            (info.width, info.height)
        };
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }
        let sz = width as usize * height as usize * 4;
        if let Some(max) = self.max_image_sz {
            if sz > max {
                return Err(Error::TooLargeImage);
            }
        }
        let (color_type, bit_depth) = reader.output_color_type();
        if bit_depth != BitDepth::Eight {
            return Err(Error::UnsupportedFormat);
        }
        let row_sz = width as usize * channels(color_type)?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        debug!("decoded {}x{} {:?}", width, height, color_type);
        let rows = buf[..info.buffer_size()].chunks_exact(info.line_size);
        let mut pixels = Vec::with_capacity(sz / 4);
        for row in rows {
            expand_row(color_type, &row[..row_sz], &mut pixels);
        }
        if pixels.len() != width as usize * height as usize {
            return Err(Error::UnsupportedFormat);
        }
        Ok(Raster::with_pixels(width, height, pixels))
    }
}

/// Get the number of 8-bit channels for a color type
fn channels(color_type: ColorType) -> Result<usize> {
    match color_type {
        ColorType::Grayscale => Ok(1),
        ColorType::GrayscaleAlpha => Ok(2),
        ColorType::Rgb => Ok(3),
        ColorType::Rgba => Ok(4),
        ColorType::Indexed => Err(Error::UnsupportedFormat),
    }
}

/// Expand one row of 8-bit samples into RGBA pixels
fn expand_row(color_type: ColorType, row: &[u8], pixels: &mut Vec<SRgba8>) {
    match color_type {
        ColorType::Grayscale => pixels
            .extend(row.iter().map(|&g| SRgba8::new(g, g, g, 0xFF))),
        ColorType::GrayscaleAlpha => pixels.extend(
            row.chunks_exact(2).map(|c| SRgba8::new(c[0], c[0], c[0], c[1])),
        ),
        ColorType::Rgb => pixels.extend(
            row.chunks_exact(3).map(|c| SRgba8::new(c[0], c[1], c[2], 0xFF)),
        ),
        ColorType::Rgba => pixels.extend(
            row.chunks_exact(4).map(|c| SRgba8::new(c[0], c[1], c[2], c[3])),
        ),
        ColorType::Indexed => (),
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use pix::el::Pixel;
    use pix::rgb::Rgb;

    /// Encode an 8-bit PNG in memory
    pub(crate) fn png_bytes(
        width: u32,
        height: u32,
        color_type: ColorType,
        data: &[u8],
    ) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut enc = png::Encoder::new(&mut out, width, height);
            enc.set_color(color_type);
            enc.set_depth(BitDepth::Eight);
            let mut writer = enc.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    /// Encode an 8-bit indexed PNG in memory
    fn png_indexed(
        width: u32,
        height: u32,
        palette: Vec<u8>,
        trns: Vec<u8>,
        data: &[u8],
    ) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut enc = png::Encoder::new(&mut out, width, height);
            enc.set_color(ColorType::Indexed);
            enc.set_depth(BitDepth::Eight);
            enc.set_palette(palette);
            enc.set_trns(trns);
            let mut writer = enc.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    fn rgba(p: SRgba8) -> [u8; 4] {
        [
            u8::from(Rgb::red(p)),
            u8::from(Rgb::green(p)),
            u8::from(Rgb::blue(p)),
            u8::from(Pixel::alpha(p)),
        ]
    }

    #[test]
    fn rgba_exact() -> Result<()> {
        let data = [1, 2, 3, 0, 250, 251, 252, 7, 9, 8, 7, 255];
        let png = png_bytes(3, 1, ColorType::Rgba, &data);
        let raster = Decoder::new(&png[..]).decode()?;
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 1);
        let px: Vec<_> = raster.pixels().iter().map(|p| rgba(*p)).collect();
        assert_eq!(px, vec![[1, 2, 3, 0], [250, 251, 252, 7], [9, 8, 7, 255]]);
        Ok(())
    }

    #[test]
    fn rgb_opaque() -> Result<()> {
        let data = [10, 20, 30, 40, 50, 60];
        let png = png_bytes(1, 2, ColorType::Rgb, &data);
        let raster = Decoder::new(&png[..]).decode()?;
        let px: Vec<_> = raster.pixels().iter().map(|p| rgba(*p)).collect();
        assert_eq!(px, vec![[10, 20, 30, 255], [40, 50, 60, 255]]);
        Ok(())
    }

    #[test]
    fn gray_alpha() -> Result<()> {
        let data = [0x80, 0, 0x10, 0xFF];
        let png = png_bytes(2, 1, ColorType::GrayscaleAlpha, &data);
        let raster = Decoder::new(&png[..]).decode()?;
        let px: Vec<_> = raster.pixels().iter().map(|p| rgba(*p)).collect();
        assert_eq!(px, vec![[0x80, 0x80, 0x80, 0], [0x10, 0x10, 0x10, 255]]);
        Ok(())
    }

    #[test]
    fn indexed_with_trns() -> Result<()> {
        let palette = vec![0, 0, 0, 255, 255, 255];
        let png = png_indexed(2, 2, palette, vec![0], &[0, 1, 1, 0]);
        let raster = Decoder::new(&png[..]).decode()?;
        let px: Vec<_> = raster.pixels().iter().map(|p| rgba(*p)).collect();
        assert_eq!(
            px,
            vec![
                [0, 0, 0, 0],
                [255, 255, 255, 255],
                [255, 255, 255, 255],
                [0, 0, 0, 0],
            ]
        );
        Ok(())
    }

    #[test]
    fn too_large() {
        let png = png_bytes(4, 4, ColorType::Rgba, &[0; 64]);
        let res = Decoder::new(&png[..]).max_image_sz(Some(63)).decode();
        assert!(matches!(res, Err(Error::TooLargeImage)));
        let res = Decoder::new(&png[..]).max_image_sz(Some(64)).decode();
        assert!(res.is_ok());
    }

    #[test]
    fn malformed() {
        let res = Decoder::new(&b"not a png file"[..]).decode();
        assert!(matches!(res, Err(Error::Png(_)) | Err(Error::Io(_))));
    }

    #[test]
    fn truncated() {
        let png = png_bytes(4, 4, ColorType::Rgba, &[9; 64]);
        let res = Decoder::new(&png[..png.len() / 2]).decode();
        assert!(res.is_err());
    }

    #[test]
    fn missing_file() {
        let res = Decoder::open("/nonexistent/img2h/missing.png");
        assert!(matches!(res, Err(Error::Io(_))));
    }
}
