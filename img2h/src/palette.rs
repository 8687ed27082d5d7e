// palette.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Fixed reference palettes
use crate::{Error, Result};
use pix::rgb::{Rgb, SRgb8};
use std::str::FromStr;

/// Maximum number of palette entries.
///
/// Index 255 is reserved for transparent pixels.
pub const MAX_ENTRIES: usize = 255;

/// Ordered, immutable list of reference colors
///
/// Indices are assigned in entry order, starting at 0.  A palette always has
/// between 1 and [MAX_ENTRIES] entries, so no index can equal the
/// transparent sentinel.
///
/// ## Example
/// ```
/// use img2h::Palette;
/// use pix::rgb::SRgb8;
///
/// # fn main() -> Result<(), img2h::Error> {
/// let palette = Palette::new(vec![
///     SRgb8::new(0, 0, 0),
///     SRgb8::new(0xFF, 0, 0),
/// ])?;
/// assert_eq!(palette.nearest(200, 10, 10), 1);
/// # Ok(())
/// # }
/// ```
///
/// [MAX_ENTRIES]: palette/constant.MAX_ENTRIES.html
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    /// Reference colors
    entries: Vec<SRgb8>,
}

impl Default for Palette {
    /// Monochrome palette: black (0) and white (1).
    fn default() -> Self {
        Palette {
            entries: vec![SRgb8::new(0, 0, 0), SRgb8::new(0xFF, 0xFF, 0xFF)],
        }
    }
}

impl Palette {
    /// Create a palette from a list of entries.
    pub fn new(entries: Vec<SRgb8>) -> Result<Self> {
        match entries.len() {
            0 => Err(Error::EmptyPalette),
            n if n > MAX_ENTRIES => Err(Error::PaletteTooLarge(n)),
            _ => Ok(Palette { entries }),
        }
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the palette is empty (never true).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by index.
    pub fn entry(&self, idx: usize) -> Option<SRgb8> {
        self.entries.get(idx).copied()
    }

    /// Get all entries.
    pub fn entries(&self) -> &[SRgb8] {
        &self.entries
    }

    /// Find the index of the nearest entry to a color.
    ///
    /// Distance is squared euclidean in raw RGB channel space.  When two
    /// entries are equally near, the lower index wins.
    pub fn nearest(&self, red: u8, green: u8, blue: u8) -> u8 {
        let mut best = 0;
        let mut best_dist = u32::MAX;
        for (i, clr) in self.entries.iter().enumerate() {
            let dist = distance_sq(red, u8::from(Rgb::red(*clr)))
                + distance_sq(green, u8::from(Rgb::green(*clr)))
                + distance_sq(blue, u8::from(Rgb::blue(*clr)));
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        // entry count is checked on construction
        best as u8
    }
}

/// Squared distance between two channel values
fn distance_sq(a: u8, b: u8) -> u32 {
    let d = u32::from(a.abs_diff(b));
    d * d
}

impl FromStr for Palette {
    type Err = Error;

    /// Parse a comma-separated list of hex colors, such as `000000,#ffffff`.
    fn from_str(s: &str) -> Result<Self> {
        let entries = s
            .split(',')
            .map(parse_entry)
            .collect::<Result<Vec<_>>>()?;
        Palette::new(entries)
    }
}

/// Parse one `RRGGBB` hex entry
fn parse_entry(s: &str) -> Result<SRgb8> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(Error::InvalidPaletteEntry(s.to_string()));
    }
    let chan = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| Error::InvalidPaletteEntry(s.to_string()))
    };
    Ok(SRgb8::new(chan(0)?, chan(2)?, chan(4)?))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_black_white() {
        let p = Palette::default();
        assert_eq!(p.len(), 2);
        assert_eq!(p.entry(0), Some(SRgb8::new(0, 0, 0)));
        assert_eq!(p.entry(1), Some(SRgb8::new(255, 255, 255)));
        assert_eq!(p.entry(2), None);
    }

    #[test]
    fn exact_match() {
        let p = Palette::default();
        assert_eq!(p.nearest(0, 0, 0), 0);
        assert_eq!(p.nearest(255, 255, 255), 1);
        assert_eq!(p.nearest(10, 10, 10), 0);
        assert_eq!(p.nearest(200, 180, 190), 1);
    }

    #[test]
    fn tie_lowest_index() -> Result<()> {
        let p = Palette::new(vec![SRgb8::new(0, 0, 0), SRgb8::new(2, 0, 0)])?;
        assert_eq!(p.nearest(1, 0, 0), 0);
        let p = Palette::new(vec![SRgb8::new(2, 0, 0), SRgb8::new(0, 0, 0)])?;
        assert_eq!(p.nearest(1, 0, 0), 0);
        Ok(())
    }

    #[test]
    fn duplicate_entries() -> Result<()> {
        let p = Palette::new(vec![
            SRgb8::new(9, 9, 9),
            SRgb8::new(50, 60, 70),
            SRgb8::new(50, 60, 70),
        ])?;
        assert_eq!(p.nearest(50, 60, 70), 1);
        Ok(())
    }

    #[test]
    fn entry_count_limits() {
        assert!(matches!(Palette::new(vec![]), Err(Error::EmptyPalette)));
        let one = vec![SRgb8::new(1, 2, 3)];
        assert_eq!(Palette::new(one).map(|p| p.len()).ok(), Some(1));
        let max = vec![SRgb8::new(0, 0, 0); MAX_ENTRIES];
        assert!(Palette::new(max).is_ok());
        let over = vec![SRgb8::new(0, 0, 0); MAX_ENTRIES + 1];
        assert!(matches!(
            Palette::new(over),
            Err(Error::PaletteTooLarge(256))
        ));
    }

    #[test]
    fn parse() -> Result<()> {
        let p: Palette = "000000,ffffff".parse()?;
        assert_eq!(p, Palette::default());
        let p: Palette = " #FF0000 , 00ff80".parse()?;
        assert_eq!(p.entry(0), Some(SRgb8::new(255, 0, 0)));
        assert_eq!(p.entry(1), Some(SRgb8::new(0, 255, 0x80)));
        Ok(())
    }

    #[test]
    fn parse_invalid() {
        for s in ["", "12345", "1234567", "gg0000", "000000,", "00000é"] {
            let res = s.parse::<Palette>();
            let ok = matches!(res, Err(Error::InvalidPaletteEntry(_)));
            assert!(ok, "{:?}", s);
        }
    }
}
