// emit.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! C source fragment emission
use crate::quantize::IndexStream;
use crate::{Error, Result};
use std::fmt;
use std::io::{self, Write};

/// Largest width or height which fits in a dimension byte
const MAX_DIMENSION: u32 = 255;

/// One converted image, ready to be written as a C array
///
/// Rendered with `Display`:
///
/// ```text
/// // glasses.png 11x4
/// const unsigned char glassesImageData[] PROGMEM = {
/// 11, 4,		// Dimensions
/// 255,1,1,...,255,
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Source image name (for the header comment)
    source: String,
    /// Array symbol name
    symbol: String,
    /// Quantized pixels
    stream: IndexStream,
}

impl Fragment {
    /// Create a fragment.
    ///
    /// The symbol must be a C identifier, and both dimensions must fit in a
    /// byte.
    pub fn new<S, T>(source: S, symbol: T, stream: IndexStream) -> Result<Self>
    where
        S: Into<String>,
        T: Into<String>,
    {
        let symbol = symbol.into();
        if !is_identifier(&symbol) {
            return Err(Error::InvalidSymbol(symbol));
        }
        let (width, height) = (stream.width(), stream.height());
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Error::DimensionsTooLarge(width, height));
        }
        Ok(Fragment {
            source: source.into(),
            symbol,
            stream,
        })
    }

    /// Get the source name.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the symbol name.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the quantized pixels.
    pub fn stream(&self) -> &IndexStream {
        &self.stream
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let width = self.stream.width();
        let height = self.stream.height();
        writeln!(fmt, "// {} {}x{}", self.source, width, height)?;
        writeln!(fmt, "const unsigned char {}[] PROGMEM = {{", self.symbol)?;
        writeln!(fmt, "{}, {},\t\t// Dimensions", width, height)?;
        for b in self.stream.bytes() {
            write!(fmt, "{},", b)?;
        }
        writeln!(fmt)?;
        writeln!(fmt, "}};")
    }
}

/// Render one fragment as text.
pub fn emit(source: &str, symbol: &str, stream: IndexStream) -> Result<String> {
    Ok(Fragment::new(source, symbol, stream)?.to_string())
}

/// Check whether a symbol is a valid C identifier
fn is_identifier(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Sequential fragment writer
///
/// Fragments are written in the order they are encoded; nothing is buffered
/// across fragments beyond what the inner writer does.
pub struct FragmentEnc<W: Write> {
    /// Writer for output text
    writer: W,
    /// Number of fragments written
    count: usize,
}

impl<W: Write> FragmentEnc<W> {
    /// Create a new fragment writer.
    pub fn new(writer: W) -> Self {
        FragmentEnc { writer, count: 0 }
    }

    /// Write one fragment.
    pub fn encode(&mut self, fragment: &Fragment) -> io::Result<()> {
        write!(self.writer, "{}", fragment)?;
        self.count += 1;
        Ok(())
    }

    /// Get the number of fragments written.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Flush and get the inner writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
