// private.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Private module for top-level items
use crate::{
    Decoder, Error, Fragment, FragmentEnc, Palette, Quantizer, Result,
};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Suffix for symbols derived from file names
const SYMBOL_SUFFIX: &str = "ImageData";

/// One image to convert
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    /// Path to image file
    path: PathBuf,
    /// Array symbol name
    symbol: String,
}

/// What to do when one image fails to convert
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log a warning, leave the image out and continue
    #[default]
    Skip,
    /// Stop the run with the error
    Abort,
}

/// Outcome of a conversion run
#[derive(Debug, Default)]
pub struct Report {
    /// Symbols written, in order
    converted: Vec<String>,
    /// Jobs left out, with their errors
    skipped: Vec<(Job, Error)>,
}

/// Image to PROGMEM array converter
///
/// ## Example
/// ```no_run
/// use img2h::{Converter, Job, Palette};
/// use std::fs::File;
///
/// # fn main() -> Result<(), img2h::Error> {
/// let jobs = vec![
///     Job::new("../Images/glasses.png", "glassesImageData"),
///     Job::from_path("../Images/log.png"),
/// ];
/// let out = File::create("images.h")?;
/// let report = Converter::new(Palette::default()).run(jobs, out)?;
/// for (job, err) in report.skipped() {
///     eprintln!("{}: {}", job.path().display(), err);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Converter {
    /// Reference palette
    palette: Palette,
    /// Policy for per-image failures
    policy: FailurePolicy,
    /// Maximum image size, in bytes
    max_image_sz: Option<usize>,
}

impl Job {
    /// Create a job with an explicit symbol.
    pub fn new<P, S>(path: P, symbol: S) -> Self
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Job {
            path: path.into(),
            symbol: symbol.into(),
        }
    }

    /// Create a job, deriving the symbol from the file stem.
    ///
    /// `../Images/glasses.png` becomes `glassesImageData`.
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let symbol = derive_symbol(&path);
        Job { path, symbol }
    }

    /// Parse a job from `PATH=SYMBOL`, or `PATH` alone.
    pub fn parse(arg: &str) -> Self {
        match arg.rsplit_once('=') {
            Some((path, symbol)) if !path.is_empty() && !symbol.is_empty() => {
                Job::new(path, symbol)
            }
            _ => Job::from_path(arg),
        }
    }

    /// Get the image path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the symbol name.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Derive a C identifier from a file stem
fn derive_symbol(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut symbol = String::with_capacity(stem.len() + SYMBOL_SUFFIX.len());
    if !stem.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        symbol.push('_');
    }
    symbol.extend(stem.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' {
            c
        } else {
            '_'
        }
    }));
    symbol.push_str(SYMBOL_SUFFIX);
    symbol
}

impl Report {
    /// Get symbols written, in order.
    pub fn converted(&self) -> &[String] {
        &self.converted
    }

    /// Get skipped jobs with their errors.
    pub fn skipped(&self) -> &[(Job, Error)] {
        &self.skipped
    }

    /// Check if every job was converted.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl Converter {
    /// Create a new converter.
    pub fn new(palette: Palette) -> Self {
        Converter {
            palette,
            policy: FailurePolicy::default(),
            max_image_sz: Some(1 << 25),
        }
    }

    /// Set the policy for per-image failures.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the maximum image size (in bytes) to allow for decoding.
    pub fn max_image_sz(mut self, max_image_sz: Option<usize>) -> Self {
        self.max_image_sz = max_image_sz;
        self
    }

    /// Get the palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Convert one image file.
    pub fn convert(&self, job: &Job) -> Result<Fragment> {
        let source = job.path().display().to_string();
        let decoder = Decoder::open(job.path())?;
        self.convert_reader(decoder, &source, job.symbol())
    }

    /// Convert one image from an encoded PNG reader.
    pub fn convert_from<R: Read>(
        &self,
        reader: R,
        source: &str,
        symbol: &str,
    ) -> Result<Fragment> {
        self.convert_reader(Decoder::new(reader), source, symbol)
    }

    fn convert_reader<R: Read>(
        &self,
        decoder: Decoder<R>,
        source: &str,
        symbol: &str,
    ) -> Result<Fragment> {
        let raster = decoder.max_image_sz(self.max_image_sz).decode()?;
        let stream = Quantizer::new(&self.palette).encode_raster(&raster)?;
        Fragment::new(source, symbol, stream)
    }

    /// Convert a list of images, writing one fragment per image in order.
    ///
    /// Per-image failures follow the [FailurePolicy]; errors writing the
    /// output always end the run.
    ///
    /// [FailurePolicy]: enum.FailurePolicy.html
    pub fn run<I, W>(&self, jobs: I, writer: W) -> Result<Report>
    where
        I: IntoIterator<Item = Job>,
        W: Write,
    {
        let mut enc = FragmentEnc::new(writer);
        let mut report = Report::default();
        for job in jobs {
            match self.convert(&job) {
                Ok(fragment) => {
                    enc.encode(&fragment)?;
                    info!(
                        "{}: {} ({}x{})",
                        job.path().display(),
                        fragment.symbol(),
                        fragment.stream().width(),
                        fragment.stream().height(),
                    );
                    report.converted.push(job.symbol);
                }
                Err(err) => match self.policy {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::Skip => {
                        warn!("{}: skipped, {}", job.path().display(), err);
                        report.skipped.push((job, err));
                    }
                },
            }
        }
        enc.into_inner()?;
        Ok(report)
    }
}
