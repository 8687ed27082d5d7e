// main.rs      img2h command
//
// Copyright (c) 2019-2025  Douglas Lau
//
#![forbid(unsafe_code)]

use clap::{App, Arg, ArgMatches};
use img2h::{Converter, FailurePolicy, Job, Palette, Report};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Crate version
const VERSION: &'static str = std::env!("CARGO_PKG_VERSION");

/// Black and white
const DEFAULT_PALETTE: &str = "000000,ffffff";

/// Main entry point
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    let matches = create_app().get_matches();
    let report = convert(&matches)?;
    let mut err = StandardStream::stderr(ColorChoice::Auto);
    write_summary(&mut err, &report)?;
    err.reset()?;
    if !report.is_complete() {
        std::process::exit(1);
    }
    Ok(())
}

/// Create clap App
fn create_app() -> App<'static, 'static> {
    App::new("img2h")
        .version(VERSION)
        .about("Convert images to PROGMEM byte arrays")
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("FILE")
                .help("output file (default: stdout)"),
        )
        .arg(
            Arg::with_name("palette")
                .short("p")
                .long("palette")
                .takes_value(true)
                .value_name("LIST")
                .default_value(DEFAULT_PALETTE)
                .help("palette entries, comma-separated RRGGBB"),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("stop at the first image which fails"),
        )
        .arg(
            Arg::with_name("images")
                .required(true)
                .min_values(1)
                .value_name("IMAGE[=SYMBOL]")
                .help("input PNG file(s)"),
        )
}

/// Convert all images on the command line
fn convert(matches: &ArgMatches) -> Result<Report, Box<dyn Error>> {
    let palette: Palette =
        matches.value_of("palette").unwrap_or(DEFAULT_PALETTE).parse()?;
    let policy = if matches.is_present("strict") {
        FailurePolicy::Abort
    } else {
        FailurePolicy::Skip
    };
    let jobs = parse_jobs(matches.values_of("images").into_iter().flatten());
    let converter = Converter::new(palette).with_policy(policy);
    let report = match matches.value_of_os("output") {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            converter.run(jobs, file)?
        }
        None => converter.run(jobs, io::stdout().lock())?,
    };
    Ok(report)
}

/// Parse image arguments into jobs
fn parse_jobs<'a, I>(args: I) -> Vec<Job>
where
    I: IntoIterator<Item = &'a str>,
{
    args.into_iter().map(Job::parse).collect()
}

/// Write a summary of skipped images
fn write_summary<W: WriteColor>(
    out: &mut W,
    report: &Report,
) -> io::Result<()> {
    let mut red = ColorSpec::new();
    red.set_fg(Some(Color::Red)).set_intense(true);
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    let mut dflt = ColorSpec::new();
    dflt.set_fg(Some(Color::White));
    for (job, err) in report.skipped() {
        out.set_color(&yellow)?;
        write!(out, "skipped ")?;
        out.set_color(&dflt)?;
        write!(out, "{} ({})", job.path().display(), job.symbol())?;
        out.set_color(&red)?;
        writeln!(out, ": {}", err)?;
    }
    if !report.is_complete() {
        out.set_color(&red)?;
        writeln!(
            out,
            "{} of {} images skipped",
            report.skipped().len(),
            report.skipped().len() + report.converted().len()
        )?;
    }
    out.reset()
}
