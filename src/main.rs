// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, warn};

use trancegen::config::{from_reply, GenerationParams};
use trancegen::music::{Note, ScaleType};
use trancegen::{MidiExporter, RoleSet, Session};

const DEFAULT_OUTPUT: &str = "trance_track.mid";

fn print_usage() {
    println!("trancegen - Trance MIDI pattern generator");
    println!();
    println!("Usage: trancegen [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <FILE>         Load parameters from a YAML file");
    println!("  --mood-reply <FILE>     Take parameters from a saved mood-analysis reply");
    println!("  --key <KEY>             Root key as MIDI number (60-71) or name (C, F#, Bb)");
    println!("  --scale <NAME>          minor, major, harmonic_minor or phrygian");
    println!("  --bpm <N>               Tempo, 120-160");
    println!("  --bars <N>              Length in bars, 4-32");
    println!("  --tracks <LIST>         Roles to generate (default lead,pad,bass,drums)");
    println!("  --seed <N>              Seed for reproducible output");
    println!("  --parallel              Compose tracks on worker threads");
    println!("  --output <FILE>         Output file (default {})", DEFAULT_OUTPUT);
    println!("  --help                  Show this help message");
}

/// Parsed command line
struct Options {
    config: Option<PathBuf>,
    mood_reply: Option<PathBuf>,
    key: Option<u8>,
    scale: Option<ScaleType>,
    bpm: Option<u32>,
    bars: Option<u32>,
    roles: RoleSet,
    seed: Option<u64>,
    parallel: bool,
    output: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: None,
            mood_reply: None,
            key: None,
            scale: None,
            bpm: None,
            bars: None,
            roles: RoleSet::all(),
            seed: None,
            parallel: false,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

fn parse_key(value: &str) -> Result<u8> {
    if let Ok(n) = value.parse::<u8>() {
        return Ok(n);
    }
    Note::parse(value)
        .map(Note::middle_octave_key)
        .ok_or_else(|| anyhow!("Invalid key: {}", value))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid value for {}: {}", flag, value))
}

/// Returns `None` when help was requested
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(flag) = iter.next() {
        if flag == "--help" || flag == "-h" {
            return Ok(None);
        }
        if flag == "--parallel" {
            options.parallel = true;
            continue;
        }

        let value = iter
            .next()
            .ok_or_else(|| anyhow!("{} requires a value", flag))?;

        match flag.as_str() {
            "--config" => options.config = Some(PathBuf::from(value)),
            "--mood-reply" => options.mood_reply = Some(PathBuf::from(value)),
            "--key" => options.key = Some(parse_key(value)?),
            "--scale" => options.scale = Some(ScaleType::parse(value)?),
            "--bpm" => options.bpm = Some(parse_number(flag, value)?),
            "--bars" => options.bars = Some(parse_number(flag, value)?),
            "--seed" => options.seed = Some(parse_number(flag, value)?),
            "--tracks" => {
                options.roles = RoleSet::parse(value)
                    .ok_or_else(|| anyhow!("Invalid track list: {}", value))?;
            }
            "--output" | "-o" => options.output = PathBuf::from(value),
            _ => bail!("Unknown option: {}", flag),
        }
    }

    Ok(Some(options))
}

/// Base parameters from config file, mood reply or defaults, then flag overrides
fn resolve_params(options: &Options) -> Result<GenerationParams> {
    if options.config.is_some() && options.mood_reply.is_some() {
        bail!("--config and --mood-reply cannot be used together");
    }

    let mut params = if let Some(path) = &options.config {
        GenerationParams::load(path)?
    } else if let Some(path) = &options.mood_reply {
        let reply = fs::read_to_string(path)
            .with_context(|| format!("Failed to read mood reply: {:?}", path))?;
        from_reply(&reply)
    } else {
        GenerationParams::default()
    };

    if let Some(key) = options.key {
        params.key = key;
    }
    if let Some(scale) = options.scale {
        params.scale = scale;
    }
    if let Some(bpm) = options.bpm {
        params.bpm = bpm;
    }
    if let Some(bars) = options.bars {
        params.duration = bars;
    }

    params.validate()?;
    Ok(params)
}

fn run(options: Options) -> Result<()> {
    let params = resolve_params(&options)?;
    let seed = options.seed.unwrap_or_else(rand::random);
    info!(seed, "generating");

    let session = if options.parallel {
        Session::compose_parallel(&params, options.roles, seed)?
    } else {
        Session::compose(&params, options.roles, seed)?
    };

    for failure in session.failures() {
        warn!(role = %failure.role, "{}", failure.reason);
        eprintln!("Skipped {} track: {}", failure.role, failure.reason);
    }

    MidiExporter::new()
        .export(&session, &options.output)
        .with_context(|| format!("Failed to write {:?}", options.output))?;

    let params = session.params();
    println!(
        "Generated {} bars in {} {} at {} BPM (seed {}) -> {}",
        params.duration,
        Note::from_pitch_class(params.key % 12),
        params.scale,
        params.bpm,
        seed,
        options.output.display()
    );
    println!("{}", params.explanation());
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    match parse_args(&args)? {
        Some(options) => run(options),
        None => {
            print_usage();
            Ok(())
        }
    }
}
