// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{error, info};

use improv::config::ImprovConfig;
use improv::exercise::{ExerciseGenerator, ExerciseOutcome, RngDraw};
use improv::logging::{self, LogTarget};
use improv::ui::App;

fn print_usage() {
    println!("improv - Piano Improv Exercise Generator");
    println!();
    println!("Usage: improv [OPTIONS]");
    println!();
    println!("With no --chords, opens the interactive form.");
    println!();
    println!("Options:");
    println!("  --chords <PROGRESSION>  Generate once, e.g. --chords \"C Am F G\"");
    println!("  --key <KEY>             Song key (default from config, \"C major\")");
    println!("  --out <FILE>            MIDI output file (default from config)");
    println!("  --seed <N>              Seed for reproducible melody ideas");
    println!("  --config <FILE>         Configuration file (.yaml or .toml)");
    println!("  --help                  Show this help message");
}

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    chords: Option<String>,
    key: Option<String>,
    out: Option<PathBuf>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", name))
        };
        match arg.as_str() {
            "--chords" => options.chords = Some(value("--chords")?),
            "--key" => options.key = Some(value("--key")?),
            "--out" => options.out = Some(PathBuf::from(value("--out")?)),
            "--seed" => {
                let raw = value("--seed")?;
                let seed = raw
                    .parse()
                    .map_err(|_| anyhow!("Invalid seed: {}", raw))?;
                options.seed = Some(seed);
            }
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--help" | "-h" => options.help = true,
            other => bail!("Unknown option: {}", other),
        }
    }

    Ok(options)
}

fn run_once(config: &ImprovConfig, options: &Options, chords: &str) -> Result<()> {
    let key = options
        .key
        .clone()
        .unwrap_or_else(|| config.exercise.default_key.clone());
    let path = options
        .out
        .clone()
        .unwrap_or_else(|| config.output.midi_path());

    let generator = ExerciseGenerator::new(config.exercise_settings());
    let mut draw = RngDraw::from_seed_option(options.seed.or(config.melody.seed));

    match generator.generate(chords, &key, &mut draw)? {
        ExerciseOutcome::Message(message) => {
            println!("{}", message);
        }
        ExerciseOutcome::Exercise(exercise) => {
            println!("{}", exercise.report);
            fs::write(&path, exercise.midi.get_ref())
                .with_context(|| format!("Failed to write MIDI file: {:?}", path))?;
            info!(path = %path.display(), "wrote MIDI file");
            println!();
            println!("MIDI saved to {}", path.display());
        }
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            print_usage();
            std::process::exit(1);
        }
    };

    if options.help {
        print_usage();
        return;
    }

    if let Err(err) = run(&options) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<()> {
    let config = match &options.config {
        Some(path) => ImprovConfig::load(path)?,
        None => ImprovConfig::default(),
    };

    let result = match &options.chords {
        Some(chords) => {
            logging::init(&config.logging, LogTarget::Stderr)?;
            run_once(&config, options, chords)
        }
        None => {
            logging::init(&config.logging, LogTarget::FileOnly)?;
            App::new(&config, options.seed)
                .context("Failed to start terminal UI")
                .and_then(|mut app| app.run().context("Terminal UI failed"))
        }
    };

    // The subscriber exists only once init has run
    if let Err(err) = &result {
        error!("{:#}", err);
    }
    result
}
