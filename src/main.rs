// genmelody: evolve melodies with a genetic algorithm and write them to MIDI.
//
// Usage:
//   cargo run -- [--scale NAME] [--root NOTE] [--tempo BPM] [--seed N]
//     [--generations N] [--population N] [--mutation-rate P]
//     [--harmony-weight W] [--out-dir DIR] [--keep N]
//
// Scales: major, minor, major-pentatonic, minor-pentatonic
// Roots: a, a#, bb, b, c, c#, db, d, ... (octave starting at A3)

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;
use tracing_subscriber::{filter::Directive, EnvFilter};

use genmelody::evolution::{EvolutionOptions, LogLevel, MelodyEngine};
use genmelody::fitness::{FitnessWeights, MelodyFitness};
use genmelody::music::{NoteTable, ScaleLibrary, Tempo};
use genmelody::render::{MidiRenderer, RenderOptions};
use genmelody::rng::RandomNumberGenerator;
use genmelody::{MelodyError, Result};

fn main() {
    let filter = match "genmelody=info".parse::<Directive>() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let scale_name: String = parse_flag(args, "--scale")?.unwrap_or_else(|| "major".to_string());
    let root_name: String = parse_flag(args, "--root")?.unwrap_or_else(|| "a".to_string());
    let tempo: Tempo = parse_flag(args, "--tempo")?.unwrap_or_default();
    let seed: Option<u64> = parse_flag(args, "--seed")?;
    let out_dir: PathBuf =
        parse_flag(args, "--out-dir")?.unwrap_or_else(|| PathBuf::from("."));

    let defaults = EvolutionOptions::default();
    let options = EvolutionOptions::builder()
        .num_generations(
            parse_flag(args, "--generations")?.unwrap_or(defaults.get_num_generations()),
        )
        .population_size(
            parse_flag(args, "--population")?.unwrap_or(defaults.get_population_size()),
        )
        .mutation_rate(parse_flag(args, "--mutation-rate")?.unwrap_or(defaults.get_mutation_rate()))
        .log_level(LogLevel::Minimal)
        .build();
    options.validate()?;

    let keep: usize = parse_flag(args, "--keep")?.unwrap_or(options.get_population_size());

    let weights = FitnessWeights {
        harmony: parse_flag(args, "--harmony-weight")?.unwrap_or(0.0),
        ..FitnessWeights::default()
    };

    let notes = NoteTable::standard();
    let library = ScaleLibrary::standard();
    let root = notes.code(&root_name)?;
    let scale = library.build_scale(root, &scale_name)?;

    println!("=== genmelody ===");
    println!("Scale: {} rooted at {} (key {})", scale_name, root_name, root);
    println!("Tempo: {}", tempo);
    println!(
        "Population: {} for {} generations, mutation rate {}",
        options.get_population_size(),
        options.get_num_generations(),
        options.get_mutation_rate()
    );
    if let Some(s) = seed {
        println!("Seed: {}", s);
    }
    println!();

    let mut rng = match seed {
        Some(s) => RandomNumberGenerator::from_seed(s),
        None => RandomNumberGenerator::new(),
    };

    let engine = MelodyEngine::new(
        MelodyFitness::new(weights),
        Default::default(),
        Default::default(),
        Default::default(),
    );
    let results = engine.run(&options, &scale, &mut rng)?;

    for (rank, result) in results.iter().enumerate().take(keep) {
        let breakdown = engine.evaluator().breakdown(&result.genome);
        println!(
            "  #{:<2} score {:>8.2}  (smoothness {:.2}, rhythm {:.2}, harmony {:.1}, rests {})",
            rank,
            result.score,
            breakdown.smoothness,
            breakdown.rhythm,
            breakdown.harmony,
            breakdown.rest_count
        );
    }

    let renderer = MidiRenderer::new(RenderOptions::with_tempo(tempo))?;
    let kept = &results[..keep.min(results.len())];
    let paths = renderer.write_population(kept, &out_dir, "out", &mut rng)?;
    info!(files = paths.len(), dir = %out_dir.display(), "wrote melodies");

    println!();
    for path in &paths {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Reads the value following `flag`, if present.
fn parse_flag<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let Some(i) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    let value = args
        .get(i + 1)
        .ok_or_else(|| MelodyError::Configuration(format!("{} expects a value", flag)))?;
    value
        .parse()
        .map(Some)
        .map_err(|e| {
            MelodyError::Configuration(format!("invalid value for {} ({}): {}", flag, value, e))
        })
}
