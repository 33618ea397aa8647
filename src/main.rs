use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use ferrous_score::compute::matrix::{AMINO_ACIDS, encode_sequence};
use ferrous_score::compute::simd_abstraction::simd::{
    compiled_engine, detect_optimal_simd_engine, engine_channels, log_engine_selection,
    simd_engine_description,
};
use ferrous_score::defaults::VERBOSITY;
use ferrous_score::{DispatchResidueVector, DispatchScoreVector, RowLookupTable, ScoreTraits};

#[derive(Parser)]
#[command(name = "ferrous-score")]
#[command(about = "Inspect the SIMD score vector compiled into this build", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity: 1=error, 2=warning, 3=message, 4+=debugging
    #[arg(short = 'v', long, value_name = "INT", default_value_t = VERBOSITY, global = true)]
    verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the compiled and host-supported score vector engines
    Info,

    /// Look up one BLOSUM62 row against a residue sequence, one lane per residue
    Lookup {
        /// Row residue (letter such as 'W') or numeric code
        #[arg(short = 'r', long, value_name = "RESIDUE")]
        row: String,

        /// Amino-acid letters filling the lanes; unknown letters become 'X'
        #[arg(short = 's', long, value_name = "LETTERS")]
        seq: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Map verbosity (1=error, 2=warning, 3=message, 4=debug, 5+=trace)
    // to Rust log levels
    let log_level = match cli.verbosity {
        v if v <= 1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    match cli.command {
        Commands::Info => info(),
        Commands::Lookup { row, seq } => lookup(&row, &seq),
    }
}

fn info() -> anyhow::Result<()> {
    log_engine_selection();

    let compiled = compiled_engine();
    let host = detect_optimal_simd_engine();
    println!("compiled: {}", simd_engine_description(compiled));
    println!("host:     {}", simd_engine_description(host));
    println!("lanes:    {}", engine_channels(compiled));
    println!(
        "range:    true scores 0..={} (sentinel {})",
        DispatchScoreVector::max_int_score(),
        DispatchScoreVector::zero_score()
    );
    Ok(())
}

fn parse_row(row: &str) -> anyhow::Result<usize> {
    if let Ok(code) = row.parse::<usize>() {
        if code >= AMINO_ACIDS.len() {
            bail!("row code {} is outside 0..{}", code, AMINO_ACIDS.len());
        }
        return Ok(code);
    }
    match row.as_bytes() {
        [letter] => Ok(encode_sequence(&[*letter])[0] as usize),
        _ => bail!("row must be a single residue letter or a code, got {:?}", row),
    }
}

fn lookup(row: &str, seq: &str) -> anyhow::Result<()> {
    let row = parse_row(row)?;
    let channels = DispatchScoreVector::CHANNELS;

    let mut codes = encode_sequence(seq.as_bytes());
    if codes.is_empty() {
        bail!("sequence is empty");
    }
    if codes.len() > channels {
        log::warn!(
            "sequence has {} residues; only the first {} fit in one vector",
            codes.len(),
            channels
        );
    }
    let used = codes.len().min(channels);
    codes.resize(channels.max(codes.len()), 0);

    let table = RowLookupTable::blosum62();
    let residues =
        DispatchResidueVector::try_load(&codes).context("encoding the sequence into lanes")?;
    let scores = DispatchScoreVector::from_row(&table, row, &residues);
    log::debug!("lookup vector: {}", scores);

    let row_letter = AMINO_ACIDS[row] as char;
    println!("lane  residue  score({})", row_letter);
    for (lane, (&code, score)) in codes.iter().zip(scores.to_vec()).take(used).enumerate() {
        println!("{:>4}  {:>7}  {:>8}", lane, AMINO_ACIDS[code as usize] as char, score);
    }
    Ok(())
}
