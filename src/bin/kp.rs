//! KP: Koordinatprocessering. Read "x y" pairs from files or stdin,
//! project them, and print the result.
use anyhow::{bail, Context};
use clap::Parser;
use log::{debug, trace};
use mapproj::prelude::*;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

/// KP: Apply a map projection to coordinates, one "x y" pair per line.
/// Geographic input is longitude and latitude, in degrees. Lines starting
/// with '#' and blank lines are skipped.
#[derive(Parser, Debug)]
#[clap(name = "kp")]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Inverse operation
    #[clap(long = "inv")]
    inverse: bool,

    /// Number of decimals in output
    #[clap(short = 'd', long)]
    decimals: Option<usize>,

    /// Report fwd-inv roundtrip deviation
    #[clap(short, long)]
    roundtrip: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// The projection definition, e.g. "utm zone=32"
    definition: String,

    /// The files to operate on, stdin if not present
    files: Vec<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("This is KP");
    debug!("{options:#?}");

    let op = Operator::new(&options.definition)
        .with_context(|| format!("Cannot instantiate '{}'", options.definition))?;
    debug!("{}", op.projection().description());
    let direction = if options.inverse { Inv } else { Fwd };

    let mut operands = Vec::new();
    if options.files.is_empty() {
        let stdin = std::io::stdin();
        read_operands(stdin.lock(), &mut operands)?;
    } else {
        for path in &options.files {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Cannot open {}", path.display()))?;
            read_operands(BufReader::new(file), &mut operands)?;
        }
    }

    let original = operands.clone();
    let successes = op.apply(&mut operands, direction);
    debug!("{successes} of {} coordinates transformed", operands.len());

    let mut deviations = Vec::new();
    if options.roundtrip {
        let mut back = operands.clone();
        op.apply(&mut back, !direction);
        deviations = original.iter().zip(&back).map(|(a, b)| a.hypot2(b)).collect();
    }

    // Projected coordinates in metres get fewer decimals than angles
    let decimals = options
        .decimals
        .unwrap_or(if geographic_output(&op, direction) { 9 } else { 4 });

    for (i, coord) in operands.iter().enumerate() {
        if options.roundtrip {
            println!(
                "{:.decimals$} {:.decimals$}  {:.3e}",
                coord[0], coord[1], deviations[i]
            );
        } else {
            println!("{:.decimals$} {:.decimals$}", coord[0], coord[1]);
        }
    }
    Ok(())
}

/// True if running `op` in `direction` yields longitude/latitude,
/// taking the `inv` flag of the definition into account
fn geographic_output(op: &Operator, direction: Direction) -> bool {
    (direction == Inv) != (op.direction() == Inv)
}

fn read_operands(reader: impl BufRead, operands: &mut Vec<Coor2D>) -> Result<(), anyhow::Error> {
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let args: Vec<&str> = line.split_whitespace().collect();
        if args.len() < 2 {
            bail!("Line {}: expected two coordinates, got '{line}'", index + 1);
        }

        // Unparsable numbers pass through as NaN, and stay NaN
        let x = args[0].parse::<f64>().unwrap_or(f64::NAN);
        let y = args[1].parse::<f64>().unwrap_or(f64::NAN);
        operands.push(Coor2D::raw(x, y));
    }
    Ok(())
}

// ----- T E S T S ---------------------------------------------------------------------
