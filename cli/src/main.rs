use std::{fs, path::Path, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use dice::{expected_sum, seeded, Dice, Presets, RollSpec, SumResult};
use encoding_rs::Encoding;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Subcommand)]
enum Cmd {
    /// Roll a die once, or several times with --count
    Roll {
        /// Number of sides
        #[arg(long, default_value_t = 6)]
        sides: i32,
        /// Number of rolls
        #[arg(long)]
        count: Option<i32>,
        /// RNG seed for determinism (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Roll N dice and sum the K highest
    Sum {
        /// Number of sides
        #[arg(long, default_value_t = 6)]
        sides: i32,
        /// Dice to roll
        #[arg(long)]
        count: i32,
        /// Dice to keep (defaults to all)
        #[arg(long)]
        keep: Option<i32>,
        /// RNG seed for determinism (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Exact probability of each best-of-N-keep-K sum
    Prob {
        /// Number of sides
        #[arg(long, default_value_t = 6)]
        sides: i32,
        /// Dice to roll
        #[arg(long)]
        count: i32,
        /// Dice to keep (defaults to all)
        #[arg(long)]
        keep: Option<i32>,
        /// Print the table as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Roll a notation expression such as 4d6k3
    Expr {
        notation: String,
        /// RNG seed for determinism (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Roll a named preset
    Preset {
        name: String,
        /// YAML or JSON presets file (built-in presets if omitted)
        #[arg(long)]
        file: Option<PathBuf>,
        /// RNG seed for determinism (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List presets
    Presets {
        /// YAML or JSON presets file (built-in presets if omitted)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "dice")]
#[command(about = "Roll dice and compute exact sum distributions")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Serialize)]
struct ProbTable {
    sides: i32,
    count: i32,
    keep: i32,
    expected: f64,
    probabilities: Vec<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Roll { sides, count, seed } => {
            let dice = Dice::new(sides)?;
            let mut rng = seeded(resolve_seed(seed));
            match count {
                Some(n) => println!("{:?}", dice.roll_n(&mut rng, n)),
                None => println!("{}", dice.roll(&mut rng)),
            }
        }
        Cmd::Sum {
            sides,
            count,
            keep,
            seed,
            json,
        } => {
            let dice = Dice::new(sides)?;
            let mut rng = seeded(resolve_seed(seed));
            let res = dice.sum_nk(&mut rng, count, keep.unwrap_or(count));
            print_sum(&res, json)?;
        }
        Cmd::Prob {
            sides,
            count,
            keep,
            json,
        } => {
            let dice = Dice::new(sides)?;
            let keep = keep.unwrap_or(count);
            let probabilities = dice.probability(count, keep);
            if json {
                let table = ProbTable {
                    sides,
                    count,
                    keep,
                    expected: expected_sum(&probabilities),
                    probabilities,
                };
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                for (i, p) in probabilities.iter().enumerate() {
                    println!("{}: {:.2}", i + 1, p * 100.0);
                }
                println!("mean: {:.2}", expected_sum(&probabilities));
            }
        }
        Cmd::Expr { notation, seed } => {
            let spec: RollSpec = notation.parse()?;
            let mut rng = seeded(resolve_seed(seed));
            print_sum(&spec.roll(&mut rng)?, false)?;
        }
        Cmd::Preset { name, file, seed } => {
            let presets = load_presets(file.as_deref())?;
            let spec = presets.get(&name)?;
            let mut rng = seeded(resolve_seed(seed));
            println!("{} ({})", name, spec);
            print_sum(&spec.roll(&mut rng)?, false)?;
        }
        Cmd::Presets { file } => {
            let presets = load_presets(file.as_deref())?;
            for (name, spec) in presets.iter() {
                println!("{}: {}", name, spec);
            }
        }
    }
    Ok(())
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "rng seeded");
    seed
}

fn print_sum(res: &SumResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(res)?);
    } else {
        println!("{} {:?}", res.sum, res.rolls);
    }
    Ok(())
}

fn load_presets(file: Option<&Path>) -> anyhow::Result<Presets> {
    let Some(path) = file else {
        return Ok(Presets::builtin()?);
    };
    let text = read_text_auto(path)
        .with_context(|| format!("failed to read presets: {}", path.display()))?;
    Presets::from_file_text(path, &text)
        .with_context(|| format!("failed to parse presets: {}", path.display()))
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}
