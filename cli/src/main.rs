//! Command-line front end for the xoroshiro128+ engine
//!
//! Seeds one generator, optionally jumps it to stream K, and prints draws.
//! Values are written as they are drawn, so `--count` is not limited by
//! memory.
//!
//! ```text
//! xoroshiro-cli --seed 42 rand --count 4
//! xoroshiro-cli --seed 42 --stream 3 normal --count 10 --iterations 64 --sigma 2.5 --json
//! RUST_LOG=debug xoroshiro-cli --seed 0 uni01
//! ```

use std::fmt::Display;
use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use xoroshiro_core_rs::streams::MAX_STREAMS;
use xoroshiro_core_rs::{NormalParams, Xoroshiro128Plus};

#[derive(Parser, Debug)]
#[command(name = "xoroshiro-cli", about = "Deterministic xoroshiro128+ draws")]
struct Cli {
    /// Seed expanded into the 128-bit state
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stream index: jump this many times after seeding
    #[arg(
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(u64).range(..MAX_STREAMS as u64)
    )]
    stream: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Output {
    /// Number of values to draw
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    count: u64,

    /// Print a JSON array instead of one value per line
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Uniform 64-bit integers
    Rand(Output),
    /// Uniform doubles in [0, 1)
    Uni01(Output),
    /// Uniform single-precision floats in [0, 1)
    Uni01f(Output),
    /// Approximately normal floats (Central Limit Theorem)
    Normal {
        #[command(flatten)]
        output: Output,

        /// 32-bit halves summed per draw
        #[arg(long, default_value_t = NormalParams::default().iterations)]
        iterations: u32,

        /// Target standard deviation
        #[arg(long, default_value_t = NormalParams::default().sigma)]
        sigma: f32,
    },
}

/// Seed the generator and jump it to the requested stream
fn seeded(cli: &Cli) -> Xoroshiro128Plus {
    let mut rng = Xoroshiro128Plus::new(cli.seed);
    for _ in 0..cli.stream {
        rng.jump();
    }
    rng
}

/// Write `count` draws, one per line or as a single JSON array
fn write_draws<W, T>(out: &mut W, output: &Output, mut draw: impl FnMut() -> T) -> Result<()>
where
    W: Write,
    T: Serialize + Display,
{
    if output.json {
        {
            let mut ser = serde_json::Serializer::new(&mut *out);
            let mut seq = ser.serialize_seq(None)?;
            for _ in 0..output.count {
                seq.serialize_element(&draw())?;
            }
            seq.end()?;
        }
        writeln!(out)?;
    } else {
        for _ in 0..output.count {
            writeln!(out, "{}", draw())?;
        }
    }
    Ok(())
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let mut rng = seeded(cli);
    log::debug!(
        "seed {} stream {} -> state {:?}",
        cli.seed,
        cli.stream,
        rng.state()
    );

    let written = match &cli.command {
        Command::Rand(output) => write_draws(out, output, || rng.next()),
        Command::Uni01(output) => write_draws(out, output, || rng.uniform_f64()),
        Command::Uni01f(output) => write_draws(out, output, || rng.uniform_f32()),
        Command::Normal {
            output,
            iterations,
            sigma,
        } => {
            let params = NormalParams {
                iterations: *iterations,
                sigma: *sigma,
            };
            write_draws(out, output, || rng.normal_with(&params))
        }
    };
    written?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&cli, &mut out)
}
