//! cadence — evaluate a musical time expression to seconds.
//!
//! ```text
//! cadence "4n + 1m @ 8n"
//! cadence --bpm 90 "0:2:0"
//! cadence --config tempo.yaml --now 1.5 "+2t * 3"
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cadence::time::config::load_tempo;
use cadence::{EvalContext, Tempo, TimeExpr};

#[derive(Parser)]
#[command(
    name = "cadence",
    about = "Evaluate a musical time expression to seconds"
)]
struct Args {
    /// The expression to evaluate, e.g. "4n + 1m @ 8n" or "0:2:0".
    expression: String,

    /// Beats per minute.
    #[arg(long, default_value_t = 120.0)]
    bpm: f64,

    /// Time signature numerator.
    #[arg(long, default_value_t = 4.0)]
    beats_per_bar: f64,

    /// Pulses per quarter note.
    #[arg(long, default_value_t = 192)]
    ppq: u32,

    /// Reference time in seconds for from-now ("+expr") expressions.
    #[arg(long, default_value_t = 0.0)]
    now: f64,

    /// Load the tempo from a YAML file instead of the flags above.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Evaluate with no transport attached (tempo-relative units become 0).
    #[arg(long)]
    detached: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let tempo = match &args.config {
        Some(path) => match load_tempo(path) {
            Ok(tempo) => tempo,
            Err(err) => {
                eprintln!("cadence: cannot load {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Tempo::new(args.bpm, args.beats_per_bar, args.ppq),
    };

    let ctx = if args.detached {
        EvalContext::detached()
    } else {
        EvalContext::new(&tempo)
    };
    let ctx = ctx.with_now(args.now);

    match TimeExpr::parse(&args.expression).and_then(|value| value.eval(&ctx)) {
        Ok(seconds) => {
            println!("{seconds}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("cadence: {err}");
            ExitCode::FAILURE
        }
    }
}
