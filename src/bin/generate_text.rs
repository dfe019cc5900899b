//! Generates text from `context_counts.csv`: starting from a prior of k
//! symbols, repeatedly picks the next symbol from the counts recorded for
//! the last k symbols.

use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[allow(dead_code)]
#[path = "../data/model.rs"]
mod model;

use model::Record;

/// Symbol used when the current context never appeared in the counts.
const FALLBACK_SYMBOL: char = ' ';

/// Greedy mode keeps symbols whose count is at least this share of the
/// context's highest count.
const GREEDY_THRESHOLD: f64 = 0.7;

/// Sampled mode stops after this many identical symbols in a row.
const MAX_REPEAT: usize = 5;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Uniform pick among the most frequent symbols of the context
    Greedy,
    /// Draw from the smoothed distribution of observed symbols
    Sampled,
}

#[derive(Parser, Debug)]
#[command(name = "generate_text")]
#[command(about = "Generate text from per-context symbol counts", long_about = None)]
struct Args {
    /// Context order; the prior must have exactly this many symbols
    #[arg(short = 'k', long = "order")]
    k: usize,

    /// Additive smoothing parameter (sampled mode)
    #[arg(short = 'a', long = "alpha", default_value_t = 1.0)]
    alpha: f64,

    /// Starting text
    #[arg(short = 'p', long = "prior")]
    prior: String,

    /// Number of symbols to generate
    #[arg(short = 's', long = "size")]
    size: usize,

    #[arg(long, value_enum, default_value_t = Mode::Sampled)]
    mode: Mode,

    /// Counts CSV written by generate_counts
    #[arg(short, long, value_name = "FILE", default_value = "context_counts.csv")]
    model: PathBuf,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

// ---------------------------------------------------------------------------
// Counts model
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct ContextEntry {
    /// Symbols in file order.
    symbols: Vec<(char, u64)>,
    total: u64,
}

impl ContextEntry {
    fn set(&mut self, symbol: char, count: u64) {
        match self.symbols.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, c)) => {
                self.total -= *c;
                *c = count;
            }
            None => self.symbols.push((symbol, count)),
        }
        self.total += count;
    }

    fn greedy_candidates(&self) -> Vec<char> {
        let max = self.symbols.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;
        self.symbols
            .iter()
            .filter(|(_, c)| *c as f64 >= max * GREEDY_THRESHOLD)
            .map(|(s, _)| *s)
            .collect()
    }

    /// Walk the cumulative distribution of `(count + alpha) / (total + alpha * n)`
    /// over the observed symbols.
    fn sample<R: Rng>(&self, alpha: f64, rng: &mut R) -> Option<char> {
        let denom = self.total as f64 + alpha * self.symbols.len() as f64;
        let draw: f64 = rng.gen();
        let mut cumulative = 0.0;
        for &(symbol, count) in &self.symbols {
            cumulative += (count as f64 + alpha) / denom;
            if draw <= cumulative {
                return Some(symbol);
            }
        }
        self.symbols.last().map(|(s, _)| *s)
    }
}

#[derive(Debug)]
struct TextModel {
    k: usize,
    contexts: HashMap<String, ContextEntry>,
}

impl TextModel {
    /// Read headerless `context,symbol,count` rows. A repeated
    /// (context, symbol) pair replaces the earlier count.
    fn from_reader<R: Read>(k: usize, reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);

        let mut contexts: HashMap<String, ContextEntry> = HashMap::new();
        for (row, result) in reader.deserialize::<Record>().enumerate() {
            let record = result.with_context(|| format!("counts row {}", row + 1))?;

            let mut chars = record.symbol.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => bail!(
                    "counts row {}: symbol {:?} is not a single character",
                    row + 1,
                    record.symbol
                ),
            };
            let count = u64::try_from(record.count).with_context(|| {
                format!("counts row {}: negative count {}", row + 1, record.count)
            })?;

            contexts.entry(record.context).or_default().set(symbol, count);
        }

        Ok(Self { k, contexts })
    }

    fn next_symbol<R: Rng>(&self, context: &str, mode: Mode, alpha: f64, rng: &mut R) -> char {
        let Some(entry) = self.contexts.get(context) else {
            log::warn!("Unknown context {context:?}");
            return FALLBACK_SYMBOL;
        };

        let picked = match mode {
            Mode::Greedy => {
                let candidates = entry.greedy_candidates();
                if candidates.is_empty() {
                    None
                } else {
                    Some(candidates[rng.gen_range(0..candidates.len())])
                }
            }
            Mode::Sampled => entry.sample(alpha, rng),
        };
        picked.unwrap_or_else(|| {
            log::warn!("No symbols recorded for context {context:?}");
            FALLBACK_SYMBOL
        })
    }

    /// Extend `prior` by up to `size` symbols.
    fn generate<R: Rng>(
        &self,
        prior: &str,
        size: usize,
        mode: Mode,
        alpha: f64,
        rng: &mut R,
    ) -> Result<String> {
        let mut output: Vec<char> = prior.chars().collect();
        if output.len() != self.k {
            bail!(
                "prior {prior:?} has {} symbols, expected k = {}",
                output.len(),
                self.k
            );
        }

        for step in 0..size {
            let context: String = output[output.len() - self.k..].iter().collect();
            let next = self.next_symbol(&context, mode, alpha, rng);
            log::debug!("Step {step}: context {context:?} -> {next:?}");
            output.push(next);

            if mode == Mode::Sampled && step > MAX_REPEAT && ends_in_run(&output, next) {
                log::warn!("Stopping early: {next:?} repeated {MAX_REPEAT} times");
                break;
            }
        }

        Ok(output.into_iter().collect())
    }
}

fn ends_in_run(text: &[char], symbol: char) -> bool {
    text.len() >= MAX_REPEAT && text[text.len() - MAX_REPEAT..].iter().all(|&c| c == symbol)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file = std::fs::File::open(&args.model)
        .with_context(|| format!("opening {}", args.model.display()))?;
    let model = TextModel::from_reader(args.k, file)
        .with_context(|| format!("loading {}", args.model.display()))?;
    log::info!(
        "Loaded {} contexts from {}",
        model.contexts.len(),
        args.model.display()
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let text = model.generate(&args.prior, args.size, args.mode, args.alpha, &mut rng)?;

    println!("Generated text:\n{text}");
    Ok(())
}
