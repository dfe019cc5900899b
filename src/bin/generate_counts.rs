//! Builds `context_counts.csv` from a text file with an order-k
//! finite-context model and reports the text's average information content.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Alphabet size used by the additive smoothing. Fixed at the 8-bit range
/// even though symbols are Unicode scalar values, so scores stay comparable
/// with byte-oriented FCM tools.
const ALPHABET_SIZE: f64 = 256.0;

#[derive(Parser, Debug)]
#[command(name = "generate_counts")]
#[command(about = "Count symbols following each order-k context of a text", long_about = None)]
struct Args {
    /// Text file to model
    #[arg(value_name = "TEXT_FILE")]
    input: PathBuf,

    /// Context order (symbols of history)
    #[arg(short = 'k', long = "order")]
    k: usize,

    /// Additive smoothing parameter
    #[arg(short = 'a', long = "alpha")]
    alpha: f64,

    /// Where to write the counts CSV
    #[arg(short, long, value_name = "FILE", default_value = "context_counts.csv")]
    output: PathBuf,
}

// ---------------------------------------------------------------------------
// Finite-context model
// ---------------------------------------------------------------------------

/// Symbol counts per context, kept in first-appearance order so the CSV
/// (and the charts drawn from it) come out in text order.
#[derive(Debug, Default)]
struct ContextModel {
    k: usize,
    contexts: Vec<ContextCounts>,
    index: HashMap<String, usize>,
}

#[derive(Debug)]
struct ContextCounts {
    context: String,
    symbols: Vec<(char, u64)>,
    total: u64,
}

impl ContextCounts {
    /// `context: sym=count sym=count ...`
    fn summary(&self) -> String {
        let symbols: Vec<String> = self
            .symbols
            .iter()
            .map(|(s, c)| format!("{s:?}={c}"))
            .collect();
        format!("{:?}: {}", self.context, symbols.join(" "))
    }

    fn count_of(&self, symbol: char) -> u64 {
        self.symbols
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

impl ContextModel {
    fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Count every (context, next symbol) pair of the text.
    fn train(&mut self, text: &[char]) {
        for i in self.k..text.len() {
            let context: String = text[i - self.k..i].iter().collect();
            self.observe(context, text[i]);
        }
    }

    fn observe(&mut self, context: String, symbol: char) {
        let slot = match self.index.get(&context) {
            Some(&slot) => slot,
            None => {
                self.index.insert(context.clone(), self.contexts.len());
                self.contexts.push(ContextCounts {
                    context,
                    symbols: Vec::new(),
                    total: 0,
                });
                self.contexts.len() - 1
            }
        };

        let entry = &mut self.contexts[slot];
        entry.total += 1;
        match entry.symbols.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, count)) => *count += 1,
            None => entry.symbols.push((symbol, 1)),
        }
    }

    fn lookup(&self, context: &str) -> Option<&ContextCounts> {
        self.index.get(context).map(|&slot| &self.contexts[slot])
    }

    /// Average information content in bits per symbol, with additive
    /// smoothing `(count + alpha) / (total + alpha * 256)`.
    fn average_information(&self, text: &[char], alpha: f64) -> f64 {
        if text.len() <= self.k {
            return 0.0;
        }
        let mut bits = 0.0;
        for i in self.k..text.len() {
            let context: String = text[i - self.k..i].iter().collect();
            let (count, total) = self
                .lookup(&context)
                .map(|c| (c.count_of(text[i]), c.total))
                .unwrap_or((0, 0));
            let p = (count as f64 + alpha) / (total as f64 + alpha * ALPHABET_SIZE);
            bits -= p.log2();
        }
        bits / text.len() as f64
    }

    /// Write `context,symbol,count` rows, no header.
    fn write_csv<W: std::io::Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        let mut symbol_buf = [0u8; 4];
        for ctx in &self.contexts {
            for &(symbol, count) in &ctx.symbols {
                let symbol = symbol.encode_utf8(&mut symbol_buf);
                let count = count.to_string();
                writer
                    .write_record([ctx.context.as_str(), &*symbol, count.as_str()])
                    .with_context(|| format!("writing context {:?}", ctx.context))?;
            }
        }
        writer.flush().context("flushing counts")?;
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let text: Vec<char> = String::from_utf8_lossy(&bytes).chars().collect();
    log::info!("Read {} symbols from {}", text.len(), args.input.display());

    let mut model = ContextModel::new(args.k);
    model.train(&text);
    log::info!("{} distinct contexts of order {}", model.contexts.len(), args.k);
    for ctx in &model.contexts {
        log::debug!("{}", ctx.summary());
    }

    let file = std::fs::File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    model.write_csv(file)?;

    println!(
        "Average Information Content: {} bits/symbol",
        model.average_information(&text, args.alpha)
    );
    println!("Wrote counts to {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn counts_follow_first_appearance() {
        let text = chars("abab");
        let mut model = ContextModel::new(1);
        model.train(&text);

        let contexts: Vec<_> = model.contexts.iter().map(|c| c.context.as_str()).collect();
        assert_eq!(contexts, vec!["a", "b"]);
        assert_eq!(model.lookup("a").unwrap().symbols, vec![('b', 2)]);
        assert_eq!(model.lookup("b").unwrap().symbols, vec![('a', 1)]);
        assert_eq!(model.lookup("a").unwrap().total, 2);
    }

    #[test]
    fn summary_lists_symbol_counts() {
        let text = chars("aab a");
        let mut model = ContextModel::new(1);
        model.train(&text);

        assert_eq!(model.lookup("a").unwrap().summary(), "\"a\": 'a'=1 'b'=1");
        assert_eq!(model.lookup(" ").unwrap().summary(), "\" \": 'a'=1");
    }

    #[test]
    fn text_shorter_than_order_has_no_contexts() {
        let text = chars("ab");
        let mut model = ContextModel::new(3);
        model.train(&text);
        assert!(model.contexts.is_empty());
        assert_eq!(model.average_information(&text, 1.0), 0.0);
    }

    #[test]
    fn information_matches_hand_computation() {
        // k = 1 over "aaa": context "a" → 'a' twice.
        let text = chars("aaa");
        let mut model = ContextModel::new(1);
        model.train(&text);

        let alpha = 1.0;
        let p: f64 = (2.0 + alpha) / (2.0 + alpha * 256.0);
        let expected = -(2.0 * p.log2()) / 3.0;
        let got = model.average_information(&text, alpha);
        assert!((got - expected).abs() < 1e-12, "{got} vs {expected}");
    }

    #[test]
    fn csv_quotes_awkward_contexts() {
        let text = chars("a,b\nc");
        let mut model = ContextModel::new(2);
        model.train(&text);

        let mut out = Vec::new();
        model.write_csv(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert_eq!(written, "\"a,\",b,1\n\",b\",\"\n\",1\n\"b\n\",c,1\n");
    }
}
