//! Command-line n-gram and skip-gram counter.
//!
//! Reads a text file (one sequence per line), counts the grams of every
//! order up to `--order` with at most `--skip` skipped positions, and prints
//! the selected grams as `gram<TAB>skip<TAB>count`, most frequent first.

mod io;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use nskipgrams_core::model::query::GramQuery;
use nskipgrams_core::model::skipgrams::Skipgrams;

use crate::io::{Unit, read_file};

#[derive(Parser, Debug)]
#[command(author, version, about = "Count n-grams and skip-grams in a text file", long_about = None)]
struct Args {
    /// Text file to read, one sequence per line ("-" for stdin)
    input: PathBuf,

    /// Largest gram order to index
    #[arg(short, long, default_value_t = 2)]
    order: usize,

    /// Maximum number of skipped positions inside a gram
    #[arg(short, long, default_value_t = 0)]
    skip: usize,

    /// How lines are split into elements
    #[arg(short, long, value_enum, default_value = "chars")]
    unit: Unit,

    /// Only print grams of this order [default: --order]
    #[arg(long)]
    show: Option<usize>,

    /// Only print grams recorded at this skip
    #[arg(long)]
    at_skip: Option<usize>,

    /// Only print grams starting with this text (split like the input)
    #[arg(short, long)]
    prefix: Option<String>,

    /// Print at most this many grams
    #[arg(short, long)]
    top: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    }

    fn query(&self) -> Result<GramQuery<String>> {
        let mut query = GramQuery::new().with_order(self.show.unwrap_or(self.order));
        query.skip = self.at_skip;
        let Some(prefix) = &self.prefix else {
            return Ok(query);
        };
        let elements = self.unit.segment(prefix);
        if elements.is_empty() {
            bail!("prefix {:?} contains no element to match", prefix);
        }
        Ok(query.with_prefix(&elements))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.init_logging();
    log::debug!("Arguments: {:?}", args);

    let query = args.query()?;
    let lines = read_file(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let mut grams = Skipgrams::new(args.order)?;
    for line in &lines {
        let elements = args.unit.segment(line);
        grams.add_all_from_seq(&elements, args.skip, 1)?;
    }
    log::info!("Indexed {} line(s) from {}", lines.len(), args.input.display());

    let mut rows: Vec<(Vec<String>, usize, usize)> = grams.skipgrams_with_counts(query)?.collect();
    // Stable: ties keep the collection's enumeration order.
    rows.sort_by(|a, b| b.2.cmp(&a.2));
    if let Some(top) = args.top {
        rows.truncate(top);
    }

    for (gram, skip, count) in rows {
        println!("{:?}\t{}\t{}", args.unit.join(&gram), skip, count);
    }
    Ok(())
}
