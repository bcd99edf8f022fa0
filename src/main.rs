//! Reads `key<separator>text` lines from stdin, decodes them under the
//! configured schema into one dimensional cells, optionally samples them and
//! writes them to stdout.
//!
//! Usage: `cellgrid [settings file]`

use std::io::{self, BufRead, Write};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cellgrid::engine::Engine;
use cellgrid::position::Position1D;
use cellgrid::sample::RandomSample;
use cellgrid::settings::Settings;
use cellgrid::transform::Lifted;

fn main() -> cellgrid::Result<()> {
    let path = std::env::args().nth(1);
    let settings = Settings::load(path.as_deref())?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let schema = settings.schema()?;
    let engine = Engine::new(settings.workers);
    info!(schema = %schema, workers = engine.workers(), "starting");

    let mut rows = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        match line.split_once(settings.separator.as_str()) {
            Some((key, text)) => rows.push((Position1D::new(key), text.to_owned())),
            None => warn!(%line, "no separator, skipped"),
        }
    }
    let mut cells = engine.materialize(rows, &schema);

    if let Some(ratio) = settings.sample_ratio {
        let seed = settings.seed;
        // one generator per worker
        cells = engine.select_per_worker(
            &cells,
            |worker| {
                Lifted::new(match seed {
                    Some(seed) => RandomSample::with_seed(ratio, seed.wrapping_add(worker as u64)),
                    None => RandomSample::new(ratio),
                })
            },
            &(),
        );
    }

    let mut out = io::stdout().lock();
    for cell in &cells {
        if settings.verbose {
            writeln!(out, "{}", cell)?;
        } else {
            writeln!(out, "{}", cell.to_short_string(&settings.separator))?;
        }
    }
    info!(cells = cells.len(), "done");
    Ok(())
}
