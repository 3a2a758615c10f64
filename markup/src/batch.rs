//! Parallel builds of many manual pages.

use mango_core::ManualSource;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::builder::ManualBuilder;
use crate::config::BuildConfig;
use crate::error::BuildError;

/// Result of building one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Program name of the source.
    pub name: String,
    /// The finished page, or a recoverable failure.
    pub result: Result<String, BuildError>,
}

impl BuildOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Builds every source on a pool of `jobs` threads (`0` picks rayon's default).
///
/// Outcomes keep input order. Recoverable failures are logged and recorded
/// in their outcome.
///
/// # Errors
///
/// Returns the first fatal [`BuildError`] in input order; no outcomes are
/// returned in that case.
pub fn build_all(
    sources: &[ManualSource],
    config: &BuildConfig,
    jobs: usize,
) -> Result<Vec<BuildOutcome>, BuildError> {
    let builder = ManualBuilder::new(config.clone());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .expect("failed to build rayon thread pool");

    let outcomes: Vec<BuildOutcome> = pool.install(|| {
        sources
            .par_iter()
            .map(|source| BuildOutcome {
                name: source.name.clone(),
                result: builder.build(source),
            })
            .collect()
    });

    for outcome in &outcomes {
        if let Err(err) = &outcome.result {
            if err.is_fatal() {
                return Err(err.clone());
            }
            warn!(name = %outcome.name, error = %err, "Skipping manual page");
        }
    }

    let built = outcomes.iter().filter(|o| o.is_ok()).count();
    info!(
        built,
        skipped = outcomes.len() - built,
        jobs = pool.current_num_threads(),
        "Batch build finished"
    );
    Ok(outcomes)
}
