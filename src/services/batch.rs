use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{MigrateError, Result};
use crate::model::config::ErrorPolicy;
use crate::model::item::MigrationItem;
use crate::model::record::SourceRecord;
use crate::services::mapper::Mapper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BatchReport {
    pub mapped: usize,
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub items: Vec<MigrationItem>,
    pub report: BatchReport,
}

/// Map every record, keeping input order in the output.
///
/// Under `FailFast` the first failing record (by input position) is returned
/// and nothing after it is mapped when running sequentially. Under
/// `CollectAll` every failure is gathered into `MigrateError::Batch`.
pub fn run(records: &[SourceRecord], mapper: &Mapper) -> Result<BatchOutcome> {
    let policy = mapper.config().error_policy;
    debug!(
        records = records.len(),
        parallel = mapper.config().parallel,
        ?policy,
        "mapping batch"
    );

    let outcome = if mapper.config().parallel {
        run_parallel(records, mapper, policy)?
    } else {
        run_sequential(records, mapper, policy)?
    };

    info!(mapped = outcome.report.mapped, "batch mapped");
    Ok(outcome)
}

fn run_sequential(
    records: &[SourceRecord],
    mapper: &Mapper,
    policy: ErrorPolicy,
) -> Result<BatchOutcome> {
    let mut items = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for (i, raw) in records.iter().enumerate() {
        match mapper.map_record(raw) {
            Ok(item) => items.push(item),
            Err(e) => {
                let e = reject(i, raw, e);
                if policy == ErrorPolicy::FailFast {
                    return Err(e);
                }
                failures.push(e);
            }
        }
    }

    finish(items, failures)
}

fn run_parallel(
    records: &[SourceRecord],
    mapper: &Mapper,
    policy: ErrorPolicy,
) -> Result<BatchOutcome> {
    // Indexed collect keeps input order.
    let results: Vec<Result<MigrationItem>> =
        records.par_iter().map(|raw| mapper.map_record(raw)).collect();

    let mut items = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for (i, (raw, result)) in records.iter().zip(results).enumerate() {
        match result {
            Ok(item) => items.push(item),
            Err(e) => {
                let e = reject(i, raw, e);
                if policy == ErrorPolicy::FailFast {
                    return Err(e);
                }
                failures.push(e);
            }
        }
    }

    finish(items, failures)
}

fn reject(index: usize, raw: &SourceRecord, source: MigrateError) -> MigrateError {
    warn!(index, title = %raw.title, error = %source, "record rejected");
    MigrateError::Record {
        index,
        title: raw.title.clone(),
        source: Box::new(source),
    }
}

fn finish(items: Vec<MigrationItem>, failures: Vec<MigrateError>) -> Result<BatchOutcome> {
    if !failures.is_empty() {
        return Err(MigrateError::Batch { failures });
    }

    let report = BatchReport {
        mapped: items.len(),
    };

    Ok(BatchOutcome { items, report })
}
