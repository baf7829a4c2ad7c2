// ============================================================================
// Experiment Executor
// Distributes independent runs over worker threads
// ============================================================================

use crate::error::{MarketError, MarketResult};
use crate::interfaces::RecordSink;
use crossbeam::channel;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::{error, info};

use super::{DayRecord, Simulation};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperimentSummary {
    pub runs: u32,
    pub records_written: usize,
    pub workers: usize,
}

/// Execute every configured run and write all records to `sink`.
///
/// Runs are pulled from a shared queue by `config.workers` threads. Records
/// reach the sink in run order once all runs are done, so the output does
/// not depend on the worker count. The first failing run aborts the
/// experiment; nothing is written in that case.
pub fn run_experiment<S: RecordSink + ?Sized>(
    sim: &Simulation,
    sink: &mut S,
) -> MarketResult<ExperimentSummary> {
    let runs = sim.config().runs;
    let workers = sim.config().workers.clamp(1, runs.max(1) as usize);

    info!(runs, workers, seed = sim.base_seed(), "experiment started");

    let (run_tx, run_rx) = channel::unbounded::<u32>();
    for run in 0..runs {
        run_tx
            .send(run)
            .map_err(|_| MarketError::InvariantViolation("run queue closed".to_string()))?;
    }
    drop(run_tx);

    let results: Mutex<BTreeMap<u32, Vec<DayRecord>>> = Mutex::new(BTreeMap::new());
    let failure: Mutex<Option<MarketError>> = Mutex::new(None);

    crossbeam::scope(|scope| {
        for worker in 0..workers {
            let run_rx = run_rx.clone();
            let results = &results;
            let failure = &failure;

            scope.spawn(move |_| {
                while let Ok(run) = run_rx.recv() {
                    if failure.lock().is_some() {
                        break;
                    }
                    match sim.run(run) {
                        Ok(output) => {
                            results.lock().insert(run, output.records);
                        }
                        Err(e) => {
                            error!(worker, run, error = %e, "run failed");
                            failure.lock().get_or_insert(e);
                            break;
                        }
                    }
                }
            });
        }
    })
    .map_err(|_| MarketError::InvariantViolation("experiment worker panicked".to_string()))?;

    if let Some(e) = failure.into_inner() {
        return Err(e);
    }

    let mut records_written = 0;
    for (_, records) in results.into_inner() {
        sink.write_all(&records)?;
        records_written += records.len();
    }
    sink.flush()?;

    info!(runs, records_written, "experiment finished");

    Ok(ExperimentSummary {
        runs,
        records_written,
        workers,
    })
}
