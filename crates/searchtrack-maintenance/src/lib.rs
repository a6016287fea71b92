//! Daily maintenance job: retention purge, rollup reconciliation, and
//! report generation, in that order. Intended to be invoked once per day
//! (e.g. from cron) with no parameters; a failed step aborts the remaining
//! steps for the run and is retried at the next schedule, not in-process.

pub mod notifier;
pub mod report;
pub mod runner;
