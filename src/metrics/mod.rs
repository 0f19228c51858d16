use crate::error::{DbError, Result};
use hdrhistogram::Histogram;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Index operation whose latency is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert,
    Delete,
    Search,
    Traverse,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Insert,
        Operation::Delete,
        Operation::Search,
        Operation::Traverse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Delete => "delete",
            Operation::Search => "search",
            Operation::Traverse => "traverse",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics collector for the benchmark driver
pub struct Metrics {
    operation_latencies: HashMap<Operation, Histogram<u64>>,
    operations: u64,
    rejected_inserts: u64,
    missed_lookups: u64,
    noop_deletes: u64,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let mut operation_latencies = HashMap::new();
        for op in Operation::ALL {
            let histogram = Histogram::<u64>::new(3)
                .map_err(|e| DbError::MetricsError(e.to_string()))?;
            operation_latencies.insert(op, histogram);
        }

        Ok(Self {
            operation_latencies,
            operations: 0,
            rejected_inserts: 0,
            missed_lookups: 0,
            noop_deletes: 0,
        })
    }

    /// Record one operation's latency in nanoseconds
    pub fn record_latency(&mut self, operation: Operation, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        if let Some(histogram) = self.operation_latencies.get_mut(&operation) {
            histogram.saturating_record(nanos);
        }
        self.operations += 1;
    }

    pub fn increment_rejected_inserts(&mut self) {
        self.rejected_inserts += 1;
    }

    pub fn increment_missed_lookups(&mut self) {
        self.missed_lookups += 1;
    }

    pub fn increment_noop_deletes(&mut self) {
        self.noop_deletes += 1;
    }

    /// p50, p95 and p99 latency for `operation`, in nanoseconds
    pub fn get_percentiles(&self, operation: Operation) -> (f64, f64, f64) {
        match self.operation_latencies.get(&operation) {
            Some(histogram) if histogram.len() > 0 => (
                histogram.value_at_quantile(0.50) as f64,
                histogram.value_at_quantile(0.95) as f64,
                histogram.value_at_quantile(0.99) as f64,
            ),
            _ => (0.0, 0.0, 0.0),
        }
    }

    /// Number of recorded samples for `operation`
    pub fn count(&self, operation: Operation) -> u64 {
        self.operation_latencies
            .get(&operation)
            .map_or(0, |histogram| histogram.len())
    }

    pub fn report(&self) -> MetricsReport {
        let operation_latencies = Operation::ALL
            .into_iter()
            .filter(|&op| self.count(op) > 0)
            .map(|op| (op, self.count(op), self.get_percentiles(op)))
            .collect();

        MetricsReport {
            operation_latencies,
            operations: self.operations,
            rejected_inserts: self.rejected_inserts,
            missed_lookups: self.missed_lookups,
            noop_deletes: self.noop_deletes,
        }
    }
}

/// Snapshot of collected metrics
#[derive(Debug, Clone)]
pub struct MetricsReport {
    /// (operation, sample count, (p50, p95, p99) in nanoseconds)
    pub operation_latencies: Vec<(Operation, u64, (f64, f64, f64))>,
    pub operations: u64,
    pub rejected_inserts: u64,
    pub missed_lookups: u64,
    pub noop_deletes: u64,
}
