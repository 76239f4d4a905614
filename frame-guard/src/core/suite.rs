//! Check suites for running several checks in sequence.

use super::Check;
use crate::logging::{truncate_field, LogConfig};
use crate::prelude::*;
use crate::table::Table;
use crate::{log_check, perf_debug};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// An ordered collection of checks run against one table.
///
/// Checks run in insertion order and the suite stops at the first failure,
/// returning that check's error unchanged. On success the suite returns the
/// table it was given, like any single check.
///
/// # Examples
///
/// ```rust
/// use arrow::array::{ArrayRef, Int64Array};
/// use frame_guard::checks::{IsShape, Monotonic, IsMonotonic, NoneMissing, UniqueIndex};
/// use frame_guard::core::CheckSuite;
/// use frame_guard::table::Frame;
/// use std::sync::Arc;
///
/// let suite = CheckSuite::builder("orders")
///     .description("Order table invariants")
///     .check(NoneMissing::all())
///     .check(IsShape::new(3, 1))
///     .check(UniqueIndex)
///     .check(IsMonotonic::all(Monotonic::increasing().strict()))
///     .build();
///
/// let frame = Frame::from_columns(vec![(
///     "order_id",
///     Arc::new(Int64Array::from(vec![10, 11, 12])) as ArrayRef,
/// )])
/// .unwrap();
///
/// assert!(suite.run(&frame).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CheckSuite {
    name: String,
    description: Option<String>,
    checks: Vec<Arc<dyn Check>>,
    log_config: LogConfig,
}

impl CheckSuite {
    /// Creates a new builder for constructing a suite.
    pub fn builder(name: impl Into<String>) -> CheckSuiteBuilder {
        CheckSuiteBuilder::new(name)
    }

    /// Returns the name of the suite.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description of the suite if available.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the checks in run order.
    pub fn checks(&self) -> &[Arc<dyn Check>] {
        &self.checks
    }

    /// Returns the logging configuration.
    pub fn log_config(&self) -> &LogConfig {
        &self.log_config
    }

    /// Runs every check against `table`, stopping at the first failure.
    #[instrument(skip(self, table), fields(suite.name = %self.name, suite.checks = self.checks.len()))]
    pub fn run<'t, T: Table>(&self, table: &'t T) -> Result<&'t T> {
        let start_time = Instant::now();
        perf_debug!(
            self.log_config,
            suite.name = %self.name,
            table.rows = table.num_rows(),
            table.columns = table.num_columns(),
            "Starting check suite"
        );

        for (position, check) in self.checks.iter().enumerate() {
            log_check!(
                self.log_config,
                check.name = %check.name(),
                check.position = position,
                check.metadata = ?check.metadata(),
                "Running check"
            );

            if let Err(error) = check.evaluate(table) {
                if !error.is_validation_failure() {
                    warn!(
                        suite.name = %self.name,
                        check.name = %check.name(),
                        error = %error,
                        "Check could not be evaluated"
                    );
                } else if self.log_config.log_payloads {
                    let failure = error.to_string();
                    warn!(
                        suite.name = %self.name,
                        check.name = %check.name(),
                        failure = %truncate_field(&failure, self.log_config.max_field_length),
                        "Check failed"
                    );
                } else {
                    warn!(
                        suite.name = %self.name,
                        check.name = %check.name(),
                        violations = error.violation().map_or(0, |v| v.count()),
                        "Check failed"
                    );
                }
                return Err(error);
            }
        }

        if self.log_config.log_metrics {
            info!(
                suite.name = %self.name,
                checks.passed = self.checks.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Check suite passed"
            );
        }
        Ok(table)
    }
}

/// Builder for constructing [`CheckSuite`] instances.
#[derive(Debug)]
pub struct CheckSuiteBuilder {
    name: String,
    description: Option<String>,
    checks: Vec<Arc<dyn Check>>,
    log_config: LogConfig,
}

impl CheckSuiteBuilder {
    /// Creates a new suite builder with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            checks: Vec::new(),
            log_config: LogConfig::default(),
        }
    }

    /// Sets the description for the suite.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a check.
    pub fn check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Arc::new(check));
        self
    }

    /// Appends an already shared check.
    pub fn shared_check(mut self, check: Arc<dyn Check>) -> Self {
        self.checks.push(check);
        self
    }

    /// Appends several checks.
    pub fn checks<I>(mut self, checks: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Check>>,
    {
        self.checks.extend(checks);
        self
    }

    /// Sets the logging configuration.
    pub fn log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    /// Builds the suite.
    pub fn build(self) -> CheckSuite {
        CheckSuite {
            name: self.name,
            description: self.description,
            checks: self.checks,
            log_config: self.log_config,
        }
    }
}
