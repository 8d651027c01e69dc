use crate::util::duration_extension::DurationExtension;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// evaluated at the top of each search iteration (between pops, between
/// flood-fill expansions). when it trips, the search stops and returns the
/// goals sealed so far; exceeding a deadline is never an error.
#[derive(Debug, Clone, Deserialize, Default)]
pub enum TerminationModel {
    #[default]
    #[serde(rename = "unbounded")]
    Unbounded,
    /// stops a query once its runtime exceeds the limit. only checked every
    /// `frequency` iterations, since reading the clock is not free.
    #[serde(rename = "query_runtime")]
    RuntimeLimit { limit: Duration, frequency: u64 },
    /// stops once the number of iterations exceeds (greater than) some
    /// limit. iterations begin at 0, so we add 1 for the comparison.
    #[serde(rename = "iterations")]
    IterationsLimit { limit: u64 },
    #[serde(rename = "combined")]
    Combined { models: Vec<TerminationModel> },
}

impl TerminationModel {
    /// a runtime limit expressed in microseconds, the unit the query
    /// interface uses
    pub fn from_micros(limit_micros: u64) -> TerminationModel {
        TerminationModel::RuntimeLimit {
            limit: Duration::from_micros(limit_micros),
            frequency: 16,
        }
    }

    pub fn should_terminate(&self, start_time: &Instant, iteration: u64) -> bool {
        use TerminationModel as T;
        match self {
            T::Unbounded => false,
            T::RuntimeLimit { limit, frequency } => {
                if iteration % frequency.max(&1) == 0 {
                    Instant::now().duration_since(*start_time) > *limit
                } else {
                    false
                }
            }
            T::IterationsLimit { limit } => iteration + 1 > *limit,
            T::Combined { models } => models
                .iter()
                .any(|m| m.should_terminate(start_time, iteration)),
        }
    }

    /// human-readable reason a search stopped early, None when the model
    /// would not have terminated it
    pub fn explain(&self, start_time: &Instant, iteration: u64) -> Option<String> {
        use TerminationModel as T;
        match self {
            T::Unbounded => None,
            T::RuntimeLimit { limit, .. } => {
                if Instant::now().duration_since(*start_time) > *limit {
                    Some(format!("exceeded runtime limit of {}", limit.hhmmss()))
                } else {
                    None
                }
            }
            T::IterationsLimit { limit } => {
                if iteration + 1 > *limit {
                    Some(format!("exceeded iteration limit of {}", limit))
                } else {
                    None
                }
            }
            T::Combined { models } => {
                let explanations: Vec<String> = models
                    .iter()
                    .filter_map(|m| m.explain(start_time, iteration))
                    .collect();
                if explanations.is_empty() {
                    None
                } else {
                    Some(explanations.join(", "))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TerminationModel as T;
    use std::time::{Duration, Instant};

    #[test]
    fn test_within_runtime_limit() {
        let start_time = Instant::now() - Duration::from_secs(1);
        let m = T::RuntimeLimit {
            limit: Duration::from_secs(2),
            frequency: 10,
        };
        for iteration in 0..11 {
            assert!(!m.should_terminate(&start_time, iteration));
        }
    }

    #[test]
    fn test_exceeds_runtime_limit_respects_frequency() {
        let start_time = Instant::now() - Duration::from_secs(3);
        let m = T::RuntimeLimit {
            limit: Duration::from_secs(2),
            frequency: 10,
        };
        for iteration in 0..11 {
            let result = m.should_terminate(&start_time, iteration);
            // iterations 0 and 10 hit the sampling frequency, 1-9 skip the
            // clock entirely
            assert_eq!(result, iteration % 10 == 0);
        }
    }

    #[test]
    fn test_iterations_limit() {
        let m = T::IterationsLimit { limit: 5 };
        let now = Instant::now();
        assert!(!m.should_terminate(&now, 4));
        assert!(m.should_terminate(&now, 5));
        assert!(m.should_terminate(&now, 6));
    }

    #[test]
    fn test_zero_runtime_limit_trips_immediately() {
        let m = T::from_micros(0);
        let now = Instant::now();
        assert!(m.should_terminate(&now, 0));
    }

    #[test]
    fn test_combined() {
        let start_time = Instant::now() - Duration::from_secs(3);
        let m = T::Combined {
            models: vec![
                T::RuntimeLimit {
                    limit: Duration::from_secs(2),
                    frequency: 1,
                },
                T::IterationsLimit { limit: 5 },
            ],
        };
        assert!(m.should_terminate(&start_time, 6));
        let msg = m.explain(&start_time, 6).unwrap();
        assert_eq!(
            msg,
            "exceeded runtime limit of 0:00:02.000, exceeded iteration limit of 5"
        );
    }
}
