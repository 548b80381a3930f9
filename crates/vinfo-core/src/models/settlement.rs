//! Settled batch outcomes

use std::collections::HashMap;

use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::models::TypedError;

/// Outcome of one sub-request after a batch has completed
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// The endpoint answered; payload is endpoint specific
    Success(Value),
    /// The endpoint failed with a classified cause
    Failure(TypedError),
}

impl Settlement {
    /// Whether the sub-request succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Settlement::Success(_))
    }

    /// Success payload, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Settlement::Success(value) => Some(value),
            Settlement::Failure(_) => None,
        }
    }

    /// Failure cause, if any
    pub fn error(&self) -> Option<&TypedError> {
        match self {
            Settlement::Success(_) => None,
            Settlement::Failure(err) => Some(err),
        }
    }
}

impl<E: Into<TypedError>> From<Result<Value, E>> for Settlement {
    fn from(result: Result<Value, E>) -> Self {
        match result {
            Ok(value) => Settlement::Success(value),
            Err(err) => Settlement::Failure(err.into()),
        }
    }
}

/// Per-endpoint outcomes of one batch execution.
///
/// Built once per call and never mutated afterwards; every property that
/// reads an endpoint sees the same settlement.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    outcomes: HashMap<Endpoint, Settlement>,
}

impl BatchResult {
    /// Outcome for an endpoint
    pub fn get(&self, endpoint: &Endpoint) -> Option<&Settlement> {
        self.outcomes.get(endpoint)
    }

    /// Number of settled endpoints
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether nothing was settled
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Iterate over all settled endpoints
    pub fn iter(&self) -> impl Iterator<Item = (&Endpoint, &Settlement)> {
        self.outcomes.iter()
    }

    /// Number of failed endpoints
    pub fn failure_count(&self) -> usize {
        self.outcomes.values().filter(|s| !s.is_success()).count()
    }
}

impl FromIterator<(Endpoint, Settlement)> for BatchResult {
    /// Later entries for the same endpoint are ignored
    fn from_iter<I: IntoIterator<Item = (Endpoint, Settlement)>>(iter: I) -> Self {
        let mut outcomes = HashMap::new();
        for (endpoint, settlement) in iter {
            outcomes.entry(endpoint).or_insert(settlement);
        }
        Self { outcomes }
    }
}
