//! Storage-agnostic search predicates.
//!
//! Domain modules describe *what* to filter on with small criterion enums; a
//! store evaluates (or translates) them. `Criteria` is always a conjunction.

use serde::{Deserialize, Serialize};

/// A single predicate over records of type `T`.
pub trait Criterion<T> {
    fn matches(&self, candidate: &T) -> bool;
}

/// Conjunction of criteria. Empty criteria match everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria<C> {
    terms: Vec<C>,
}

impl<C> Default for Criteria<C> {
    fn default() -> Self {
        Self { terms: Vec::new() }
    }
}

impl<C> Criteria<C> {
    /// Criteria matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, term: C) -> Self {
        self.terms.push(term);
        self
    }

    /// Add `term` only when present.
    pub fn and_maybe(self, term: Option<C>) -> Self {
        match term {
            Some(t) => self.and(t),
            None => self,
        }
    }

    pub fn terms(&self) -> &[C] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches<T>(&self, candidate: &T) -> bool
    where
        C: Criterion<T>,
    {
        self.terms.iter().all(|t| t.matches(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum NumberCriterion {
        Even,
        Above(i32),
    }

    impl Criterion<i32> for NumberCriterion {
        fn matches(&self, candidate: &i32) -> bool {
            match self {
                NumberCriterion::Even => candidate % 2 == 0,
                NumberCriterion::Above(n) => candidate > n,
            }
        }
    }

    #[test]
    fn empty_criteria_match_everything() {
        let c: Criteria<NumberCriterion> = Criteria::all();
        assert!(c.is_empty());
        assert!(c.matches(&-7));
    }

    #[test]
    fn terms_are_combined_with_and() {
        let c = Criteria::all()
            .and(NumberCriterion::Even)
            .and_maybe(Some(NumberCriterion::Above(10)))
            .and_maybe(None);
        assert_eq!(c.terms().len(), 2);
        assert!(c.matches(&12));
        assert!(!c.matches(&8));
        assert!(!c.matches(&13));
    }
}
