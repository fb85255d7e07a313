//! REQUIRES / ENSURES checks for queue operations.
//!
//! Checks are evaluated under `debug_assertions` or with the `contracts`
//! feature. Otherwise the condition is still type-checked but never run.

use std::fmt::{Display, Formatter};

/// Whether contract conditions are evaluated in this build.
pub const ENABLED: bool = cfg!(any(debug_assertions, feature = "contracts"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clause {
    Requires,
    Ensures,
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Clause::Requires => write!(f, "REQUIRES"),
            Clause::Ensures => write!(f, "ENSURES"),
        }
    }
}

/// Report a failed contract and abort the current operation.
#[cold]
#[track_caller]
pub fn violated(clause: Clause, condition: &'static str) -> ! {
    tracing::error!(%clause, condition, "contract violated");
    panic!("{clause} failed: {condition}");
}

/// Precondition check.
#[macro_export]
macro_rules! requires {
    ($cond:expr $(,)?) => {
        if $crate::core::contract::ENABLED && !($cond) {
            $crate::core::contract::violated(
                $crate::core::contract::Clause::Requires,
                stringify!($cond),
            );
        }
    };
}

/// Postcondition check.
#[macro_export]
macro_rules! ensures {
    ($cond:expr $(,)?) => {
        if $crate::core::contract::ENABLED && !($cond) {
            $crate::core::contract::violated(
                $crate::core::contract::Clause::Ensures,
                stringify!($cond),
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passing_contracts_are_silent() {
        requires!(1 + 1 == 2);
        ensures!(true);
    }

    #[test]
    #[cfg(any(debug_assertions, feature = "contracts"))]
    #[should_panic(expected = "REQUIRES failed: 1 > 2")]
    fn test_failed_requires_panics() {
        requires!(1 > 2);
    }

    #[test]
    #[cfg(any(debug_assertions, feature = "contracts"))]
    #[should_panic(expected = "ENSURES failed")]
    fn test_failed_ensures_panics() {
        let size = 0usize;
        ensures!(size == 1);
    }

    #[test]
    fn test_clause_display() {
        assert_eq!(Clause::Requires.to_string(), "REQUIRES");
        assert_eq!(Clause::Ensures.to_string(), "ENSURES");
    }
}
