//! Operation and Execute traits
//!
//! Operations are structs where the fields ARE the parameters. Each one names
//! itself with a verb and a noun ("add column", "move task") and executes
//! synchronously against a [`BoardStore`].

use crate::error::Result;
use crate::store::BoardStore;
use serde_json::Value;

/// Metadata every operation carries
pub trait Operation {
    /// Action verb, e.g. "add"
    fn verb(&self) -> &'static str;

    /// Target noun, e.g. "column"
    fn noun(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Whether the operation writes; read-only operations are never logged
    fn is_mutating(&self) -> bool {
        true
    }

    /// Canonical op string, e.g. "add column"
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against the store
pub trait Execute: Operation {
    fn execute(&self, store: &BoardStore) -> Result<Value>;
}

/// Implements [`Operation`] for an operation struct.
///
/// `operation!(AddColumn, verb = "add", noun = "column", description = "...")`
/// declares a mutating operation; append `read_only` for queries.
macro_rules! operation {
    (@impl $ty:ty, $verb:literal, $noun:literal, $desc:literal, $mutating:literal) => {
        impl $crate::operation::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }

            fn is_mutating(&self) -> bool {
                $mutating
            }
        }
    };
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal, read_only) => {
        $crate::operation::operation!(@impl $ty, $verb, $noun, $desc, false);
    };
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal) => {
        $crate::operation::operation!(@impl $ty, $verb, $noun, $desc, true);
    };
}

pub(crate) use operation;
