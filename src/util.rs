//! Defines the `Error` type for the tally library

use crate::variable::Value;

use thiserror::Error;

use std::result;

pub type Result<T> = result::Result<T, TallyError>;

#[derive(Debug, Error)]
pub enum TallyError {

    /// A `Domain` was declared empty or with the same value more than once
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// An operation referenced a variable that is not in the relevant scope
    #[error("Unknown variable `{0}`")]
    UnknownVariable(String),

    /// A value was supplied for a variable that is not a member of its `Domain`
    #[error("Value {value} is not in the domain of `{variable}`")]
    DomainMismatch {
        variable: String,
        value: Value
    },

    /// Represents an assignment that does not cover exactly the expected scope.
    /// The value in the tuple is the names of the variables that were expected.
    #[error("Assignment must cover exactly the variables {0:?}")]
    IncompleteAssignment(Vec<String>),

    /// The operands of a joint share a variable whose domains differ
    #[error("Variable `{0}` appears in both scopes with different domains")]
    ScopeCollision(String),

    /// Represents a variable that was present multiple times in a situation where it should only
    /// have been present once
    #[error("Variable `{0}` was declared twice")]
    DuplicateVariable(String),

    /// Two factors were registered under the same name in a `Network`
    #[error("Factor `{0}` was declared twice")]
    DuplicateFactor(String),

    /// A rule or table produced a negative probability
    #[error("Encountered a negative probability ({0})")]
    NegativeProbability(f64),

    /// A rule or table produced NaN or an infinity
    #[error("Encountered a non-finite probability ({0})")]
    InvalidProbability(f64),

    /// The evidence has zero probability under the conditioned `Factor`
    #[error("The evidence has zero probability")]
    ZeroEvidence,

    /// Literal table data did not match the shape of the declared scope
    #[error("Table does not match the declared scope: {0}")]
    Shape(#[from] ndarray::ShapeError),

}
