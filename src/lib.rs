//! A factor algebra for exact inference over small discrete Bayesian networks.
//!
//! A `Factor` maps every assignment of its scope to a non-negative number. Joint distributions
//! are built from priors and conditional tables by the chain rule (`joint`), queried by summing
//! variables out (`marginal`) and conditioned on evidence (`observe`).
//!
//! ```
//! #[macro_use] extern crate tally;
//! use tally::FactorBuilder;
//!
//! # fn main() -> tally::Result<()> {
//! let p_s = FactorBuilder::new()
//!     .with_binary("S")
//!     .build_with(|a| if a["S"] == true { 0.01 } else { 0.99 })?;
//! let cp_r = FactorBuilder::new()
//!     .with_binary("S")
//!     .with_binary("R")
//!     .build_with(|a| if a["R"] == a["S"] { 0.9 } else { 0.1 })?;
//!
//! let joint = p_s.joint(&cp_r)?;
//! let p_r = joint.marginal("R")?;
//! assert!((p_r.value_at(&assignment!{ "R" => true })? - 0.108).abs() < 1e-12);
//!
//! let posterior = joint.observe(&assignment!{ "R" => true })?;
//! assert_eq!(posterior.scope(), vec!["S"]);
//! # Ok(())
//! # }
//! ```

#[macro_use]
pub mod variable;
pub mod config;
pub mod factor;
pub mod model;
pub mod printer;
pub mod semiring;
pub mod util;

pub use config::Config;
pub use factor::{all_assignments, joint, marginal, observe};
pub use factor::{Entries, Factor, FactorBuilder, Table, VariableSet};
pub use model::{Network, NetworkBuilder};
pub use printer::{print_table, render};
pub use semiring::SemiRing;
pub use util::{Result, TallyError};
pub use variable::{Assignment, Domain, Value, Variable};
