#![forbid(unsafe_code)]

//! Chemical equation balancer.
//!
//! Given textual input such as `Fe + O2 = Fe2O3`, finds the smallest
//! positive integer coefficients that equalize the count of every element
//! (and the net electric charge) on both sides.
//!
//! # Pipeline
//!
//! ```text
//! "Fe + O2 = Fe2O3"
//!       |
//!    Tokenizer -> symbol / number / punctuation tokens
//!       |
//!    Parser -> Equation (terms of element and group nodes, net charges)
//!       |
//!    Matrix construction (one row per element, one column per term)
//!       |
//!    Exact integer Gauss-Jordan elimination
//!       |
//!    Coefficient extraction + verification -> [4, 3, 2]
//! ```
//!
//! All arithmetic is exact: rows are combined by cross-scaled integer sums
//! and re-simplified by their GCD, and every add/multiply is checked against
//! a 2^53 magnitude bound.
//!
//! # Example
//!
//! ```
//! let balanced = stoik::balance("H2 + O2 = H2O").unwrap();
//! assert_eq!(balanced.coefficients, vec![2, 1, 2]);
//! assert_eq!(balanced.to_string(), "2H2 + O2 = 2H2O");
//! ```
//!
//! Ions and electrons balance through a pseudo-element row:
//!
//! ```
//! let balanced = stoik::balance("Fe^3+ + e = Fe^2+").unwrap();
//! assert_eq!(balanced.coefficients, vec![1, 1, 1]);
//! ```

mod ast;
mod error;
mod matrix;
mod num;
mod parser;
mod solver;
mod token;
mod tokenizer;

pub use ast::{Equation, Formula, Term, ELECTRON};
pub use error::{Error, Result};
pub use parser::parse;
pub use solver::{balance, balance_equation, Balanced};
