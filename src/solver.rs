//! Balancing orchestration: matrix construction, degenerate-system
//! handling, coefficient extraction, and verification.
//!
//! The element-count matrix is homogeneous, so a nontrivial solution is a
//! null-space vector. One elimination pass exposes the structure; if it is
//! viable, an extra inhomogeneous row pins one free variable to 1 and a
//! second pass produces a particular solution, scaled to integers via the
//! LCM of the diagonal.

use std::fmt;

use crate::ast::{Equation, Term};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::num;
use crate::parser;

/// A successfully balanced equation.
///
/// `coefficients` holds one entry per term, left side first, in term order.
/// The `Display` rendering re-parses: coefficient 1 is omitted, terms with
/// coefficient 0 are skipped, terms are joined with `" + "` and the sides
/// with `" = "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balanced {
    pub equation: Equation,
    pub coefficients: Vec<i64>,
}

impl fmt::Display for Balanced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side(f: &mut fmt::Formatter<'_>, terms: &[Term], coefs: &[i64]) -> fmt::Result {
            let mut head = true;
            for (term, &coef) in terms.iter().zip(coefs) {
                if coef == 0 {
                    continue;
                }
                if !head {
                    write!(f, " + ")?;
                }
                head = false;
                if coef != 1 {
                    write!(f, "{coef}")?;
                }
                write!(f, "{term}")?;
            }
            Ok(())
        }

        let split = self.equation.left.len();
        side(f, &self.equation.left, &self.coefficients[..split])?;
        write!(f, " = ")?;
        side(f, &self.equation.right, &self.coefficients[split..])
    }
}

/// Parses and balances an equation in one step.
///
/// Pure and stateless: safe to call concurrently from independent threads.
pub fn balance(input: &str) -> Result<Balanced> {
    balance_equation(parser::parse(input)?)
}

/// Balances an already-parsed equation.
pub fn balance_equation(equation: Equation) -> Result<Balanced> {
    let mut matrix = build_matrix(&equation)?;
    solve(&mut matrix)?;
    let coefficients = extract_coefficients(&matrix)?;
    verify(&equation, &coefficients)?;
    Ok(Balanced {
        equation,
        coefficients,
    })
}

/// One row per element ("e" first), one column per term (left terms then
/// right terms, right counts negated), plus a reserved bottom row and a
/// reserved right-hand-side column, both initially zero.
fn build_matrix(eq: &Equation) -> Result<Matrix> {
    let elements = eq.elements();
    let terms = eq.left.len() + eq.right.len();
    let mut matrix = Matrix::new(elements.len() + 1, terms + 1);
    for (i, element) in elements.iter().enumerate() {
        let mut j = 0;
        for term in &eq.left {
            matrix.set(i, j, term.count_element(element)?);
            j += 1;
        }
        for term in &eq.right {
            matrix.set(i, j, -term.count_element(element)?);
            j += 1;
        }
    }
    Ok(matrix)
}

/// Runs elimination, then pins one free variable through the reserved row
/// and eliminates again to obtain a particular solution.
fn solve(matrix: &mut Matrix) -> Result<()> {
    matrix.gauss_jordan_eliminate()?;

    // A row constraining more than one variable ties terms together; if no
    // row does, the unique solution is all-zero and no balancing exists.
    let mut pivot_col = None;
    for r in 0..matrix.rows() - 1 {
        let mut nonzero = (0..matrix.cols()).filter(|&c| matrix.get(r, c) != 0);
        if let Some(first) = nonzero.next() {
            if nonzero.next().is_some() {
                pivot_col = Some(first);
                break;
            }
        }
    }
    let Some(col) = pivot_col else {
        return Err(Error::AllZeroSolution);
    };

    matrix.set(matrix.rows() - 1, col, 1);
    matrix.set(matrix.rows() - 1, matrix.cols() - 1, 1);
    matrix.gauss_jordan_eliminate()
}

/// Reads the solution off the diagonal, scaling by the LCM of the diagonal
/// entries so every coefficient is an integer.
fn extract_coefficients(matrix: &Matrix) -> Result<Vec<i64>> {
    let rows = matrix.rows();
    let cols = matrix.cols();
    if cols - 1 > rows || matrix.get(cols - 2, cols - 2) == 0 {
        return Err(Error::MultipleIndependentSolutions);
    }

    let mut lcm = 1;
    for i in 0..cols - 1 {
        let d = matrix.get(i, i);
        if d == 0 {
            return Err(Error::MultipleIndependentSolutions);
        }
        lcm = num::checked_mul(lcm / num::gcd(lcm, d), d)?;
    }

    let mut coefficients = Vec::with_capacity(cols - 1);
    let mut all_zero = true;
    for i in 0..cols - 1 {
        let coef = num::checked_mul(lcm / matrix.get(i, i), matrix.get(i, cols - 1))?;
        all_zero = all_zero && coef == 0;
        coefficients.push(coef);
    }
    if all_zero {
        return Err(Error::Verification("all-zero solution"));
    }
    Ok(coefficients)
}

/// Independently recomputes every element's balance with the extracted
/// coefficients. A failure here is a defect in the elimination engine.
fn verify(eq: &Equation, coefficients: &[i64]) -> Result<()> {
    let split = eq.left.len();
    if coefficients.len() != split + eq.right.len() {
        return Err(Error::Verification("mismatched coefficient count"));
    }
    if coefficients.iter().all(|&c| c == 0) {
        return Err(Error::Verification("all-zero solution"));
    }
    for element in eq.elements() {
        let mut sum = 0;
        for (term, &coef) in eq.left.iter().zip(&coefficients[..split]) {
            sum = num::checked_add(sum, num::checked_mul(term.count_element(&element)?, coef)?)?;
        }
        for (term, &coef) in eq.right.iter().zip(&coefficients[split..]) {
            sum = num::checked_add(sum, num::checked_mul(term.count_element(&element)?, -coef)?)?;
        }
        if sum != 0 {
            return Err(Error::Verification("incorrect balance"));
        }
    }
    Ok(())
}
