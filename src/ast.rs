//! Parsed representation of a chemical equation.
//!
//! A [`Formula`] node is either a single element with a subscript count or a
//! parenthesized group whose multiplier applies to every child. A [`Term`] is
//! one side-member of the equation (a compound, an ion, or a bare electron)
//! with its net charge, and an [`Equation`] is the two term lists. All of
//! these are built once by the parser and read-only afterwards.

use std::fmt;

use crate::error::Result;
use crate::num;

/// Pseudo-element symbol tracking net charge. Every term contributes
/// `-charge` atoms of it, so balancing it balances the charge.
pub const ELECTRON: &str = "e";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    /// A single element symbol with its count, e.g. `Fe` or `O2`.
    Element { symbol: String, count: i64 },
    /// A parenthesized sub-formula with a multiplier, e.g. `(SO4)3`.
    Group { items: Vec<Formula>, count: i64 },
}

impl Formula {
    /// Number of atoms of `name` contributed by this node, groups and counts
    /// taken into account.
    pub fn count_element(&self, name: &str) -> Result<i64> {
        match self {
            Formula::Element { symbol, count } => {
                Ok(if symbol == name { *count } else { 0 })
            }
            Formula::Group { items, count } => {
                let mut sum = 0;
                for item in items {
                    sum = num::checked_add(
                        sum,
                        num::checked_mul(item.count_element(name)?, *count)?,
                    )?;
                }
                Ok(sum)
            }
        }
    }

    /// Appends every element symbol under this node to `out`, in
    /// first-discovery order, skipping symbols already present.
    pub fn collect_elements(&self, out: &mut Vec<String>) {
        match self {
            Formula::Element { symbol, .. } => {
                if !out.iter().any(|s| s == symbol) {
                    out.push(symbol.clone());
                }
            }
            Formula::Group { items, .. } => {
                for item in items {
                    item.collect_elements(out);
                }
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Element { symbol, count } => {
                write!(f, "{symbol}")?;
                if *count != 1 {
                    write!(f, "{count}")?;
                }
                Ok(())
            }
            Formula::Group { items, count } => {
                write!(f, "(")?;
                for item in items {
                    write!(f, "{item}")?;
                }
                write!(f, ")")?;
                if *count != 1 {
                    write!(f, "{count}")?;
                }
                Ok(())
            }
        }
    }
}

/// One side-member of an equation. A term with no nodes and charge -1 is a
/// bare electron; the parser never builds any other empty term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub items: Vec<Formula>,
    pub charge: i64,
}

impl Term {
    pub fn is_electron(&self) -> bool {
        self.items.is_empty() && self.charge == -1
    }

    /// Number of atoms of `name` in this term. The electron pseudo-element
    /// counts as `-charge`.
    pub fn count_element(&self, name: &str) -> Result<i64> {
        if name == ELECTRON {
            return Ok(-self.charge);
        }
        let mut sum = 0;
        for item in &self.items {
            sum = num::checked_add(sum, item.count_element(name)?)?;
        }
        Ok(sum)
    }

    pub fn collect_elements(&self, out: &mut Vec<String>) {
        if !out.iter().any(|s| s == ELECTRON) {
            out.push(ELECTRON.to_string());
        }
        for item in &self.items {
            item.collect_elements(out);
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_electron() {
            return write!(f, "e^-");
        }
        for item in &self.items {
            write!(f, "{item}")?;
        }
        if self.charge != 0 {
            write!(f, "^")?;
            let magnitude = self.charge.unsigned_abs();
            if magnitude != 1 {
                write!(f, "{magnitude}")?;
            }
            write!(f, "{}", if self.charge > 0 { "+" } else { "-" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub left: Vec<Term>,
    pub right: Vec<Term>,
}

impl Equation {
    /// Every distinct element symbol in the equation, the electron `e`
    /// first, the rest in first-discovery order across left-then-right
    /// terms.
    pub fn elements(&self) -> Vec<String> {
        let mut out = Vec::new();
        for term in self.left.iter().chain(&self.right) {
            term.collect_elements(&mut out);
        }
        out
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.left.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{term}")?;
        }
        write!(f, " = ")?;
        for (i, term) in self.right.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(symbol: &str, count: i64) -> Formula {
        Formula::Element {
            symbol: symbol.into(),
            count,
        }
    }

    #[test]
    fn counts_through_nested_groups() {
        // Fe(NO3)2: N = 2, O = 6, Fe = 1
        let term = Term {
            items: vec![
                element("Fe", 1),
                Formula::Group {
                    items: vec![element("N", 1), element("O", 3)],
                    count: 2,
                },
            ],
            charge: 0,
        };
        assert_eq!(term.count_element("Fe").unwrap(), 1);
        assert_eq!(term.count_element("N").unwrap(), 2);
        assert_eq!(term.count_element("O").unwrap(), 6);
        assert_eq!(term.count_element("H").unwrap(), 0);
    }

    #[test]
    fn electron_count_is_negated_charge() {
        let ion = Term {
            items: vec![element("Cr", 1)],
            charge: 3,
        };
        assert_eq!(ion.count_element(ELECTRON).unwrap(), -3);
        let electron = Term {
            items: vec![],
            charge: -1,
        };
        assert!(electron.is_electron());
        assert_eq!(electron.count_element(ELECTRON).unwrap(), 1);
    }

    #[test]
    fn elements_are_collected_in_discovery_order() {
        let eq = Equation {
            left: vec![Term {
                items: vec![element("H", 2), element("O", 2)],
                charge: 0,
            }],
            right: vec![Term {
                items: vec![element("O", 1), element("H", 1)],
                charge: -1,
            }],
        };
        assert_eq!(eq.elements(), ["e", "H", "O"]);
    }

    #[test]
    fn display_matches_input_syntax() {
        let term = Term {
            items: vec![
                element("K", 4),
                element("Fe", 1),
                Formula::Group {
                    items: vec![element("C", 1), element("N", 1)],
                    count: 6,
                },
            ],
            charge: 0,
        };
        assert_eq!(term.to_string(), "K4Fe(CN)6");
    }

    #[test]
    fn display_always_emits_the_caret_for_charges() {
        let hydroxide = Term {
            items: vec![element("O", 1), element("H", 1)],
            charge: -1,
        };
        assert_eq!(hydroxide.to_string(), "OH^-");
        let chromium = Term {
            items: vec![element("Cr", 1)],
            charge: 3,
        };
        assert_eq!(chromium.to_string(), "Cr^3+");
        let electron = Term {
            items: vec![],
            charge: -1,
        };
        assert_eq!(electron.to_string(), "e^-");
    }
}
