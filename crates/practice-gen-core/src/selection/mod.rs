//! # Selection language
//!
//! Turns the user's answer into a structured request:
//!
//! - `all`: every problem in every category
//! - `all, except: bonus, nested-loops`: every category but the listed ones
//! - `intro-to-arrays: 2, basic-loops: all`: a number of problems per category
//!
//! [`parse`] only checks the shape of the input. [`SelectionSpec::validate`]
//! checks it against a [`Catalog`] and produces the [`ValidatedSelection`] the
//! composer consumes.

mod lexer;
mod parser;
mod validate;

pub use parser::parse;

use std::fmt;

use crate::catalog::Catalog;
use crate::error::Result;

/// One `category: count` entry, exactly as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRequest {
    pub category: String,
    pub count: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSpec {
    AllCategories,
    /// Excluded category ids, first-seen order, no repeats
    AllExcept(Vec<String>),
    /// Entries in the order the user gave them
    PerCategory(Vec<CategoryRequest>),
}

impl SelectionSpec {
    pub fn validate(self, catalog: &Catalog) -> Result<ValidatedSelection> {
        validate::validate(self, catalog)
    }
}

/// How many problems to take from one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    All,
    Exactly(usize),
}

impl Count {
    /// Resolve against a pool, clamping over-requests
    pub fn resolve(self, pool_size: usize) -> usize {
        match self {
            Count::All => pool_size,
            Count::Exactly(n) => n.min(pool_size),
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::All => write!(f, "all"),
            Count::Exactly(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: Count,
}

/// A selection whose categories and counts have been checked against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedSelection {
    AllCategories,
    AllExcept(Vec<String>),
    PerCategory(Vec<CategoryCount>),
}
