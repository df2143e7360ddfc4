use std::collections::HashSet;

use super::{CategoryCount, CategoryRequest, Count, SelectionSpec, ValidatedSelection};
use crate::catalog::Catalog;
use crate::error::{PracticeGenError, Result};

const ALL: &str = "all";

pub(super) fn validate(spec: SelectionSpec, catalog: &Catalog) -> Result<ValidatedSelection> {
    match spec {
        SelectionSpec::AllCategories => Ok(ValidatedSelection::AllCategories),
        SelectionSpec::AllExcept(excluded) => {
            check_known(excluded.iter().map(String::as_str), catalog)?;
            Ok(ValidatedSelection::AllExcept(excluded))
        }
        SelectionSpec::PerCategory(entries) => {
            check_known(entries.iter().map(|e| e.category.as_str()), catalog)?;
            check_unique(&entries)?;

            let counts = entries
                .into_iter()
                .map(|CategoryRequest { category, count }| -> Result<CategoryCount> {
                    let count = parse_count(&category, &count)?;
                    Ok(CategoryCount { category, count })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(ValidatedSelection::PerCategory(counts))
        }
    }
}

/// Report every unknown category at once, first-seen order
fn check_known<'a>(names: impl Iterator<Item = &'a str>, catalog: &Catalog) -> Result<()> {
    let mut unknown: Vec<String> = Vec::new();
    for name in names {
        if !catalog.contains(name) && !unknown.iter().any(|u| u == name) {
            unknown.push(name.to_string());
        }
    }

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(PracticeGenError::UnknownCategory { names: unknown })
    }
}

fn check_unique(entries: &[CategoryRequest]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut repeated: Vec<String> = Vec::new();
    for entry in entries {
        if !seen.insert(entry.category.as_str()) && !repeated.contains(&entry.category) {
            repeated.push(entry.category.clone());
        }
    }

    if repeated.is_empty() {
        Ok(())
    } else {
        Err(PracticeGenError::DuplicateCategory { names: repeated })
    }
}

/// `all` or a non-negative base-10 integer; integers too large for `usize` saturate
fn parse_count(category: &str, token: &str) -> Result<Count> {
    if token == ALL {
        return Ok(Count::All);
    }

    let digits = token.strip_prefix('+').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PracticeGenError::InvalidCount {
            category: category.to_string(),
            token: token.to_string(),
        });
    }

    Ok(Count::Exactly(digits.parse().unwrap_or(usize::MAX)))
}
