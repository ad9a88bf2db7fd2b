//! Soft-delete visibility predicate shared by all statements.
//!
//! Every query over `cars`, `manufacturers` or `drivers` builds its filter
//! from these helpers so a tombstoned row can never leak into a result.

/// Condition that keeps only live rows of the table bound to `alias`.
pub(crate) fn active(alias: &str) -> String {
    format!("{alias}.is_deleted = 0")
}

/// Conjunction of [`active`] over several joined tables.
pub(crate) fn all_active(aliases: &[&str]) -> String {
    aliases
        .iter()
        .map(|alias| active(alias))
        .collect::<Vec<_>>()
        .join(" AND ")
}
