//! Column-presence set operations.
//!
//! Pure helpers answering "which of these columns exist on this table",
//! used by callers to pre-filter pipelines or tables before execution.
//! Inputs are treated as sets: results are deduplicated and no ordering
//! between the two inputs is promised.

use std::collections::HashSet;

/// Columns that appear in both `table_cols` and `requested`.
pub fn present_cols<S: AsRef<str>, T: AsRef<str>>(table_cols: &[S], requested: &[T]) -> Vec<String> {
    let table: HashSet<&str> = table_cols.iter().map(|s| s.as_ref()).collect();
    let mut seen = HashSet::new();
    requested
        .iter()
        .map(|s| s.as_ref())
        .filter(|name: &&str| table.contains(*name) && seen.insert(name.to_string()))
        .map(str::to_string)
        .collect()
}

/// Columns of `table_cols` that are not in `requested`.
///
/// This is the drop-list for a "retain only these columns" operation.
pub fn absent_cols<S: AsRef<str>, T: AsRef<str>>(table_cols: &[S], requested: &[T]) -> Vec<String> {
    let keep: HashSet<&str> = requested.iter().map(|s| s.as_ref()).collect();
    let mut seen = HashSet::new();
    table_cols
        .iter()
        .map(|s| s.as_ref())
        .filter(|name: &&str| !keep.contains(*name) && seen.insert(name.to_string()))
        .map(str::to_string)
        .collect()
}

/// Column groups whose members are all present in `table_cols`.
///
/// Groups are kept in their given order; a group qualifies only if every
/// one of its column names is present.
pub fn present_col_groups<S: AsRef<str>>(
    table_cols: &[S],
    groups: &[Vec<String>],
) -> Vec<Vec<String>> {
    let table: HashSet<&str> = table_cols.iter().map(|s| s.as_ref()).collect();
    groups
        .iter()
        .filter(|group| group.iter().all(|name| table.contains(name.as_str())))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_present_cols() {
        let table = names(&["A", "B", "C"]);
        let mut result = present_cols(&table, &names(&["B", "D", "A"]));
        result.sort();
        assert_eq!(result, names(&["A", "B"]));
    }

    #[test]
    fn test_present_cols_deduplicates() {
        let table = names(&["A"]);
        assert_eq!(present_cols(&table, &names(&["A", "A"])), names(&["A"]));
    }

    #[test]
    fn test_absent_cols_is_drop_list() {
        let table = names(&["A", "B", "C"]);
        let mut result = absent_cols(&table, &names(&["B"]));
        result.sort();
        assert_eq!(result, names(&["A", "C"]));
    }

    #[test]
    fn test_absent_cols_empty_when_all_requested() {
        let table = names(&["A", "B"]);
        assert!(absent_cols(&table, &names(&["A", "B", "Z"])).is_empty());
    }

    #[test]
    fn test_present_col_groups() {
        let table = names(&["A", "B", "C"]);
        let groups = vec![names(&["A", "B"]), names(&["A", "D"]), names(&["C"])];
        let result = present_col_groups(&table, &groups);
        assert_eq!(result, vec![names(&["A", "B"]), names(&["C"])]);
    }

    #[test]
    fn test_present_col_groups_empty_group_qualifies() {
        let table = names(&["A"]);
        let groups = vec![Vec::new()];
        assert_eq!(present_col_groups(&table, &groups), vec![Vec::<String>::new()]);
    }
}
