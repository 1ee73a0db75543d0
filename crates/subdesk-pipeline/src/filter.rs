use subdesk_types::models::GroupRecord;

/// Fields a record offers to the substring search.
///
/// The dashboard matches on group name and description; the admin console
/// matches on username, group, and derived report name. Implementations
/// return borrowed field values in no particular order; the filter treats
/// them as one logical OR.
pub trait SearchTargets {
    fn search_targets(&self) -> Vec<&str>;
}

impl SearchTargets for GroupRecord {
    fn search_targets(&self) -> Vec<&str> {
        vec![&self.group_name, &self.description]
    }
}

/// Narrow a slice to the records matching `query`.
///
/// The lower-cased query must be a substring of at least one lower-cased
/// target field. A query that is empty or all whitespace filters nothing
/// (the emptiness test trims; the match itself uses the query verbatim,
/// so internal whitespace must occur literally). Unanchored and
/// case-insensitive, re-evaluated against the already-partitioned bucket
/// for the active tab on every query change, never against the raw fetch.
pub fn filter<'a, T: SearchTargets>(records: &'a [T], query: &str) -> Vec<&'a T> {
    if query.trim().is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .search_targets()
                .iter()
                .any(|target| target.to_lowercase().contains(&needle))
        })
        .collect()
}
