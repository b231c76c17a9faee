//! Content equality of raw config documents for change detection.

use crate::field::FieldSet;
use crate::record::ConfigDict;
use std::collections::HashSet;

/// Three-way presence check of one key: absent from both is equal, present
/// in only one is not, present in both compares the values.
pub fn compare_key(unrendered: &ConfigDict, other: &ConfigDict, key: &str) -> bool {
    match (unrendered.get(key), other.get(key)) {
        (None, None) => true,
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

/// Like equality, but declared fields with an Exclude compare policy are
/// ignored. Keys no declared field covers are always compared.
pub fn same_contents(fields: &FieldSet, unrendered: &ConfigDict, other: &ConfigDict) -> bool {
    let mut seen: HashSet<&str> = HashSet::new();

    for field in fields.iter() {
        seen.insert(field.name);
        if field.policies.compare.should_include() && !compare_key(unrendered, other, field.name)
        {
            return false;
        }
    }

    for key in unrendered.keys().chain(other.keys()) {
        if seen.insert(key.as_str()) && !compare_key(unrendered, other, key) {
            return false;
        }
    }
    true
}
