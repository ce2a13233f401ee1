// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Normalization of comma-separated identifier lists.
///
/// Publisher IDs and package names arrive as comma-delimited strings that may
/// contain blank entries, surrounding whitespace and repeats.
use std::collections::HashSet;

/// Splits `input` on commas and returns trimmed, non-empty, unique entries.
///
/// Entries keep the order of their first occurrence.
///
/// # Example
///
/// ```
/// use ohpm_dashboard::dedup_identifiers;
///
/// let names = dedup_identifiers(" @a/x, ,@b/y,@a/x ,");
/// assert_eq!(names, vec!["@a/x".to_owned(), "@b/y".to_owned()]);
/// ```
pub fn dedup_identifiers(input: &str) -> Vec<String> {
    merge_identifiers(input.split(','))
}

/// Merges several identifier sources into one deduplicated list.
///
/// Each item is trimmed; blank items are dropped silently.
pub fn merge_identifiers<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for item in items {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed) {
            unique.push(trimmed.to_owned());
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn drops_blank_entries() {
        assert!(dedup_identifiers("").is_empty());
        assert!(dedup_identifiers(" , ,,\t").is_empty());
    }

    #[test]
    fn trims_before_comparing() {
        let result = dedup_identifiers("abc, abc ,abc");
        assert_eq!(result, vec!["abc".to_owned()]);
    }

    #[test]
    fn keeps_first_seen_order() {
        let result = dedup_identifiers("c,a,b,a,c");
        assert_eq!(result, vec!["c", "a", "b"]);
    }

    #[test]
    fn merges_multiple_sources() {
        let publisher_packages = ["@x/one", "@x/two"];
        let explicit = dedup_identifiers("@x/two,@y/three");
        let merged = merge_identifiers(
            publisher_packages
                .iter()
                .copied()
                .chain(explicit.iter().map(String::as_str))
        );
        assert_eq!(merged, vec!["@x/one", "@x/two", "@y/three"]);
    }

    proptest! {
        #[test]
        fn output_has_no_repeats_or_blanks(
            entries in proptest::collection::vec("[ a-c]{0,3}", 0..12)
        ) {
            let input = entries.join(",");
            let result = dedup_identifiers(&input);

            let unique: HashSet<&String> = result.iter().collect();
            prop_assert_eq!(unique.len(), result.len());
            for item in &result {
                prop_assert!(!item.is_empty());
                prop_assert_eq!(item.trim(), item.as_str());
            }
            for entry in &entries {
                let trimmed = entry.trim();
                if !trimmed.is_empty() {
                    prop_assert!(result.iter().any(|item| item == trimmed));
                }
            }
        }
    }
}
