//! Skill name canonicalization.

use std::collections::BTreeSet;

/// Alias / equivalence table: `(name, canonical target)`. Many-to-one.
/// Applied one hop only: `dl` expands to `deep learning`, never further.
const SKILL_EQUIVALENCE: &[(&str, &str)] = &[
    ("ml", "machine learning"),
    ("dl", "deep learning"),
    ("tf", "tensorflow"),
    ("logistic regression", "machine learning"),
    ("clustering", "machine learning"),
    ("predictive models", "machine learning"),
    ("rag", "machine learning"),
    ("llm", "machine learning"),
    ("deep learning", "machine learning"),
];

/// Identity form of a skill name: lower-cased and trimmed.
pub fn canonicalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Canonical targets a (canonical) name maps to in the equivalence table.
pub fn equivalents(canonical: &str) -> impl Iterator<Item = &'static str> + '_ {
    SKILL_EQUIVALENCE
        .iter()
        .filter(move |(alias, _)| *alias == canonical)
        .map(|(_, target)| *target)
}

/// Canonicalizes every name and adds its equivalence targets.
/// Empty names are dropped; unknown names pass through unchanged.
pub fn normalize<'a, I>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = BTreeSet::new();
    for name in names {
        let canonical = canonicalize(name);
        if canonical.is_empty() {
            continue;
        }
        for target in equivalents(&canonical) {
            out.insert(target.to_string());
        }
        out.insert(canonical);
    }
    out
}

/// Canonicalizes without expansion. Used for job-side skill lists.
pub fn canonical_set<'a, I>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(canonicalize)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lowercases_and_trims() {
        let out = normalize(["  Python ", "SQL"]);
        assert_eq!(out, set(&["python", "sql"]));
    }

    #[test]
    fn test_removes_duplicates_across_casing() {
        let out = normalize(["Rust", "rust", " RUST"]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_alias_expands_to_canonical_target() {
        let out = normalize(["ML"]);
        assert_eq!(out, set(&["machine learning", "ml"]));
    }

    #[test]
    fn test_expansion_is_single_hop() {
        // dl → deep learning, but deep learning → machine learning is not followed
        let out = normalize(["dl"]);
        assert_eq!(out, set(&["deep learning", "dl"]));
        assert!(!out.contains("machine learning"));
    }

    #[test]
    fn test_raw_and_alias_form_not_double_counted() {
        let out = normalize(["machine learning", "clustering", "ML"]);
        assert_eq!(
            out.iter().filter(|s| *s == "machine learning").count(),
            1
        );
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_unknown_names_pass_through() {
        let out = normalize(["Kubernetes"]);
        assert_eq!(out, set(&["kubernetes"]));
    }

    #[test]
    fn test_empty_names_dropped() {
        assert!(normalize(["", "   "]).is_empty());
        assert!(canonical_set(["", " "]).is_empty());
    }

    #[test]
    fn test_canonical_set_does_not_expand() {
        let out = canonical_set(["ML", "Deep Learning"]);
        assert_eq!(out, set(&["deep learning", "ml"]));
    }
}
