use std::cmp::{Ordering, Reverse};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Sort key for person names following the usual Portuguese collation:
/// base letters first, then accents, then case (lowercase before uppercase).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    base: String,
    accents: String,
    case: Reverse<String>,
}

impl CollationKey {
    pub fn new(name: &str) -> Self {
        let decomposed: String = name.trim().nfd().collect();
        let base = decomposed
            .chars()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect();
        let accents = decomposed.chars().flat_map(char::to_lowercase).collect();
        Self {
            base,
            accents,
            case: Reverse(decomposed),
        }
    }
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| compare_names(a, b));
        v
    }

    #[test]
    fn test_accents_do_not_push_names_to_the_end() {
        assert_eq!(
            sorted(&["Otávio", "Álvaro", "Bruno", "Ana"]),
            vec!["Álvaro", "Ana", "Bruno", "Otávio"]
        );
    }

    #[test]
    fn test_case_insensitive_primary_order() {
        assert_eq!(sorted(&["bruno", "Ana", "carla"]), vec!["Ana", "bruno", "carla"]);
    }

    #[test]
    fn test_tie_breaks() {
        assert_eq!(compare_names("Joao", "João"), Ordering::Less);
        assert_eq!(compare_names("ana", "Ana"), Ordering::Less);
        assert_eq!(compare_names("Ana", "Ana"), Ordering::Equal);
    }
}
