//! Shared lexical helpers for the line-oriented pattern rules.

/// Splits a verbatim parameter list on commas, trimming each fragment.
///
/// An empty (or all-whitespace) list yields no fragments, so `f()` has zero
/// parameters rather than one empty one.
pub fn split_params(params: &str) -> Vec<String> {
    if params.trim().is_empty() {
        return Vec::new();
    }
    params.split(',').map(|p| p.trim().to_string()).collect()
}

/// Width of the leading whitespace of a line, in characters.
pub fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_params_empty() {
        assert!(split_params("").is_empty());
        assert!(split_params("   ").is_empty());
    }

    #[test]
    fn test_split_params_trims_fragments() {
        assert_eq!(
            split_params("x: float,  y: float = 0.0 "),
            vec!["x: float".to_string(), "y: float = 0.0".to_string()]
        );
    }

    #[test]
    fn test_indentation_counts_tabs_and_spaces() {
        assert_eq!(indentation("    x"), 4);
        assert_eq!(indentation("\tx"), 1);
        assert_eq!(indentation("x"), 0);
    }
}
