//! Portuguese-style name collation: case-insensitive, diacritic-insensitive,
//! and numeric-aware, mirroring `localeCompare(..., "pt-BR", { numeric: true,
//! sensitivity: "base" })` closely enough for roster ordering.

use std::cmp::Ordering;

/// Two-level roster comparator: first space-delimited token (first name)
/// under base collation, ties broken by the full name under the same rules.
/// Sorting by full name alone would misplace employees who share a first
/// name, so both levels are required.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    let a = a.trim();
    let b = b.trim();

    let first_a = a.split_whitespace().next().unwrap_or("");
    let first_b = b.split_whitespace().next().unwrap_or("");

    compare_folded(first_a, first_b).then_with(|| compare_folded(a, b))
}

/// Base-sensitivity comparison with numeric runs compared by value.
fn compare_folded(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().map(fold).peekable();
    let mut right = b.chars().map(fold).peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(lc), Some(rc)) => {
                if lc.is_ascii_digit() && rc.is_ascii_digit() {
                    let ordering = compare_digit_runs(&mut left, &mut right);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                } else {
                    match lc.cmp(&rc) {
                        Ordering::Equal => {
                            left.next();
                            right.next();
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

fn compare_digit_runs<I>(left: &mut std::iter::Peekable<I>, right: &mut std::iter::Peekable<I>) -> Ordering
where
    I: Iterator<Item = char>,
{
    let a = take_digit_run(left);
    let b = take_digit_run(right);

    // Compare stripped runs by length first so arbitrarily long numbers
    // never overflow an integer parse.
    let a_digits = a.trim_start_matches('0');
    let b_digits = b.trim_start_matches('0');
    a_digits
        .len()
        .cmp(&b_digits.len())
        .then_with(|| a_digits.cmp(b_digits))
}

fn take_digit_run<I>(chars: &mut std::iter::Peekable<I>) -> String
where
    I: Iterator<Item = char>,
{
    let mut run = String::new();
    while let Some(c) = chars.peek() {
        if c.is_ascii_digit() {
            run.push(*c);
            chars.next();
        } else {
            break;
        }
    }
    run
}

/// Lowercase and strip the diacritics that appear in Portuguese names.
fn fold(c: char) -> char {
    let lowered = c.to_lowercase().next().unwrap_or(c);
    match lowered {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_first_name_then_full_name() {
        let mut names = vec!["Carlos Alberto", "Carlos Mendes", "Ana Paula"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["Ana Paula", "Carlos Alberto", "Carlos Mendes"]);
    }

    #[test]
    fn ignores_case_and_diacritics() {
        assert_eq!(compare_names("ANTÔNIO Silva", "antonio silva"), Ordering::Equal);
        assert_eq!(compare_names("José", "jose"), Ordering::Equal);
    }

    #[test]
    fn surname_diacritics_do_not_reorder_shared_first_names() {
        let mut names = vec!["Maria Núnes", "Maria Alves", "Luís Costa"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["Luís Costa", "Maria Alves", "Maria Núnes"]);
    }

    #[test]
    fn digit_runs_compare_numerically() {
        assert_eq!(compare_folded("turma 9", "turma 10"), Ordering::Less);
        assert_eq!(compare_folded("turma 010", "turma 10"), Ordering::Equal);
    }

    #[test]
    fn leading_whitespace_is_ignored() {
        assert_eq!(compare_names("  Ana Paula", "Ana Paula"), Ordering::Equal);
    }
}
