use loan_form_frontend::normalizer::{
    normalize_currency_input, normalize_currency_on_commit, normalize_integer_input,
    normalize_percent_input, normalize_percent_on_commit,
};
use proptest::prelude::*;

fn fraction_digits(display: &str) -> Option<usize> {
    display
        .split_once('.')
        .map(|(_, frac)| frac.chars().filter(|c| c.is_ascii_digit()).count())
}

/// `$` + grouped integer + `.` + exactly two digits.
fn is_canonical_currency(display: &str) -> bool {
    let Some(body) = display.strip_prefix('$') else {
        return false;
    };
    let Some((int, frac)) = body.split_once('.') else {
        return false;
    };
    let groups: Vec<&str> = int.split(',').collect();
    let head_ok = matches!(groups[0].len(), 1..=3);
    let tail_ok = groups[1..].iter().all(|g| g.len() == 3);
    let digits_ok = groups.iter().all(|g| g.chars().all(|c| c.is_ascii_digit()));
    head_ok && tail_ok && digits_ok && frac.len() == 2 && frac.chars().all(|c| c.is_ascii_digit())
}

proptest! {
    #[test]
    fn currency_input_has_one_point_and_two_decimals_at_most(raw in ".*") {
        let out = normalize_currency_input(&raw);
        prop_assert!(out.matches('.').count() <= 1);
        prop_assert!(fraction_digits(&out).unwrap_or(0) <= 2);
        prop_assert!(out.is_empty() || out.starts_with('$'));
        prop_assert!(out != "$");
    }

    #[test]
    fn currency_input_is_stable_under_retyping(raw in "[0-9.,$a-z ]{0,24}") {
        let once = normalize_currency_input(&raw);
        prop_assert_eq!(normalize_currency_input(&once), once);
    }

    #[test]
    fn percent_input_has_one_point_and_two_decimals_at_most(raw in ".*") {
        let out = normalize_percent_input(&raw);
        prop_assert!(out.matches('.').count() <= 1);
        prop_assert!(fraction_digits(&out).unwrap_or(0) <= 2);
        prop_assert!(out.is_empty() || out.ends_with('%'));
        prop_assert!(out != "%");
    }

    #[test]
    fn integer_input_is_all_digits(raw in ".*") {
        prop_assert!(normalize_integer_input(&raw).chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn currency_commit_is_canonical_or_empty(raw in "[0-9.,$ ]{0,20}") {
        let out = normalize_currency_on_commit(&raw);
        prop_assert!(out.is_empty() || is_canonical_currency(&out), "got {:?}", out);
    }

    #[test]
    fn percent_commit_has_exactly_two_decimals(value in 0.0f64..1000.0) {
        let out = normalize_percent_on_commit(&format!("{}", value));
        prop_assert!(out.ends_with('%'));
        prop_assert_eq!(fraction_digits(&out), Some(2));
    }

    #[test]
    fn whitespace_never_produces_a_bare_symbol(raw in "[ \t\n]{0,8}") {
        prop_assert_eq!(normalize_currency_input(&raw), "");
        prop_assert_eq!(normalize_currency_on_commit(&raw), "");
        prop_assert_eq!(normalize_percent_input(&raw), "");
        prop_assert_eq!(normalize_percent_on_commit(&raw), "");
        prop_assert_eq!(normalize_integer_input(&raw), "");
    }
}

#[test]
fn documented_examples() {
    assert_eq!(normalize_currency_input("12a3.4.5.6"), "$123.45");
    assert_eq!(normalize_percent_input("12.3456"), "12.34%");
    assert_eq!(normalize_currency_on_commit("$1,234.5"), "$1,234.50");
    assert_eq!(normalize_percent_on_commit("99.995%"), "100.00%");
}
