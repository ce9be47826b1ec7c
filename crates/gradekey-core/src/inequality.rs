//! Inequality recognition, canonicalization and display formatting.
//!
//! A clause is one atomic relation (`a>3`, `3<a`, `-3<a<5`). Compound
//! answers join clauses with a connector: `또는` (or) and `그리고` (and).
//! Canonical forms are whitespace free with the variable on the left, and
//! compound clauses are sorted so connector order never matters.

use std::sync::LazyLock;

use regex::Regex;

use crate::symbols::normalize_symbols;

/// The "or" connector between compound clauses.
pub const OR_CONNECTOR: &str = "또는";

/// The "and" connector between compound clauses.
pub const AND_CONNECTOR: &str = "그리고";

static VARIABLE_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z가-힣]+)\s*([<>]=?|[≤≥])\s*(-?[0-9]+(?:\.[0-9]+)?(?:/[0-9]+)?)$")
        .expect("variable-first clause pattern")
});

static NUMBER_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?[0-9]+(?:\.[0-9]+)?(?:/[0-9]+)?)\s*([<>]=?|[≤≥])\s*([a-zA-Z가-힣]+)$")
        .expect("number-first clause pattern")
});

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-?[0-9]+(?:\.[0-9]+)?)\s*([<>]=?|[≤≥])\s*([a-zA-Z가-힣]+)\s*([<>]=?|[≤≥])\s*(-?[0-9]+(?:\.[0-9]+)?)$",
    )
    .expect("range clause pattern")
});

static OPERATOR_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([<>≤≥])\s*").expect("operator spacing pattern"));

static CONNECTOR_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(또는|그리고)\s*").expect("connector spacing pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

static DETACHED_SIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([<>≤≥])\s+(-)\s*([0-9])").expect("detached sign pattern")
});

/// Returns `true` if the text contains a relational operator.
///
/// Both ASCII (`<`, `>`, `<=`, `>=`) and Unicode (`≤`, `≥`) spellings count.
pub fn is_inequality(text: &str) -> bool {
    text.chars().any(|c| matches!(c, '<' | '>' | '≤' | '≥'))
}

/// Mirror a relational operator so `3<a` can be read as `a>3`.
pub fn flip_operator(op: &str) -> &str {
    match op {
        "<" => ">",
        ">" => "<",
        "<=" | "≤" => ">=",
        ">=" | "≥" => "<=",
        other => other,
    }
}

/// The connector joining a compound answer, if any.
///
/// `또는` wins whenever it appears anywhere in the text, even if `그리고`
/// is also present.
pub fn detect_connector(text: &str) -> Option<&'static str> {
    if text.contains(OR_CONNECTOR) {
        Some(OR_CONNECTOR)
    } else if text.contains(AND_CONNECTOR) {
        Some(AND_CONNECTOR)
    } else {
        None
    }
}

/// Canonicalize one clause.
///
/// Tries `variable op number`, then `number op variable` (re-oriented),
/// then `number op variable op number` (kept in order). Anything else is
/// returned with its whitespace removed.
pub fn normalize_single(expr: &str) -> String {
    let trimmed = expr.trim();

    if let Some(caps) = VARIABLE_FIRST.captures(trimmed) {
        return format!("{}{}{}", &caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = NUMBER_FIRST.captures(trimmed) {
        return format!("{}{}{}", &caps[3], flip_operator(&caps[2]), &caps[1]);
    }

    if let Some(caps) = RANGE.captures(trimmed) {
        return format!(
            "{}{}{}{}{}",
            &caps[1], &caps[2], &caps[3], &caps[4], &caps[5]
        );
    }

    strip_whitespace(trimmed)
}

/// Full normalization pipeline producing the canonical comparison form.
///
/// Connectors are detected after whitespace is stripped, so `또 는` and
/// `또는` split the same way and the result is a fixed point.
pub fn normalize_answer(answer: &str) -> String {
    let s = normalize_symbols(answer.trim());

    if !is_inequality(&s) {
        return collapse_whitespace(&s);
    }

    let compact = strip_whitespace(&s);
    match detect_connector(&compact) {
        Some(connector) => {
            let mut parts: Vec<String> = compact.split(connector).map(normalize_single).collect();
            parts.sort();
            parts.join(&format!(" {connector} "))
        }
        None => normalize_single(&compact),
    }
}

/// Render an answer for people: `a>=3또는a<-1` becomes `a ≥ 3 또는 a < -1`.
///
/// Non-inequalities only get their `>=`/`<=` spellings replaced.
pub fn format_for_display(answer: &str) -> String {
    let s = answer.trim().replace(">=", "≥").replace("<=", "≤");

    if !is_inequality(&s) {
        return s;
    }

    let s = OPERATOR_SPACING.replace_all(&s, " ${1} ");
    let s = CONNECTOR_SPACING.replace_all(&s, " ${1} ");
    let s = collapse_whitespace(&s);
    DETACHED_SIGN.replace_all(&s, "${1} ${2}${3}").into_owned()
}

pub(crate) fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
