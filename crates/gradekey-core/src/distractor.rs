//! Distractor generation for multiple-choice options.
//!
//! A correct answer is classified into a shape, each shape produces an
//! ordered candidate pool, and the first four unique candidates that differ
//! from the correct answer become the distractors. Short pools are padded
//! with shape-specific filler values.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use regex::Regex;

use crate::inequality::{AND_CONNECTOR, OR_CONNECTOR};

/// Number of wrong options generated per answer.
pub const DISTRACTOR_COUNT: usize = 4;

/// Consonants used for `ㄱ, ㄴ, ㄷ` style statement-combination answers.
pub const CONSONANTS: [&str; 7] = ["ㄱ", "ㄴ", "ㄷ", "ㄹ", "ㅁ", "ㅂ", "ㅅ"];

/// The four quadrants of the coordinate plane.
pub const QUADRANTS: [&str; 4] = ["제1사분면", "제2사분면", "제3사분면", "제4사분면"];

/// Circled numerals used for `①, ③` style answers.
pub const CIRCLED_NUMBERS: [&str; 5] = ["①", "②", "③", "④", "⑤"];

const QUADRANT_MARKER: &str = "사분면";
const COMBINATION_TRIALS: usize = 40;
const COMBINATION_POOL_TARGET: usize = 6;
const FILLER_ATTEMPTS: usize = 64;
const LITERAL_SHIFTS: [i64; 4] = [1, -1, 2, -2];
const MAX_DECIMAL_DIGITS: usize = 15;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+$").expect("integer pattern"));

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+\.[0-9]+$").expect("decimal pattern"));

static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?[0-9]+)/([0-9]+)(.*)$").expect("fraction pattern"));

static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,、\s]+").expect("list separator pattern"));

static NUMBER_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9]+(?:\.[0-9]+)?").expect("number literal pattern"));

/// The structural category of a correct answer.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerShape {
    Integer(i64),
    Decimal { value: f64, precision: usize },
    Fraction {
        numerator: i64,
        denominator: i64,
        suffix: String,
    },
    /// Consonant statements, in the order they were written.
    LetterSet(Vec<String>),
    /// Quadrants mentioned in the answer, in quadrant order.
    QuadrantSet(Vec<&'static str>),
    /// Circled numerals mentioned in the answer, in numeral order.
    CircledNumberSet(Vec<&'static str>),
    Inequality,
    NumericText,
    OpaqueText,
}

type Classifier = fn(&str) -> Option<AnswerShape>;

/// Evaluated top to bottom; the first match wins.
const CLASSIFIERS: &[Classifier] = &[
    classify_integer,
    classify_decimal,
    classify_fraction,
    classify_letter_set,
    classify_quadrant_set,
    classify_circled_set,
    classify_inequality,
    classify_numeric_text,
];

impl AnswerShape {
    /// Classify a (trimmed) answer. Falls back to [`AnswerShape::OpaqueText`].
    pub fn classify(answer: &str) -> Self {
        let trimmed = answer.trim();
        CLASSIFIERS
            .iter()
            .find_map(|classify| classify(trimmed))
            .unwrap_or(AnswerShape::OpaqueText)
    }

    /// Short lowercase name, used in logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            AnswerShape::Integer(_) => "integer",
            AnswerShape::Decimal { .. } => "decimal",
            AnswerShape::Fraction { .. } => "fraction",
            AnswerShape::LetterSet(_) => "letter-set",
            AnswerShape::QuadrantSet(_) => "quadrant-set",
            AnswerShape::CircledNumberSet(_) => "circled-number-set",
            AnswerShape::Inequality => "inequality",
            AnswerShape::NumericText => "numeric-text",
            AnswerShape::OpaqueText => "opaque-text",
        }
    }
}

fn classify_integer(s: &str) -> Option<AnswerShape> {
    if !INTEGER.is_match(s) {
        return None;
    }
    s.parse().ok().map(AnswerShape::Integer)
}

fn classify_decimal(s: &str) -> Option<AnswerShape> {
    if !DECIMAL.is_match(s) {
        return None;
    }
    // Longer literals are not exact as f64; numeric text shifts them exactly.
    if s.chars().filter(char::is_ascii_digit).count() > MAX_DECIMAL_DIGITS {
        return None;
    }
    let precision = s.split_once('.').map_or(0, |(_, frac)| frac.len());
    s.parse()
        .ok()
        .map(|value| AnswerShape::Decimal { value, precision })
}

fn classify_fraction(s: &str) -> Option<AnswerShape> {
    let caps = FRACTION.captures(s)?;
    Some(AnswerShape::Fraction {
        numerator: caps[1].parse().ok()?,
        denominator: caps[2].parse().ok()?,
        suffix: caps[3].to_string(),
    })
}

fn classify_letter_set(s: &str) -> Option<AnswerShape> {
    let first = s.chars().next()?;
    let has_separator = s.chars().any(|c| c == ',' || c == '、' || c.is_whitespace());
    if !('ㄱ'..='ㅎ').contains(&first) || !has_separator {
        return None;
    }
    let letters = LIST_SEPARATOR
        .split(s)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect();
    Some(AnswerShape::LetterSet(letters))
}

fn classify_quadrant_set(s: &str) -> Option<AnswerShape> {
    s.contains(QUADRANT_MARKER)
        .then(|| AnswerShape::QuadrantSet(mentioned(&QUADRANTS, s)))
}

fn classify_circled_set(s: &str) -> Option<AnswerShape> {
    let selected = mentioned(&CIRCLED_NUMBERS, s);
    (!selected.is_empty()).then_some(AnswerShape::CircledNumberSet(selected))
}

fn classify_inequality(s: &str) -> Option<AnswerShape> {
    let relational = s.chars().any(|c| matches!(c, '<' | '>' | '≤' | '≥'));
    (relational || s.contains(OR_CONNECTOR) || s.contains(AND_CONNECTOR))
        .then_some(AnswerShape::Inequality)
}

fn classify_numeric_text(s: &str) -> Option<AnswerShape> {
    s.chars()
        .any(|c| c.is_ascii_digit())
        .then_some(AnswerShape::NumericText)
}

fn mentioned(alphabet: &[&'static str], text: &str) -> Vec<&'static str> {
    alphabet
        .iter()
        .copied()
        .filter(|symbol| text.contains(symbol))
        .collect()
}

/// A seedable random source for reproducible option sets.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generate four plausible wrong answers using the thread-local RNG.
pub fn generate_distractors(correct_answer: &str) -> Vec<String> {
    generate_distractors_with(correct_answer, &mut rand::thread_rng())
}

/// Generate four plausible wrong answers with a caller-supplied RNG.
///
/// Only the letter-set and circled-number shapes consume randomness.
pub fn generate_distractors_with<R: Rng + ?Sized>(correct_answer: &str, rng: &mut R) -> Vec<String> {
    let answer = correct_answer.trim();
    let shape = AnswerShape::classify(answer);
    tracing::debug!(answer, shape = shape.name(), "generating distractors");

    match shape {
        AnswerShape::Integer(n) => integer_distractors(n),
        AnswerShape::Decimal { value, precision } => decimal_distractors(value, precision),
        AnswerShape::Fraction {
            numerator,
            denominator,
            suffix,
        } => fraction_distractors(numerator, denominator, &suffix),
        AnswerShape::LetterSet(letters) => {
            let selected: Vec<&str> = letters.iter().map(String::as_str).collect();
            combination_distractors(&CONSONANTS, &selected, rng)
        }
        AnswerShape::QuadrantSet(selected) => quadrant_distractors(&selected),
        AnswerShape::CircledNumberSet(selected) => {
            combination_distractors(&CIRCLED_NUMBERS, &selected, rng)
        }
        AnswerShape::Inequality => inequality_distractors(answer),
        AnswerShape::NumericText => numeric_text_distractors(answer),
        AnswerShape::OpaqueText => opaque_distractors(answer),
    }
}

/// Combine the correct answer with up to four distractors and shuffle.
pub fn make_shuffled_options(correct_answer: &str, distractors: &[String]) -> Vec<String> {
    make_shuffled_options_with(correct_answer, distractors, &mut rand::thread_rng())
}

/// [`make_shuffled_options`] with a caller-supplied RNG.
///
/// Fisher-Yates: walk from the last index down to 1, swapping each slot
/// with a uniformly chosen index in `[0, i]`.
pub fn make_shuffled_options_with<R: Rng + ?Sized>(
    correct_answer: &str,
    distractors: &[String],
    rng: &mut R,
) -> Vec<String> {
    let mut options = Vec::with_capacity(DISTRACTOR_COUNT + 1);
    options.push(correct_answer.to_string());
    options.extend(distractors.iter().take(DISTRACTOR_COUNT).cloned());

    for i in (1..options.len()).rev() {
        let j = rng.gen_range(0..=i);
        options.swap(i, j);
    }
    options
}

// ---------------------------------------------------------------------------
// Candidate pool
// ---------------------------------------------------------------------------

/// Insertion-ordered set of candidates that never contains the excluded value.
struct CandidatePool {
    excluded: String,
    items: Vec<String>,
}

impl CandidatePool {
    fn new(excluded: impl Into<String>) -> Self {
        Self {
            excluded: excluded.into(),
            items: Vec::new(),
        }
    }

    fn add(&mut self, candidate: impl Into<String>) {
        let candidate = candidate.into();
        if candidate.is_empty() || candidate == self.excluded || self.items.contains(&candidate) {
            return;
        }
        self.items.push(candidate);
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    /// Take the first four candidates, padding with `filler(i)` values.
    ///
    /// Fillers that collide are skipped for a bounded number of attempts;
    /// after that a repeated filler is accepted so the result is always
    /// exactly four entries long.
    fn pick(self, filler: impl Fn(usize) -> String) -> Vec<String> {
        let mut picked: Vec<String> = self.items.into_iter().take(DISTRACTOR_COUNT).collect();

        let mut attempt = 0;
        while picked.len() < DISTRACTOR_COUNT && attempt < FILLER_ATTEMPTS {
            let candidate = filler(attempt);
            attempt += 1;
            if candidate != self.excluded && !picked.contains(&candidate) {
                picked.push(candidate);
            }
        }

        if picked.len() < DISTRACTOR_COUNT {
            tracing::debug!(excluded = %self.excluded, "filler attempts exhausted, repeating fillers");
        }
        while picked.len() < DISTRACTOR_COUNT {
            picked.push(filler(picked.len()));
        }
        picked
    }
}

// ---------------------------------------------------------------------------
// Per-shape rules
// ---------------------------------------------------------------------------

fn integer_distractors(n: i64) -> Vec<String> {
    let mut pool = CandidatePool::new(n.to_string());
    let abs = n.unsigned_abs();

    let mut shifts = vec![1, -1, 2, -2, 3, -3];
    if abs >= 10 {
        shifts.extend([10, -10]);
    }
    if abs >= 100 {
        shifts.extend([100, -100]);
    }
    for d in shifts {
        if let Some(v) = n.checked_add(d) {
            pool.add(v.to_string());
        }
    }

    if n != 0 {
        if let Some(doubled) = n.checked_mul(2) {
            pool.add(doubled.to_string());
        }
        if n % 2 == 0 {
            pool.add((n / 2).to_string());
        }
    }
    if let Some(negated) = n.checked_neg() {
        pool.add(negated.to_string());
    }

    let base = pool.len() as i64 + 1;
    pool.pick(|i| n.saturating_add(base + i as i64).to_string())
}

fn decimal_distractors(value: f64, precision: usize) -> Vec<String> {
    let mut pool = CandidatePool::new(format!("{value:.precision$}"));

    for d in [0.1, -0.1, 0.2, -0.2, 0.5, -0.5, 1.0, -1.0] {
        let v = value + d;
        if (v - value).abs() > 0.0001 {
            pool.add(format!("{v:.precision$}"));
        }
    }

    pool.pick(|i| format!("{:.precision$}", value + i as f64 + 1.0))
}

fn fraction_distractors(numerator: i64, denominator: i64, suffix: &str) -> Vec<String> {
    let mut pool = CandidatePool::new(format!("{numerator}/{denominator}{suffix}"));

    for d in LITERAL_SHIFTS {
        match numerator.checked_add(d) {
            Some(0) | None => {}
            Some(n) => pool.add(format!("{n}/{denominator}{suffix}")),
        }
    }
    for d in LITERAL_SHIFTS {
        if let Some(den) = denominator.checked_add(d).filter(|den| *den > 0) {
            pool.add(format!("{numerator}/{den}{suffix}"));
        }
    }
    if !suffix.is_empty() {
        pool.add(format!("1/{denominator}{suffix}"));
        pool.add(suffix.trim());
    }

    pool.pick(|i| {
        let n = numerator.saturating_add(i as i64 + 3);
        format!("{n}/{denominator}{suffix}")
    })
}

/// Random same-size combinations from a fixed alphabet.
fn combination_distractors<R: Rng + ?Sized>(
    alphabet: &[&str],
    selected: &[&str],
    rng: &mut R,
) -> Vec<String> {
    let size = selected.len().min(alphabet.len());
    let mut correct_sorted: Vec<&str> = selected.to_vec();
    correct_sorted.sort_unstable();
    let correct_key = correct_sorted.join(", ");

    let mut pool = CandidatePool::new(correct_key);
    let mut deck: Vec<&str> = alphabet.to_vec();

    for _ in 0..COMBINATION_TRIALS {
        if pool.len() >= COMBINATION_POOL_TARGET {
            break;
        }
        deck.shuffle(rng);
        let mut combo = deck[..size].to_vec();
        combo.sort_unstable();
        pool.add(combo.join(", "));
    }

    pool.pick(|i| {
        // Rotate a window over the alphabet, shrinking it after each lap.
        let lap = i / alphabet.len();
        let len = size.saturating_sub(lap).max(1);
        let mut window: Vec<&str> = (0..len)
            .map(|k| alphabet[(i + k) % alphabet.len()])
            .collect();
        window.sort_unstable();
        window.dedup();
        window.join(", ")
    })
}

fn quadrant_distractors(selected: &[&str]) -> Vec<String> {
    let mut pool = CandidatePool::new(selected.join(", "));

    for mask in 1u8..16 {
        let combo: Vec<&str> = (0..QUADRANTS.len())
            .filter(|&bit| mask & (1 << bit) != 0)
            .map(|bit| QUADRANTS[bit])
            .collect();
        if combo.len() <= selected.len() + 1 {
            pool.add(combo.join(", "));
        }
    }

    pool.pick(|i| QUADRANTS[QUADRANTS.len() - 1 - i % QUADRANTS.len()].to_string())
}

fn inequality_distractors(answer: &str) -> Vec<String> {
    let mut pool = CandidatePool::new(answer);
    add_literal_shifts(&mut pool, answer);

    if answer.contains('<') {
        pool.add(answer.replacen('<', ">", 1));
    }
    if answer.contains('>') {
        pool.add(answer.replacen('>', "<", 1));
    }
    if answer.contains(OR_CONNECTOR) {
        pool.add(answer.replacen(OR_CONNECTOR, AND_CONNECTOR, 1));
    }
    if answer.contains(AND_CONNECTOR) {
        pool.add(answer.replacen(AND_CONNECTOR, OR_CONNECTOR, 1));
    }

    pool.pick(|i| format!("{answer} ({})", i + 1))
}

fn numeric_text_distractors(answer: &str) -> Vec<String> {
    let mut pool = CandidatePool::new(answer);
    add_literal_shifts(&mut pool, answer);
    pool.pick(|i| format!("{answer}{}", i + 1))
}

fn opaque_distractors(answer: &str) -> Vec<String> {
    (1..=DISTRACTOR_COUNT)
        .map(|i| format!("{answer} (오답{i})"))
        .collect()
}

/// Variants with one numeric literal moved by ±1 and ±2.
fn add_literal_shifts(pool: &mut CandidatePool, answer: &str) {
    for literal in NUMBER_LITERAL.find_iter(answer) {
        let literal = literal.as_str();
        for d in LITERAL_SHIFTS {
            if let Some(shifted) = shift_literal(literal, d) {
                pool.add(answer.replacen(literal, &shifted, 1));
            }
        }
    }
}

/// Shift a numeric literal, keeping the number of decimal digits it had.
///
/// Works on the literal scaled to an integer, so the result is exact for
/// anything that fits in an `i128`.
fn shift_literal(literal: &str, delta: i64) -> Option<String> {
    let (int, frac) = literal.split_once('.').unwrap_or((literal, ""));
    let precision = frac.len();
    let scale = 10i128.checked_pow(u32::try_from(precision).ok()?)?;
    let scaled: i128 = format!("{int}{frac}").parse().ok()?;
    let shifted = scaled.checked_add(i128::from(delta).checked_mul(scale)?)?;

    if precision == 0 {
        return Some(shifted.to_string());
    }
    let sign = if shifted < 0 { "-" } else { "" };
    let abs = shifted.unsigned_abs();
    let scale = scale.unsigned_abs();
    Some(format!("{sign}{}.{:0precision$}", abs / scale, abs % scale))
}
