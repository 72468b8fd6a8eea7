// ============================================================================
// Farm Core - CPF
// File: crates/farm-core/src/domain/cpf.rs
// Description: Brazilian taxpayer id (CPF) check-digit validation
// ============================================================================
//! CPF validation.
//!
//! A CPF is eleven digits: a nine-digit base followed by two check digits.
//! Each check digit is `11 - (sum % 11)` (or `0` when the remainder is below
//! 2), where `sum` weights the preceding digits with a descending multiplier.
//! The first digit uses weights 10..=2 over the base; the second uses 11..=2
//! over the base plus the first check digit.
//!
//! Stored records were validated with a traversal that stops multiplying once
//! the weight reaches 1, so a digit paired with weight 1 (or lower) adds
//! nothing. [`check_digit`] keeps that behaviour.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const CPF_LENGTH: usize = 11;

const BASE_LENGTH: usize = 9;
const FIRST_WEIGHT: u32 = 10;
const SECOND_WEIGHT: u32 = 11;

/// Sequences that satisfy the checksum but are never issued.
const BLACKLIST: [&str; 11] = [
    "00000000000",
    "11111111111",
    "22222222222",
    "33333333333",
    "44444444444",
    "55555555555",
    "66666666666",
    "77777777777",
    "88888888888",
    "99999999999",
    "12345678909",
];

/// Drops every character that is not an ASCII digit.
pub fn clean(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Weight paired with the digit at `index` when counting down from `start`.
fn weight(start: u32, index: usize) -> u32 {
    u32::try_from(index)
        .map(|i| start.saturating_sub(i))
        .unwrap_or(0)
}

/// Check digit over `digits` with weights `start, start - 1, ...`.
pub fn check_digit(digits: &[u32], start: u32) -> u32 {
    let total = digits
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &d)| match weight(start, i) {
            w if w > 1 => acc + d * w,
            _ => acc,
        });
    let rest = total % 11;
    if rest < 2 {
        0
    } else {
        11 - rest
    }
}

/// Both check digits for a nine-digit base.
pub fn check_digits(base: &[u32]) -> (u32, u32) {
    let first = check_digit(base, FIRST_WEIGHT);
    let mut extended = base.to_vec();
    extended.push(first);
    let second = check_digit(&extended, SECOND_WEIGHT);
    (first, second)
}

/// Returns `true` iff `input` is a well-formed CPF once formatting is stripped.
///
/// Total over all strings: malformed input yields `false`, never an error.
pub fn validate(input: &str) -> bool {
    if input.is_empty() {
        return false;
    }

    let cleaned = clean(input);
    if cleaned.len() != CPF_LENGTH || BLACKLIST.contains(&cleaned.as_str()) {
        return false;
    }

    let digits: Vec<u32> = cleaned.chars().filter_map(|c| c.to_digit(10)).collect();
    let (first, second) = check_digits(&digits[..BASE_LENGTH]);

    digits[BASE_LENGTH] == first && digits[BASE_LENGTH + 1] == second
}

/// A validated CPF, held as its eleven bare digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if !validate(input) {
            return Err(DomainError::ValidationError(format!(
                "{} is not a valid CPF",
                input.trim()
            )));
        }
        Ok(Self(clean(input)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `XXX.XXX.XXX-XX`
    pub fn formatted(&self) -> String {
        format!(
            "{}.{}.{}-{}",
            &self.0[0..3],
            &self.0[3..6],
            &self.0[6..9],
            &self.0[9..11]
        )
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Cpf {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cpf::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}
