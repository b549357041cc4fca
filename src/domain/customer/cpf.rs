use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

// ============================================================================
// CPF - Brazilian Taxpayer Identifier
// ============================================================================
//
// 11 digits, the last two being check digits computed from the rest by
// weighted sums mod 11. Accepted input shapes: the 11 bare digits or the
// masked `ddd.ddd.ddd-dd` form. Everything else is rejected.
//
// ============================================================================

pub const CPF_UNFORMATTED_LENGTH: usize = 11;
pub const CPF_FORMATTED_LENGTH: usize = 14;

/// A CPF held in its normalized (unmasked, 11-digit) form.
///
/// Values built through [`Cpf::parse`] carry a valid checksum. Sequences of
/// one repeated digit (`00000000000`, `11111111111`, ...) satisfy the
/// arithmetic and are accepted; there is no extra rejection rule for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    /// Parse raw input: checks the shape, normalizes away the mask and
    /// verifies both check digits.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidIdentifier(input.to_string());

        let normalized = unformat(input).ok_or_else(invalid)?;
        let digits = parse_digits(&normalized).ok_or_else(invalid)?;
        if !check_digits_valid(&digits) {
            return Err(invalid());
        }

        Ok(Self(normalized))
    }

    /// Shape and checksum test without constructing a value. Never panics,
    /// whatever the input.
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Rebuild from storage. The value is trusted to be the normalized form
    /// previously written by [`Cpf::parse`]; nothing is re-checked.
    pub fn restore(normalized: String) -> Self {
        Self(normalized)
    }

    /// The normalized 11-digit form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The masked form, `000.000.000-00`.
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

/// Strip the mask, if any. Only validates the shape; the digits themselves
/// are checked later.
fn unformat(cpf: &str) -> Option<String> {
    let bytes = cpf.as_bytes();
    match bytes.len() {
        CPF_UNFORMATTED_LENGTH => Some(cpf.to_string()),
        CPF_FORMATTED_LENGTH => {
            // Mask characters must sit exactly at `ddd.ddd.ddd-dd`.
            if bytes[3] == b'.' && bytes[7] == b'.' && bytes[11] == b'-' {
                let mut normalized = String::with_capacity(CPF_UNFORMATTED_LENGTH);
                normalized.push_str(&cpf[0..3]);
                normalized.push_str(&cpf[4..7]);
                normalized.push_str(&cpf[8..11]);
                normalized.push_str(&cpf[12..14]);
                Some(normalized)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn parse_digits(unformatted: &str) -> Option<[u8; CPF_UNFORMATTED_LENGTH]> {
    if unformatted.len() != CPF_UNFORMATTED_LENGTH {
        return None;
    }

    let mut digits = [0u8; CPF_UNFORMATTED_LENGTH];
    for (i, byte) in unformatted.bytes().enumerate() {
        if !byte.is_ascii_digit() {
            return None;
        }
        digits[i] = byte - b'0';
    }

    Some(digits)
}

fn check_digits_valid(digits: &[u8; CPF_UNFORMATTED_LENGTH]) -> bool {
    let mut first_sum: u32 = 0;
    for (i, &digit) in digits.iter().take(9).enumerate() {
        first_sum += u32::from(digit) * (10 - i as u32);
    }
    let mut first_rest = (first_sum * 10) % 11;
    if first_rest >= 10 {
        first_rest = 0;
    }
    if first_rest != u32::from(digits[9]) {
        return false;
    }

    let mut second_sum: u32 = 0;
    for (i, &digit) in digits.iter().take(10).enumerate() {
        second_sum += u32::from(digit) * (11 - i as u32);
    }
    let mut second_rest = (second_sum * 10) % 11;
    if second_rest >= 10 {
        second_rest = 0;
    }

    second_rest == u32::from(digits[10])
}
