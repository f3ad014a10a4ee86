//! ID generation.

use rand::Rng;

/// Prefix shared by every issue ID.
pub const ID_PREFIX: &str = "OB";

const RANDOM_ATTEMPTS: usize = 64;
const FOUR_DIGITS: std::ops::RangeInclusive<u32> = 1000..=9999;

/// Generate an issue ID of the form `OB-####`.
///
/// Draws four random digits in `1000..=9999`; the `exists` closure checks
/// for collisions. After a bounded number of random draws the 4-digit space
/// is scanned in order, and once it is exhausted IDs continue with five
/// digits.
pub fn generate_id<R, F>(rng: &mut R, exists: F) -> String
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    for _ in 0..RANDOM_ATTEMPTS {
        let id = format_id(rng.random_range(FOUR_DIGITS));
        if !exists(&id) {
            return id;
        }
    }

    tracing::debug!("random ID draws collided; scanning for a free ID");
    (*FOUR_DIGITS.start()..=99_999)
        .map(format_id)
        .find(|id| !exists(id))
        .unwrap_or_else(|| format_id(rng.random_range(100_000..=999_999)))
}

fn format_id(number: u32) -> String {
    format!("{ID_PREFIX}-{number}")
}

/// Normalize user-typed IDs: trims whitespace and upper-cases the prefix,
/// so `ob-1234` resolves to `OB-1234`.
#[must_use]
pub fn normalize_id(input: &str) -> String {
    let trimmed = input.trim();
    match trimmed.split_once('-') {
        Some((prefix, rest)) if prefix.eq_ignore_ascii_case(ID_PREFIX) => {
            format!("{ID_PREFIX}-{rest}")
        }
        _ => trimmed.to_string(),
    }
}
