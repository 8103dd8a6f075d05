//! # Password Generator
//!
//! Produces password material from a [`PasswordOptions`] policy.
//!
//! The alphabet is assembled from character classes (letters always, digits
//! and symbols on request), then the confusable set is removed when
//! `ExcludeSimilarCharacters` is on. Each output character is drawn
//! independently and uniformly from the final alphabet.
//!
//! Randomness comes from `rand::thread_rng`, a ChaCha-based CSPRNG seeded
//! from the operating system.

use rand::distributions::{Distribution, Uniform};
use rand::{CryptoRng, Rng};
use thiserror::Error;

use crate::model::{PasswordOptions, SecretString};

/// Largest accepted `Length`.
///
/// A standard-tier parameter value is limited to 4 KB; longer passwords
/// could never be stored.
pub const MAX_PASSWORD_LENGTH: i64 = 4096;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Symbols added when `IncludeSymbols` is on.
pub const SYMBOLS: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=";

/// Characters removed when `ExcludeSimilarCharacters` is on.
pub const SIMILAR_CHARACTERS: [char; 9] = ['i', 'l', 'L', 'I', '|', '`', 'o', 'O', '0'];

/// The policy cannot produce a usable password.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Invalid password policy: length must be positive, got {length}")]
    NonPositiveLength { length: i64 },

    #[error("Invalid password policy: length {length} exceeds the maximum of {max}")]
    LengthTooLarge { length: i64, max: i64 },

    #[error("Invalid password policy: no characters left after exclusions")]
    EmptyAlphabet,
}

/// Builds the character set a policy draws from.
pub fn alphabet(options: &PasswordOptions) -> Vec<char> {
    let mut chars: Vec<char> = LETTERS.chars().collect();
    if options.include_numbers() {
        chars.extend(DIGITS.chars());
    }
    if options.include_symbols() {
        chars.extend(SYMBOLS.chars());
    }
    if options.exclude_similar_characters() {
        chars.retain(|c| !SIMILAR_CHARACTERS.contains(c));
    }
    chars
}

/// Checks a policy without generating anything.
///
/// Returns the usable length and alphabet.
pub fn validate(options: &PasswordOptions) -> Result<(usize, Vec<char>), PolicyError> {
    let length = options.length();
    if length <= 0 {
        return Err(PolicyError::NonPositiveLength { length });
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(PolicyError::LengthTooLarge { length, max: MAX_PASSWORD_LENGTH });
    }

    let chars = alphabet(options);
    if chars.is_empty() {
        return Err(PolicyError::EmptyAlphabet);
    }

    Ok((length as usize, chars))
}

/// Generates a password for `options` using the thread-local CSPRNG.
pub fn generate(options: &PasswordOptions) -> Result<SecretString, PolicyError> {
    generate_with_rng(options, &mut rand::thread_rng())
}

/// Generates a password drawing from the supplied cryptographic RNG.
pub fn generate_with_rng<R>(options: &PasswordOptions, rng: &mut R) -> Result<SecretString, PolicyError>
where
    R: Rng + CryptoRng + ?Sized,
{
    let (length, chars) = validate(options)?;
    let index = Uniform::from(0..chars.len());

    let password: String = (0..length).map(|_| chars[index.sample(rng)]).collect();
    Ok(SecretString::new(password))
}
