//! Short code and record identifier generation.
//!
//! Codes are drawn uniformly from a lowercase alphanumeric alphabet. Uniqueness is
//! the registry's job: it keeps drawing until a code is free.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Alphabet used for generated codes and identifier suffixes.
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated short codes (36^6 possible values).
pub const GENERATED_CODE_LENGTH: usize = 6;

const ID_SUFFIX_LENGTH: usize = 8;

/// Source of candidate short codes.
///
/// Candidates need not be unique; the caller rejects collisions and asks again.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random generator backed by the thread-local RNG.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(GENERATED_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code_with(&mut rand::rng(), self.length)
    }
}

/// Draws `length` characters uniformly from [`CODE_ALPHABET`].
///
/// # Examples
///
/// ```
/// use shortlink_registry::utils::code_generator::{CODE_ALPHABET, generate_code_with};
///
/// let code = generate_code_with(&mut rand::rng(), 6);
/// assert_eq!(code.len(), 6);
/// assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
/// ```
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Generates an opaque record identifier: creation milliseconds plus a random suffix.
pub fn generate_id(created_at: DateTime<Utc>) -> String {
    format!(
        "{}{}",
        created_at.timestamp_millis(),
        generate_code_with(&mut rand::rng(), ID_SUFFIX_LENGTH)
    )
}
