//! Short code generation
//!
//! A code is derived from SHA-256 over the owner id, the target URL and a
//! 16-byte random salt, encoded in base 62 and cut to the configured length.
//! The salt makes repeated requests for the same owner and URL produce
//! different codes.

use std::sync::Arc;

use rand::RngExt;
use sha2::{Digest, Sha256};

use crate::errors::{ClicklinkError, Result};
use crate::services::identity::OwnerId;
use crate::utils::base62;

pub const SALT_LEN: usize = 16;
pub const MIN_CODE_LENGTH: usize = 6;
pub const MAX_CODE_LENGTH: usize = 16;

const SEPARATOR: u8 = b'|';

/// Source of per-code salt bytes
pub trait SaltSource: Send + Sync {
    fn salt(&self) -> [u8; SALT_LEN];
}

/// Salt drawn from the thread-local CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSalt;

impl SaltSource for ThreadRngSalt {
    fn salt(&self) -> [u8; SALT_LEN] {
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill(&mut salt);
        salt
    }
}

pub struct CodeGenerator {
    code_length: usize,
    salt: Arc<dyn SaltSource>,
}

impl std::fmt::Debug for CodeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeGenerator")
            .field("code_length", &self.code_length)
            .finish_non_exhaustive()
    }
}

impl CodeGenerator {
    pub fn new(code_length: usize) -> Result<Self> {
        Self::with_salt_source(code_length, Arc::new(ThreadRngSalt))
    }

    pub fn with_salt_source(code_length: usize, salt: Arc<dyn SaltSource>) -> Result<Self> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code_length) {
            return Err(ClicklinkError::configuration(format!(
                "codeLength must be {}..{}, got {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH, code_length
            )));
        }
        Ok(Self { code_length, salt })
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    pub fn generate(&self, owner_id: &OwnerId, url: &str) -> String {
        derive_code(owner_id, url, &self.salt.salt(), self.code_length)
    }
}

/// Deterministic part of generation: same inputs and salt give the same code
pub fn derive_code(owner_id: &OwnerId, url: &str, salt: &[u8], length: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(owner_id.to_string().as_bytes());
    hasher.update([SEPARATOR]);
    hasher.update(url.as_bytes());
    hasher.update([SEPARATOR]);
    hasher.update(salt);

    fit_to_length(base62::encode(&hasher.finalize()), length)
}

/// Cut `encoded` to `length`, first extending it with hashes of itself while it is too short
fn fit_to_length(mut encoded: String, length: usize) -> String {
    while encoded.len() < length {
        let extension = base62::encode(&Sha256::digest(encoded.as_bytes()));
        encoded.push_str(&extension);
    }
    encoded.truncate(length);
    encoded
}
