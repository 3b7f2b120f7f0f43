use crate::error::AppError;
use bcrypt::{hash, verify};

/// Work factor matching the original deployment. High enough to resist
/// offline brute force on leaked hashes.
const BCRYPT_COST: u32 = 12;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}
