use bcrypt::{hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    if !(4..=31).contains(&cost) {
        return Err(AppError::InvalidInput(format!(
            "bcrypt cost must be between 4 and 31, got {cost}"
        )));
    }
    Ok(hash(password, cost)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    Ok(verify(password, hash)?)
}
