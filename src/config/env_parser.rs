//! Environment variable parsing utilities for configuration.

use crate::errors::Error;
use std::path::PathBuf;

use super::paths;

/// Parse environment variable as a path, expanding tilde.
fn parse_env_path(name: &str, value: &str) -> Result<PathBuf, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(paths::expand_tilde_path(&PathBuf::from(value)))
}

/// Parse environment variable as a f64. Range checks happen in validation.
fn parse_env_float(name: &str, value: &str) -> Result<f64, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {name} value: {e}")))
}

/// Parse environment variable as a non-negative integer.
fn parse_env_usize(name: &str, value: &str) -> Result<usize, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {name} value: {e}")))
}

/// Apply a path override from `name`, if set.
pub fn apply_path_override(name: &str, path: &mut PathBuf) -> Result<(), Error> {
    if let Ok(val) = std::env::var(name) {
        *path = parse_env_path(name, &val)?;
    }
    Ok(())
}

/// Apply a float override from `name`, if set.
pub fn apply_float_override(name: &str, value: &mut f64) -> Result<(), Error> {
    if let Ok(val) = std::env::var(name) {
        *value = parse_env_float(name, &val)?;
    }
    Ok(())
}

/// Apply an integer override from `name`, if set.
pub fn apply_usize_override(name: &str, value: &mut usize) -> Result<(), Error> {
    if let Ok(val) = std::env::var(name) {
        *value = parse_env_usize(name, &val)?;
    }
    Ok(())
}
