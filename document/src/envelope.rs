extern crate alloc;

use alloc::string::{String, ToString};

use crate::error::EnvelopeError;
use crate::version;

pub fn check_count(envelope: &'static str, declared: i64, actual: i64) -> Result<(), EnvelopeError> {
    if declared == actual {
        Ok(())
    } else {
        Err(EnvelopeError::CountMismatch {
            envelope,
            declared,
            actual,
        })
    }
}

pub fn check_control_numbers(
    envelope: &'static str,
    opening: &str,
    closing: &str,
) -> Result<(), EnvelopeError> {
    if opening == closing {
        Ok(())
    } else {
        Err(EnvelopeError::ControlNumberMismatch {
            envelope,
            opening: opening.to_string(),
            closing: closing.to_string(),
        })
    }
}

/// Resolve `gs08` and (if present) `st03` through the version canonicalizer
/// and require them to land on the same canonical revision.
pub fn check_version(gs08: &str, st03: Option<&str>) -> Result<String, EnvelopeError> {
    let canonical_gs = version::canonicalize(gs08).ok_or_else(|| EnvelopeError::UnknownVersion {
        version: gs08.to_string(),
    })?;

    if let Some(st03) = st03 {
        if !st03.is_empty() {
            let canonical_st =
                version::canonicalize(st03).ok_or_else(|| EnvelopeError::UnknownVersion {
                    version: st03.to_string(),
                })?;
            if canonical_gs != canonical_st {
                return Err(EnvelopeError::UnknownVersion {
                    version: st03.to_string(),
                });
            }
        }
    }

    Ok(canonical_gs.to_string())
}
