use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// Standard response envelope for all `finsift` machine-readable outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self { meta, data }
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub schema_version: String,
    pub generated_at: UtcDateTime,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        schema_version: impl Into<String>,
        latency_ms: u64,
    ) -> Result<Self, ValidationError> {
        let request_id = request_id.into();
        if request_id.chars().count() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        let schema_version = validate_schema_version(schema_version.into())?;

        Ok(Self {
            request_id,
            schema_version,
            generated_at: UtcDateTime::now(),
            latency_ms,
            warnings: Vec::new(),
        })
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

fn validate_schema_version(value: String) -> Result<String, ValidationError> {
    let invalid = || ValidationError::InvalidSchemaVersion {
        value: value.clone(),
    };

    let digits = value.strip_prefix('v').ok_or_else(invalid)?;
    let parts: Vec<&str> = digits.split('.').collect();
    if parts.len() != 3 || parts.iter().any(|part| part.is_empty() || !part.chars().all(|ch| ch.is_ascii_digit())) {
        return Err(invalid());
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_valid_meta() {
        let meta = EnvelopeMeta::new("req-12345678", "v1.0.0", 5).expect("must build");
        assert_eq!(meta.schema_version, "v1.0.0");
        assert!(meta.warnings.is_empty());
    }

    #[test]
    fn rejects_short_request_id() {
        let err = EnvelopeMeta::new("short", "v1.0.0", 0).expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidRequestId);
    }

    #[test]
    fn rejects_malformed_schema_version() {
        let err = EnvelopeMeta::new("req-12345678", "1.0", 0).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidSchemaVersion { .. }));
    }

    #[test]
    fn collects_warnings() {
        let mut meta = EnvelopeMeta::new("req-12345678", "v1.0.0", 0).expect("must build");
        meta.push_warning("something soft failed");
        assert_eq!(meta.warnings.len(), 1);
    }
}
