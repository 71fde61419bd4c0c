//! Decode limits and configuration

use serde::Deserialize;

/// Limits guarding the decoder against oversized input
///
/// Every field may be overridden independently from a config file; missing
/// keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum input length in bytes (default: 1 GiB)
    pub max_input_len: usize,
    /// Maximum rows produced by one decode call (default: 16,777,216)
    pub max_rows: usize,
    /// Maximum fields in a single row (default: 65,535)
    pub max_fields_per_row: usize,
    /// Maximum decoded length of one field in bytes (default: 64 MiB)
    pub max_field_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_len: 1024 * 1024 * 1024,
            max_rows: 16 * 1024 * 1024,
            max_fields_per_row: 65_535,
            max_field_len: 64 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Limits that never trigger
    pub fn unbounded() -> Self {
        Self {
            max_input_len: usize::MAX,
            max_rows: usize::MAX,
            max_fields_per_row: usize::MAX,
            max_field_len: usize::MAX,
        }
    }
}
