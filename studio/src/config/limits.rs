/// Hard limits applied when validating `lumen.toml`

/// Longest cross-fade accepted, in milliseconds (5 seconds)
pub const MAX_TRANSITION_DURATION_MS: u64 = 5000;

/// Longest accepted storage key
pub const MAX_STORAGE_KEY_LEN: usize = 128;
