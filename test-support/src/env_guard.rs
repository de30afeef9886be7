//! Scoped environment variables for tests.
//!
//! `EnvVarGuard` sets a variable and restores the previous value
//! on drop. Callers must run serially (`#[serial_test::serial]`).

#[derive(Debug)]
pub struct EnvVarGuard {
    key: String,
    original: Option<String>,
}

impl EnvVarGuard {
    /// Set `key` for the lifetime of the returned guard.
    pub fn set(key: &str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: guards are only used from serial tests.
        unsafe { std::env::set_var(key, value) };
        Self {
            key: key.to_owned(),
            original,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // SAFETY: guards are only used from serial tests.
        match &self.original {
            Some(value) => unsafe { std::env::set_var(&self.key, value) },
            None => unsafe { std::env::remove_var(&self.key) },
        }
    }
}
