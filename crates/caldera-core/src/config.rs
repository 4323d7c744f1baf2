use std::fmt;

use crate::error::AppError;

/// Brand used when `VAILLANT_BRAND` is not set.
pub const DEFAULT_BRAND: &str = "vaillant";

/// Account credentials handed to the heating client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
    pub brand: String,
    pub country: Option<String>,
}

impl Credentials {
    /// Read credentials from environment variables.
    ///
    /// - `VAILLANT_USER` (required)
    /// - `VAILLANT_PASSWORD` (required)
    /// - `VAILLANT_BRAND` (optional, defaults to `vaillant`)
    /// - `VAILLANT_COUNTRY` (optional)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::ConfigError(format!("{key} not set")))
        };

        Ok(Self {
            user: required("VAILLANT_USER")?,
            password: required("VAILLANT_PASSWORD")?,
            brand: lookup("VAILLANT_BRAND")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_BRAND.to_string()),
            country: lookup("VAILLANT_COUNTRY").filter(|v| !v.is_empty()),
        })
    }
}

// Keeps the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .field("brand", &self.brand)
            .field("country", &self.country)
            .finish()
    }
}
