use std::fmt;

use reqwest::Url;

use crate::error::ValidationError;

/// Validated absolute `http`/`https` URL. Never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget(Url);

impl ProbeTarget {
    /// Parses and validates a probe target.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is not an absolute URL, uses a scheme
    /// other than http/https, or has no host.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        let url = Url::parse(trimmed).map_err(|err| ValidationError::InvalidUrl {
            url: trimmed.to_owned(),
            source: err,
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ValidationError::UnsupportedScheme {
                    scheme: other.to_owned(),
                });
            }
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(ValidationError::MissingHost {
                url: trimmed.to_owned(),
            });
        }
        Ok(Self(url))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl std::str::FromStr for ProbeTarget {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
