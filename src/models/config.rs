//! Vault configuration file model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub policy: PolicySection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicySection {
    /// Minimum accepted password length for store/update.
    #[serde(default)]
    pub min_password_length: Option<usize>,
}

impl PolicySection {
    /// Check a candidate password against the policy. `Err` carries the
    /// violated minimum.
    pub fn check_password_length(&self, password: &str) -> Result<(), usize> {
        match self.min_password_length {
            Some(min) if password.chars().count() < min => Err(min),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_policy_accepts_anything() {
        let policy = PolicySection::default();
        assert!(policy.check_password_length("").is_ok());
        assert!(policy.check_password_length("x").is_ok());
    }

    #[test]
    fn test_min_length_enforced() {
        let policy = PolicySection {
            min_password_length: Some(8),
        };
        assert_eq!(policy.check_password_length("short"), Err(8));
        assert!(policy.check_password_length("long enough").is_ok());
    }
}
