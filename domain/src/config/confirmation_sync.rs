//! How the in-memory agenda is reconciled with persistence after a write.

use serde::{Deserialize, Serialize};

/// Reconciliation policy applied after every workflow mutation.
///
/// Fixed once per process by configuration so every operation behaves the
/// same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationSync {
    /// Save the snapshot and keep the in-memory state as is.
    #[default]
    Patch,
    /// Save the snapshot, then replace the in-memory state with what the
    /// repository returns.
    Reload,
}

impl ConfirmationSync {
    pub fn as_str(&self) -> &str {
        match self {
            ConfirmationSync::Patch => "patch",
            ConfirmationSync::Reload => "reload",
        }
    }
}

impl std::str::FromStr for ConfirmationSync {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patch" => Ok(ConfirmationSync::Patch),
            "reload" => Ok(ConfirmationSync::Reload),
            other => Err(format!("unknown confirmation sync: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_confirmation_sync() {
        assert_eq!("Reload".parse(), Ok(ConfirmationSync::Reload));
        assert!("eventually".parse::<ConfirmationSync>().is_err());
    }
}
