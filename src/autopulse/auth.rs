//! Admin passphrase gate.
//!
//! This is a convenience gate, not security: the passphrase sits in the site
//! configuration in plain text and a session lives only as long as the value.

use crate::error::{AutopulseError, Result};
use tracing::warn;

/// Proof that the admin passphrase was entered in this session.
///
/// Only [`AdminGate::login`] can create one; admin operations take it by reference.
#[derive(Debug)]
pub struct AdminSession {
    _private: (),
}

#[derive(Debug, Clone)]
pub struct AdminGate {
    passphrase: String,
}

impl AdminGate {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    pub fn login(&self, attempt: &str) -> Result<AdminSession> {
        if attempt == self.passphrase {
            Ok(AdminSession { _private: () })
        } else {
            warn!("rejected admin passphrase");
            Err(AutopulseError::Unauthorized(
                "Invalid passphrase. Please try again.".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_passphrase() {
        let gate = AdminGate::new("letmein");
        assert!(gate.login("letmein").is_ok());
    }

    #[test]
    fn rejects_anything_else() {
        let gate = AdminGate::new("letmein");
        assert!(matches!(
            gate.login("LETMEIN"),
            Err(AutopulseError::Unauthorized(_))
        ));
        assert!(gate.login("").is_err());
    }
}
