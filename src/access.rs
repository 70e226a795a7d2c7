//! Access gate in front of the matcher.
//!
//! The matcher itself has no notion of users. Whoever exposes it (the web
//! server) asks an [`AccessGate`] whether a caller may proceed. No credential
//! is verified against a store; [`NonEmptyCredentials`] only requires that a
//! username and password were supplied.

/// Username/password pair supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Capability check deciding whether a caller may use the matcher
pub trait AccessGate: Send + Sync {
    /// Return true if the caller is admitted
    fn admit(&self, credentials: Option<&Credentials>) -> bool;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Admits every caller
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl AccessGate for OpenGate {
    fn admit(&self, _credentials: Option<&Credentials>) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "open"
    }
}

/// Admits callers that supply a non-blank username and password
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyCredentials;

impl AccessGate for NonEmptyCredentials {
    fn admit(&self, credentials: Option<&Credentials>) -> bool {
        credentials.is_some_and(|c| !c.username.trim().is_empty() && !c.password.is_empty())
    }

    fn name(&self) -> &'static str {
        "non-empty-credentials"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_gate_admits_anyone() {
        assert!(OpenGate.admit(None));
        assert!(OpenGate.admit(Some(&Credentials::new("", ""))));
    }

    #[test]
    fn test_non_empty_credentials() {
        let gate = NonEmptyCredentials;
        assert!(gate.admit(Some(&Credentials::new("asha", "secret"))));
        assert!(!gate.admit(None));
        assert!(!gate.admit(Some(&Credentials::new("asha", ""))));
        assert!(!gate.admit(Some(&Credentials::new("   ", "secret"))));
    }

    #[test]
    fn test_gate_as_trait_object() {
        let gates: Vec<Box<dyn AccessGate>> = vec![Box::new(OpenGate), Box::new(NonEmptyCredentials)];
        let admitted: Vec<bool> = gates.iter().map(|g| g.admit(None)).collect();
        assert_eq!(admitted, [true, false]);
        assert_eq!(gates[1].name(), "non-empty-credentials");
    }
}
