use base64::Engine as _;
use base64::engine::general_purpose;
use jiff::Timestamp;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Roles a project collaborator can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

/// Closed set of guarded operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
    Export,
    Delete,
    ManageUsers,
}

impl Role {
    pub fn allowed_actions(self) -> &'static [Action] {
        match self {
            Role::Admin => &[
                Action::Read,
                Action::Write,
                Action::Export,
                Action::Delete,
                Action::ManageUsers,
            ],
            Role::Editor => &[Action::Read, Action::Write, Action::Export],
            Role::Viewer => &[Action::Read],
        }
    }

    pub fn allows(self, action: Action) -> bool {
        self.allowed_actions().contains(&action)
    }
}

/// Payload carried inside a token. `iat`/`exp` are unix seconds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and checks bearer tokens for guarded project operations.
///
/// A token is `base64(claims JSON) . keyed-digest`. The digest only guards
/// against accidental mangling; cryptographic strength is explicitly out of
/// scope and must come from the embedding application if required.
pub struct AccessControl {
    secret: String,
    active: HashSet<String>,
    /// Token lifetime in seconds
    pub token_ttl: i64,
}

impl AccessControl {
    pub fn new(secret: impl Into<String>) -> Self {
        AccessControl {
            secret: secret.into(),
            active: HashSet::new(),
            token_ttl: 24 * 3600,
        }
    }

    /// Mints a token for `username` and tracks it as active.
    pub fn issue(&mut self, username: impl Into<String>, role: Role) -> String {
        let now = Timestamp::now().as_second();
        let claims = Claims {
            username: username.into(),
            role,
            iat: now,
            exp: now + self.token_ttl,
        };
        let payload = serde_json::to_vec(&claims).expect("claims always serialize");
        let payload_b64 = general_purpose::STANDARD.encode(payload);
        let signature = self.sign(&payload_b64);
        let token = format!("{payload_b64}.{signature}");
        self.active.insert(token.clone());
        token
    }

    /// Checks signature, liveness and expiry; expired tokens are dropped from
    /// the active set. Returns the claims of a valid token.
    pub fn verify(&mut self, token: &str) -> Option<Claims> {
        if !self.active.contains(token) {
            return None;
        }
        let claims = self.decode(token)?;
        if claims.exp < Timestamp::now().as_second() {
            debug!("discarding expired token of {}", claims.username);
            self.active.remove(token);
            return None;
        }
        Some(claims)
    }

    /// True iff `token` is valid and its role permits `action`.
    pub fn check(&mut self, token: &str, action: Action) -> bool {
        match self.verify(token) {
            Some(claims) => claims.role.allows(action),
            None => false,
        }
    }

    /// Invalidates a token (logout). Returns whether it was active.
    pub fn revoke(&mut self, token: &str) -> bool {
        self.active.remove(token)
    }

    fn decode(&self, token: &str) -> Option<Claims> {
        let (payload_b64, signature) = token.split_once('.')?;
        if self.sign(payload_b64) != signature {
            return None;
        }
        let payload = general_purpose::STANDARD.decode(payload_b64).ok()?;
        serde_json::from_slice(&payload).ok()
    }

    fn sign(&self, payload_b64: &str) -> String {
        let mut hasher = DefaultHasher::new();
        payload_b64.hash(&mut hasher);
        self.secret.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_verify() {
        let mut ac = AccessControl::new("secret");
        let token = ac.issue("drafter", Role::Editor);
        let claims = ac.verify(&token).unwrap();
        assert_eq!(claims.username, "drafter");
        assert_eq!(claims.role, Role::Editor);
    }

    #[test]
    fn permissions_follow_the_role() {
        let mut ac = AccessControl::new("secret");
        let editor = ac.issue("e", Role::Editor);
        let viewer = ac.issue("v", Role::Viewer);

        assert!(ac.check(&editor, Action::Export));
        assert!(!ac.check(&editor, Action::ManageUsers));
        assert!(ac.check(&viewer, Action::Read));
        assert!(!ac.check(&viewer, Action::Write));
    }

    #[test]
    fn revoked_and_forged_tokens_fail() {
        let mut ac = AccessControl::new("secret");
        let token = ac.issue("drafter", Role::Admin);

        assert!(ac.revoke(&token));
        assert!(!ac.revoke(&token));
        assert!(ac.verify(&token).is_none());

        let other = ac.issue("drafter", Role::Viewer);
        let forged = format!("{}x", other);
        assert!(ac.verify(&forged).is_none());
    }

    #[test]
    fn expired_tokens_are_discarded() {
        let mut ac = AccessControl::new("secret");
        ac.token_ttl = -1;
        let token = ac.issue("drafter", Role::Admin);
        assert!(ac.verify(&token).is_none());
        // discarded from the active set, not just rejected
        assert!(!ac.revoke(&token));
    }
}
