//! Identities that own leaderboard rows.
//!
//! The score store only accepts rows written under an identity, including for
//! anonymous play. [`AnonymousSession`] creates one anonymous identity per
//! portal run on first use and reuses it for every later submission.

use super::types::ScoreError;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub anonymous: bool,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.anonymous {
            write!(f, "anon:{}", self.id)
        } else {
            write!(f, "{}", self.id)
        }
    }
}

/// Produces a writable identity before a score insert.
pub trait IdentityProvider {
    fn provision(&mut self) -> Result<Identity, ScoreError>;
}

/// Lazily created anonymous identity shared by all submissions of one run.
#[derive(Debug, Default)]
pub struct AnonymousSession {
    identity: Option<Identity>,
}

impl AnonymousSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

impl IdentityProvider for AnonymousSession {
    fn provision(&mut self) -> Result<Identity, ScoreError> {
        let identity = self.identity.get_or_insert_with(|| {
            let identity = Identity {
                id: Uuid::new_v4(),
                anonymous: true,
            };
            log::info!("created anonymous identity {}", identity);
            identity
        });
        Ok(identity.clone())
    }
}
