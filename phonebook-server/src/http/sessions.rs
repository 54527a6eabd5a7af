use crate::models::now;
use crate::models::owner::Owner;
use crate::models::transient::principal::Principal;
use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const TOKEN_BYTES: usize = 64;

/// In-memory bearer tokens, lost on restart
#[derive(Clone)]
pub struct Sessions {
    tokens: Arc<Mutex<HashMap<String, Principal>>>,
    ttl: Duration,
}

impl Sessions {
    pub fn new(ttl: Duration) -> Self {
        Sessions {
            tokens: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Principal>> {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a session for `owner`, dropping every session that has expired
    pub fn create(&self, owner: Owner) -> Principal {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);

        let created_at = now();
        let principal = Principal {
            token: URL_SAFE_NO_PAD.encode(bytes),
            owner,
            valid_until: created_at + self.ttl,
        };

        let mut tokens = self.lock();
        tokens.retain(|_, session| created_at <= session.valid_until);
        tokens.insert(principal.token.clone(), principal.clone());
        principal
    }

    /// Number of sessions held, expired ones included until the next sweep
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The session for `token`, expired sessions are dropped
    pub fn get(&self, token: &str) -> Option<Principal> {
        let mut tokens = self.lock();
        let principal = tokens.get(token).cloned()?;

        if now() <= principal.valid_until {
            Some(principal)
        } else {
            tokens.remove(token);
            None
        }
    }

    pub fn remove(&self, token: &str) {
        self.lock().remove(token);
    }

    /// Logs the owner out everywhere
    pub fn remove_owner(&self, owner: &Owner) {
        self.lock().retain(|_, principal| principal.owner != *owner);
    }
}
