//! Key/value persistence for the cart, the display currency and the auth token.
//!
//! Desktop builds keep one file per key in the platform config directory;
//! browser builds use `localStorage` under the same keys.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::{Cart, Currency, PersistedState};

pub const CART_KEY: &str = "tradedesk.cart";
pub const CURRENCY_KEY: &str = "tradedesk.currency";
pub const TOKEN_KEY: &str = "tradedesk.auth-token";

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "TradeDesk";
const APP_NAME: &str = "TradeDesk";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage unavailable")]
    StorageUnavailable,
    #[error("browser storage error: {0}")]
    Browser(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

/// Store handle shared through the UI context.
pub type SharedStore = Arc<dyn KeyValueStore>;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistError>;
    fn remove(&self, key: &str) -> Result<(), PersistError>;
}

/// One file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_project_dirs() -> Result<Self, PersistError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| Self::new(dirs.config_dir()))
            .ok_or(PersistError::StorageUnavailable)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.path(key)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Process-local store used by tests and as a last-resort fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .ok_or(PersistError::StorageUnavailable)?
            .local_storage()
            .map_err(|err| PersistError::Browser(format!("{err:?}")))?
            .ok_or(PersistError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| PersistError::Browser(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| PersistError::Browser(format!("{err:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| PersistError::Browser(format!("{err:?}")))
    }
}

/// Platform default: `localStorage` in the browser, config files on desktop.
pub fn default_store() -> SharedStore {
    #[cfg(target_arch = "wasm32")]
    {
        Arc::new(BrowserStore)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match FileStore::from_project_dirs() {
            Ok(store) => {
                tracing::debug!(dir = %store.dir().display(), "using file-backed storage");
                Arc::new(store)
            }
            Err(err) => {
                tracing::warn!("falling back to in-memory storage: {err}");
                Arc::new(MemoryStore::new())
            }
        }
    }
}

pub fn load_cart(store: &dyn KeyValueStore) -> Cart {
    match store.get(CART_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!("discarding unreadable cart: {err}");
            Cart::default()
        }),
        Ok(None) => Cart::default(),
        Err(err) => {
            tracing::warn!("failed to read cart: {err}");
            Cart::default()
        }
    }
}

pub fn save_cart(store: &dyn KeyValueStore, cart: &Cart) -> Result<(), PersistError> {
    let json = serde_json::to_string(cart)?;
    store.set(CART_KEY, &json)
}

pub fn load_currency(store: &dyn KeyValueStore) -> Currency {
    match store.get(CURRENCY_KEY) {
        Ok(Some(raw)) => Currency::parse(&raw).unwrap_or_else(|err| {
            tracing::warn!("ignoring stored currency: {err}");
            Currency::default()
        }),
        Ok(None) => Currency::default(),
        Err(err) => {
            tracing::warn!("failed to read currency: {err}");
            Currency::default()
        }
    }
}

pub fn save_currency(store: &dyn KeyValueStore, currency: Currency) -> Result<(), PersistError> {
    store.set(CURRENCY_KEY, currency.code())
}

pub fn load_token(store: &dyn KeyValueStore) -> Option<String> {
    match store.get(TOKEN_KEY) {
        Ok(token) => token.filter(|value| !value.trim().is_empty()),
        Err(err) => {
            tracing::warn!("failed to read auth token: {err}");
            None
        }
    }
}

pub fn save_token(store: &dyn KeyValueStore, token: &str) -> Result<(), PersistError> {
    store.set(TOKEN_KEY, token)
}

pub fn clear_token(store: &dyn KeyValueStore) -> Result<(), PersistError> {
    store.remove(TOKEN_KEY)
}

pub fn load_persisted_state(store: &dyn KeyValueStore) -> PersistedState {
    PersistedState {
        cart: load_cart(store),
        currency: load_currency(store),
        token: load_token(store),
    }
}

pub fn save_persisted_state(
    store: &dyn KeyValueStore,
    state: &PersistedState,
) -> Result<(), PersistError> {
    save_cart(store, &state.cart)?;
    save_currency(store, state.currency)?;
    match state.token.as_deref() {
        Some(token) => save_token(store, token),
        None => clear_token(store),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CartItem;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(CartItem::new("plan-pro", "Pro Plan", 99.0).with_duration("monthly"));
        cart.add_item(CartItem::new("hs-report", "HS Report", 25.0).with_quantity(4));
        cart
    }

    #[test]
    fn cart_round_trips_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        save_cart(&store, &sample_cart()).unwrap();
        let reloaded = load_cart(&store);
        assert_eq!(reloaded, sample_cart());
        assert!(dir.path().join(CART_KEY).exists());
    }

    #[test]
    fn missing_keys_load_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(load_persisted_state(&store), PersistedState::default());
        clear_token(&store).unwrap();
    }

    #[test]
    fn corrupt_entries_load_defaults() {
        let store = MemoryStore::new();
        store.set(CART_KEY, "{not json").unwrap();
        store.set(CURRENCY_KEY, "GBP").unwrap();
        store.set(TOKEN_KEY, "   ").unwrap();

        assert!(load_cart(&store).is_empty());
        assert_eq!(load_currency(&store), Currency::Usd);
        assert_eq!(load_token(&store), None);
    }

    #[test]
    fn persisted_state_round_trip_and_logout_clears_token() {
        let store = MemoryStore::new();
        let mut state = PersistedState {
            cart: sample_cart(),
            currency: Currency::Cad,
            token: Some("bearer-123".into()),
        };
        save_persisted_state(&store, &state).unwrap();
        assert_eq!(store.get(CURRENCY_KEY).unwrap().as_deref(), Some("CAD"));
        assert_eq!(load_persisted_state(&store), state);

        state.token = None;
        save_persisted_state(&store, &state).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }
}
