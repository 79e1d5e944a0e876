//! Main application state container
//!
//! The store owns the session list. The sidebar, router and viewport
//! are handed clones of the same handles, so no one holds a private copy.

use std::sync::Arc;

use chatdeck_navigation::{Route, Router};
use chatdeck_session::ChatStore;
use chatdeck_sidebar::{Confirmer, SessionListController, SharedOptions, Viewport};
use chatdeck_storage::Database;

use crate::config::Config;
use crate::Result;

const SKIP_MASK_PICKER_KEY: &str = "dont_show_mask_splash_screen";

pub struct App {
    config: Config,
    db: Database,
    store: ChatStore,
    router: Router,
    viewport: Viewport,
    options: SharedOptions,
}

impl App {
    /// Open the database named in `config`
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Ok(Self::with_database(config, db))
    }

    /// Build on an already opened database
    pub fn with_database(config: Config, db: Database) -> Self {
        let store = ChatStore::new(db.clone());
        let viewport = Viewport::new(config.initial_width, config.compact_max_width);
        let options = SharedOptions::default();
        options.write().dont_show_mask_splash_screen = config.dont_show_mask_splash_screen;

        Self {
            config,
            db,
            store,
            router: Router::new(Route::Home),
            viewport,
            options,
        }
    }

    /// Load sessions and saved preferences
    pub fn initialize(&self) -> Result<()> {
        self.store.initialize()?;

        if let Some(value) = self.db.get_setting(SKIP_MASK_PICKER_KEY)? {
            self.options.write().dont_show_mask_splash_screen = value == "true";
        }

        tracing::info!(
            session_count = self.store.len(),
            compact = self.viewport.width() <= self.config.compact_max_width,
            "App initialized"
        );

        Ok(())
    }

    /// A sidebar controller bound to this app's store, router and viewport
    pub fn sidebar(&self, confirmer: Arc<dyn Confirmer>) -> SessionListController {
        SessionListController::new(
            self.store.clone(),
            Arc::new(self.router.clone()),
            confirmer,
            Arc::new(self.viewport.clone()),
        )
        .with_options(Arc::clone(&self.options))
    }

    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // === Settings operations ===

    pub fn dont_show_mask_splash_screen(&self) -> bool {
        self.options.read().dont_show_mask_splash_screen
    }

    pub fn set_dont_show_mask_splash_screen(&self, value: bool) -> Result<()> {
        self.db
            .set_setting(SKIP_MASK_PICKER_KEY, if value { "true" } else { "false" })?;
        self.options.write().dont_show_mask_splash_screen = value;
        Ok(())
    }
}

impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            store: self.store.clone(),
            router: self.router.clone(),
            viewport: self.viewport.clone(),
            options: Arc::clone(&self.options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_app() -> App {
        let config = Config::new(PathBuf::from(":memory:"));
        App::with_database(config, Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_app_initialization() {
        let app = test_app();
        app.initialize().unwrap();

        assert_eq!(app.store().len(), 1);
        assert_eq!(app.store().selected_index(), Some(0));
        assert!(!app.dont_show_mask_splash_screen());
    }

    #[test]
    fn test_saved_preference_overrides_config() {
        let app = test_app();
        app.set_dont_show_mask_splash_screen(true).unwrap();

        let reopened = App::with_database(app.config().clone(), app.database().clone());
        assert!(!reopened.dont_show_mask_splash_screen());
        reopened.initialize().unwrap();
        assert!(reopened.dont_show_mask_splash_screen());
    }
}
