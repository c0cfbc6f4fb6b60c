//! # API Facade
//!
//! The single entry point for AutoPulse operations, whatever the UI. It owns the
//! article store, the site configuration, the admin gate and the generation guard,
//! and dispatches to `commands/*.rs`.
//!
//! Public reader operations need nothing. Every admin operation takes an
//! [`AdminSession`], which only [`AutopulseApi::login`] hands out.
//!
//! The facade does no terminal I/O and returns structured [`CmdResult`]s.
//! `AutopulseApi<S: ArticleStorage>` runs on `FileStorage` in production and on
//! `InMemoryStorage` in tests.

use crate::auth::{AdminGate, AdminSession};
use crate::commands;
use crate::config::SiteConfig;
use crate::draft::{DraftGenerator, GenerationGuard};
use crate::error::{AutopulseError, Result};
use crate::model::ArticleForm;
use crate::route::Route;
use crate::store::article_store::LoadSource;
use crate::store::{ArticleStorage, ArticleStore};
use chrono::Utc;
use std::path::{Path, PathBuf};

pub struct AutopulseApi<S: ArticleStorage> {
    store: ArticleStore<S>,
    config: SiteConfig,
    config_dir: PathBuf,
    gate: AdminGate,
    generation: GenerationGuard,
}

impl<S: ArticleStorage> AutopulseApi<S> {
    /// Loads the collection from `storage` (persisted, then seed, then empty).
    pub fn new(storage: S, config: SiteConfig, config_dir: PathBuf) -> Self {
        let gate = AdminGate::new(config.admin_passphrase.clone());
        Self {
            store: ArticleStore::initialize(storage),
            config,
            config_dir,
            gate,
            generation: GenerationGuard::new(),
        }
    }

    pub fn load_source(&self) -> LoadSource {
        self.store.source()
    }

    pub fn site_config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn login(&self, passphrase: &str) -> Result<AdminSession> {
        self.gate.login(passphrase)
    }

    pub fn list_articles(&self, category: Option<&str>, query: &str) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, category, query)
    }

    pub fn view_article(&self, slug: &str) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, &self.config.injector(), slug)
    }

    /// What a reader sees at `route`. The admin route needs a session.
    pub fn resolve_route(
        &self,
        route: &Route,
        session: Option<&AdminSession>,
    ) -> Result<commands::CmdResult> {
        match route {
            Route::Home => self.list_articles(None, ""),
            Route::Category(name) => self.list_articles(Some(name), ""),
            Route::Post(slug) => self.view_article(slug),
            Route::Admin => match session {
                Some(session) => self.admin_articles(session),
                None => Err(AutopulseError::Unauthorized(
                    "Admin passphrase required.".to_string(),
                )),
            },
        }
    }

    pub fn admin_articles(&self, _session: &AdminSession) -> Result<commands::CmdResult> {
        commands::list::run_all(&self.store)
    }

    /// A blank form, or one pre-filled from the article matching `id_or_slug`.
    pub fn article_form(
        &self,
        _session: &AdminSession,
        id_or_slug: Option<&str>,
    ) -> Result<ArticleForm> {
        match id_or_slug {
            None => Ok(ArticleForm::default()),
            Some(key) => {
                let article = commands::helpers::require_article(&self.store, key)?;
                Ok(ArticleForm::from(article))
            }
        }
    }

    pub fn save_article(
        &mut self,
        _session: &AdminSession,
        form: ArticleForm,
    ) -> Result<commands::CmdResult> {
        commands::save::run(&mut self.store, form, Utc::now())
    }

    pub fn delete_article(
        &mut self,
        _session: &AdminSession,
        id_or_slug: &str,
    ) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id_or_slug)
    }

    pub fn export_articles(
        &self,
        _session: &AdminSession,
        output: &Path,
    ) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, output)
    }

    pub fn import_articles(
        &mut self,
        _session: &AdminSession,
        text: &str,
    ) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, text)
    }

    pub fn sitemap(&self, _session: &AdminSession, output: &Path) -> Result<commands::CmdResult> {
        commands::sitemap::run(
            &self.store,
            &self.config.origin,
            Utc::now().date_naive(),
            output,
        )
    }

    pub fn generate_draft<G: DraftGenerator + ?Sized>(
        &mut self,
        _session: &AdminSession,
        generator: &mut G,
    ) -> Result<commands::CmdResult> {
        commands::generate::run(&mut self.store, &self.generation, generator, Utc::now())
    }

    /// Reads or writes `config.json`. A `Set` takes effect from the next run.
    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn store(&self) -> &ArticleStore<S> {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
