//! Runtime resolution of the backend canister ID
//!
//! The resolver never fails: every problem (blocked session storage,
//! unreachable config endpoint, timeout, malformed document) only ends the
//! tier it happened in. A full miss is reported as `ConfigSource::None`
//! and cached like any other result, so a dead endpoint is hit once per
//! cache lifetime, not once per caller.
//!
//! Overlapping `resolve()` calls on an empty cache are coalesced: the first
//! caller runs the chain while the rest wait on the same gate and then read
//! its result.

use std::sync::Arc;

use once_cell::sync::Lazy;
use tokio::sync::Mutex as AsyncMutex;

use crate::config::{ResolverSettings, SettingsFile};
use crate::fetch::{ConfigFetcher, HttpConfigFetcher};
use crate::logging::file_logger as log;
use crate::logging::{ConsoleLogger, Logger, SharedLogger};
use crate::session::{MemorySessionStore, SessionStore};
use crate::types::{ConfigSource, ResolvedConfig, TierOutcome};

use super::build_time::BuildTimeValues;
use super::cache::ConfigCache;
use super::globals::GlobalBindings;

const MODULE: &str = "RuntimeConfig";

static GLOBAL_RESOLVER: Lazy<Arc<RuntimeConfigResolver>> = Lazy::new(|| {
    let settings = SettingsFile::user().load().unwrap_or_else(|e| {
        log::warn(MODULE, &format!("Ignoring unreadable settings file: {}", e));
        ResolverSettings::default()
    });
    Arc::new(ResolverBuilder::new(settings).build())
});

/// Resolves the backend canister ID through the fallback chain
pub struct RuntimeConfigResolver {
    settings: ResolverSettings,
    build_time: BuildTimeValues,
    globals: Arc<GlobalBindings>,
    session: Arc<dyn SessionStore>,
    fetcher: Arc<dyn ConfigFetcher>,
    cache: Arc<ConfigCache>,
    logger: SharedLogger,
    gate: AsyncMutex<()>,
}

impl RuntimeConfigResolver {
    /// Resolver with default collaborators for `settings`
    pub fn new(settings: ResolverSettings) -> Self {
        ResolverBuilder::new(settings).build()
    }

    pub fn builder(settings: ResolverSettings) -> ResolverBuilder {
        ResolverBuilder::new(settings)
    }

    /// The process-wide resolver
    ///
    /// Settings come from `~/.config/datalogger/config.yaml` when present,
    /// globals from [`GlobalBindings::process`]. The session store lives in
    /// memory, so it lasts exactly as long as the process.
    pub fn global() -> Arc<RuntimeConfigResolver> {
        Arc::clone(&GLOBAL_RESOLVER)
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolve the backend identifier, using the cached record when present
    pub async fn resolve(&self) -> ResolvedConfig {
        if let Some(cached) = self.cache.get() {
            return cached;
        }

        let _gate = self.gate.lock().await;
        // Another caller may have finished the chain while we waited
        if let Some(cached) = self.cache.get() {
            log::debug(MODULE, "resolve: joined an in-flight resolution");
            return cached;
        }

        let config = self.run_chain().await;
        self.cache.install(config.clone());
        self.report(&config);
        config
    }

    /// Best-effort synchronous lookup
    ///
    /// Returns the cached identifier if `resolve()` has completed. Otherwise
    /// checks only the build-time, injected-global and session tiers; it
    /// never fetches and never populates the cache.
    pub fn resolve_sync(&self) -> Option<String> {
        if let Some(cached) = self.cache.get() {
            return cached.backend_identifier().map(str::to_string);
        }

        self.check_local_tiers().map(|(id, _)| id)
    }

    /// The cached record, or an empty one if nothing has been resolved
    pub fn diagnostics(&self) -> ResolvedConfig {
        self.cache.get().unwrap_or_else(ResolvedConfig::empty)
    }

    /// Forget the cached record and the session entry
    ///
    /// The next `resolve()` runs the whole chain again.
    pub fn clear_cache(&self) {
        self.cache.clear();
        if let Err(e) = self.session.remove(&self.settings.session_key) {
            log::debug(MODULE, &format!("clear_cache: session store '{}' not cleared: {}", self.session.name(), e));
        }
    }

    async fn run_chain(&self) -> ResolvedConfig {
        if let Some((id, source)) = self.check_local_tiers() {
            return ResolvedConfig::found(id, source);
        }

        log::debug(MODULE, &format!("Loading remote config from {}", self.fetcher.describe()));
        let outcome = TierOutcome::from(self.fetcher.fetch_identifier().await.map(Some));

        match self.evaluate(ConfigSource::RemoteConfig, outcome) {
            Some(id) => {
                if let Err(e) = self.session.set(&self.settings.session_key, &id) {
                    log::debug(MODULE, &format!("Could not cache identifier in session store: {}", e));
                }
                ResolvedConfig::found(id, ConfigSource::RemoteConfig)
            }
            None => ResolvedConfig::unresolved(),
        }
    }

    /// First hit among the synchronous tiers; later tiers are not touched
    fn check_local_tiers(&self) -> Option<(String, ConfigSource)> {
        let tiers: [(ConfigSource, &dyn Fn() -> TierOutcome); 3] = [
            (ConfigSource::BuildTime, &|| self.build_time.lookup()),
            (ConfigSource::InjectedGlobal, &|| {
                TierOutcome::from_option(self.globals.get(&self.settings.injected_global))
            }),
            (ConfigSource::SessionCache, &|| {
                TierOutcome::from(self.session.get(&self.settings.session_key))
            }),
        ];

        tiers
            .iter()
            .find_map(|(source, tier)| self.evaluate(*source, tier()).map(|id| (id, *source)))
    }

    fn evaluate(&self, source: ConfigSource, outcome: TierOutcome) -> Option<String> {
        match outcome {
            TierOutcome::Found(id) => {
                log::debug(MODULE, &format!("{}: found", source));
                Some(id)
            }
            TierOutcome::NotFound => {
                log::trace(MODULE, &format!("{}: not set", source));
                None
            }
            TierOutcome::Failed(e) => {
                crate::log_warn!(self.logger, "{} unavailable, using fallbacks: {}", source, e);
                log::warn(MODULE, &format!("{}: {}", source, e));
                None
            }
        }
    }

    fn report(&self, config: &ResolvedConfig) {
        match config.backend_identifier() {
            Some(id) => {
                crate::log_info!(self.logger, "Backend canister ID resolved from {}: {}", config.source(), id);
                log::info(MODULE, &format!("resolved from {}", config.source()));
            }
            None => {
                crate::log_error!(self.logger, "Failed to resolve backend canister ID from any source");
                log::error(MODULE, "no tier produced an identifier");
            }
        }
    }
}

impl std::fmt::Debug for RuntimeConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfigResolver")
            .field("settings", &self.settings)
            .field("build_time", &self.build_time)
            .field("session", &self.session.name())
            .field("fetcher", &self.fetcher.describe())
            .field("cached", &self.cache.get())
            .finish()
    }
}

/// Builder for [`RuntimeConfigResolver`]
///
/// Anything not supplied falls back to: embedded build-time values, the
/// process-wide globals, an in-memory session store, an HTTP fetcher for
/// `settings.config_url`, a fresh cache and a console logger.
pub struct ResolverBuilder {
    settings: ResolverSettings,
    build_time: Option<BuildTimeValues>,
    globals: Option<Arc<GlobalBindings>>,
    session: Option<Arc<dyn SessionStore>>,
    fetcher: Option<Arc<dyn ConfigFetcher>>,
    cache: Option<Arc<ConfigCache>>,
    logger: Option<SharedLogger>,
}

impl ResolverBuilder {
    pub fn new(settings: ResolverSettings) -> Self {
        Self {
            settings,
            build_time: None,
            globals: None,
            session: None,
            fetcher: None,
            cache: None,
            logger: None,
        }
    }

    pub fn build_time(mut self, values: BuildTimeValues) -> Self {
        self.build_time = Some(values);
        self
    }

    pub fn globals(mut self, globals: Arc<GlobalBindings>) -> Self {
        self.globals = Some(globals);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = Some(store);
        self
    }

    pub fn fetcher(mut self, fetcher: Arc<dyn ConfigFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Share a cache between resolvers
    pub fn cache(mut self, cache: Arc<ConfigCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn build(self) -> RuntimeConfigResolver {
        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpConfigFetcher::from_settings(&self.settings)),
        };

        RuntimeConfigResolver {
            build_time: self.build_time.unwrap_or_else(BuildTimeValues::embedded),
            globals: self.globals.unwrap_or_else(GlobalBindings::process),
            session: self.session.unwrap_or_else(|| Arc::new(MemorySessionStore::new())),
            fetcher,
            cache: self.cache.unwrap_or_default(),
            logger: self.logger.unwrap_or_else(|| Arc::new(ConsoleLogger::new())),
            gate: AsyncMutex::new(()),
            settings: self.settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use crate::fetch::{FetchError, MockConfigFetcher};
    use crate::logging::{LogLevel, MemoryLogger};
    use crate::session::{DisabledSessionStore, StoreResult, SESSION_KEY};

    /// Session store that counts reads
    #[derive(Default)]
    struct CountingStore {
        inner: MemorySessionStore,
        reads: AtomicUsize,
    }

    impl SessionStore for CountingStore {
        fn name(&self) -> &str {
            "counting"
        }

        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> StoreResult<()> {
            self.inner.remove(key)
        }
    }

    struct Fixture {
        globals: Arc<GlobalBindings>,
        session: Arc<CountingStore>,
        fetcher: Arc<MockConfigFetcher>,
        logger: Arc<MemoryLogger>,
    }

    impl Fixture {
        fn new(fetcher: MockConfigFetcher) -> Self {
            Self {
                globals: Arc::new(GlobalBindings::new()),
                session: Arc::new(CountingStore::default()),
                fetcher: Arc::new(fetcher),
                logger: Arc::new(MemoryLogger::new()),
            }
        }

        fn resolver(&self, build_time: BuildTimeValues) -> RuntimeConfigResolver {
            RuntimeConfigResolver::builder(ResolverSettings::default())
                .build_time(build_time)
                .globals(self.globals.clone())
                .session_store(self.session.clone())
                .fetcher(self.fetcher.clone())
                .logger(self.logger.clone())
                .build()
        }
    }

    #[tokio::test]
    async fn test_build_time_short_circuits() {
        let fx = Fixture::new(MockConfigFetcher::identifier("remote-id"));
        fx.globals.set("CANISTER_ID_BACKEND", "global-id");
        let resolver = fx.resolver(BuildTimeValues::single("VITE_CANISTER_ID_BACKEND", "build-id"));

        let config = resolver.resolve().await;

        assert_eq!(config, ResolvedConfig::found("build-id", ConfigSource::BuildTime));
        assert!(!config.load_attempted());
        assert_eq!(fx.session.reads.load(Ordering::SeqCst), 0);
        assert_eq!(fx.fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_injected_global_when_build_time_empty() {
        let fx = Fixture::new(MockConfigFetcher::identifier("remote-id"));
        fx.globals.set("CANISTER_ID_BACKEND", "global-id");
        let resolver = fx.resolver(BuildTimeValues::single("VITE_CANISTER_ID_BACKEND", ""));

        let config = resolver.resolve().await;

        assert_eq!(config.backend_identifier(), Some("global-id"));
        assert_eq!(config.source(), ConfigSource::InjectedGlobal);
        assert_eq!(fx.session.reads.load(Ordering::SeqCst), 0);
        assert_eq!(fx.fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_session_cache_before_remote() {
        let fx = Fixture::new(MockConfigFetcher::identifier("remote-id"));
        fx.session.set(SESSION_KEY, "session-id").unwrap();
        let resolver = fx.resolver(BuildTimeValues::empty());

        let config = resolver.resolve().await;

        assert_eq!(config, ResolvedConfig::found("session-id", ConfigSource::SessionCache));
        assert_eq!(fx.fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_success_persists_and_caches() {
        let fx = Fixture::new(MockConfigFetcher::identifier("abc123"));
        let resolver = fx.resolver(BuildTimeValues::empty());

        let config = resolver.resolve().await;

        assert_eq!(config, ResolvedConfig::found("abc123", ConfigSource::RemoteConfig));
        assert!(config.load_attempted());
        assert!(!config.load_failed());
        assert_eq!(fx.session.get(SESSION_KEY).unwrap(), Some("abc123".to_string()));
        assert_eq!(resolver.resolve_sync(), Some("abc123".to_string()));
        assert_eq!(fx.fetcher.calls(), 1);

        let info = fx.logger.messages_at(LogLevel::Info);
        assert_eq!(info, vec!["Backend canister ID resolved from remote-config: abc123"]);
    }

    #[tokio::test]
    async fn test_repeated_resolve_is_idempotent() {
        let fx = Fixture::new(MockConfigFetcher::identifier("abc123"));
        let resolver = fx.resolver(BuildTimeValues::empty());

        let first = resolver.resolve().await;
        let second = resolver.resolve().await;

        assert_eq!(first, second);
        assert_eq!(fx.fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_full_failure_is_cached() {
        let fx = Fixture::new(MockConfigFetcher::failing(FetchError::Http(404)));
        let resolver = fx.resolver(BuildTimeValues::empty());

        let config = resolver.resolve().await;
        assert_eq!(config, ResolvedConfig::unresolved());

        // No retry of the remote fetch until the cache is cleared
        assert_eq!(resolver.resolve().await, config);
        assert_eq!(fx.fetcher.calls(), 1);
        assert_eq!(resolver.resolve_sync(), None);

        assert_eq!(
            fx.logger.messages_at(LogLevel::Error),
            vec!["Failed to resolve backend canister ID from any source"]
        );
        assert_eq!(fx.logger.messages_at(LogLevel::Warn).len(), 1);
    }

    #[tokio::test]
    async fn test_timeout_returns_promptly() {
        let fx = Fixture::new(
            MockConfigFetcher::identifier("too-late")
                .with_latency(Duration::from_secs(30))
                .with_timeout(Duration::from_millis(50)),
        );
        let resolver = fx.resolver(BuildTimeValues::empty());

        let started = Instant::now();
        let config = resolver.resolve().await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(config, ResolvedConfig::unresolved());
    }

    #[tokio::test]
    async fn test_unavailable_session_store_falls_through() {
        let fetcher = Arc::new(MockConfigFetcher::identifier("abc123"));
        let resolver = RuntimeConfigResolver::builder(ResolverSettings::default())
            .build_time(BuildTimeValues::empty())
            .globals(Arc::new(GlobalBindings::new()))
            .session_store(Arc::new(DisabledSessionStore::new()))
            .fetcher(fetcher.clone())
            .logger(Arc::new(MemoryLogger::new()))
            .build();

        let config = resolver.resolve().await;

        // Read failure skipped, write failure swallowed
        assert_eq!(config, ResolvedConfig::found("abc123", ConfigSource::RemoteConfig));
        assert_eq!(fetcher.calls(), 1);

        // Clearing must not fail either
        resolver.clear_cache();
        assert_eq!(resolver.diagnostics(), ResolvedConfig::empty());
    }

    #[tokio::test]
    async fn test_resolve_sync_without_cache_skips_network() {
        let fx = Fixture::new(MockConfigFetcher::identifier("remote-id"));
        let resolver = fx.resolver(BuildTimeValues::empty());

        assert_eq!(resolver.resolve_sync(), None);

        fx.session.set(SESSION_KEY, "session-id").unwrap();
        assert_eq!(resolver.resolve_sync(), Some("session-id".to_string()));

        assert_eq!(fx.fetcher.calls(), 0);
        // Synchronous lookups never populate the cache
        assert_eq!(resolver.diagnostics(), ResolvedConfig::empty());
    }

    #[tokio::test]
    async fn test_clear_cache_resets_everything() {
        let fx = Fixture::new(MockConfigFetcher::identifier("abc123"));
        let resolver = fx.resolver(BuildTimeValues::empty());

        resolver.resolve().await;
        assert!(resolver.diagnostics().is_resolved());

        resolver.clear_cache();

        let diagnostics = resolver.diagnostics();
        assert_eq!(diagnostics, ResolvedConfig::empty());
        assert_eq!(diagnostics.source(), ConfigSource::None);
        assert!(!diagnostics.load_attempted());
        assert_eq!(fx.session.get(SESSION_KEY).unwrap(), None);

        // Fresh resolution goes back to the network
        resolver.resolve().await;
        assert_eq!(fx.fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_resolves_share_one_fetch() {
        let fx = Fixture::new(
            MockConfigFetcher::identifier("abc123").with_latency(Duration::from_millis(50)),
        );
        let resolver = Arc::new(fx.resolver(BuildTimeValues::empty()));

        let (a, b, c) = tokio::join!(resolver.resolve(), resolver.resolve(), resolver.resolve());

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(fx.fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_shared_cache_between_resolvers() {
        let fx = Fixture::new(MockConfigFetcher::identifier("abc123"));
        let cache = Arc::new(ConfigCache::new());

        let first = RuntimeConfigResolver::builder(ResolverSettings::default())
            .build_time(BuildTimeValues::empty())
            .globals(fx.globals.clone())
            .fetcher(fx.fetcher.clone())
            .cache(cache.clone())
            .logger(fx.logger.clone())
            .build();
        first.resolve().await;

        let second = RuntimeConfigResolver::builder(ResolverSettings::default())
            .build_time(BuildTimeValues::empty())
            .globals(fx.globals.clone())
            .fetcher(fx.fetcher.clone())
            .cache(cache)
            .logger(fx.logger.clone())
            .build();

        assert_eq!(second.diagnostics(), first.diagnostics());
        assert_eq!(second.resolve_sync(), Some("abc123".to_string()));
    }

    #[test]
    fn test_global_resolver_is_shared() {
        let a = RuntimeConfigResolver::global();
        let b = RuntimeConfigResolver::global();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.session.name(), "memory");
    }

    #[tokio::test]
    async fn test_new_resolver_does_not_inherit_previous_session() {
        let previous = RuntimeConfigResolver::builder(ResolverSettings::default())
            .build_time(BuildTimeValues::empty())
            .globals(Arc::new(GlobalBindings::new()))
            .fetcher(Arc::new(MockConfigFetcher::identifier("old-canister")))
            .logger(Arc::new(MemoryLogger::new()))
            .build();
        assert_eq!(previous.resolve().await.backend_identifier(), Some("old-canister"));

        let fetcher = Arc::new(MockConfigFetcher::identifier("new-canister"));
        let next = RuntimeConfigResolver::builder(ResolverSettings::default())
            .build_time(BuildTimeValues::empty())
            .globals(Arc::new(GlobalBindings::new()))
            .fetcher(fetcher.clone())
            .logger(Arc::new(MemoryLogger::new()))
            .build();

        let config = next.resolve().await;
        assert_eq!(config, ResolvedConfig::found("new-canister", ConfigSource::RemoteConfig));
        assert_eq!(fetcher.calls(), 1);
    }
}
