//! Main runner that resolves the backend, synthesizes the command and
//! interprets the outcome of a test run

use crate::{
    backend::{self, Backend, ResolvedBackend},
    command::{CommandLine, SynthesisInput, install_legacy_shim, synthesize},
    config::Config,
    error::Result,
    interfaces::{
        EnvironmentIsolation, InfoOptions, Inspector, Messenger, NotifyImage, Notifier,
        ProcessExecutor, VersionProbe,
    },
    services::{
        BundlerCleanEnv, FileInspector, LogMessenger, LogNotifier, RubyVersionProbe,
        ShellExecutor,
    },
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Title of the notification sent after zeus and spring runs
pub const NOTIFY_TITLE: &str = "Minitest results";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// The paths are the whole test suite
    pub all: bool,
}

impl RunOptions {
    pub fn all() -> Self {
        Self { all: true }
    }
}

pub struct Runner {
    config: Config,
    root: Option<PathBuf>,
    /// Installed on first use unless set through the builder
    legacy_shim: OnceLock<Option<PathBuf>>,
    inspector: Box<dyn Inspector>,
    executor: Box<dyn ProcessExecutor>,
    isolation: Box<dyn EnvironmentIsolation>,
    version_probe: Box<dyn VersionProbe>,
    messenger: Box<dyn Messenger>,
    notifier: Box<dyn Notifier>,
}

impl Runner {
    /// Runner with the default filesystem, process and logging collaborators
    pub fn new(config: Config) -> Result<Self> {
        RunnerBuilder::new(config).build()
    }

    pub fn builder(config: Config) -> RunnerBuilder {
        RunnerBuilder::new(config)
    }

    /// Run the given test files; returns whether the run passed.
    ///
    /// With `all_after_pass`, a passing partial run is followed by a full run
    /// whose result is returned instead.
    pub fn run(&self, paths: &[String], options: RunOptions) -> bool {
        let message = if options.all {
            "Running: all tests".to_string()
        } else {
            format!("Running: {}", paths.join(" "))
        };
        self.messenger.info(&message, InfoOptions { reset: true });

        let resolved = self.resolved_backend();
        let command = self.synthesize_for(&resolved, paths);
        debug!("Resolved backend {} -> {}", resolved.backend, command);

        let outcome = if resolved.modifiers.bundler {
            self.executor.execute(&command)
        } else {
            self.isolation
                .isolate(&command, &|command| self.executor.execute(command))
        };

        let passed = outcome.unwrap_or_else(|e| {
            warn!("{}", e);
            false
        });

        // Tests run inside the zeus/spring server, so the exit status is the
        // only result the host ever sees.
        if resolved.backend.runs_detached() {
            self.notifier
                .notify(&message, NOTIFY_TITLE, NotifyImage::from_status(passed));
        }

        if self.config.all_after_pass && passed && !options.all {
            self.run_all()
        } else {
            passed
        }
    }

    pub fn run_all(&self) -> bool {
        let paths = self.inspector.clean_all();
        self.run(&paths, RunOptions::all())
    }

    pub fn run_on_modifications(&self, paths: &[String]) -> bool {
        let paths = self.inspector.clean(paths);
        let all = paths == self.inspector.all_test_files();
        self.run(&paths, RunOptions { all })
    }

    /// New files only invalidate the test-file listing
    pub fn run_on_additions(&self, _paths: &[String]) -> bool {
        self.inspector.clear_memoized_test_files();
        true
    }

    pub fn run_on_removals(&self, _paths: &[String]) {
        self.inspector.clear_memoized_test_files();
    }

    /// The command `run` would execute for these paths
    pub fn command_for(&self, paths: &[String]) -> CommandLine {
        self.synthesize_for(&self.resolved_backend(), paths)
    }

    pub fn resolved_backend(&self) -> ResolvedBackend {
        backend::resolve(&self.config)
    }

    fn synthesize_for(&self, resolved: &ResolvedBackend, paths: &[String]) -> CommandLine {
        // Only the plain and spring dialects can carry the shim; skip the
        // version query for the others.
        let wants_shim = matches!(resolved.backend, Backend::Plain | Backend::Spring(_))
            && !self.version_probe.minitest_version_gte_5();

        let command = synthesize(&SynthesisInput {
            resolved,
            paths,
            cli: &self.config.cli,
            test_folders: &self.config.test_folders,
            include: &self.config.include,
            legacy_shim: if wants_shim { self.legacy_shim() } else { None },
        });

        match &self.root {
            Some(root) => command.with_working_dir(root.display().to_string()),
            None => command,
        }
    }

    fn legacy_shim(&self) -> Option<&Path> {
        self.legacy_shim
            .get_or_init(|| match install_legacy_shim() {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Running without the minitest < 5 runner shim: {}", e);
                    None
                }
            })
            .as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn inspector(&self) -> &dyn Inspector {
        self.inspector.as_ref()
    }

    pub fn cli_options(&self) -> &[String] {
        &self.config.cli
    }

    pub fn bundler(&self) -> bool {
        self.resolved_backend().modifiers.bundler
    }

    pub fn rubygems(&self) -> bool {
        self.resolved_backend().modifiers.rubygems
    }

    pub fn drb(&self) -> bool {
        self.config.drb.is_enabled()
    }

    pub fn zeus(&self) -> bool {
        self.config.zeus.is_enabled()
    }

    pub fn spring(&self) -> bool {
        self.config.spring.is_enabled()
    }

    pub fn all_after_pass(&self) -> bool {
        self.config.all_after_pass
    }

    pub fn test_folders(&self) -> &[String] {
        &self.config.test_folders
    }

    pub fn include_folders(&self) -> &[String] {
        &self.config.include
    }

    pub fn test_file_patterns(&self) -> &[String] {
        &self.config.test_file_patterns
    }
}

/// Assembles a [`Runner`], filling unset collaborators with defaults
pub struct RunnerBuilder {
    config: Config,
    root: Option<PathBuf>,
    legacy_shim: Option<PathBuf>,
    inspector: Option<Box<dyn Inspector>>,
    executor: Option<Box<dyn ProcessExecutor>>,
    isolation: Option<Box<dyn EnvironmentIsolation>>,
    version_probe: Option<Box<dyn VersionProbe>>,
    messenger: Option<Box<dyn Messenger>>,
    notifier: Option<Box<dyn Notifier>>,
}

impl RunnerBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            root: None,
            legacy_shim: None,
            inspector: None,
            executor: None,
            isolation: None,
            version_probe: None,
            messenger: None,
            notifier: None,
        }
    }

    pub fn inspector(mut self, inspector: impl Inspector + 'static) -> Self {
        self.inspector = Some(Box::new(inspector));
        self
    }

    pub fn executor(mut self, executor: impl ProcessExecutor + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    pub fn isolation(mut self, isolation: impl EnvironmentIsolation + 'static) -> Self {
        self.isolation = Some(Box::new(isolation));
        self
    }

    pub fn version_probe(mut self, probe: impl VersionProbe + 'static) -> Self {
        self.version_probe = Some(Box::new(probe));
        self
    }

    pub fn messenger(mut self, messenger: impl Messenger + 'static) -> Self {
        self.messenger = Some(Box::new(messenger));
        self
    }

    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Project directory: test files are discovered and commands run there
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn legacy_shim(mut self, path: impl Into<PathBuf>) -> Self {
        self.legacy_shim = Some(path.into());
        self
    }

    /// Finalize the configuration and report deprecated keys through the
    /// messenger.
    pub fn build(self) -> Result<Runner> {
        let (config, deprecations) = self.config.finalize();

        let messenger = self.messenger.unwrap_or_else(|| Box::new(LogMessenger));
        for deprecation in &deprecations {
            messenger.info(&deprecation.message, InfoOptions::default());
        }

        let inspector: Box<dyn Inspector> = match self.inspector {
            Some(inspector) => inspector,
            None => {
                let inspector =
                    FileInspector::new(&config.test_folders, &config.test_file_patterns)?;
                match &self.root {
                    Some(root) => Box::new(inspector.with_root(root)),
                    None => Box::new(inspector),
                }
            }
        };

        let version_probe = self.version_probe.unwrap_or_else(|| {
            let bundler = config.bundler && !config.spring.is_enabled();
            Box::new(RubyVersionProbe::new().with_bundler(bundler))
        });

        Ok(Runner {
            root: self.root,
            legacy_shim: match self.legacy_shim {
                Some(path) => OnceLock::from(Some(path)),
                None => OnceLock::new(),
            },
            inspector,
            executor: self.executor.unwrap_or_else(|| Box::new(ShellExecutor)),
            isolation: self
                .isolation
                .unwrap_or_else(|| Box::new(BundlerCleanEnv::from_env())),
            version_probe,
            messenger,
            notifier: self.notifier.unwrap_or_else(|| Box::new(LogNotifier)),
            config,
        })
    }
}

impl Default for RunnerBuilder {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
