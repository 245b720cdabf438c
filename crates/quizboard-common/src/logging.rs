//! Tracing subscriber setup
//!
//! Every binary installs one subscriber at startup through [`init_logging`].
//! Events go to stdout, to a daily rotated file, or to both, either as
//! human readable text or as JSON lines. Defaults come from [`LogConfig`]
//! and can be overridden with `LOG_*` variables.
//!
//! ```no_run
//! use quizboard_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::new("quizboard-server")
//!         .with_filter("quizboard_server=debug")
//!         .apply_env()?;
//!     let _guard = init_logging(&config)?;
//!
//!     tracing::info!(sheets = 2, "Ready");
//!     Ok(())
//! }
//! ```

use anyhow::{anyhow, Context, Result};
use std::{path::PathBuf, str::FromStr};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogTarget {
    #[default]
    Stdout,
    File,
    Both,
}

impl FromStr for LogTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stdout" | "console" => Ok(LogTarget::Stdout),
            "file" => Ok(LogTarget::File),
            "both" => Ok(LogTarget::Both),
            other => Err(anyhow!("unknown log target '{}'", other)),
        }
    }
}

/// Subscriber settings
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default level for targets not named in `filter`
    pub level: Level,
    /// Extra `EnvFilter` directives, comma separated
    pub filter: Option<String>,
    pub target: LogTarget,
    /// JSON lines instead of text
    pub json: bool,
    pub dir: PathBuf,
    /// Rotated files are named `<prefix>.<date>`
    pub file_prefix: String,
    /// Add source file and line to every event
    pub with_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("quizboard")
    }
}

impl LogConfig {
    pub fn new(file_prefix: impl Into<String>) -> Self {
        Self {
            level: Level::INFO,
            filter: None,
            target: LogTarget::Stdout,
            json: false,
            dir: PathBuf::from("./logs"),
            file_prefix: file_prefix.into(),
            with_location: false,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }

    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Default settings with `LOG_*` overrides
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    /// Override settings from the environment.
    ///
    /// | variable          | values                       |
    /// |-------------------|------------------------------|
    /// | `LOG_LEVEL`       | trace, debug, info, warn, error |
    /// | `LOG_FILTER`      | `EnvFilter` directives, appended to the configured ones |
    /// | `LOG_TARGET`      | stdout, file, both           |
    /// | `LOG_FORMAT`      | text, json                   |
    /// | `LOG_DIR`         | directory for rotated files  |
    /// | `LOG_LOCATION`    | true, false                  |
    ///
    /// Unparseable values are an error rather than silently ignored.
    pub fn apply_env(mut self) -> Result<Self> {
        if let Some(level) = env_var("LOG_LEVEL") {
            self.level = level
                .parse()
                .map_err(|_| anyhow!("LOG_LEVEL: unknown level '{}'", level))?;
        }
        if let Some(extra) = env_var("LOG_FILTER") {
            self.filter = Some(match self.filter.take() {
                Some(base) => format!("{},{}", base, extra),
                None => extra,
            });
        }
        if let Some(target) = env_var("LOG_TARGET") {
            self.target = target.parse().context("LOG_TARGET")?;
        }
        if let Some(format) = env_var("LOG_FORMAT") {
            self.json = match format.to_ascii_lowercase().as_str() {
                "json" => true,
                "text" | "pretty" => false,
                other => return Err(anyhow!("LOG_FORMAT: unknown format '{}'", other)),
            };
        }
        if let Some(dir) = env_var("LOG_DIR") {
            self.dir = PathBuf::from(dir);
        }
        if let Some(location) = env_var("LOG_LOCATION") {
            self.with_location = location
                .parse()
                .map_err(|_| anyhow!("LOG_LOCATION: expected true or false, got '{}'", location))?;
        }
        Ok(self)
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        let mut filter = EnvFilter::from_default_env().add_directive(self.level.into());

        let directives = self.filter.as_deref().unwrap_or_default();
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            let parsed: Directive = directive
                .parse()
                .with_context(|| format!("invalid log filter directive '{}'", directive))?;
            filter = filter.add_directive(parsed);
        }

        Ok(filter)
    }

    fn layer<W>(&self, writer: W, ansi: bool) -> BoxedLayer
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_file(self.with_location)
            .with_line_number(self.with_location)
            .with_span_events(FmtSpan::CLOSE);

        if self.json {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Flushes the file writer on drop
#[must_use = "file logging stops when the guard is dropped"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuard> {
    let filter = config.env_filter()?;
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    let mut file_guard = None;

    if matches!(config.target, LogTarget::Stdout | LogTarget::Both) {
        layers.push(config.layer(std::io::stdout, !config.json));
    }

    if matches!(config.target, LogTarget::File | LogTarget::Both) {
        std::fs::create_dir_all(&config.dir)
            .with_context(|| format!("cannot create log directory {}", config.dir.display()))?;
        let appender = tracing_appender::rolling::daily(&config.dir, &config.file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);
        layers.push(config.layer(writer, false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("a tracing subscriber is already installed")?;

    Ok(LoggingGuard { _file: file_guard })
}
