use thiserror::Error;

use crate::domain::{Phase, TradeId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unknown {kind} algorithm: {name}")]
    UnknownAlgorithm { kind: &'static str, name: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("can not start control-plane server ({addr}): {source}")]
    ControlPlane {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("can not create venue {venue}: {source}")]
    VenueCreate {
        venue: String,
        #[source]
        source: Box<Error>,
    },

    #[error("can not create trade engine (venue = {venue}, context = {context}): {source}")]
    EngineCreate {
        venue: String,
        context: TradeId,
        #[source]
        source: Box<Error>,
    },

    #[error("can not start streaming (venue = {venue}, context = {context}): {source}")]
    StreamStart {
        venue: String,
        context: TradeId,
        #[source]
        source: Box<Error>,
    },

    #[error("can not stop streaming (venue = {venue}, context = {context}): {source}")]
    StreamStop {
        venue: String,
        context: TradeId,
        #[source]
        source: Box<Error>,
    },

    #[error("can not destroy trade engine (venue = {venue}, context = {context}): {source}")]
    EngineDestroy {
        venue: String,
        context: TradeId,
        #[source]
        source: Box<Error>,
    },

    #[error("can not start streaming: {0}")]
    Streaming(#[source] Box<Error>),

    #[error("can not create arbitrage engine: {0}")]
    ArbitrageCreate(#[source] Box<Error>),

    #[error("can not destroy arbitrage engine: {0}")]
    ArbitrageDestroy(#[source] Box<Error>),

    #[error("can not start arbitrage: {0}")]
    Arbitrage(#[source] Box<Error>),

    #[error("{operation} is not allowed while {phase}")]
    Lifecycle {
        operation: &'static str,
        phase: Phase,
    },

    #[error("engine already exists for {0}")]
    EngineExists(String),

    #[error("no engine for {0}")]
    EngineNotFound(String),

    #[error("algorithm {name} failed: {reason}")]
    Algorithm { name: String, reason: String },

    #[error("venue error: {0}")]
    Venue(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal errors collected while tearing something down.
///
/// Teardown never stops at the first failure; every step runs and whatever
/// went wrong is gathered here so the caller can decide what to surface.
#[derive(Debug, Default)]
pub struct TeardownReport {
    errors: Vec<Error>,
}

impl TeardownReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Append every error from `other`.
    pub fn merge(&mut self, other: TeardownReport) {
        self.errors.extend(other.errors);
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }
}
