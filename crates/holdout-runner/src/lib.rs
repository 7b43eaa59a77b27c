//! Rule engine, oracle backends, and decision arbitration for the
//! Holdout simulation.
//!
//! This crate is the decision side of the system: given an (immutable)
//! world, produce one validated action per agent per tick. The
//! deterministic rule engine answers first; when no rule fires, a
//! rendered prompt goes to an oracle backend over HTTP, and the
//! response is strictly validated before anything trusts it.
//!
//! # Architecture
//!
//! ```text
//! WorldState --> RuleEngine ----------------------------\
//!           \--> PromptEngine --> OracleClient --> parse --> DecisionOutcome
//! ```
//!
//! Every agent gets exactly one decision source per tick. Oracle
//! failures (transport, timeout, malformed payload) skip only the
//! affected agent.
//!
//! # Modules
//!
//! - [`arbiter`] -- [`DecisionArbiter`], the engine-facing entry point
//! - [`config`] -- Environment-driven oracle configuration
//! - [`error`] -- [`RunnerError`] (oracle / timeout / decision taxonomy)
//! - [`oracle`] -- HTTP backends (Ollama, OpenAI-compatible, Anthropic)
//!   and the scripted offline backend
//! - [`parse`] -- Payload extraction and strict schema validation
//! - [`prompt`] -- `minijinja` template loading and rendering
//! - [`rule_engine`] -- Deterministic overrides evaluated before the oracle
//!
//! [`DecisionArbiter`]: arbiter::DecisionArbiter
//! [`RunnerError`]: error::RunnerError

pub mod arbiter;
pub mod config;
pub mod error;
pub mod oracle;
pub mod parse;
pub mod prompt;
pub mod rule_engine;

pub use arbiter::DecisionArbiter;
pub use config::{OracleConfig, Provider};
pub use error::RunnerError;
pub use oracle::{OracleClient, create_client};
pub use prompt::{PromptEngine, RenderedPrompt};
