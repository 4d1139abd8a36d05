//! setup-env core library
//!
//! Validates the inputs of the BrowserStack setup step and exports them as
//! `BROWSERSTACK_*` environment variables for the tunnel launcher and for
//! the user's test scripts.

pub mod config;
pub mod constants;
pub mod context;
pub mod env;
pub mod error;
pub mod input;
pub mod publisher;
pub mod telemetry;
pub mod validator;

pub use config::{
    AccessKey, ActionConfig, BinaryInputState, LocalLoggingLevel, LocalSession, LocalTesting,
    LocalTestingMode,
};
pub use context::GithubContext;
pub use env::{EnvironmentPort, GithubEnvironment, InMemoryEnvironment};
pub use error::{ActionError, InputError, Result};
pub use input::{
    read_optional, read_required, ActionsInputSource, InputSource, RawActionInput, StaticInputs,
};
pub use publisher::publish;
pub use telemetry::init_tracing;
