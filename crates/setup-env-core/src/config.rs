//! Validated action configuration.
//!
//! [`ActionConfig`] is built once per step from the raw inputs. What gets
//! validated depends on the local testing mode:
//!
//! - `start`: username, project and build name, plus logging level,
//!   identifier and tunnel args.
//! - `false`: username, project and build name.
//! - `stop`: nothing beyond presence; the tunnel identifier is read back from
//!   `BROWSERSTACK_LOCAL_IDENTIFIER`, exported by the earlier `start` step.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{env_vars, local_log_level, local_testing};
use crate::context::GithubContext;
use crate::env::EnvironmentPort;
use crate::error::{InputError, Result};
use crate::input::{InputSource, RawActionInput};
use crate::publisher;
use crate::validator;

/// What the step does with the BrowserStack Local tunnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalTestingMode {
    Start,
    Stop,
    /// Local testing is off.
    False,
}

impl LocalTestingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocalTestingMode::Start => local_testing::START,
            LocalTestingMode::Stop => local_testing::STOP,
            LocalTestingMode::False => local_testing::FALSE,
        }
    }
}

impl std::fmt::Display for LocalTestingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunnel log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocalLoggingLevel {
    #[serde(rename = "setup-logs")]
    SetupLogs,
    #[serde(rename = "network-logs")]
    NetworkLogs,
    #[serde(rename = "all-logs")]
    AllLogs,
    #[serde(rename = "false")]
    Disabled,
}

impl LocalLoggingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocalLoggingLevel::SetupLogs => local_log_level::SETUP_LOGS,
            LocalLoggingLevel::NetworkLogs => local_log_level::NETWORK_LOGS,
            LocalLoggingLevel::AllLogs => local_log_level::ALL_LOGS,
            LocalLoggingLevel::Disabled => local_log_level::FALSE,
        }
    }

    /// Value for the tunnel's `--verbose` flag; 0 means no log file.
    pub fn verbosity(&self) -> u8 {
        match self {
            LocalLoggingLevel::Disabled => 0,
            LocalLoggingLevel::SetupLogs => 1,
            LocalLoggingLevel::NetworkLogs => 2,
            LocalLoggingLevel::AllLogs => 3,
        }
    }
}

impl std::fmt::Display for LocalLoggingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BrowserStack access key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey(String);

impl AccessKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessKey(***)")
    }
}

/// Validated settings for a tunnel being started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSession {
    pub logging_level: LocalLoggingLevel,
    pub identifier: String,
    /// Extra tunnel flags, space separated. May be empty.
    pub args: String,
}

/// Local testing mode together with the fields that mode uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalTesting {
    Start(LocalSession),
    /// Identifier inherited from the environment, if the start step set one.
    Stop { identifier: Option<String> },
    Disabled,
}

impl LocalTesting {
    pub fn mode(&self) -> LocalTestingMode {
        match self {
            LocalTesting::Start(_) => LocalTestingMode::Start,
            LocalTesting::Stop { .. } => LocalTestingMode::Stop,
            LocalTesting::Disabled => LocalTestingMode::False,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        match self {
            LocalTesting::Start(session) => Some(&session.identifier),
            LocalTesting::Stop { identifier } => identifier.as_deref(),
            LocalTesting::Disabled => None,
        }
    }
}

/// Input state handed to the tunnel launcher.
///
/// The serialized field names are a fixed contract with the launcher.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryInputState {
    pub access_key: String,
    pub local_testing: LocalTestingMode,
    pub local_args: Option<String>,
    pub local_identifier: Option<String>,
    pub local_logging_level: Option<LocalLoggingLevel>,
}

impl std::fmt::Debug for BinaryInputState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryInputState")
            .field("access_key", &"***")
            .field("local_testing", &self.local_testing)
            .field("local_args", &self.local_args)
            .field("local_identifier", &self.local_identifier)
            .field("local_logging_level", &self.local_logging_level)
            .finish()
    }
}

/// Accepted configuration of one setup step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    pub username: String,
    pub access_key: AccessKey,
    pub build_name: Option<String>,
    pub project_name: Option<String>,
    pub local: LocalTesting,
}

impl ActionConfig {
    /// Read every input from `source` and validate it.
    ///
    /// `env` supplies the workflow context and, in `stop` mode, the tunnel
    /// identifier exported by the `start` step.
    ///
    /// # Errors
    ///
    /// The first missing or invalid input, unchanged.
    pub fn from_source<S, E>(source: &S, env: &E) -> std::result::Result<Self, InputError>
    where
        S: InputSource + ?Sized,
        E: EnvironmentPort + ?Sized,
    {
        let raw = RawActionInput::fetch(source)?;
        let ctx = GithubContext::from_env(env);
        Self::from_raw(raw, &ctx, env)
    }

    /// Validate already fetched inputs.
    pub fn from_raw<E: EnvironmentPort + ?Sized>(
        raw: RawActionInput,
        ctx: &GithubContext,
        env: &E,
    ) -> std::result::Result<Self, InputError> {
        let mode = validator::validate_local_testing(raw.local_testing.as_deref())?;
        debug!(mode = %mode, "validating action input");

        if mode == LocalTestingMode::Stop {
            let identifier = env
                .get_var(env_vars::BROWSERSTACK_LOCAL_IDENTIFIER)
                .filter(|v| !v.is_empty());
            if identifier.is_none() {
                warn!(
                    "{} is not set; stopping the tunnel without an identifier",
                    env_vars::BROWSERSTACK_LOCAL_IDENTIFIER
                );
            }
            return Ok(Self {
                username: raw.username,
                access_key: AccessKey::new(raw.access_key),
                build_name: raw.build_name,
                project_name: raw.project_name,
                local: LocalTesting::Stop { identifier },
            });
        }

        let username = validator::validate_username(&raw.username)?;
        let project_name = validator::validate_project_name(raw.project_name.as_deref(), ctx)?;
        let build_name = validator::validate_build_name(raw.build_name.as_deref(), ctx)?;

        let local = if mode == LocalTestingMode::Start {
            LocalTesting::Start(LocalSession {
                logging_level: validator::validate_local_logging_level(
                    raw.local_logging_level.as_deref(),
                )?,
                identifier: validator::validate_local_identifier(raw.local_identifier.as_deref())?,
                args: validator::validate_local_args(raw.local_args.as_deref())?,
            })
        } else {
            LocalTesting::Disabled
        };

        Ok(Self {
            username,
            access_key: AccessKey::new(raw.access_key),
            build_name: Some(build_name),
            project_name,
            local,
        })
    }

    pub fn local_testing_mode(&self) -> LocalTestingMode {
        self.local.mode()
    }

    /// Export the accepted values for later steps. See [`publisher::publish`].
    pub fn set_env_variables<E: EnvironmentPort + ?Sized>(&self, env: &mut E) -> Result<()> {
        publisher::publish(self, env)
    }

    /// Snapshot of the fields the tunnel launcher needs.
    pub fn input_state_for_binary(&self) -> BinaryInputState {
        let (local_args, local_logging_level) = match &self.local {
            LocalTesting::Start(session) => {
                (Some(session.args.clone()), Some(session.logging_level))
            }
            _ => (None, None),
        };
        BinaryInputState {
            access_key: self.access_key.expose().to_string(),
            local_testing: self.local_testing_mode(),
            local_args,
            local_identifier: self.local.identifier().map(str::to_string),
            local_logging_level,
        }
    }
}
