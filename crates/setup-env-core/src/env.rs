//! Environment port: the key-value channel the step reads state from and
//! publishes accepted values to.
//!
//! Services never touch `std::env` directly. [`GithubEnvironment`] backs the
//! port with the process environment and the runner's `$GITHUB_ENV` file;
//! [`InMemoryEnvironment`] keeps everything in a map for tests and dry runs.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::github::GITHUB_ENV;
use crate::error::{ActionError, Result};

/// Port for environment variable access.
pub trait EnvironmentPort {
    /// Get an environment variable value.
    /// Returns None if the variable is not set.
    fn get_var(&self, key: &str) -> Option<String>;

    /// Export a variable to the current process and the steps that follow.
    fn set_var(&mut self, key: &str, value: &str) -> Result<()>;

    /// Ask the sink to hide `value` from any log output.
    fn mask_secret(&mut self, _value: &str) -> Result<()> {
        Ok(())
    }
}

fn check_var_name(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        "name must not be empty"
    } else if key.contains('=') {
        "name must not contain '='"
    } else if key.contains(['\n', '\r']) {
        "name must not contain line breaks"
    } else {
        return Ok(());
    };
    Err(ActionError::InvalidEnvVar {
        name: key.to_string(),
        reason: reason.to_string(),
    })
}

/// Map-backed environment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnvironment {
    vars: BTreeMap<String, String>,
    masked: Vec<String>,
}

impl InMemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a variable, builder style.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Values passed to [`EnvironmentPort::mask_secret`], in call order.
    pub fn masked(&self) -> &[String] {
        &self.masked
    }
}

impl EnvironmentPort for InMemoryEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set_var(&mut self, key: &str, value: &str) -> Result<()> {
        check_var_name(key)?;
        self.vars.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn mask_secret(&mut self, value: &str) -> Result<()> {
        self.masked.push(value.to_string());
        Ok(())
    }
}

/// Environment of a GitHub Actions step.
///
/// Reads fall through an overlay of values exported by this process to the
/// real process environment. Exports are appended to the `$GITHUB_ENV` file
/// so that later steps in the job see them.
#[derive(Debug, Default)]
pub struct GithubEnvironment {
    env_file: Option<PathBuf>,
    overlay: BTreeMap<String, String>,
}

impl GithubEnvironment {
    /// Pick up `$GITHUB_ENV` from the process environment.
    pub fn from_process() -> Self {
        let env_file = std::env::var_os(GITHUB_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        if env_file.is_none() {
            warn!("{GITHUB_ENV} is not set; exported variables will not reach later steps");
        }
        Self {
            env_file,
            overlay: BTreeMap::new(),
        }
    }

    /// Use an explicit env file instead of `$GITHUB_ENV`.
    pub fn with_env_file(path: impl Into<PathBuf>) -> Self {
        Self {
            env_file: Some(path.into()),
            overlay: BTreeMap::new(),
        }
    }

    fn append_to_env_file(path: &Path, key: &str, value: &str) -> Result<()> {
        let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
        let entry = format_env_file_entry(key, value, &delimiter)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(entry.as_bytes())?;
        Ok(())
    }
}

impl EnvironmentPort for GithubEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.overlay
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    }

    fn set_var(&mut self, key: &str, value: &str) -> Result<()> {
        check_var_name(key)?;
        if let Some(path) = &self.env_file {
            Self::append_to_env_file(path, key, value)?;
            debug!(name = key, file = %path.display(), "exported variable");
        }
        self.overlay.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn mask_secret(&mut self, value: &str) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "::add-mask::{value}")?;
        Ok(())
    }
}

/// Render one `NAME<<DELIM` block in the runner's env-file format.
///
/// Fails if the delimiter occurs in the name or value, since the runner
/// would then end the block early.
pub fn format_env_file_entry(key: &str, value: &str, delimiter: &str) -> Result<String> {
    if key.contains(delimiter) {
        return Err(ActionError::InvalidEnvVar {
            name: key.to_string(),
            reason: format!("name must not contain the delimiter {delimiter}"),
        });
    }
    if value.contains(delimiter) {
        return Err(ActionError::InvalidEnvVar {
            name: key.to_string(),
            reason: format!("value must not contain the delimiter {delimiter}"),
        });
    }
    Ok(format!("{key}<<{delimiter}\n{value}\n{delimiter}\n"))
}
