//! Reading raw action inputs.

use std::collections::BTreeMap;

use crate::constants::input;
use crate::env::EnvironmentPort;
use crate::error::InputError;

/// Source of named step inputs.
pub trait InputSource {
    /// Raw value of input `name`, or `None` if it was not supplied.
    fn get_input(&self, name: &str) -> Option<String>;
}

/// Inputs as the GitHub Actions runner passes them: one `INPUT_<NAME>`
/// environment variable per input.
#[derive(Debug)]
pub struct ActionsInputSource<'a, E: EnvironmentPort + ?Sized> {
    env: &'a E,
}

impl<'a, E: EnvironmentPort + ?Sized> ActionsInputSource<'a, E> {
    pub fn new(env: &'a E) -> Self {
        Self { env }
    }
}

/// Environment variable name carrying input `name`.
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

impl<E: EnvironmentPort + ?Sized> InputSource for ActionsInputSource<'_, E> {
    fn get_input(&self, name: &str) -> Option<String> {
        self.env.get_var(&input_env_name(name))
    }
}

/// Fixed set of inputs, keyed by input name.
#[derive(Debug, Clone, Default)]
pub struct StaticInputs(BTreeMap<String, String>);

impl StaticInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }
}

impl InputSource for StaticInputs {
    fn get_input(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// Read an optional input. Blank values count as unset.
pub fn read_optional<S: InputSource + ?Sized>(source: &S, name: &str) -> Option<String> {
    source
        .get_input(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a required input.
///
/// # Errors
///
/// `InputError::MissingRequiredInput` if the input is absent or blank.
pub fn read_required<S: InputSource + ?Sized>(source: &S, name: &str) -> Result<String, InputError> {
    read_optional(source, name).ok_or_else(|| InputError::missing(name))
}

/// Every input the action declares, before validation.
#[derive(Clone, PartialEq, Eq)]
pub struct RawActionInput {
    pub username: String,
    pub access_key: String,
    pub build_name: Option<String>,
    pub project_name: Option<String>,
    pub local_testing: Option<String>,
    pub local_logging_level: Option<String>,
    pub local_identifier: Option<String>,
    pub local_args: Option<String>,
}

impl RawActionInput {
    /// Pull all inputs from `source`, failing on the first missing required one.
    pub fn fetch<S: InputSource + ?Sized>(source: &S) -> Result<Self, InputError> {
        Ok(Self {
            username: read_required(source, input::USERNAME)?,
            access_key: read_required(source, input::ACCESS_KEY)?,
            build_name: read_optional(source, input::BUILD_NAME),
            project_name: read_optional(source, input::PROJECT_NAME),
            local_testing: read_optional(source, input::LOCAL_TESTING),
            local_logging_level: read_optional(source, input::LOCAL_LOGGING_LEVEL),
            local_identifier: read_optional(source, input::LOCAL_IDENTIFIER),
            local_args: read_optional(source, input::LOCAL_ARGS),
        })
    }
}

impl std::fmt::Debug for RawActionInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawActionInput")
            .field("username", &self.username)
            .field("access_key", &"***")
            .field("build_name", &self.build_name)
            .field("project_name", &self.project_name)
            .field("local_testing", &self.local_testing)
            .field("local_logging_level", &self.local_logging_level)
            .field("local_identifier", &self.local_identifier)
            .field("local_args", &self.local_args)
            .finish()
    }
}
