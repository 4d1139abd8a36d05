//! Input names, exported variable names and allowed input values.

/// Names of the inputs declared by the action.
pub mod input {
    pub const USERNAME: &str = "username";
    pub const ACCESS_KEY: &str = "access-key";
    pub const BUILD_NAME: &str = "build-name";
    pub const PROJECT_NAME: &str = "project-name";
    pub const LOCAL_TESTING: &str = "local-testing";
    pub const LOCAL_LOGGING_LEVEL: &str = "local-logging-level";
    pub const LOCAL_IDENTIFIER: &str = "local-identifier";
    pub const LOCAL_ARGS: &str = "local-args";
}

/// Variables exported for later steps of the job.
pub mod env_vars {
    pub const BROWSERSTACK_USERNAME: &str = "BROWSERSTACK_USERNAME";
    pub const BROWSERSTACK_ACCESS_KEY: &str = "BROWSERSTACK_ACCESS_KEY";
    pub const BROWSERSTACK_PROJECT_NAME: &str = "BROWSERSTACK_PROJECT_NAME";
    pub const BROWSERSTACK_BUILD_NAME: &str = "BROWSERSTACK_BUILD_NAME";
    pub const BROWSERSTACK_LOCAL_IDENTIFIER: &str = "BROWSERSTACK_LOCAL_IDENTIFIER";
}

/// Variables provided by the GitHub Actions runner.
pub mod github {
    pub const GITHUB_ENV: &str = "GITHUB_ENV";
    pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
    pub const GITHUB_REF: &str = "GITHUB_REF";
    pub const GITHUB_HEAD_REF: &str = "GITHUB_HEAD_REF";
    pub const GITHUB_SHA: &str = "GITHUB_SHA";
    pub const GITHUB_RUN_NUMBER: &str = "GITHUB_RUN_NUMBER";
    pub const GITHUB_EVENT_NAME: &str = "GITHUB_EVENT_NAME";
    pub const GITHUB_EVENT_PATH: &str = "GITHUB_EVENT_PATH";
}

/// Accepted values for `local-testing`.
pub mod local_testing {
    pub const START: &str = "start";
    pub const STOP: &str = "stop";
    pub const FALSE: &str = "false";
    pub const ALLOWED: &[&str] = &[START, STOP, FALSE];
}

/// Accepted values for `local-logging-level`.
pub mod local_log_level {
    pub const SETUP_LOGS: &str = "setup-logs";
    pub const NETWORK_LOGS: &str = "network-logs";
    pub const ALL_LOGS: &str = "all-logs";
    pub const FALSE: &str = "false";
    pub const ALLOWED: &[&str] = &[SETUP_LOGS, NETWORK_LOGS, ALL_LOGS, FALSE];
}

/// Suffix marking usernames that come through this integration.
pub const USERNAME_SUFFIX: &str = "-GitHubAction";

/// Prefix of generated local identifiers.
pub const LOCAL_IDENTIFIER_PREFIX: &str = "GitHubAction";

/// Keyword for `local-identifier` requesting a generated value.
pub const RANDOM_IDENTIFIER_KEYWORD: &str = "random";

/// Keyword for `project-name` resolving to the repository name.
pub const REPO_NAME_KEYWORD: &str = "repo_name";

/// Keyword for `build-name` requesting a name built from the workflow context.
pub const BUILD_INFO_KEYWORD: &str = "build_info";

/// Tunnel flags owned by the launcher; users may not pass them in `local-args`.
pub const RESTRICTED_LOCAL_ARGS: &[&str] = &[
    "--key",
    "-k",
    "--local-identifier",
    "--daemon",
    "--log-file",
    "--verbose",
    "-v",
];
