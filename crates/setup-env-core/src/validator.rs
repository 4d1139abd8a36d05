//! Per-field input validators.
//!
//! Each validator takes the raw (trimmed, possibly absent) input and returns
//! the normalized value or an [`InputError`] naming the field and what it
//! accepts. None of them read the environment; anything contextual is passed
//! in.

use crate::config::{LocalLoggingLevel, LocalTestingMode};
use crate::constants::{self, input, local_log_level, local_testing};
use crate::context::GithubContext;
use crate::error::InputError;

/// Longest build or project name the service accepts.
pub const MAX_NAME_LEN: usize = 255;

/// `start`, `stop` or `false`, case-insensitive. Absent means `false`.
pub fn validate_local_testing(raw: Option<&str>) -> Result<LocalTestingMode, InputError> {
    let Some(raw) = raw else {
        return Ok(LocalTestingMode::False);
    };
    match raw.to_lowercase().as_str() {
        local_testing::START => Ok(LocalTestingMode::Start),
        local_testing::STOP => Ok(LocalTestingMode::Stop),
        local_testing::FALSE => Ok(LocalTestingMode::False),
        _ => Err(InputError::invalid(
            input::LOCAL_TESTING,
            raw,
            local_testing::ALLOWED.join(", "),
        )),
    }
}

/// Non-empty username, tagged with the integration suffix.
pub fn validate_username(raw: &str) -> Result<String, InputError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(InputError::missing(input::USERNAME));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(InputError::invalid(
            input::USERNAME,
            username,
            "a username without whitespace",
        ));
    }
    if username.ends_with(constants::USERNAME_SUFFIX) {
        Ok(username.to_string())
    } else {
        Ok(format!("{username}{}", constants::USERNAME_SUFFIX))
    }
}

fn check_name_len(field: &str, value: &str) -> Result<(), InputError> {
    if value.chars().count() > MAX_NAME_LEN {
        return Err(InputError::invalid(
            field,
            value,
            format!("any text up to {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

/// Optional project name. `repo_name` resolves to the repository name.
pub fn validate_project_name(
    raw: Option<&str>,
    ctx: &GithubContext,
) -> Result<Option<String>, InputError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let name = if raw.eq_ignore_ascii_case(constants::REPO_NAME_KEYWORD) {
        ctx.repo_name().ok_or_else(|| {
            InputError::invalid(
                input::PROJECT_NAME,
                raw,
                "a project name, or repo_name when GITHUB_REPOSITORY is set",
            )
        })?
    } else {
        raw
    };

    check_name_len(input::PROJECT_NAME, name)?;
    Ok(Some(name.to_string()))
}

/// Build name. Absent or `build_info` yields a name built from the run context.
pub fn validate_build_name(raw: Option<&str>, ctx: &GithubContext) -> Result<String, InputError> {
    let name = match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) if !raw.eq_ignore_ascii_case(constants::BUILD_INFO_KEYWORD) => raw.to_string(),
        _ => ctx.build_info(),
    };
    check_name_len(input::BUILD_NAME, &name)?;
    Ok(name)
}

/// One of `setup-logs`, `network-logs`, `all-logs`, `false`. Absent means `false`.
pub fn validate_local_logging_level(raw: Option<&str>) -> Result<LocalLoggingLevel, InputError> {
    let Some(raw) = raw else {
        return Ok(LocalLoggingLevel::Disabled);
    };
    match raw.to_lowercase().as_str() {
        local_log_level::SETUP_LOGS => Ok(LocalLoggingLevel::SetupLogs),
        local_log_level::NETWORK_LOGS => Ok(LocalLoggingLevel::NetworkLogs),
        local_log_level::ALL_LOGS => Ok(LocalLoggingLevel::AllLogs),
        local_log_level::FALSE => Ok(LocalLoggingLevel::Disabled),
        _ => Err(InputError::invalid(
            input::LOCAL_LOGGING_LEVEL,
            raw,
            local_log_level::ALLOWED.join(", "),
        )),
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Tunnel identifier. Absent or `random` generates a unique one; words are
/// joined with `-`.
pub fn validate_local_identifier(raw: Option<&str>) -> Result<String, InputError> {
    let joined = raw
        .map(|r| r.split_whitespace().collect::<Vec<_>>().join("-"))
        .unwrap_or_default();

    if joined.is_empty() || joined.eq_ignore_ascii_case(constants::RANDOM_IDENTIFIER_KEYWORD) {
        return Ok(generate_local_identifier());
    }

    if !joined.chars().all(is_identifier_char) {
        return Err(InputError::invalid(
            input::LOCAL_IDENTIFIER,
            &joined,
            "random, or letters, digits, '-', '_' and '.'",
        ));
    }
    Ok(joined)
}

/// `GitHubAction-<uuid>`.
pub fn generate_local_identifier() -> String {
    format!(
        "{}-{}",
        constants::LOCAL_IDENTIFIER_PREFIX,
        uuid::Uuid::new_v4().simple()
    )
}

/// Extra tunnel arguments, normalized to single spaces. Flags the launcher
/// sets itself are rejected; the error names only the flag, since the value
/// of `--key=...` is the access key.
pub fn validate_local_args(raw: Option<&str>) -> Result<String, InputError> {
    let args: Vec<&str> = raw.map(|r| r.split_whitespace().collect()).unwrap_or_default();

    for &arg in &args {
        let flag = arg.split('=').next().unwrap_or(arg);
        if constants::RESTRICTED_LOCAL_ARGS.contains(&flag) {
            return Err(InputError::invalid(
                input::LOCAL_ARGS,
                flag,
                format!(
                    "any tunnel flags except {}",
                    constants::RESTRICTED_LOCAL_ARGS.join(", ")
                ),
            ));
        }
    }

    Ok(args.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_testing_accepts_any_case() {
        assert_eq!(validate_local_testing(Some("START")).unwrap(), LocalTestingMode::Start);
        assert_eq!(validate_local_testing(Some("Stop")).unwrap(), LocalTestingMode::Stop);
        assert_eq!(validate_local_testing(Some("false")).unwrap(), LocalTestingMode::False);
    }

    #[test]
    fn test_local_testing_defaults_to_false() {
        assert_eq!(validate_local_testing(None).unwrap(), LocalTestingMode::False);
    }

    #[test]
    fn test_local_testing_rejects_unknown() {
        let err = validate_local_testing(Some("true")).unwrap_err();
        match err {
            InputError::InvalidFieldValue { field, allowed, .. } => {
                assert_eq!(field, input::LOCAL_TESTING);
                assert_eq!(allowed, "start, stop, false");
            }
            other => panic!("Expected InvalidFieldValue, got {:?}", other),
        }
    }

    #[test]
    fn test_username_gets_suffix_once() {
        assert_eq!(validate_username("alice").unwrap(), "alice-GitHubAction");
        assert_eq!(
            validate_username("alice-GitHubAction").unwrap(),
            "alice-GitHubAction"
        );
    }

    #[test]
    fn test_username_empty_or_spaced_fails() {
        assert!(matches!(
            validate_username("  "),
            Err(InputError::MissingRequiredInput { .. })
        ));
        assert!(matches!(
            validate_username("ali ce"),
            Err(InputError::InvalidFieldValue { .. })
        ));
    }

    #[test]
    fn test_project_name_keyword_resolves_repo() {
        let ctx = GithubContext {
            repository: Some("acme/webshop".to_string()),
            ..GithubContext::default()
        };
        assert_eq!(
            validate_project_name(Some("REPO_NAME"), &ctx).unwrap().as_deref(),
            Some("webshop")
        );
        assert_eq!(
            validate_project_name(Some("Checkout"), &ctx).unwrap().as_deref(),
            Some("Checkout")
        );
        assert_eq!(validate_project_name(None, &ctx).unwrap(), None);
    }

    #[test]
    fn test_project_name_keyword_without_repository_fails() {
        let err = validate_project_name(Some("repo_name"), &GithubContext::default()).unwrap_err();
        assert_eq!(err.field(), input::PROJECT_NAME);
    }

    #[test]
    fn test_build_name_defaults_to_build_info() {
        let ctx = GithubContext {
            git_ref: Some("refs/heads/main".to_string()),
            sha: Some("0123456789".to_string()),
            run_number: Some("9".to_string()),
            ..GithubContext::default()
        };
        let expected = "[Branch: main] Commit 0123456 [Workflow: 9]";
        assert_eq!(validate_build_name(None, &ctx).unwrap(), expected);
        assert_eq!(validate_build_name(Some("Build_Info"), &ctx).unwrap(), expected);
        assert_eq!(validate_build_name(Some("nightly"), &ctx).unwrap(), "nightly");
    }

    #[test]
    fn test_build_name_too_long_fails() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_build_name(Some(&long), &GithubContext::default()).unwrap_err();
        assert_eq!(err.field(), input::BUILD_NAME);
    }

    #[test]
    fn test_logging_level_values() {
        assert_eq!(
            validate_local_logging_level(Some("Network-Logs")).unwrap(),
            LocalLoggingLevel::NetworkLogs
        );
        assert_eq!(
            validate_local_logging_level(None).unwrap(),
            LocalLoggingLevel::Disabled
        );
        let err = validate_local_logging_level(Some("verbose")).unwrap_err();
        assert!(err.to_string().contains("setup-logs, network-logs, all-logs, false"));
    }

    #[test]
    fn test_identifier_joins_words() {
        assert_eq!(
            validate_local_identifier(Some("my  test   run")).unwrap(),
            "my-test-run"
        );
    }

    #[test]
    fn test_identifier_random_and_empty_generate() {
        for raw in [None, Some("random"), Some("RANDOM")] {
            let id = validate_local_identifier(raw).unwrap();
            assert!(id.starts_with("GitHubAction-"), "got {id}");
            assert!(id.len() > "GitHubAction-".len());
        }
        assert_ne!(generate_local_identifier(), generate_local_identifier());
    }

    #[test]
    fn test_identifier_rejects_symbols() {
        let err = validate_local_identifier(Some("run#1")).unwrap_err();
        assert_eq!(err.field(), input::LOCAL_IDENTIFIER);
    }

    #[test]
    fn test_local_args_normalized() {
        assert_eq!(
            validate_local_args(Some("--force-local   --proxy-host  example.com")).unwrap(),
            "--force-local --proxy-host example.com"
        );
        assert_eq!(validate_local_args(None).unwrap(), "");
    }

    #[test]
    fn test_local_args_error_hides_flag_value() {
        let err = validate_local_args(Some("--force-local --key=SUPERSECRETKEY")).unwrap_err();
        let msg = err.to_string();
        assert!(!msg.contains("SUPERSECRETKEY"), "got {msg}");
        match err {
            InputError::InvalidFieldValue { value, .. } => {
                assert_eq!(value.as_deref(), Some("--key"));
            }
            other => panic!("Expected InvalidFieldValue, got {:?}", other),
        }
    }

    #[test]
    fn test_local_args_reject_launcher_flags() {
        for raw in ["--key abc", "--force-local --local-identifier=x", "-v"] {
            let err = validate_local_args(Some(raw)).unwrap_err();
            assert_eq!(err.field(), input::LOCAL_ARGS, "input {raw}");
        }
    }
}
