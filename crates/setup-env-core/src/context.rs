//! Workflow run context exposed by the GitHub Actions runner.
//!
//! Used to resolve the `repo_name` and `build_info` keywords of the
//! project-name and build-name inputs.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::constants::github;
use crate::env::EnvironmentPort;
use crate::error::Result;

const UNKNOWN: &str = "unknown";

/// Pull request that triggered the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestInfo {
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct HeadCommit {
    #[serde(default)]
    message: Option<String>,
}

/// The parts of the webhook event payload this step cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    head_commit: Option<HeadCommit>,
    #[serde(default)]
    pull_request: Option<PullRequestInfo>,
}

impl EventPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Snapshot of the `GITHUB_*` variables and event payload for this run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubContext {
    /// `owner/name`.
    pub repository: Option<String>,
    pub git_ref: Option<String>,
    /// Source branch of a pull request.
    pub head_ref: Option<String>,
    pub sha: Option<String>,
    pub run_number: Option<String>,
    pub event_name: Option<String>,
    pub head_commit_message: Option<String>,
    pub pull_request: Option<PullRequestInfo>,
}

impl GithubContext {
    /// Collect the context from the environment.
    ///
    /// An unreadable event payload is logged and ignored; the build name
    /// then falls back to the variables alone.
    pub fn from_env<E: EnvironmentPort + ?Sized>(env: &E) -> Self {
        let var = |key: &str| env.get_var(key).filter(|v| !v.is_empty());

        let mut ctx = Self {
            repository: var(github::GITHUB_REPOSITORY),
            git_ref: var(github::GITHUB_REF),
            head_ref: var(github::GITHUB_HEAD_REF),
            sha: var(github::GITHUB_SHA),
            run_number: var(github::GITHUB_RUN_NUMBER),
            event_name: var(github::GITHUB_EVENT_NAME),
            ..Self::default()
        };

        if let Some(path) = var(github::GITHUB_EVENT_PATH) {
            match EventPayload::from_file(Path::new(&path)) {
                Ok(payload) => ctx.apply_payload(payload),
                Err(e) => warn!(path = %path, error = %e, "could not read event payload"),
            }
        }

        ctx
    }

    pub fn apply_payload(&mut self, payload: EventPayload) {
        self.head_commit_message = payload.head_commit.and_then(|c| c.message);
        self.pull_request = payload.pull_request;
    }

    /// Repository name without the owner.
    pub fn repo_name(&self) -> Option<&str> {
        let repository = self.repository.as_deref()?;
        let name = repository.rsplit('/').next().unwrap_or(repository);
        (!name.is_empty()).then_some(name)
    }

    /// Branch or tag the run is for.
    pub fn branch(&self) -> Option<&str> {
        if let Some(head) = self.head_ref.as_deref() {
            return Some(head);
        }
        let git_ref = self.git_ref.as_deref()?;
        Some(
            git_ref
                .strip_prefix("refs/heads/")
                .or_else(|| git_ref.strip_prefix("refs/tags/"))
                .unwrap_or(git_ref),
        )
    }

    pub fn short_sha(&self) -> Option<&str> {
        self.sha.as_deref().map(|sha| sha.get(..7).unwrap_or(sha))
    }

    /// Build name describing this run, e.g.
    /// `[Branch: main] Commit 1a2b3c4: Fix login [Workflow: 42]`.
    pub fn build_info(&self) -> String {
        let branch = self.branch().unwrap_or(UNKNOWN);
        let run = self.run_number.as_deref().unwrap_or(UNKNOWN);

        let change = match &self.pull_request {
            Some(pr) => match pr.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                Some(title) => format!("PR {}: {}", pr.number, title),
                None => format!("PR {}", pr.number),
            },
            None => {
                let sha = self.short_sha().unwrap_or(UNKNOWN);
                let message = self
                    .head_commit_message
                    .as_deref()
                    .and_then(|m| m.lines().next())
                    .map(str::trim)
                    .filter(|m| !m.is_empty());
                match message {
                    Some(message) => format!("Commit {sha}: {message}"),
                    None => format!("Commit {sha}"),
                }
            }
        };

        format!("[Branch: {branch}] {change} [Workflow: {run}]")
    }
}
