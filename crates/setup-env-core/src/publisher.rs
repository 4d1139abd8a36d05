//! Exporting accepted configuration as environment variables.

use tracing::info;

use crate::config::{ActionConfig, LocalTesting};
use crate::constants::env_vars;
use crate::env::EnvironmentPort;
use crate::error::Result;

/// Export `config` to `env`.
///
/// Credentials, project name and build name are always written (unset names
/// as empty strings); the tunnel identifier only when a tunnel is being
/// started. The access key is masked before it is written.
pub fn publish<E: EnvironmentPort + ?Sized>(config: &ActionConfig, env: &mut E) -> Result<()> {
    env.mask_secret(config.access_key.expose())?;
    env.set_var(env_vars::BROWSERSTACK_USERNAME, &config.username)?;
    env.set_var(env_vars::BROWSERSTACK_ACCESS_KEY, config.access_key.expose())?;

    let project_name = config.project_name.as_deref().unwrap_or_default();
    export_with_note(
        env,
        env_vars::BROWSERSTACK_PROJECT_NAME,
        project_name,
        "for your project name capability in your tests",
    )?;

    let build_name = config.build_name.as_deref().unwrap_or_default();
    export_with_note(
        env,
        env_vars::BROWSERSTACK_BUILD_NAME,
        build_name,
        "for your build name capability in your tests",
    )?;

    if let LocalTesting::Start(session) = &config.local {
        export_with_note(
            env,
            env_vars::BROWSERSTACK_LOCAL_IDENTIFIER,
            &session.identifier,
            "in your test scripts as the local identifier",
        )?;
    }

    Ok(())
}

fn export_with_note<E: EnvironmentPort + ?Sized>(
    env: &mut E,
    name: &str,
    value: &str,
    usage: &str,
) -> Result<()> {
    env.set_var(name, value)?;
    info!("{name} environment variable set as: {value}");
    info!("Use {name} environment variable {usage}");
    Ok(())
}
