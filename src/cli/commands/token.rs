use anyhow::Context;

use crate::auth::TokenVerifier;
use crate::config::AppConfig;

pub fn handle(user_id: i32, hours: Option<u64>) -> anyhow::Result<()> {
    let mut security = AppConfig::security_from_env().context("invalid configuration")?;
    if let Some(hours) = hours {
        security.jwt_expiry_hours = hours;
    }

    let token = TokenVerifier::from_config(&security)
        .issue(user_id)
        .context("failed to sign token")?;

    println!("{}", token);
    Ok(())
}
