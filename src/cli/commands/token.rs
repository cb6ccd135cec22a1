use serde_json::json;
use uuid::Uuid;

use crate::auth::JwtKeys;
use crate::cli::OutputFormat;
use crate::config::config;

/// Mint a token signed with the locally configured `JWT_SECRET`. Tokens in
/// production come from the identity service; this is for development.
pub fn handle(user_id: Uuid, hours: Option<u64>, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config().security;
    let keys = JwtKeys::new(&security.jwt_secret, hours.unwrap_or(security.jwt_expiry_hours))?;
    let token = keys.issue(user_id)?;

    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "user": user_id, "token": token }))?
            );
        }
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
