//! `ajapopaja key` command.

use super::Output;
use crate::api_key::resolve_api_key;
use crate::error::Error;

/// Execute the `key` command. Says where the key comes from without
/// printing it.
///
/// # Errors
///
/// Returns [`Error::MissingApiKey`] when neither source has a key.
pub fn run(cli_value: Option<&str>, env_var: &str) -> Result<Output, Error> {
    resolve_api_key(cli_value, env_var).ok_or_else(|| Error::MissingApiKey(env_var.to_string()))?;

    let source = if cli_value.is_some_and(|v| !v.is_empty()) {
        "the command line".to_string()
    } else {
        format!("${env_var}")
    };
    let mut out = Output::default();
    out.line(&format!("API key found ({source})."));
    Ok(out)
}
