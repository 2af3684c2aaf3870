//! API key discovery.

/// Environment variable consulted when no key is given on the command line.
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Returns the API key from `cli_value`, falling back to the environment
/// variable `env_var`. Empty values count as absent.
#[must_use]
pub fn resolve_api_key(cli_value: Option<&str>, env_var: &str) -> Option<String> {
    let from_env = std::env::var(env_var).ok();
    pick_api_key(cli_value, from_env.as_deref())
}

fn pick_api_key(cli_value: Option<&str>, env_value: Option<&str>) -> Option<String> {
    cli_value.filter(|v| !v.is_empty()).or(env_value.filter(|v| !v.is_empty())).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_wins() {
        assert_eq!(pick_api_key(Some("cli"), Some("env")).as_deref(), Some("cli"));
    }

    #[test]
    fn environment_is_the_fallback() {
        assert_eq!(pick_api_key(None, Some("env")).as_deref(), Some("env"));
        assert_eq!(pick_api_key(Some(""), Some("env")).as_deref(), Some("env"));
    }

    #[test]
    fn empty_everywhere_is_absent() {
        assert_eq!(pick_api_key(None, None), None);
        assert_eq!(pick_api_key(Some(""), Some("")), None);
    }

    #[test]
    fn unset_variable_is_absent() {
        assert_eq!(resolve_api_key(None, "AJAPOPAJA_TEST_SURELY_UNSET_KEY"), None);
        assert_eq!(
            resolve_api_key(Some("k"), "AJAPOPAJA_TEST_SURELY_UNSET_KEY").as_deref(),
            Some("k")
        );
    }
}
