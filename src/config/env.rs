//! Environment lookups for configuration locations.

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "PIE_CHART_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Gets the config file path from `PIE_CHART_CONFIG`, falling back to
/// `config.toml` in the working directory.
#[must_use]
pub fn get_config_path() -> String {
    std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_is_never_empty() {
        // Depends on the test environment; either the override or the default
        let path = get_config_path();
        assert!(!path.is_empty());
    }
}
