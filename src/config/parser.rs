use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use std::fs;
use std::path::Path;

/// Loads and validates a TOML configuration file
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(
            r#"
            [crawl]
            seeds = ["http://www.mbl.is/"]
            topic = "golf"
            query-words = "birgir leifur"
            max-pages = 200
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.crawl.topic, "golf");
        assert_eq!(config.crawl.max_pages, 200);
        assert_eq!(config.crawl.user_agent, "RuBot");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/nonexistent/rubot.toml"));
        assert!(matches!(result, Err(crate::ConfigError::Io(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = write_config("this is not toml [[[");
        assert!(matches!(
            load_config(file.path()),
            Err(crate::ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let file = write_config(
            r#"
            [crawl]
            seeds = ["http://www.mbl.is/"]
            topic = "golf"
            query-words = "birgir leifur"
            max-pages = 0
            "#,
        );
        assert!(matches!(
            load_config(file.path()),
            Err(crate::ConfigError::Validation(_))
        ));
    }
}
