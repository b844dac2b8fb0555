//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(|e| std::io::Error::other(e))?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[data]
csv_dir = /var/data/bars

[watch]
symbols = AAPL, MSFT, GOOG
timezone = Europe/Bucharest

[output]
annotated_csv = /tmp/alerts.csv
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "csv_dir"),
            Some("/var/data/bars".to_string())
        );
        assert_eq!(
            adapter.get_string("watch", "symbols"),
            Some("AAPL, MSFT, GOOG".to_string())
        );
        assert_eq!(
            adapter.get_string("watch", "timezone"),
            Some("Europe/Bucharest".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[watch]\nsymbols = AAPL\n").unwrap();
        assert_eq!(adapter.get_string("watch", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value_or_default() {
        let adapter =
            FileConfigAdapter::from_string("[watch]\nsnapshot_rows = 7\nbad = abc\n").unwrap();
        assert_eq!(adapter.get_int("watch", "snapshot_rows", 5), 7);
        assert_eq!(adapter.get_int("watch", "missing", 5), 5);
        assert_eq!(adapter.get_int("watch", "bad", 5), 5);
    }

    #[test]
    fn get_double_returns_value_or_default() {
        let adapter =
            FileConfigAdapter::from_string("[watch]\nmultiplier = 2.5\nbad = nope\n").unwrap();
        assert_eq!(adapter.get_double("watch", "multiplier", 0.0), 2.5);
        assert_eq!(adapter.get_double("watch", "missing", 99.9), 99.9);
        assert_eq!(adapter.get_double("watch", "bad", 99.9), 99.9);
    }

    #[test]
    fn get_bool_recognises_common_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[output]\na = true\nb = yes\nc = 1\nd = false\ne = no\nf = 0\n",
        )
        .unwrap();
        assert!(adapter.get_bool("output", "a", false));
        assert!(adapter.get_bool("output", "b", false));
        assert!(adapter.get_bool("output", "c", false));
        assert!(!adapter.get_bool("output", "d", true));
        assert!(!adapter.get_bool("output", "e", true));
        assert!(!adapter.get_bool("output", "f", true));
    }

    #[test]
    fn get_bool_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[output]\n").unwrap();
        assert!(adapter.get_bool("output", "missing", true));
        assert!(!adapter.get_bool("output", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let content = "[data]\ncsv_dir = /srv/bars\n";
        let file = create_temp_config(content);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "csv_dir"),
            Some("/srv/bars".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }
}
