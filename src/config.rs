use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::ModelConfig;

pub fn load_config(path: &Path) -> Result<ModelConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MmsnConfig;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn write_temp(contents: &str, extension: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be available")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("queue-unit-{}.{}", nanos, extension));
        fs::write(&path, contents).expect("config write should succeed");
        path
    }

    #[test]
    fn loads_toml() {
        let path = write_temp("model = \"mmsn\"\nlambda = 0.5\nmu = 1\ns = 2\nN = 4\n", "toml");
        let config = load_config(&path).unwrap();
        assert_eq!(
            config,
            ModelConfig::Mmsn(MmsnConfig {
                lambda: 0.5,
                mu: 1.0,
                s: 2,
                population: 4,
                n: None,
            })
        );
    }

    #[test]
    fn rejects_unknown_extension() {
        let path = write_temp("{}", "yaml");
        let err = load_config(&path).unwrap_err();
        assert_eq!(err.to_string(), "unsupported config format 'yaml'");
    }

    #[test]
    fn reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/queue.toml")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read config"));
    }

    #[test]
    fn reports_parse_errors() {
        let path = write_temp("{\"model\": \"mm1\"}", "json");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse JSON"));
    }
}
