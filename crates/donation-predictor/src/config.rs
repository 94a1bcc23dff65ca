//! Predictor configuration types

use serde::{Deserialize, Serialize};

/// Which freshness predictor to run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PredictorConfig {
    /// Fixed label for every image (demo and testing)
    Static(StaticConfig),
    /// External program invoked with the image path
    Command(CommandConfig),
    /// Remote classifier reached over HTTP
    Http(HttpConfig),
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self::Static(StaticConfig::default())
    }
}

/// Static predictor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticConfig {
    /// Label returned for every image
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
        }
    }
}

fn default_label() -> String {
    "unknown".to_string()
}

/// External command configuration.
///
/// The image path is appended as the last argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Program to execute (looked up on PATH)
    pub program: String,
    /// Arguments passed before the image path
    #[serde(default)]
    pub args: Vec<String>,
    /// Time allowed for the program to finish (ms)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Remote HTTP classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Endpoint receiving `{"image_path": ...}` and answering `{"label": ...}`
    pub url: String,
    /// Request timeout (ms)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Optional bearer token sent with every request
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_timeout_ms() -> u64 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        predictor: PredictorConfig,
    }

    #[test]
    fn test_parse_static_default_label() {
        let w: Wrapper = toml::from_str("[predictor]\ntype = \"static\"\n").unwrap();
        match w.predictor {
            PredictorConfig::Static(cfg) => assert_eq!(cfg.label, "unknown"),
            other => panic!("unexpected config: {:?}", other),
        }
    }

    #[test]
    fn test_parse_command() {
        let toml_str = r#"
[predictor]
type = "command"
program = "python3"
args = ["predict_freshness.py", "--top1"]
"#;
        let w: Wrapper = toml::from_str(toml_str).unwrap();
        match w.predictor {
            PredictorConfig::Command(cfg) => {
                assert_eq!(cfg.program, "python3");
                assert_eq!(cfg.args, vec!["predict_freshness.py", "--top1"]);
                assert_eq!(cfg.timeout_ms, 30_000);
            }
            other => panic!("unexpected config: {:?}", other),
        }
    }

    #[test]
    fn test_parse_http() {
        let toml_str = r#"
[predictor]
type = "http"
url = "http://classifier:8000/predict"
timeout_ms = 2500
auth_token = "secret"
"#;
        let w: Wrapper = toml::from_str(toml_str).unwrap();
        match w.predictor {
            PredictorConfig::Http(cfg) => {
                assert_eq!(cfg.url, "http://classifier:8000/predict");
                assert_eq!(cfg.timeout_ms, 2500);
                assert_eq!(cfg.auth_token.as_deref(), Some("secret"));
            }
            other => panic!("unexpected config: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<Wrapper, _> = toml::from_str("[predictor]\ntype = \"onnx\"\n");
        assert!(result.is_err());
    }
}
