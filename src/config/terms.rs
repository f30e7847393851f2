use crate::builder::TermParams;
use crate::exclusion::UnwantedNeighbors;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Parameters plus the exclusion relation for one build.
#[derive(Debug, Default, Deserialize)]
pub struct TermConfig {
    #[serde(default)]
    pub params: TermParams,
    /// Stable-id keyed unwanted neighbours, e.g. `{"12": [3, 40]}`.
    #[serde(default)]
    pub unwanted: UnwantedNeighbors,
}

pub fn load_config(path: &Path) -> Result<TermConfig, String> {
    read_json(path)
}

/// Load a bare `TermParams` object; missing fields take their defaults.
pub fn load_params(path: &Path) -> Result<TermParams, String> {
    let params: TermParams = read_json(path)?;
    params
        .validate()
        .map_err(|e| format!("Invalid params in {}: {e}", path.display()))?;
    Ok(params)
}

pub fn load_unwanted(path: &Path) -> Result<UnwantedNeighbors, String> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DegeneratePolicy;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("high_order_terms_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_full_config() {
        let path = write_temp(
            "full.json",
            r#"{"params": {"scale": 12.5, "degenerate_policy": "fail"}, "unwanted": {"4": [7]}}"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.params.scale, 12.5);
        assert_eq!(config.params.degenerate_policy, DegeneratePolicy::Fail);
        assert!(config.unwanted.excluded_by(4).unwrap().contains(&7));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let path = write_temp("bad.json", r#"{"scale": -1.0}"#);
        let err = load_params(&path).unwrap_err();
        assert!(err.contains("scale"), "{err}");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_unwanted(Path::new("/nonexistent/unwanted.json")).unwrap_err();
        assert!(err.contains("/nonexistent/unwanted.json"));
    }
}
