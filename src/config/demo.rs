use crate::builder::TermParams;
use crate::exclusion::UnwantedNeighbors;
use crate::raster::io::load_mask;
use crate::scan::{ScanRaster, ScanSet};
use crate::types::Candidate;
use nalgebra::Vector2;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Which accumulation the demo runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Hard,
    Soft,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScanSource {
    pub mask: PathBuf,
    #[serde(default)]
    pub zero_zero: [i32; 2],
}

impl ScanSource {
    pub fn load(&self, base: &Path) -> Result<ScanRaster, String> {
        let mask = load_mask(&base.join(&self.mask))?;
        Ok(ScanRaster::new(mask, Vector2::from(self.zero_zero)))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
    pub debug_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct RuntimeConfig {
    pub floor_plan: PathBuf,
    /// Scan sources indexed `[color][rotation]`.
    pub scans: Vec<Vec<ScanSource>>,
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub params: TermParams,
    /// Stable-id keyed unwanted neighbours, e.g. `{"12": [3, 40]}`.
    #[serde(default)]
    pub unwanted: UnwantedNeighbors,
    #[serde(default)]
    pub output: OutputConfig,
    /// Directory relative paths resolve against; set by the loader.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl RuntimeConfig {
    pub fn load_scans(&self) -> Result<ScanSet, String> {
        let scans = self
            .scans
            .iter()
            .map(|rotations| {
                rotations
                    .iter()
                    .map(|src| src.load(&self.base_dir))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScanSet::new(scans))
    }

    pub fn floor_plan_path(&self) -> PathBuf {
        self.base_dir.join(&self.floor_plan)
    }
}

pub fn load_runtime_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let mut config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    config
        .params
        .validate()
        .map_err(|e| format!("Invalid params in {}: {e}", path.display()))?;
    config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(config)
}

pub fn parse_cli(program: &str) -> Result<RuntimeConfig, String> {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| format!("Usage: {program} <config.json>"))?;
    if args.next().is_some() {
        return Err(format!("Usage: {program} <config.json>"));
    }
    load_runtime_config(Path::new(&path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_runtime_config_with_defaults() {
        let json = r#"{
            "floor_plan": "plan.png",
            "scans": [[{"mask": "s0.png", "zero_zero": [3, 4]}]],
            "candidates": [{"id": 7, "x": 1, "y": 2, "rotation": 0, "color": 0}],
            "variant": "soft",
            "params": {"scale": 2.0},
            "unwanted": {"7": [8]}
        }"#;
        let config: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.variant, Variant::Soft);
        assert_eq!(config.scans[0][0].zero_zero, [3, 4]);
        assert!(!config.candidates[0].locked);
        assert_eq!(config.params.scale, 2.0);
        assert!(config.unwanted.excluded_by(7).unwrap().contains(&8));
        assert!(config.output.json_out.is_none());
    }

    #[test]
    fn loader_reads_relation_and_resolves_paths() {
        let dir = std::env::temp_dir().join(format!("high_order_terms_demo_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("run.json");
        fs::write(
            &path,
            r#"{
                "floor_plan": "plan.png",
                "scans": [],
                "candidates": [],
                "unwanted": {"7": [8, 9], "-3": [7]}
            }"#,
        )
        .unwrap();

        let config = load_runtime_config(&path).unwrap();
        let excluded = config.unwanted.excluded_by(7).unwrap();
        assert!(excluded.contains(&8) && excluded.contains(&9));
        assert!(config.unwanted.excluded_by(-3).unwrap().contains(&7));
        assert_eq!(config.variant, Variant::Hard);
        assert_eq!(config.params, TermParams::default());
        assert_eq!(config.floor_plan_path(), dir.join("plan.png"));
    }

    #[test]
    fn loader_rejects_invalid_params() {
        let dir = std::env::temp_dir().join(format!("high_order_terms_demo_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad_run.json");
        fs::write(
            &path,
            r#"{"floor_plan": "p.png", "scans": [], "candidates": [], "params": {"kernel_sigma": [0.0, 5.0]}}"#,
        )
        .unwrap();
        let err = load_runtime_config(&path).unwrap_err();
        assert!(err.contains("kernel sigma"), "{err}");
    }
}
