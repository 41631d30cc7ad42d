// crates/pf_config/src/simulation.rs

//! SimulationConfig - 模拟配置（全 f64）
//!
//! 定义一次孔隙网络模拟的全部配置参数，使用 JSON 序列化，
//! 所有字段带默认值，缺省字段自动补全。

use crate::error::{ConfigError, ConfigResult};
use pf_foundation::validation::{ValidationError, ValidationReport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 模拟配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SimulationConfig {
    /// 网络配置
    #[serde(default)]
    pub network: NetworkConfig,

    /// 流体相
    #[serde(default)]
    pub phase: PhaseKind,

    /// 算法选择
    #[serde(default)]
    pub algorithm: AlgorithmKind,

    /// 边界条件
    #[serde(default)]
    pub bc: BcConfig,

    /// 求解器参数
    #[serde(default)]
    pub solver: SolverSection,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// 从 JSON 文件加载
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 序列化为格式化 JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 验证配置
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        if self.network.shape.iter().any(|&n| n == 0) {
            report.add_error(ValidationError::InvalidField {
                field: "network.shape",
                reason: format!("各方向必须至少为 1, 实际 {:?}", self.network.shape),
            });
        }
        if !(self.network.spacing > 0.0) || !self.network.spacing.is_finite() {
            report.add_error(ValidationError::InvalidField {
                field: "network.spacing",
                reason: format!("必须为正有限值, 实际 {}", self.network.spacing),
            });
        }
        if self.bc.inlet_label == self.bc.outlet_label {
            report.add_error(ValidationError::InvalidField {
                field: "bc.outlet_label",
                reason: format!("进出口标签相同: '{}'", self.bc.inlet_label),
            });
        }
        if self.bc.inlet_value == self.bc.outlet_value {
            report.add_error(ValidationError::InvalidField {
                field: "bc.outlet_value",
                reason: "进出口边界值相同, 无法驱动输运".to_string(),
            });
        }
        if !(self.solver.rtol > 0.0) {
            report.add_error(ValidationError::InvalidField {
                field: "solver.rtol",
                reason: format!("必须为正, 实际 {}", self.solver.rtol),
            });
        }
        if self.solver.max_iter == 0 {
            report.add_error(ValidationError::InvalidField {
                field: "solver.max_iter",
                reason: "必须至少为 1".to_string(),
            });
        }

        report
    }

    /// 验证并在失败时返回错误
    pub fn validated(self) -> ConfigResult<Self> {
        let report = self.validate();
        if report.has_errors() {
            return Err(ConfigError::Invalid {
                report: report.to_string(),
            });
        }
        Ok(self)
    }
}

/// 网络配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// 三个方向的孔隙数
    #[serde(default = "default_shape")]
    pub shape: [usize; 3],

    /// 格点间距 [m]
    #[serde(default = "default_spacing")]
    pub spacing: f64,

    /// 几何随机种子
    #[serde(default)]
    pub seed: u64,
}

fn default_shape() -> [usize; 3] {
    [10, 10, 10]
}
fn default_spacing() -> f64 {
    1e-4
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            shape: default_shape(),
            spacing: default_spacing(),
            seed: 0,
        }
    }
}

/// 流体相选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    /// 水
    #[default]
    Water,
    /// 空气
    Air,
}

/// 算法选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// Stokes 流动（压力驱动）
    #[default]
    Stokes,
    /// Fickian 扩散（浓度驱动）
    Fickian,
}

/// 边界条件配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BcConfig {
    /// 入口面标签
    #[serde(default = "default_inlet_label")]
    pub inlet_label: String,

    /// 出口面标签
    #[serde(default = "default_outlet_label")]
    pub outlet_label: String,

    /// 入口边界值（压力 [Pa] 或浓度 [mol/m³]）
    #[serde(default = "default_inlet_value")]
    pub inlet_value: f64,

    /// 出口边界值
    #[serde(default = "default_outlet_value")]
    pub outlet_value: f64,
}

fn default_inlet_label() -> String {
    "left".to_string()
}
fn default_outlet_label() -> String {
    "right".to_string()
}
fn default_inlet_value() -> f64 {
    202_650.0
}
fn default_outlet_value() -> f64 {
    101_325.0
}

impl Default for BcConfig {
    fn default() -> Self {
        Self {
            inlet_label: default_inlet_label(),
            outlet_label: default_outlet_label(),
            inlet_value: default_inlet_value(),
            outlet_value: default_outlet_value(),
        }
    }
}

/// 求解器参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSection {
    /// 相对容差
    #[serde(default = "default_rtol")]
    pub rtol: f64,

    /// 绝对容差
    #[serde(default = "default_atol")]
    pub atol: f64,

    /// 最大迭代次数
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

fn default_rtol() -> f64 {
    pf_foundation::constants::DEFAULT_RTOL
}
fn default_atol() -> f64 {
    pf_foundation::constants::DEFAULT_ATOL
}
fn default_max_iter() -> usize {
    pf_foundation::constants::DEFAULT_MAX_ITERATIONS
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            rtol: default_rtol(),
            atol: default_atol(),
            max_iter: default_max_iter(),
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出目录
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// 文件名前缀
    #[serde(default = "default_output_prefix")]
    pub prefix: String,

    /// 输出格式
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_output_prefix() -> String {
    "poreflow".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            prefix: default_output_prefix(),
            format: OutputFormat::default(),
        }
    }
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// VTK PolyData 格式
    #[default]
    Vtp,
    /// CSV 格式
    Csv,
    /// 不输出文件
    None,
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"network": {"shape": [5, 5, 5]}}"#).unwrap();
        assert_eq!(config.network.shape, [5, 5, 5]);
        assert!((config.network.spacing - 1e-4).abs() < 1e-18);
        assert_eq!(config.phase, PhaseKind::Water);
        assert_eq!(config.output.format, OutputFormat::Vtp);
    }

    #[test]
    fn test_enum_lowercase() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"phase": "air", "algorithm": "fickian"}"#).unwrap();
        assert_eq!(config.phase, PhaseKind::Air);
        assert_eq!(config.algorithm, AlgorithmKind::Fickian);
    }

    #[test]
    fn test_zero_shape_invalid() {
        let mut config = SimulationConfig::default();
        config.network.shape = [0, 5, 5];
        let report = config.validate();
        assert!(report.has_errors());
    }

    #[test]
    fn test_equal_bc_values_invalid() {
        let mut config = SimulationConfig::default();
        config.bc.inlet_value = 1.0;
        config.bc.outlet_value = 1.0;
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_validated_rejects_bad_config() {
        let mut config = SimulationConfig::default();
        config.solver.max_iter = 0;
        assert!(matches!(
            config.validated(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_roundtrip_json() {
        let config = SimulationConfig::default();
        let json = config.to_json().unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.network.shape, config.network.shape);
        assert_eq!(back.bc.inlet_label, config.bc.inlet_label);
    }
}
