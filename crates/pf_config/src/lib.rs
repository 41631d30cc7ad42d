// crates/pf_config/src/lib.rs

//! PoreFlow 配置层
//!
//! 定义模拟的全部配置参数（JSON 序列化），并提供加载与验证。
//!
//! # 模块
//!
//! - [`simulation`]: `SimulationConfig` 及各小节
//! - [`error`]: 配置错误类型

pub mod error;
pub mod simulation;

pub use error::{ConfigError, ConfigResult};
pub use simulation::{
    AlgorithmKind, BcConfig, NetworkConfig, OutputConfig, OutputFormat, PhaseKind,
    SimulationConfig, SolverSection,
};
