// crates/pf_config/src/error.rs

//! 配置错误类型

use std::path::PathBuf;
use thiserror::Error;

/// 配置结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取失败
    #[error("配置文件读取失败: {path}: {source}")]
    Read {
        /// 文件路径
        path: PathBuf,
        /// 底层 IO 错误
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析失败
    #[error("配置解析失败: {path}: {source}")]
    Parse {
        /// 文件路径
        path: PathBuf,
        /// 底层解析错误
        #[source]
        source: serde_json::Error,
    },

    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),

    /// 验证失败
    #[error("配置验证失败: {report}")]
    Invalid {
        /// 验证报告文本
        report: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_contains_path() {
        let err = ConfigError::Read {
            path: "sim.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no"),
        };
        assert!(err.to_string().contains("sim.json"));
    }
}
