// crates/pf_io/src/error.rs

//! IO 错误类型

use pf_foundation::error::PfError;
use std::path::PathBuf;
use thiserror::Error;

/// IO 结果类型
pub type IoResult<T> = Result<T, IoError>;

/// IO 层错误
#[derive(Error, Debug)]
pub enum IoError {
    /// 底层 IO 错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// 核心层错误透传
    #[error(transparent)]
    Core(#[from] PfError),

    /// 文件解析错误
    #[error("文件解析错误: {file} 第{line}行: {message}")]
    Parse {
        /// 文件路径
        file: PathBuf,
        /// 行号（从 1 开始）
        line: usize,
        /// 错误信息
        message: String,
    },

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// 数据不完整
    #[error("数据不完整: {0}")]
    MissingData(String),
}

impl IoError {
    /// 解析错误
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// 文件不存在
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = IoError::parse("net_link1.dat", 3, "字段不足");
        let msg = err.to_string();
        assert!(msg.contains("net_link1.dat"));
        assert!(msg.contains("第3行"));
    }

    #[test]
    fn test_core_error_passthrough() {
        let err: IoError = PfError::invalid_input("测试").into();
        assert!(err.to_string().contains("无效"));
    }
}
