// crates/pf_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `PfError` 枚举和 `PfResult` 类型别名，用于整个项目的错误处理。
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层定义核心错误；网络、模型、求解相关的错误
//!    通过带上下文的变体表达
//! 2. **易用性**: 提供便捷的构造方法
//! 3. **可诊断**: 属性查找失败携带完整的查找链，关联缺失携带缺失项
//!
//! # 示例
//!
//! ```
//! use pf_foundation::error::{PfError, PfResult};
//!
//! fn lookup() -> PfResult<()> {
//!     Err(PfError::property_not_found(
//!         "pore.viscosity",
//!         vec!["physics 'phys_01'".into(), "phase 'water'".into()],
//!     ))
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type PfResult<T> = Result<T, PfError>;

/// PoreFlow 错误类型
///
/// 核心错误类型，用于整个项目。
#[derive(Error, Debug)]
pub enum PfError {
    // ========================================================================
    // IO 相关错误
    // ========================================================================

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// 文件解析错误
    #[error("文件解析错误: {file} 第{line}行: {message}")]
    ParseError {
        /// 文件路径
        file: PathBuf,
        /// 行号（从 1 开始）
        line: usize,
        /// 错误信息
        message: String,
    },

    // ========================================================================
    // 数据相关错误
    // ========================================================================

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: String,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    /// 属性未找到
    ///
    /// 携带完整的查找链，便于诊断模型参数拼写错误或缺失的前置模型。
    #[error("属性 '{key}' 未找到，已查找: {searched:?}")]
    PropertyNotFound {
        /// 属性键名，如 "pore.diameter"
        key: String,
        /// 已查找过的对象描述列表
        searched: Vec<String>,
    },

    // ========================================================================
    // 对象关联错误
    // ========================================================================

    /// 对象关联缺失
    ///
    /// 在关联建立之前访问关联对象，或以错误的顺序建立关联
    /// （如 physics 先关联 geometry 再关联 phase）时返回。
    #[error("对象 '{object}' 缺少关联: 需要先设置 {needs}")]
    NotAssociated {
        /// 发起访问的对象名称
        object: String,
        /// 缺失的关联描述
        needs: String,
    },

    /// 名称重复
    #[error("名称重复: '{name}' 已存在")]
    DuplicateName {
        /// 冲突的名称
        name: String,
    },

    // ========================================================================
    // 模型与求解错误
    // ========================================================================

    /// 模型依赖环
    ///
    /// 属性模型之间的依赖关系构成环，无法确定再生顺序。
    #[error("模型依赖存在环路，无法确定再生顺序: {props:?}")]
    ModelCycle {
        /// 参与环路的属性名列表
        props: Vec<String>,
    },

    /// 缺少边界条件
    #[error("缺少边界条件: 求解 '{quantity}' 至少需要一个定值边界条件")]
    MissingBoundaryCondition {
        /// 待求解量的属性名
        quantity: String,
    },

    /// 边界条件冲突
    #[error("边界条件冲突: 孔隙 {pore} 已设置 {existing}")]
    BcConflict {
        /// 冲突的孔隙索引
        pore: usize,
        /// 已存在的边界条件描述
        existing: String,
    },

    /// 求解器错误
    #[error("求解器错误: {message}")]
    Solver {
        /// 具体错误信息
        message: String,
    },

    // ========================================================================
    // 其他
    // ========================================================================

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 验证失败
    #[error("验证失败: {0}")]
    Validation(String),

    /// 资源未找到
    #[error("资源未找到: {resource}")]
    NotFound {
        /// 资源名称
        resource: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl PfError {
    /// 从IO错误创建
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 文件不存在
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// 解析错误
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// 属性未找到
    pub fn property_not_found(key: impl Into<String>, searched: Vec<String>) -> Self {
        Self::PropertyNotFound {
            key: key.into(),
            searched,
        }
    }

    /// 对象关联缺失
    pub fn not_associated(object: impl Into<String>, needs: impl Into<String>) -> Self {
        Self::NotAssociated {
            object: object.into(),
            needs: needs.into(),
        }
    }

    /// 名称重复
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// 模型依赖环
    pub fn model_cycle(props: Vec<String>) -> Self {
        Self::ModelCycle { props }
    }

    /// 求解器错误
    pub fn solver(message: impl Into<String>) -> Self {
        Self::Solver {
            message: message.into(),
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 验证失败
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 资源未找到
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl PfError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &str, expected: usize, actual: usize) -> PfResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查索引是否在范围内
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> PfResult<()> {
        if index >= len {
            Err(Self::index_out_of_bounds(index_type, index, len))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for PfError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// ========================================================================
// 辅助宏
// ========================================================================

/// 条件不满足时提前返回错误
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

/// 从 Option 中取值，缺失时提前返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr) => {
        match $opt {
            Some(v) => v,
            None => return Err($err),
        }
    };
}

// ========================================================================
// 测试
// ========================================================================
