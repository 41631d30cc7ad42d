// crates/pf_foundation/src/validation.rs

//! 运行时验证工具
//!
//! 提供验证报告和错误/警告类型，用于网络健康检查和配置验证。
//!
//! # 示例
//!
//! ```
//! use pf_foundation::validation::{ValidationReport, ValidationError};
//!
//! let mut report = ValidationReport::new();
//! report.add_error(ValidationError::IsolatedPore { pore: 3 });
//!
//! if report.has_errors() {
//!     // 处理错误
//! }
//! ```

use std::fmt;

/// 验证报告
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// 错误列表
    pub errors: Vec<ValidationError>,
    /// 警告列表
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// 创建空的验证报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加错误
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 是否有警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 错误数量
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// 警告数量
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// 是否通过（无错误）
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// 合并另一份报告
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// 生成一行摘要
    pub fn summary(&self) -> String {
        format!(
            "{} 个错误, {} 个警告",
            self.error_count(),
            self.warning_count()
        )
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "验证报告: {}", self.summary())?;
        for e in &self.errors {
            writeln!(f, "  [错误] {}", e)?;
        }
        for w in &self.warnings {
            writeln!(f, "  [警告] {}", w)?;
        }
        Ok(())
    }
}

/// 验证错误
///
/// 表示数据中必须修复的问题，存在任一错误即视为验证失败。
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// 孤立孔隙（没有任何喉道连接）
    IsolatedPore {
        /// 孔隙索引
        pore: usize,
    },
    /// 自环喉道（两端连接同一孔隙）
    SelfLoop {
        /// 喉道索引
        throat: usize,
    },
    /// 重复喉道（与另一喉道连接相同的孔隙对）
    DuplicateThroat {
        /// 先出现的喉道索引
        first: usize,
        /// 重复的喉道索引
        duplicate: usize,
    },
    /// 喉道连接索引越界
    ConnOutOfRange {
        /// 喉道索引
        throat: usize,
        /// 越界的孔隙索引
        pore: usize,
        /// 孔隙总数
        pore_count: usize,
    },
    /// 非有限坐标
    NonFiniteCoord {
        /// 孔隙索引
        pore: usize,
    },
    /// 配置字段无效
    InvalidField {
        /// 字段名
        field: &'static str,
        /// 无效原因
        reason: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsolatedPore { pore } => write!(f, "孔隙 {} 没有任何喉道连接", pore),
            Self::SelfLoop { throat } => write!(f, "喉道 {} 两端连接同一孔隙", throat),
            Self::DuplicateThroat { first, duplicate } => {
                write!(f, "喉道 {} 与喉道 {} 连接相同的孔隙对", duplicate, first)
            }
            Self::ConnOutOfRange {
                throat,
                pore,
                pore_count,
            } => write!(
                f,
                "喉道 {} 引用的孔隙 {} 超出范围 0..{}",
                throat, pore, pore_count
            ),
            Self::NonFiniteCoord { pore } => write!(f, "孔隙 {} 坐标包含 NaN/Inf", pore),
            Self::InvalidField { field, reason } => {
                write!(f, "配置字段 {} 无效: {}", field, reason)
            }
        }
    }
}

/// 验证警告
///
/// 表示可疑但不致命的问题。
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// 属性数组含有 NaN（通常表示该元素未被任何对象覆盖）
    NanProperty {
        /// 属性键名
        key: String,
        /// NaN 元素个数
        count: usize,
    },
    /// 元素未被任何几何/物理对象覆盖
    UncoveredElements {
        /// 元素类别描述（"pore" 或 "throat"）
        element: &'static str,
        /// 未覆盖元素个数
        count: usize,
    },
    /// 空标签
    EmptyLabel {
        /// 标签名
        label: String,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NanProperty { key, count } => {
                write!(f, "属性 '{}' 含有 {} 个 NaN", key, count)
            }
            Self::UncoveredElements { element, count } => {
                write!(f, "{} 类元素有 {} 个未被任何对象覆盖", element, count)
            }
            Self::EmptyLabel { label } => write!(f, "标签 '{}' 为空", label),
        }
    }
}

// ============================================================================
// 测试
// ============================================================================
