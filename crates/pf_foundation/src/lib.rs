// crates/pf_foundation/src/lib.rs

//! PoreFlow Foundation Layer
//!
//! 零依赖基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`constants`]: 物理常量
//! - [`validation`]: 运行时验证工具
//!
//! # 设计原则
//!
//! 1. **零外部依赖**: 仅依赖 thiserror
//! 2. **层次化**: 基础层只定义核心错误，网络/模型相关错误通过本层的
//!    通用变体表达，不反向依赖上层概念
//! 3. **可追溯**: 支持错误链
//!
//! # 示例
//!
//! ```
//! use pf_foundation::error::{PfError, PfResult};
//!
//! fn read_config() -> PfResult<()> {
//!     Err(PfError::config("配置文件格式错误"))
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod error;
pub mod validation;

// 重导出常用类型
pub use error::{PfError, PfResult};
pub use validation::{ValidationError, ValidationReport, ValidationWarning};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{PfError, PfResult};
    pub use crate::validation::{ValidationError, ValidationReport, ValidationWarning};
    pub use crate::{ensure, require};
}
