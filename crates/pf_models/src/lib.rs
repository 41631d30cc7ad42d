// crates/pf_models/src/lib.rs

//! PoreFlow 模型层
//!
//! 本 crate 是项目的核心机制所在：**依赖驱动的属性模型再生**。
//! 上游属性（如温度）变化后，所有直接或间接依赖它的派生物性
//! （粘度、扩散系数、传导率）按依赖拓扑序自动重算。
//!
//! # 模块概览
//!
//! - [`framework`]: `PropertyModel` trait、模型注册表与拓扑排序
//! - [`context`]: 模型求值上下文与属性查找链
//! - [`project`]: `Project` 及 Geometry / Phase / Physics 对象与关联规则
//! - [`library`]: 内置模型库（几何尺寸、相物性、传导率）
//!
//! # 对象关联规则
//!
//! Physics 对象必须**先**关联 Phase，**再**关联 Geometry；顺序颠倒
//! 或在关联建立前经由它查找属性都会得到描述性错误。
//!
//! # 属性查找链
//!
//! 模型求值时按链查找字符串键：
//!
//! - Geometry 模型: 本对象 → 网络（含所有 geometry 的插值拼接）
//! - Phase 模型: 本相（含其 physics） → 网络
//! - Physics 模型: 所属相（含其 physics） → 网络（含所有 geometry）

pub mod context;
pub mod framework;
pub mod library;
pub mod project;

// 重导出常用类型
pub use context::ModelContext;
pub use framework::{ModelRegistry, PropertyModel, RegenMode};
pub use project::{GeometryId, PhaseId, PhysicsId, Project, Target};
