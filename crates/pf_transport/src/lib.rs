// crates/pf_transport/src/lib.rs

//! PoreFlow 输运层
//!
//! 在孔隙网络上求解稳态输运：以喉道传导率为边权装配图拉普拉斯
//! 矩阵，施加边界条件后用预处理共轭梯度法求解，再由解场计算
//! 通过任意孔隙集合边界的净流率。
//!
//! # 模块概览
//!
//! - [`numerics`]: CSR 稀疏矩阵与 PCG 求解器
//! - [`boundary`]: 定值（Dirichlet）/ 定流率（Neumann）边界条件
//! - [`algorithm`]: 通用稳态输运及 Fickian 扩散、Stokes 流动封装
//!
//! # 特性开关
//!
//! - `parallel`: 启用基于 `rayon` 的并行矩阵-向量乘法

pub mod algorithm;
pub mod boundary;
pub mod numerics;

// 重导出常用类型
pub use algorithm::{FickianDiffusion, GenericTransport, StokesFlow, TransportSettings};
pub use boundary::{BcKind, BoundarySet};
pub use numerics::csr::{CsrBuilder, CsrMatrix};
pub use numerics::pcg::{PcgConfig, PcgResult, PcgSolver, PreconditionerType};
