// crates/pf_network/src/lib.rs

//! PoreFlow 孔隙网络层
//!
//! 孔隙网络将多孔介质的孔隙空间抽象为图：孔隙（pore）为节点，
//! 喉道（throat）为连接节点的边。本 crate 提供：
//!
//! - [`topology`]: 网络拓扑（坐标、连接、邻接查询）
//! - [`data`]: 字符串键控的按元素属性存储
//! - [`labels`]: 命名布尔掩码（标签）及其组合运算
//! - [`generation`]: 结构化立方网络生成器
//! - [`validate`]: 网络健康检查
//!
//! # 键约定
//!
//! 属性与标签统一使用 `"pore.<名称>"` / `"throat.<名称>"` 形式的键，
//! 前缀决定数组长度（Np 或 Nt）。
//!
//! # 示例
//!
//! ```
//! use pf_network::generation::Cubic;
//!
//! let net = Cubic::new([3, 3, 3]).with_spacing(1e-4).build().unwrap();
//! assert_eq!(net.pore_count(), 27);
//! assert_eq!(net.throat_count(), 54);
//! ```

pub mod data;
pub mod generation;
pub mod labels;
pub mod topology;
pub mod validate;

// 重导出常用类型
pub use data::{Element, PropertyStore};
pub use generation::Cubic;
pub use labels::{LabelMode, LabelStore};
pub use topology::Network;
