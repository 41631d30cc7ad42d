// crates/pf_transport/src/algorithm/mod.rs

//! 稳态输运算法
//!
//! - [`generic`]: 通用稳态输运（装配、求解、流率查询）
//! - [`fickian`]: Fickian 扩散封装
//! - [`stokes`]: Stokes 流动封装

pub mod fickian;
pub mod generic;
pub mod stokes;

pub use fickian::FickianDiffusion;
pub use generic::{GenericTransport, TransportSettings};
pub use stokes::StokesFlow;
