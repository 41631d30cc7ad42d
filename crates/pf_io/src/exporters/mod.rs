// crates/pf_io/src/exporters/mod.rs

//! 数据导出

pub mod csv;
pub mod vtp;
