// crates/pf_io/src/import/mod.rs

//! 外部网络文件导入

pub mod statoil;
