// crates/pf_io/src/lib.rs

//! PoreFlow IO 层
//!
//! 提供数据输入输出功能。
//!
//! # 模块
//!
//! - [`import`]: 外部网络文件导入（Statoil 四文件格式）
//! - [`exporters`]: 数据导出（VTK PolyData、CSV）
//! - [`error`]: IO 错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use pf_io::import::statoil::load_statoil;
//! use pf_io::exporters::vtp::VtpExporter;
//!
//! let net = load_statoil("data/", "berea")?;
//! VtpExporter::new().export_network("berea.vtp", &net)?;
//! ```

pub mod error;
pub mod exporters;
pub mod import;

// 重导出常用类型
pub use error::{IoError, IoResult};
pub use exporters::csv::CsvExporter;
pub use exporters::vtp::VtpExporter;
pub use import::statoil::load_statoil;
