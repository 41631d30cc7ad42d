// crates/pf_models/src/library/mod.rs

//! 内置模型库
//!
//! 按来源对象类别分组：
//!
//! - [`misc`]: 常数、缩放等通用模型
//! - [`geometry`]: 孔隙/喉道尺寸模型（种子、直径、长度、体积、
//!   周长、尺寸因子）
//! - [`phase`]: 相物性关联式（水/空气的粘度、密度、扩散系数）
//! - [`physics`]: 传导率模型（扩散、水力）
//!
//! 每个模型是一个带类型化参数的结构体：字符串字段是按名称查找的
//! 输入属性键（带默认值），数值字段是标量参数。

pub mod geometry;
pub mod misc;
pub mod phase;
pub mod physics;

/// 导管分段：孔隙1 / 喉道 / 孔隙2
///
/// 尺寸因子模型按分段注册，三段共同描述一条串联导管。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConduitPart {
    /// 连接中编号较小的孔隙
    Pore1,
    /// 喉道本体
    Throat,
    /// 连接中编号较大的孔隙
    Pore2,
}

impl ConduitPart {
    /// 键后缀（`"pore1"` / `"throat"` / `"pore2"`）
    pub fn suffix(&self) -> &'static str {
        match self {
            ConduitPart::Pore1 => "pore1",
            ConduitPart::Throat => "throat",
            ConduitPart::Pore2 => "pore2",
        }
    }
}
