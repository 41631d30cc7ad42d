// crates/pf_models/src/library/misc.rs

//! 通用模型

use crate::context::ModelContext;
use crate::framework::PropertyModel;
use pf_foundation::error::PfResult;
use pf_network::data::Element;

/// 常数模型：以同一数值填充目标子集
#[derive(Debug, Clone)]
pub struct Constant {
    /// 输出元素类别
    pub element: Element,
    /// 填充值
    pub value: f64,
}

impl Constant {
    /// 创建孔隙常数模型
    pub fn pore(value: f64) -> Box<Self> {
        Box::new(Self {
            element: Element::Pore,
            value,
        })
    }

    /// 创建喉道常数模型
    pub fn throat(value: f64) -> Box<Self> {
        Box::new(Self {
            element: Element::Throat,
            value,
        })
    }
}

impl PropertyModel for Constant {
    fn element(&self) -> Element {
        self.element
    }

    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        Ok(vec![self.value; ctx.count(self.element)?])
    }
}

/// 缩放模型：输出 = 输入属性 × 系数
#[derive(Debug, Clone)]
pub struct Scaled {
    /// 输入属性键
    pub prop: String,
    /// 缩放系数
    pub factor: f64,
}

impl Scaled {
    /// 创建缩放模型
    pub fn new(prop: impl Into<String>, factor: f64) -> Box<Self> {
        Box::new(Self {
            prop: prop.into(),
            factor,
        })
    }
}

impl PropertyModel for Scaled {
    fn element(&self) -> Element {
        // 输出元素类别跟随输入键；键非法时在 add_model 的前缀校验中报错
        Element::parse_key(&self.prop).unwrap_or(Element::Pore)
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let input = ctx.lookup(&self.prop)?;
        Ok(input.iter().map(|v| v * self.factor).collect())
    }
}

// ============================================================================
// 测试
// ============================================================================
