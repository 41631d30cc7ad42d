// crates/pf_models/src/library/geometry.rs

//! 几何尺寸模型
//!
//! 从随机种子出发，逐级派生孔隙直径、喉道直径、长度、面积、
//! 周长、体积与导管尺寸因子。默认键遵循惯例命名
//! （`pore.seed` -> `pore.diameter` -> `throat.diameter` -> ...）。
//!
//! 尺寸因子基于"球孔隙 + 圆柱喉道"的串联导管几何：喉道在两端
//! 各嵌入半个球形孔隙，三段的扩散/水力阻力按解析积分给出。

use super::ConduitPart;
use crate::context::ModelContext;
use crate::framework::PropertyModel;
use pf_foundation::error::{PfError, PfResult};
use pf_network::data::Element;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// 喉道长度下限与中心距之比，防止孔隙重叠时长度非正
const MIN_LENGTH_FRACTION: f64 = 1e-6;

// ============================================================================
// 孔隙模型
// ============================================================================

/// 孔隙随机种子
///
/// 以固定种子的伪随机数发生器在 `[lo, hi)` 内均匀取样，
/// 同一种子重复求值结果一致。
#[derive(Debug, Clone)]
pub struct PoreSeed {
    /// 随机数种子
    pub seed: u64,
    /// 取样下界
    pub lo: f64,
    /// 取样上界
    pub hi: f64,
}

impl PoreSeed {
    /// 创建模型，默认范围 [0, 1)
    pub fn new(seed: u64) -> Box<Self> {
        Box::new(Self {
            seed,
            lo: 0.0,
            hi: 1.0,
        })
    }

    /// 设置取样范围
    pub fn with_range(mut self: Box<Self>, lo: f64, hi: f64) -> Box<Self> {
        self.lo = lo;
        self.hi = hi;
        self
    }
}

impl PropertyModel for PoreSeed {
    fn element(&self) -> Element {
        Element::Pore
    }

    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let n = ctx.count(Element::Pore)?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok((0..n)
            .map(|_| self.lo + rng.gen::<f64>() * (self.hi - self.lo))
            .collect())
    }
}

/// Weibull 分布孔隙直径
///
/// 以均匀种子经 Weibull 分位函数变换：
/// d = loc + scale * (-ln(1 - s))^(1/shape)
#[derive(Debug, Clone)]
pub struct WeibullDiameter {
    /// 种子属性键
    pub seed_prop: String,
    /// 尺度参数 [m]
    pub scale: f64,
    /// 形状参数
    pub shape: f64,
    /// 位置参数 [m]
    pub loc: f64,
}

impl WeibullDiameter {
    /// 创建模型
    pub fn new(scale: f64, shape: f64, loc: f64) -> Box<Self> {
        Box::new(Self {
            seed_prop: "pore.seed".into(),
            scale,
            shape,
            loc,
        })
    }

    /// 设置种子属性键
    pub fn with_seed_prop(mut self: Box<Self>, prop: impl Into<String>) -> Box<Self> {
        self.seed_prop = prop.into();
        self
    }
}

impl PropertyModel for WeibullDiameter {
    fn element(&self) -> Element {
        Element::Pore
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.seed_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        if !(self.shape > 0.0) || !(self.scale > 0.0) {
            return Err(PfError::invalid_input(format!(
                "Weibull 参数必须为正: scale={}, shape={}",
                self.scale, self.shape
            )));
        }
        let seeds = ctx.lookup(&self.seed_prop)?;
        Ok(seeds
            .iter()
            .map(|&s| {
                let s = s.clamp(0.0, 1.0 - 1e-12);
                self.loc + self.scale * (-(1.0 - s).ln()).powf(1.0 / self.shape)
            })
            .collect())
    }
}

/// 球体积: V = π d³ / 6
#[derive(Debug, Clone)]
pub struct SphereVolume {
    /// 直径属性键
    pub diameter_prop: String,
}

impl SphereVolume {
    /// 创建模型，默认直径键 `pore.diameter`
    pub fn new() -> Box<Self> {
        Box::new(Self {
            diameter_prop: "pore.diameter".into(),
        })
    }
}

impl PropertyModel for SphereVolume {
    fn element(&self) -> Element {
        Element::Pore
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.diameter_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d = ctx.lookup(&self.diameter_prop)?;
        Ok(d.iter().map(|&d| PI * d.powi(3) / 6.0).collect())
    }
}

/// 立方体积: V = d³
#[derive(Debug, Clone)]
pub struct CubeVolume {
    /// 直径（边长）属性键
    pub diameter_prop: String,
}

impl CubeVolume {
    /// 创建模型，默认直径键 `pore.diameter`
    pub fn new() -> Box<Self> {
        Box::new(Self {
            diameter_prop: "pore.diameter".into(),
        })
    }
}

impl PropertyModel for CubeVolume {
    fn element(&self) -> Element {
        Element::Pore
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.diameter_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d = ctx.lookup(&self.diameter_prop)?;
        Ok(d.iter().map(|&d| d.powi(3)).collect())
    }
}

// ============================================================================
// 喉道模型
// ============================================================================

/// 喉道直径：相邻孔隙直径较小者乘以因子
#[derive(Debug, Clone)]
pub struct NeighborMinDiameter {
    /// 孔隙直径属性键
    pub pore_diameter_prop: String,
    /// 缩小因子 (0, 1]
    pub factor: f64,
}

impl NeighborMinDiameter {
    /// 创建模型，默认因子 0.5
    pub fn new() -> Box<Self> {
        Box::new(Self {
            pore_diameter_prop: "pore.diameter".into(),
            factor: 0.5,
        })
    }

    /// 设置缩小因子
    pub fn with_factor(mut self: Box<Self>, factor: f64) -> Box<Self> {
        self.factor = factor;
        self
    }
}

impl PropertyModel for NeighborMinDiameter {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.pore_diameter_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d_pore = ctx.lookup_global(&self.pore_diameter_prop)?;
        let conns = ctx.conns();
        let throats = ctx.indices(Element::Throat)?;
        Ok(throats
            .iter()
            .map(|&t| {
                let [a, b] = conns[t];
                self.factor * d_pore[a].min(d_pore[b])
            })
            .collect())
    }
}

/// 球-圆柱导管的喉道长度：中心距减去两端孔隙半径
#[derive(Debug, Clone)]
pub struct SpheresAndCylindersLength {
    /// 孔隙直径属性键
    pub pore_diameter_prop: String,
}

impl SpheresAndCylindersLength {
    /// 创建模型
    pub fn new() -> Box<Self> {
        Box::new(Self {
            pore_diameter_prop: "pore.diameter".into(),
        })
    }
}

impl PropertyModel for SpheresAndCylindersLength {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.pore_diameter_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d_pore = ctx.lookup_global(&self.pore_diameter_prop)?;
        let conns = ctx.conns();
        let coords = ctx.coords();
        let throats = ctx.indices(Element::Throat)?;
        Ok(throats
            .iter()
            .map(|&t| {
                let [a, b] = conns[t];
                let ctc = (coords[a] - coords[b]).length();
                let l = ctc - 0.5 * d_pore[a] - 0.5 * d_pore[b];
                l.max(ctc * MIN_LENGTH_FRACTION)
            })
            .collect())
    }
}

/// 圆柱截面积: A = π d² / 4
#[derive(Debug, Clone)]
pub struct CylinderArea {
    /// 喉道直径属性键
    pub diameter_prop: String,
}

impl CylinderArea {
    /// 创建模型
    pub fn new() -> Box<Self> {
        Box::new(Self {
            diameter_prop: "throat.diameter".into(),
        })
    }
}

impl PropertyModel for CylinderArea {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.diameter_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d = ctx.lookup(&self.diameter_prop)?;
        Ok(d.iter().map(|&d| PI * d * d / 4.0).collect())
    }
}

/// 方柱截面积: A = d²
#[derive(Debug, Clone)]
pub struct CuboidArea {
    /// 喉道直径属性键
    pub diameter_prop: String,
}

impl CuboidArea {
    /// 创建模型
    pub fn new() -> Box<Self> {
        Box::new(Self {
            diameter_prop: "throat.diameter".into(),
        })
    }
}

impl PropertyModel for CuboidArea {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.diameter_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d = ctx.lookup(&self.diameter_prop)?;
        Ok(d.iter().map(|&d| d * d).collect())
    }
}

/// 圆柱周长: P = π d
#[derive(Debug, Clone)]
pub struct CylinderPerimeter {
    /// 喉道直径属性键
    pub diameter_prop: String,
}

impl CylinderPerimeter {
    /// 创建模型
    pub fn new() -> Box<Self> {
        Box::new(Self {
            diameter_prop: "throat.diameter".into(),
        })
    }
}

impl PropertyModel for CylinderPerimeter {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.diameter_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d = ctx.lookup(&self.diameter_prop)?;
        Ok(d.iter().map(|&d| PI * d).collect())
    }
}

/// 方柱周长: P = 4 d
#[derive(Debug, Clone)]
pub struct CuboidPerimeter {
    /// 喉道直径属性键
    pub diameter_prop: String,
}

impl CuboidPerimeter {
    /// 创建模型
    pub fn new() -> Box<Self> {
        Box::new(Self {
            diameter_prop: "throat.diameter".into(),
        })
    }
}

impl PropertyModel for CuboidPerimeter {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.diameter_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d = ctx.lookup(&self.diameter_prop)?;
        Ok(d.iter().map(|&d| 4.0 * d).collect())
    }
}

/// 矩形（二维）周长：恒为 1
#[derive(Debug, Clone, Default)]
pub struct RectanglePerimeter;

impl RectanglePerimeter {
    /// 创建模型
    pub fn new() -> Box<Self> {
        Box::new(Self)
    }
}

impl PropertyModel for RectanglePerimeter {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        Ok(vec![1.0; ctx.count(Element::Throat)?])
    }
}

/// 圆柱体积: V = π d² L / 4
#[derive(Debug, Clone)]
pub struct CylinderVolume {
    /// 喉道直径属性键
    pub diameter_prop: String,
    /// 喉道长度属性键
    pub length_prop: String,
}

impl CylinderVolume {
    /// 创建模型
    pub fn new() -> Box<Self> {
        Box::new(Self {
            diameter_prop: "throat.diameter".into(),
            length_prop: "throat.length".into(),
        })
    }
}

impl PropertyModel for CylinderVolume {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.diameter_prop.clone(), self.length_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d = ctx.lookup(&self.diameter_prop)?;
        let l = ctx.lookup(&self.length_prop)?;
        Ok(d.iter()
            .zip(l.iter())
            .map(|(&d, &l)| PI * d * d / 4.0 * l)
            .collect())
    }
}

// ============================================================================
// 尺寸因子
// ============================================================================

/// 球-圆柱导管的分段几何量
struct ConduitGeometry {
    /// 孔隙1半径
    r1: f64,
    /// 孔隙2半径
    r2: f64,
    /// 喉道半径
    rt: f64,
    /// 孔隙1内的轴向半长
    l1: f64,
    /// 孔隙2内的轴向半长
    l2: f64,
    /// 喉道段长度
    lt: f64,
}

/// 计算一条导管的分段几何量
///
/// 喉道半径被截断到略小于两端孔隙半径，避免退化。
fn conduit_geometry(
    ctc: f64,
    d_pore1: f64,
    d_pore2: f64,
    d_throat: f64,
) -> ConduitGeometry {
    let r1 = 0.5 * d_pore1;
    let r2 = 0.5 * d_pore2;
    let rt = (0.5 * d_throat).min(0.9999 * r1.min(r2));
    let l1 = (r1 * r1 - rt * rt).max(0.0).sqrt();
    let l2 = (r2 * r2 - rt * rt).max(0.0).sqrt();
    let lt = (ctc - l1 - l2).max(ctc * MIN_LENGTH_FRACTION);
    ConduitGeometry {
        r1,
        r2,
        rt,
        l1,
        l2,
        lt,
    }
}

/// 球孔隙段的扩散尺寸因子: F = 2πR / ln((R+L)/(R-L))
///
/// 由 1/F = ∫₀ᴸ dx / (π(R²-x²)) 解析积分而来。
fn sphere_diffusive_factor(r: f64, l: f64) -> f64 {
    let l = l.min(r * (1.0 - 1e-12));
    if l <= 0.0 {
        return f64::INFINITY;
    }
    2.0 * PI * r / ((r + l) / (r - l)).ln()
}

/// 球孔隙段的水力尺寸因子: F = π / (8 I)
///
/// I = ∫₀ᴸ dx / (R²-x²)² = L/(2R²(R²-L²)) + atanh(L/R)/(2R³)
fn sphere_hydraulic_factor(r: f64, l: f64) -> f64 {
    let l = l.min(r * (1.0 - 1e-12));
    if l <= 0.0 {
        return f64::INFINITY;
    }
    let i = l / (2.0 * r * r * (r * r - l * l)) + (l / r).atanh() / (2.0 * r.powi(3));
    PI / (8.0 * i)
}

/// 球-圆柱导管的扩散尺寸因子（按分段注册）
///
/// 通常以三个键注册：`throat.diffusive_size_factors.pore1` /
/// `.throat` / `.pore2`，供扩散传导率模型组合为串联阻力。
#[derive(Debug, Clone)]
pub struct DiffusiveSizeFactor {
    /// 导管分段
    pub part: ConduitPart,
    /// 孔隙直径属性键
    pub pore_diameter_prop: String,
    /// 喉道直径属性键
    pub throat_diameter_prop: String,
}

impl DiffusiveSizeFactor {
    /// 创建指定分段的模型
    pub fn new(part: ConduitPart) -> Box<Self> {
        Box::new(Self {
            part,
            pore_diameter_prop: "pore.diameter".into(),
            throat_diameter_prop: "throat.diameter".into(),
        })
    }
}

impl PropertyModel for DiffusiveSizeFactor {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        vec![
            self.pore_diameter_prop.clone(),
            self.throat_diameter_prop.clone(),
        ]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d_pore = ctx.lookup_global(&self.pore_diameter_prop)?;
        let d_throat = ctx.lookup(&self.throat_diameter_prop)?;
        let conns = ctx.conns();
        let coords = ctx.coords();
        let throats = ctx.indices(Element::Throat)?;

        Ok(throats
            .iter()
            .zip(d_throat.iter())
            .map(|(&t, &dt)| {
                let [a, b] = conns[t];
                let ctc = (coords[a] - coords[b]).length();
                let geo = conduit_geometry(ctc, d_pore[a], d_pore[b], dt);
                match self.part {
                    ConduitPart::Pore1 => sphere_diffusive_factor(geo.r1, geo.l1),
                    ConduitPart::Pore2 => sphere_diffusive_factor(geo.r2, geo.l2),
                    ConduitPart::Throat => PI * geo.rt * geo.rt / geo.lt,
                }
            })
            .collect())
    }
}

/// 球-圆柱导管的水力尺寸因子（按分段注册）
///
/// 定义使得分段水力传导率 g = F / μ。圆柱段 F = π r⁴ / (8 L)。
#[derive(Debug, Clone)]
pub struct HydraulicSizeFactor {
    /// 导管分段
    pub part: ConduitPart,
    /// 孔隙直径属性键
    pub pore_diameter_prop: String,
    /// 喉道直径属性键
    pub throat_diameter_prop: String,
}

impl HydraulicSizeFactor {
    /// 创建指定分段的模型
    pub fn new(part: ConduitPart) -> Box<Self> {
        Box::new(Self {
            part,
            pore_diameter_prop: "pore.diameter".into(),
            throat_diameter_prop: "throat.diameter".into(),
        })
    }
}

impl PropertyModel for HydraulicSizeFactor {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        vec![
            self.pore_diameter_prop.clone(),
            self.throat_diameter_prop.clone(),
        ]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d_pore = ctx.lookup_global(&self.pore_diameter_prop)?;
        let d_throat = ctx.lookup(&self.throat_diameter_prop)?;
        let conns = ctx.conns();
        let coords = ctx.coords();
        let throats = ctx.indices(Element::Throat)?;

        Ok(throats
            .iter()
            .zip(d_throat.iter())
            .map(|(&t, &dt)| {
                let [a, b] = conns[t];
                let ctc = (coords[a] - coords[b]).length();
                let geo = conduit_geometry(ctc, d_pore[a], d_pore[b], dt);
                match self.part {
                    ConduitPart::Pore1 => sphere_hydraulic_factor(geo.r1, geo.l1),
                    ConduitPart::Pore2 => sphere_hydraulic_factor(geo.r2, geo.l2),
                    ConduitPart::Throat => PI * geo.rt.powi(4) / (8.0 * geo.lt),
                }
            })
            .collect())
    }
}

// ============================================================================
// 测试
// ============================================================================
