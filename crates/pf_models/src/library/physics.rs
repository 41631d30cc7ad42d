// crates/pf_models/src/library/physics.rs

//! 传导率模型
//!
//! 将相物性与导管尺寸因子组合为喉道传导率。尺寸因子有两种
//! 给法：
//!
//! - 单数组：基键本身存在（如 `throat.diffusive_size_factors`），
//!   整条导管一个因子，g = X · F
//! - 三段式：基键加 `.pore1` / `.throat` / `.pore2` 后缀的三个数组，
//!   三段按串联阻力组合，1/g = 1/(X₁F₁) + 1/(XₜFₜ) + 1/(X₂F₂)
//!
//! 其中 X 为相应的输运物性（扩散系数或 1/μ）。

use super::ConduitPart;
use crate::context::ModelContext;
use crate::framework::PropertyModel;
use pf_foundation::error::{PfError, PfResult};
use pf_network::data::Element;

/// 尺寸因子的解析结果
enum SizeFactors {
    /// 整条导管单一因子
    Single(Vec<f64>),
    /// pore1 / throat / pore2 三段因子
    Triplet(Vec<f64>, Vec<f64>, Vec<f64>),
}

/// 解析尺寸因子：先查基键，再查三段键
fn resolve_size_factors(ctx: &ModelContext<'_>, base: &str) -> PfResult<SizeFactors> {
    match ctx.lookup(base) {
        Ok(v) => return Ok(SizeFactors::Single(v)),
        Err(PfError::PropertyNotFound { .. }) => {}
        Err(e) => return Err(e),
    }

    let key = |part: ConduitPart| format!("{}.{}", base, part.suffix());
    let f1 = ctx.lookup(&key(ConduitPart::Pore1));
    let ft = ctx.lookup(&key(ConduitPart::Throat));
    let f2 = ctx.lookup(&key(ConduitPart::Pore2));
    match (f1, ft, f2) {
        (Ok(f1), Ok(ft), Ok(f2)) => Ok(SizeFactors::Triplet(f1, ft, f2)),
        _ => Err(PfError::property_not_found(
            base,
            vec![
                "单数组形式（基键）".into(),
                "三段式（.pore1/.throat/.pore2）".into(),
            ],
        )),
    }
}

/// 扩散传导率 [m³/s 每单位摩尔分数差对应 mol/s 视量纲而定]
///
/// g = D·F（单数组）或 1/g = 1/(D₁F₁) + 1/(DₜFₜ) + 1/(D₂F₂)（三段式），
/// 喉道段扩散系数取两端孔隙的算术平均。
#[derive(Debug, Clone)]
pub struct GenericDiffusiveConductance {
    /// 扩散系数属性键
    pub diffusivity_prop: String,
    /// 尺寸因子基键
    pub size_factors_prop: String,
}

impl GenericDiffusiveConductance {
    /// 创建模型（默认键 `pore.diffusivity` / `throat.diffusive_size_factors`）
    pub fn new() -> Box<Self> {
        Box::new(Self {
            diffusivity_prop: "pore.diffusivity".into(),
            size_factors_prop: "throat.diffusive_size_factors".into(),
        })
    }
}

impl PropertyModel for GenericDiffusiveConductance {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        let base = &self.size_factors_prop;
        vec![
            self.diffusivity_prop.clone(),
            base.clone(),
            format!("{}.pore1", base),
            format!("{}.throat", base),
            format!("{}.pore2", base),
        ]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let d_global = ctx.lookup_global(&self.diffusivity_prop)?;
        let conns = ctx.conns();
        let throats = ctx.indices(Element::Throat)?;

        match resolve_size_factors(ctx, &self.size_factors_prop)? {
            SizeFactors::Single(f) => Ok(throats
                .iter()
                .zip(f.iter())
                .map(|(&t, &f)| {
                    let [a, b] = conns[t];
                    let dt = 0.5 * (d_global[a] + d_global[b]);
                    dt * f
                })
                .collect()),
            SizeFactors::Triplet(f1, ft, f2) => Ok(throats
                .iter()
                .enumerate()
                .map(|(i, &t)| {
                    let [a, b] = conns[t];
                    let d1 = d_global[a];
                    let d2 = d_global[b];
                    let dt = 0.5 * (d1 + d2);
                    let resistance =
                        1.0 / (d1 * f1[i]) + 1.0 / (dt * ft[i]) + 1.0 / (d2 * f2[i]);
                    1.0 / resistance
                })
                .collect()),
        }
    }
}

/// 水力传导率 [m³/(Pa·s)]
///
/// g = F/μ（单数组）或 1/g = μ₁/F₁ + μₜ/Fₜ + μ₂/F₂（三段式），
/// 喉道段粘度取两端孔隙的算术平均。
#[derive(Debug, Clone)]
pub struct GenericHydraulicConductance {
    /// 粘度属性键
    pub viscosity_prop: String,
    /// 尺寸因子基键
    pub size_factors_prop: String,
}

impl GenericHydraulicConductance {
    /// 创建模型（默认键 `pore.viscosity` / `throat.hydraulic_size_factors`）
    pub fn new() -> Box<Self> {
        Box::new(Self {
            viscosity_prop: "pore.viscosity".into(),
            size_factors_prop: "throat.hydraulic_size_factors".into(),
        })
    }
}

impl PropertyModel for GenericHydraulicConductance {
    fn element(&self) -> Element {
        Element::Throat
    }

    fn dependencies(&self) -> Vec<String> {
        let base = &self.size_factors_prop;
        vec![
            self.viscosity_prop.clone(),
            base.clone(),
            format!("{}.pore1", base),
            format!("{}.throat", base),
            format!("{}.pore2", base),
        ]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let mu_global = ctx.lookup_global(&self.viscosity_prop)?;
        let conns = ctx.conns();
        let throats = ctx.indices(Element::Throat)?;

        match resolve_size_factors(ctx, &self.size_factors_prop)? {
            SizeFactors::Single(f) => Ok(throats
                .iter()
                .zip(f.iter())
                .map(|(&t, &f)| {
                    let [a, b] = conns[t];
                    let mu = 0.5 * (mu_global[a] + mu_global[b]);
                    f / mu
                })
                .collect()),
            SizeFactors::Triplet(f1, ft, f2) => Ok(throats
                .iter()
                .enumerate()
                .map(|(i, &t)| {
                    let [a, b] = conns[t];
                    let mu1 = mu_global[a];
                    let mu2 = mu_global[b];
                    let mu_t = 0.5 * (mu1 + mu2);
                    let resistance = mu1 / f1[i] + mu_t / ft[i] + mu2 / f2[i];
                    1.0 / resistance
                })
                .collect()),
        }
    }
}

// ============================================================================
// 测试
// ============================================================================
