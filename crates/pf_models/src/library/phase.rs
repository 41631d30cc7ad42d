// crates/pf_models/src/library/phase.rs

//! 相物性关联式
//!
//! 水与空气的常用热物性模型，均以温度（及压力）为输入，
//! 适用范围大致为 0–80 °C 的常压工况。

use crate::context::ModelContext;
use crate::framework::PropertyModel;
use pf_foundation::constants::{ATM, GAS_CONSTANT, ZERO_CELSIUS};
use pf_foundation::error::PfResult;
use pf_network::data::Element;

/// 水的动力粘度 [Pa·s]
///
/// Vogel 型关联式: μ = 2.414e-5 · 10^(247.8 / (T - 140))
///
/// 25 °C 时约 8.9e-4 Pa·s。
#[derive(Debug, Clone)]
pub struct WaterViscosity {
    /// 温度属性键
    pub temperature_prop: String,
}

impl WaterViscosity {
    /// 创建模型，默认温度键 `pore.temperature`
    pub fn new() -> Box<Self> {
        Box::new(Self {
            temperature_prop: "pore.temperature".into(),
        })
    }
}

impl PropertyModel for WaterViscosity {
    fn element(&self) -> Element {
        Element::Pore
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.temperature_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let t = ctx.lookup(&self.temperature_prop)?;
        Ok(t.iter()
            .map(|&t| 2.414e-5 * 10f64.powf(247.8 / (t - 140.0)))
            .collect())
    }
}

/// 水的密度 [kg/m³]
///
/// 0–60 °C 的二次拟合: ρ = 999.84 + 6.76e-3·t − 4.735e-3·t²，t 为摄氏温度。
#[derive(Debug, Clone)]
pub struct WaterDensity {
    /// 温度属性键
    pub temperature_prop: String,
}

impl WaterDensity {
    /// 创建模型，默认温度键 `pore.temperature`
    pub fn new() -> Box<Self> {
        Box::new(Self {
            temperature_prop: "pore.temperature".into(),
        })
    }
}

impl PropertyModel for WaterDensity {
    fn element(&self) -> Element {
        Element::Pore
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.temperature_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let t = ctx.lookup(&self.temperature_prop)?;
        Ok(t.iter()
            .map(|&t| {
                let tc = t - ZERO_CELSIUS;
                999.84 + 6.76e-3 * tc - 4.735e-3 * tc * tc
            })
            .collect())
    }
}

/// 空气的动力粘度 [Pa·s]
///
/// Sutherland 公式: μ = μ₀ (T₀ + S) / (T + S) · (T/T₀)^1.5
#[derive(Debug, Clone)]
pub struct AirViscosity {
    /// 温度属性键
    pub temperature_prop: String,
}

impl AirViscosity {
    /// 创建模型，默认温度键 `pore.temperature`
    pub fn new() -> Box<Self> {
        Box::new(Self {
            temperature_prop: "pore.temperature".into(),
        })
    }
}

impl PropertyModel for AirViscosity {
    fn element(&self) -> Element {
        Element::Pore
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.temperature_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        const MU0: f64 = 1.716e-5;
        const T0: f64 = 273.15;
        const S: f64 = 110.4;
        let t = ctx.lookup(&self.temperature_prop)?;
        Ok(t.iter()
            .map(|&t| MU0 * (T0 + S) / (t + S) * (t / T0).powf(1.5))
            .collect())
    }
}

/// 二元气体扩散系数 [m²/s]（Fuller 关联式）
///
/// D = 1e-3 · T^1.75 · √(1/Mᴬ + 1/Mᴮ) / (p · (Σᴬ^⅓ + Σᴮ^⅓)²) [cm²/s]
///
/// 其中 p 以 atm 计、M 以 g/mol 计，结果换算为 m²/s。
/// 默认参数为 O₂–N₂ 体系，25 °C、1 atm 时约 2.08e-5 m²/s。
#[derive(Debug, Clone)]
pub struct FullerDiffusivity {
    /// 温度属性键
    pub temperature_prop: String,
    /// 压力属性键
    pub pressure_prop: String,
    /// 组分 A 摩尔质量 [g/mol]
    pub mw_a: f64,
    /// 组分 B 摩尔质量 [g/mol]
    pub mw_b: f64,
    /// 组分 A 扩散体积
    pub vd_a: f64,
    /// 组分 B 扩散体积
    pub vd_b: f64,
}

impl FullerDiffusivity {
    /// 创建模型，默认 O₂–N₂ 体系
    pub fn new() -> Box<Self> {
        Box::new(Self {
            temperature_prop: "pore.temperature".into(),
            pressure_prop: "pore.pressure".into(),
            mw_a: 31.9988,
            mw_b: 28.0134,
            vd_a: 16.6,
            vd_b: 17.9,
        })
    }

    /// 设置组分参数
    pub fn with_species(mut self: Box<Self>, mw_a: f64, mw_b: f64, vd_a: f64, vd_b: f64) -> Box<Self> {
        self.mw_a = mw_a;
        self.mw_b = mw_b;
        self.vd_a = vd_a;
        self.vd_b = vd_b;
        self
    }
}

impl PropertyModel for FullerDiffusivity {
    fn element(&self) -> Element {
        Element::Pore
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.temperature_prop.clone(), self.pressure_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let t = ctx.lookup(&self.temperature_prop)?;
        let p = ctx.lookup(&self.pressure_prop)?;
        let mw_term = (1.0 / self.mw_a + 1.0 / self.mw_b).sqrt();
        let vd_term = (self.vd_a.cbrt() + self.vd_b.cbrt()).powi(2);
        Ok(t.iter()
            .zip(p.iter())
            .map(|(&t, &p)| {
                let p_atm = p / ATM;
                let d_cm2 = 1e-3 * t.powf(1.75) * mw_term / (p_atm * vd_term);
                d_cm2 * 1e-4
            })
            .collect())
    }
}

/// 理想气体摩尔密度 [mol/m³]: n = p / (R T)
#[derive(Debug, Clone)]
pub struct IdealGasMolarDensity {
    /// 温度属性键
    pub temperature_prop: String,
    /// 压力属性键
    pub pressure_prop: String,
}

impl IdealGasMolarDensity {
    /// 创建模型
    pub fn new() -> Box<Self> {
        Box::new(Self {
            temperature_prop: "pore.temperature".into(),
            pressure_prop: "pore.pressure".into(),
        })
    }
}

impl PropertyModel for IdealGasMolarDensity {
    fn element(&self) -> Element {
        Element::Pore
    }

    fn dependencies(&self) -> Vec<String> {
        vec![self.temperature_prop.clone(), self.pressure_prop.clone()]
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
        let t = ctx.lookup(&self.temperature_prop)?;
        let p = ctx.lookup(&self.pressure_prop)?;
        Ok(t.iter()
            .zip(p.iter())
            .map(|(&t, &p)| p / (GAS_CONSTANT * t))
            .collect())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::RegenMode;
    use crate::project::{Project, Target};
    use pf_network::generation::Cubic;

    fn phase_project() -> (Project, Target) {
        let net = Cubic::new([2, 2, 1]).build().unwrap();
        let mut proj = Project::new(net);
        let pid = proj.add_phase("phase").unwrap();
        (proj, Target::Phase(pid))
    }

    fn phase_scalar<'a>(proj: &'a Project, key: &str) -> &'a [f64] {
        let pid = proj.find_phase("phase").unwrap();
        proj.phase(pid).unwrap().store().scalar(key).unwrap()
    }

    #[test]
    fn test_water_viscosity_at_25c() {
        let (mut proj, target) = phase_project();
        proj.add_model(target, "pore.viscosity", WaterViscosity::new(), RegenMode::Normal)
            .unwrap();

        let mu = phase_scalar(&proj, "pore.viscosity");
        // 25 °C 时约 8.9e-4 Pa·s (±2%)
        assert!((mu[0] - 8.9e-4).abs() / 8.9e-4 < 0.02, "mu = {}", mu[0]);
    }

    #[test]
    fn test_water_viscosity_decreases_with_temperature() {
        let (mut proj, target) = phase_project();
        let pid = proj.find_phase("phase").unwrap();
        proj.phase_mut(pid)
            .unwrap()
            .store_mut()
            .set_scalar("pore.temperature", vec![283.15, 293.15, 313.15, 333.15])
            .unwrap();
        proj.add_model(target, "pore.viscosity", WaterViscosity::new(), RegenMode::Normal)
            .unwrap();

        let mu = phase_scalar(&proj, "pore.viscosity");
        for w in mu.windows(2) {
            assert!(w[0] > w[1]);
        }
    }

    #[test]
    fn test_water_density_at_25c() {
        let (mut proj, target) = phase_project();
        proj.add_model(target, "pore.density", WaterDensity::new(), RegenMode::Normal)
            .unwrap();

        let rho = phase_scalar(&proj, "pore.density");
        // 25 °C 时约 997 kg/m³ (±0.5%)
        assert!((rho[0] - 997.0).abs() / 997.0 < 0.005, "rho = {}", rho[0]);
    }

    #[test]
    fn test_air_viscosity_at_25c() {
        let (mut proj, target) = phase_project();
        proj.add_model(target, "pore.viscosity", AirViscosity::new(), RegenMode::Normal)
            .unwrap();

        let mu = phase_scalar(&proj, "pore.viscosity");
        // 25 °C 时约 1.84e-5 Pa·s (±2%)
        assert!((mu[0] - 1.84e-5).abs() / 1.84e-5 < 0.02, "mu = {}", mu[0]);
    }

    #[test]
    fn test_fuller_diffusivity_o2_n2() {
        let (mut proj, target) = phase_project();
        proj.add_model(
            target,
            "pore.diffusivity",
            FullerDiffusivity::new(),
            RegenMode::Normal,
        )
        .unwrap();

        let d = phase_scalar(&proj, "pore.diffusivity");
        // O2-N2, 25 °C, 1 atm 时约 2.08e-5 m²/s (±3%)
        assert!((d[0] - 2.08e-5).abs() / 2.08e-5 < 0.03, "D = {}", d[0]);
    }

    #[test]
    fn test_ideal_gas_molar_density() {
        let (mut proj, target) = phase_project();
        proj.add_model(
            target,
            "pore.molar_density",
            IdealGasMolarDensity::new(),
            RegenMode::Normal,
        )
        .unwrap();

        let n = phase_scalar(&proj, "pore.molar_density");
        let expected = 101325.0 / (GAS_CONSTANT * 298.15);
        assert!((n[0] - expected).abs() < 1e-9);
    }
}
