// crates/pf_transport/src/algorithm/stokes.rs

//! Stokes 流动
//!
//! 以压力为待求解量、水力传导率为边权的稳态蠕动流。

use super::generic::{GenericTransport, TransportSettings};
use pf_foundation::error::{PfError, PfResult};
use pf_models::project::{PhaseId, Project};
use std::ops::{Deref, DerefMut};

/// Stokes 流动算法
///
/// 默认键：待求解量 `pore.pressure`，传导率
/// `throat.hydraulic_conductance`。
pub struct StokesFlow(GenericTransport);

impl StokesFlow {
    /// 创建算法
    pub fn new() -> Self {
        Self(GenericTransport::new(TransportSettings {
            quantity: "pore.pressure".into(),
            conductance: "throat.hydraulic_conductance".into(),
        }))
    }

    /// 域的有效渗透率（Darcy 定律）[m²]
    ///
    /// K = Q·μ·L / (A·ΔP)，其中 Q 为高压端的净流出率，μ 为相的
    /// 平均粘度（`pore.viscosity`），ΔP 为定值边界的压差。
    ///
    /// # 参数
    /// - `area`: 垂直于流动方向的域截面积 [m²]
    /// - `length`: 流动方向的域长度 [m]
    pub fn effective_permeability(
        &self,
        project: &Project,
        phase: PhaseId,
        area: f64,
        length: f64,
    ) -> PfResult<f64> {
        let (lo, hi) = self.bcs().value_range().ok_or_else(|| {
            PfError::MissingBoundaryCondition {
                quantity: self.settings().quantity.clone(),
            }
        })?;
        if hi <= lo {
            return Err(PfError::invalid_input(
                "有效渗透率需要两个不同取值的定值边界".to_string(),
            ));
        }

        let phase_name = project.phase(phase)?.name().to_string();
        let viscosity = project
            .interleave_phase(phase, "pore.viscosity")?
            .ok_or_else(|| {
                PfError::property_not_found(
                    "pore.viscosity",
                    vec![format!("phase '{}' 及其 physics", phase_name)],
                )
            })?;
        let finite: Vec<f64> = viscosity.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Err(PfError::invalid_input("粘度数组没有有限值".to_string()));
        }
        let mu = finite.iter().sum::<f64>() / finite.len() as f64;

        let inlet = self.bcs().pores_at_value(hi);
        let q = self.rate(project, &inlet)?;
        Ok(q * mu * length / (area * (hi - lo)))
    }
}

impl Default for StokesFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for StokesFlow {
    type Target = GenericTransport;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for StokesFlow {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// ============================================================================
// 测试
// ============================================================================
