// crates/pf_transport/src/algorithm/fickian.rs

//! Fickian 扩散
//!
//! 以浓度为待求解量、扩散传导率为边权的稳态输运。

use super::generic::{GenericTransport, TransportSettings};
use pf_foundation::error::{PfError, PfResult};
use pf_models::project::Project;
use std::ops::{Deref, DerefMut};

/// Fickian 扩散算法
///
/// 默认键：待求解量 `pore.concentration`，传导率
/// `throat.diffusive_conductance`。
pub struct FickianDiffusion(GenericTransport);

impl FickianDiffusion {
    /// 创建算法
    pub fn new() -> Self {
        Self(GenericTransport::new(TransportSettings {
            quantity: "pore.concentration".into(),
            conductance: "throat.diffusive_conductance".into(),
        }))
    }

    /// 域的有效扩散系数 [m²/s]
    ///
    /// D_eff = Q·L / (A·Δc)，其中 Q 为高浓度端的净流出率，
    /// Δc 为定值边界的浓度差。
    ///
    /// # 参数
    /// - `area`: 垂直于输运方向的域截面积 [m²]
    /// - `length`: 输运方向的域长度 [m]
    pub fn effective_diffusivity(
        &self,
        project: &Project,
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
                "有效扩散系数需要两个不同取值的定值边界".to_string(),
            ));
        }
        let inlet = self.bcs().pores_at_value(hi);
        let q = self.rate(project, &inlet)?;
        Ok(q * length / (area * (hi - lo)))
    }
}

impl Default for FickianDiffusion {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for FickianDiffusion {
    type Target = GenericTransport;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for FickianDiffusion {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pf_models::project::Project;
    use pf_network::generation::Cubic;

    #[test]
    fn test_effective_diffusivity_uniform_chain() {
        // 单链网络: D_eff = g·L/(A·N_throat⁻¹·...)——直接对照串联公式
        let g = 4e-10;
        let n = 5;
        let net = Cubic::new([n, 1, 1]).with_spacing(1e-4).build().unwrap();
        let mut proj = Project::new(net);
        let pid = proj.add_phase("air").unwrap();
        proj.phase_mut(pid)
            .unwrap()
            .store_mut()
            .fill_scalar("throat.diffusive_conductance", g)
            .unwrap();

        let mut alg = FickianDiffusion::new();
        alg.set_value_bc(&[0], 1.0).unwrap();
        alg.set_value_bc(&[n - 1], 0.0).unwrap();
        alg.run(&mut proj, pid).unwrap();

        // Q = g/(n-1)·Δc；取 A = spacing², L = (n-1)·spacing
        let area = 1e-8;
        let length = (n - 1) as f64 * 1e-4;
        let d_eff = alg.effective_diffusivity(&proj, area, length).unwrap();

        let q_expected = g / (n - 1) as f64;
        let expected = q_expected * length / area;
        assert!((d_eff - expected).abs() / expected < 1e-6);
    }

    #[test]
    fn test_effective_diffusivity_requires_two_values() {
        let net = Cubic::new([3, 1, 1]).build().unwrap();
        let mut proj = Project::new(net);
        let pid = proj.add_phase("air").unwrap();
        proj.phase_mut(pid)
            .unwrap()
            .store_mut()
            .fill_scalar("throat.diffusive_conductance", 1e-9)
            .unwrap();

        let mut alg = FickianDiffusion::new();
        alg.set_value_bc(&[0, 2], 1.0).unwrap();
        alg.run(&mut proj, pid).unwrap();

        assert!(alg.effective_diffusivity(&proj, 1.0, 1.0).is_err());
    }
}
