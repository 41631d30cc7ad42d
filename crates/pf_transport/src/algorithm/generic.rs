// crates/pf_transport/src/algorithm/generic.rs

//! 通用稳态输运
//!
//! 在孔隙网络上求解单个守恒量（压力、浓度等）的稳态分布：
//!
//! 1. 从相（及其 physics）插值拼接全域喉道传导率
//! 2. 以传导率为边权装配图拉普拉斯矩阵
//! 3. 定值边界按对称消元施加（保持矩阵对称正定），
//!    定流率边界进入右端项
//! 4. PCG 求解，解写回相存储
//! 5. [`GenericTransport::rate`] 给出通过任意孔隙集合边界的净流率
//!
//! # 前置条件
//!
//! - 至少一个定值边界（否则系统奇异）
//! - 全部喉道的传导率有限且非负（NaN 表示存在未被 physics
//!   覆盖的喉道）

use crate::boundary::{BcKind, BoundarySet};
use crate::numerics::csr::CsrBuilder;
use crate::numerics::pcg::{PcgConfig, PcgResult, PcgSolver};
use pf_foundation::error::{PfError, PfResult};
use pf_models::project::{PhaseId, Project};
use pf_network::data::Element;
use tracing::{debug, warn};

/// 输运算法设置
#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// 待求解量的属性键（孔隙元素），如 `"pore.pressure"`
    pub quantity: String,
    /// 传导率属性键（喉道元素），如 `"throat.hydraulic_conductance"`
    pub conductance: String,
}

/// 通用稳态输运算法
pub struct GenericTransport {
    settings: TransportSettings,
    bcs: BoundarySet,
    solver_config: PcgConfig,
    /// 最近一次求解的全域解
    solution: Option<Vec<f64>>,
    /// 最近一次求解使用的全域传导率
    conductance: Option<Vec<f64>>,
}

impl GenericTransport {
    /// 创建算法
    pub fn new(settings: TransportSettings) -> Self {
        Self {
            settings,
            bcs: BoundarySet::new(),
            solver_config: PcgConfig::default(),
            solution: None,
            conductance: None,
        }
    }

    /// 算法设置
    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    /// 设置求解器配置
    pub fn with_solver_config(mut self, config: PcgConfig) -> Self {
        self.solver_config = config;
        self
    }

    /// 边界条件集合
    pub fn bcs(&self) -> &BoundarySet {
        &self.bcs
    }

    /// 边界条件集合（可变）
    pub fn bcs_mut(&mut self) -> &mut BoundarySet {
        &mut self.bcs
    }

    /// 为一组孔隙设置定值边界
    pub fn set_value_bc(&mut self, pores: &[usize], value: f64) -> PfResult<()> {
        self.bcs.set_value(pores, value)
    }

    /// 为一组孔隙设置定流率边界
    pub fn set_rate_bc(&mut self, pores: &[usize], rate: f64) -> PfResult<()> {
        self.bcs.set_rate(pores, rate)
    }

    /// 最近一次求解的全域解
    pub fn solution(&self) -> Option<&[f64]> {
        self.solution.as_deref()
    }

    // ========================================================================
    // 求解
    // ========================================================================

    /// 求解稳态输运并把解写回相存储
    ///
    /// # 错误
    /// - 无定值边界返回 `MissingBoundaryCondition`
    /// - 传导率缺失返回 `PropertyNotFound`，含 NaN/负值返回 `InvalidInput`
    /// - 求解未收敛返回 `Solver`
    pub fn run(&mut self, project: &mut Project, phase: PhaseId) -> PfResult<PcgResult> {
        let quantity_element = Element::parse_key(&self.settings.quantity)?;
        if quantity_element != Element::Pore {
            return Err(PfError::invalid_input(format!(
                "待求解量 '{}' 必须是孔隙属性",
                self.settings.quantity
            )));
        }
        if Element::parse_key(&self.settings.conductance)? != Element::Throat {
            return Err(PfError::invalid_input(format!(
                "传导率 '{}' 必须是喉道属性",
                self.settings.conductance
            )));
        }

        let np = project.network().pore_count();
        let conductance = self.gather_conductance(project, phase)?;

        // 边界条件检查
        if self.bcs.value_count() == 0 {
            return Err(PfError::MissingBoundaryCondition {
                quantity: self.settings.quantity.clone(),
            });
        }
        for (p, _) in self.bcs.iter() {
            PfError::check_index("边界孔隙", p, np)?;
        }

        // 装配
        let (matrix, b, dirichlet) = self.assemble(project, &conductance)?;

        // 初始猜测：定值孔隙取边界值，其余取边界值均值
        let bc_mean = {
            let (lo, hi) = self.bcs.value_range().unwrap_or((0.0, 0.0));
            0.5 * (lo + hi)
        };
        let mut x: Vec<f64> = (0..np)
            .map(|p| dirichlet[p].unwrap_or(bc_mean))
            .collect();

        let mut solver = PcgSolver::new(self.solver_config.clone());
        let result = solver.solve(&matrix, &mut x, &b);
        debug!(
            iterations = result.iterations,
            residual = result.relative_residual,
            "稳态输运求解完成"
        );

        if !result.converged {
            return Err(PfError::solver(format!(
                "PCG 在 {} 次迭代后未收敛, 相对残差 {:.3e}",
                result.iterations, result.relative_residual
            )));
        }

        // 解写回相存储
        project
            .phase_mut(phase)?
            .store_mut()
            .set_scalar(&self.settings.quantity, x.clone())?;

        self.solution = Some(x);
        self.conductance = Some(conductance);
        Ok(result)
    }

    /// 插值拼接并验证全域传导率
    fn gather_conductance(&self, project: &Project, phase: PhaseId) -> PfResult<Vec<f64>> {
        let phase_name = project.phase(phase)?.name().to_string();
        let conductance = project
            .interleave_phase(phase, &self.settings.conductance)?
            .ok_or_else(|| {
                PfError::property_not_found(
                    &self.settings.conductance,
                    vec![format!("phase '{}' 及其 physics", phase_name)],
                )
            })?;

        let bad = conductance
            .iter()
            .filter(|g| !g.is_finite() || **g < 0.0)
            .count();
        if bad > 0 {
            return Err(PfError::invalid_input(format!(
                "传导率 '{}' 有 {} 个非有限或负值元素（喉道未被 physics 覆盖?）",
                self.settings.conductance, bad
            )));
        }
        Ok(conductance)
    }

    /// 装配图拉普拉斯矩阵与右端项
    ///
    /// 定值孔隙按对称消元处理：其行列置零、对角置 1、右端置边界值，
    /// 相邻自由孔隙的右端补偿 g·v。
    fn assemble(
        &self,
        project: &Project,
        conductance: &[f64],
    ) -> PfResult<(crate::numerics::csr::CsrMatrix, Vec<f64>, Vec<Option<f64>>)> {
        let np = project.network().pore_count();
        let conns = project.network().conns();

        let mut dirichlet: Vec<Option<f64>> = vec![None; np];
        let mut b = vec![0.0; np];
        for (p, kind) in self.bcs.iter() {
            match kind {
                BcKind::Value(v) => dirichlet[p] = Some(v),
                BcKind::Rate(q) => b[p] += q,
            }
        }

        let mut builder = CsrBuilder::new(np);
        let mut touched = vec![false; np];
        for (t, &[p1, p2]) in conns.iter().enumerate() {
            let g = conductance[t];
            match (dirichlet[p1], dirichlet[p2]) {
                (None, None) => {
                    builder.add(p1, p1, g);
                    builder.add(p2, p2, g);
                    builder.add(p1, p2, -g);
                    builder.add(p2, p1, -g);
                    touched[p1] = true;
                    touched[p2] = true;
                }
                (None, Some(v2)) => {
                    builder.add(p1, p1, g);
                    b[p1] += g * v2;
                    touched[p1] = true;
                }
                (Some(v1), None) => {
                    builder.add(p2, p2, g);
                    b[p2] += g * v1;
                    touched[p2] = true;
                }
                // 两端都是定值孔隙：该喉道不进入方程
                (Some(_), Some(_)) => {}
            }
        }

        for p in 0..np {
            if let Some(v) = dirichlet[p] {
                builder.set(p, p, 1.0);
                b[p] = v;
            } else if !touched[p] {
                // 无任何传导路径的自由孔隙：固定为 0 避免奇异
                builder.set(p, p, 1.0);
                b[p] = 0.0;
            }
        }
        let untouched = (0..np)
            .filter(|&p| dirichlet[p].is_none() && !touched[p])
            .count();
        if untouched > 0 {
            warn!(count = untouched, "存在无传导路径的自由孔隙, 已固定为 0");
        }

        Ok((builder.build(), b, dirichlet))
    }

    // ========================================================================
    // 流率查询
    // ========================================================================

    /// 通过给定孔隙集合边界的净流出率
    ///
    /// 对恰好一端在集合内的每条喉道累加 g·(x_内 − x_外)。
    /// 正值表示净流出集合。
    ///
    /// # 错误
    /// 求解前调用返回 `InvalidInput`。
    pub fn rate(&self, project: &Project, pores: &[usize]) -> PfResult<f64> {
        let (solution, conductance) = match (&self.solution, &self.conductance) {
            (Some(x), Some(g)) => (x, g),
            _ => {
                return Err(PfError::invalid_input(
                    "必须先调用 run() 再查询流率".to_string(),
                ))
            }
        };

        let np = project.network().pore_count();
        let mut in_set = vec![false; np];
        for &p in pores {
            PfError::check_index("孔隙", p, np)?;
            in_set[p] = true;
        }

        let mut total = 0.0;
        for (t, &[p1, p2]) in project.network().conns().iter().enumerate() {
            match (in_set[p1], in_set[p2]) {
                (true, false) => total += conductance[t] * (solution[p1] - solution[p2]),
                (false, true) => total += conductance[t] * (solution[p2] - solution[p1]),
                _ => {}
            }
        }
        Ok(total)
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pf_network::generation::Cubic;

    /// 带均匀传导率的链式项目（传导率直接写在相存储上）
    fn chain_project(n: usize, g: f64) -> (Project, PhaseId) {
        let net = Cubic::new([n, 1, 1]).build().unwrap();
        let mut proj = Project::new(net);
        let pid = proj.add_phase("phase").unwrap();
        proj.phase_mut(pid)
            .unwrap()
            .store_mut()
            .fill_scalar("throat.conductance", g)
            .unwrap();
        (proj, pid)
    }

    fn chain_transport() -> GenericTransport {
        GenericTransport::new(TransportSettings {
            quantity: "pore.quantity".into(),
            conductance: "throat.conductance".into(),
        })
    }

    #[test]
    fn test_linear_profile_on_chain() {
        let (mut proj, pid) = chain_project(5, 1e-9);
        let mut alg = chain_transport();
        alg.set_value_bc(&[0], 1.0).unwrap();
        alg.set_value_bc(&[4], 0.0).unwrap();

        let result = alg.run(&mut proj, pid).unwrap();
        assert!(result.converged);

        let x = alg.solution().unwrap();
        for (i, &xi) in x.iter().enumerate() {
            let expected = 1.0 - i as f64 / 4.0;
            assert!((xi - expected).abs() < 1e-6, "x[{}] = {}", i, xi);
        }
    }

    #[test]
    fn test_solution_written_to_phase() {
        let (mut proj, pid) = chain_project(3, 1e-9);
        let mut alg = chain_transport();
        alg.set_value_bc(&[0], 2.0).unwrap();
        alg.set_value_bc(&[2], 0.0).unwrap();
        alg.run(&mut proj, pid).unwrap();

        let stored = proj
            .phase(pid)
            .unwrap()
            .store()
            .scalar("pore.quantity")
            .unwrap();
        assert!((stored[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rate_matches_series_conductance() {
        let g = 2.5e-9;
        let (mut proj, pid) = chain_project(6, g);
        let mut alg = chain_transport();
        alg.set_value_bc(&[0], 1.0).unwrap();
        alg.set_value_bc(&[5], 0.0).unwrap();
        alg.run(&mut proj, pid).unwrap();

        // 串联 5 条喉道: Q = g/5 * Δx
        let q = alg.rate(&proj, &[0]).unwrap();
        let expected = g / 5.0;
        assert!((q - expected).abs() / expected < 1e-6, "q = {}", q);

        // 流入端与流出端净流率相反
        let q_out = alg.rate(&proj, &[5]).unwrap();
        assert!((q + q_out).abs() < expected * 1e-6);
    }

    #[test]
    fn test_rate_bc_enters_rhs() {
        // 一端定值、另一端定流率：中间孔隙流量守恒
        let q_in = 3e-10;
        let (mut proj, pid) = chain_project(4, 1e-9);
        let mut alg = chain_transport();
        alg.set_value_bc(&[0], 0.0).unwrap();
        alg.set_rate_bc(&[3], q_in).unwrap();
        alg.run(&mut proj, pid).unwrap();

        // 注入流率应全部从定值端流出
        let q = alg.rate(&proj, &[0]).unwrap();
        assert!((q + q_in).abs() / q_in < 1e-6, "q = {}", q);
    }

    #[test]
    fn test_missing_value_bc_rejected() {
        let (mut proj, pid) = chain_project(3, 1e-9);
        let mut alg = chain_transport();
        alg.set_rate_bc(&[0], 1e-9).unwrap();

        let err = alg.run(&mut proj, pid).unwrap_err();
        assert!(matches!(err, PfError::MissingBoundaryCondition { .. }));
    }

    #[test]
    fn test_missing_conductance_rejected() {
        let net = Cubic::new([3, 1, 1]).build().unwrap();
        let mut proj = Project::new(net);
        let pid = proj.add_phase("phase").unwrap();

        let mut alg = chain_transport();
        alg.set_value_bc(&[0], 1.0).unwrap();
        let err = alg.run(&mut proj, pid).unwrap_err();
        assert!(matches!(err, PfError::PropertyNotFound { .. }));
    }

    #[test]
    fn test_nan_conductance_rejected() {
        let (mut proj, pid) = chain_project(3, 1e-9);
        proj.phase_mut(pid)
            .unwrap()
            .store_mut()
            .set_scalar("throat.conductance", vec![1e-9, f64::NAN])
            .unwrap();

        let mut alg = chain_transport();
        alg.set_value_bc(&[0], 1.0).unwrap();
        let err = alg.run(&mut proj, pid).unwrap_err();
        assert!(err.to_string().contains("非有限"));
    }

    #[test]
    fn test_rate_before_run_rejected() {
        let (proj, _) = chain_project(3, 1e-9);
        let alg = chain_transport();
        assert!(alg.rate(&proj, &[0]).is_err());
    }

    #[test]
    fn test_throat_quantity_key_rejected() {
        let (mut proj, pid) = chain_project(3, 1e-9);
        let mut alg = GenericTransport::new(TransportSettings {
            quantity: "throat.quantity".into(),
            conductance: "throat.conductance".into(),
        });
        alg.set_value_bc(&[0], 1.0).unwrap();
        assert!(alg.run(&mut proj, pid).is_err());
    }
}
