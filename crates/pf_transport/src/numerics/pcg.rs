// crates/pf_transport/src/numerics/pcg.rs

//! 预处理共轭梯度法（PCG）求解器
//!
//! 求解稀疏对称正定线性系统 Ax = b，用于孔隙网络的稳态输运方程。
//!
//! # 算法概述
//!
//! PCG 是共轭梯度法的预处理版本，通过预处理矩阵 M 加速收敛：
//!
//! 1. r_0 = b - A*x_0
//! 2. z_0 = M^{-1} * r_0
//! 3. p_0 = z_0
//! 4. 对于 k = 0, 1, 2, ...
//!    - α_k = (r_k, z_k) / (p_k, A*p_k)
//!    - x_{k+1} = x_k + α_k * p_k
//!    - r_{k+1} = r_k - α_k * A*p_k
//!    - 检查收敛: ||r_{k+1}|| < tol
//!    - z_{k+1} = M^{-1} * r_{k+1}
//!    - β_k = (r_{k+1}, z_{k+1}) / (r_k, z_k)
//!    - p_{k+1} = z_{k+1} + β_k * p_k
//!
//! # 预处理器
//!
//! - 雅可比（对角）预处理：M = diag(A)
//! - 无预处理（单位矩阵）

use super::csr::CsrMatrix;
use pf_foundation::constants::{DEFAULT_ATOL, DEFAULT_MAX_ITERATIONS, DEFAULT_RTOL};
use tracing::debug;

/// PCG 求解器配置
#[derive(Debug, Clone)]
pub struct PcgConfig {
    /// 相对容差
    pub rtol: f64,
    /// 绝对容差
    pub atol: f64,
    /// 最大迭代次数
    pub max_iter: usize,
    /// 预处理器类型
    pub preconditioner: PreconditionerType,
}

impl Default for PcgConfig {
    fn default() -> Self {
        Self {
            rtol: DEFAULT_RTOL,
            atol: DEFAULT_ATOL,
            max_iter: DEFAULT_MAX_ITERATIONS,
            preconditioner: PreconditionerType::Jacobi,
        }
    }
}

/// 预处理器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionerType {
    /// 无预处理（单位矩阵）
    None,
    /// 雅可比（对角）预处理
    Jacobi,
}

/// PCG 求解结果
#[derive(Debug, Clone)]
pub struct PcgResult {
    /// 是否收敛
    pub converged: bool,
    /// 实际迭代次数
    pub iterations: usize,
    /// 最终残差范数
    pub residual_norm: f64,
    /// 初始残差范数
    pub initial_residual_norm: f64,
    /// 相对残差 (||r|| / ||b||)
    pub relative_residual: f64,
}

/// PCG 求解器工作区
///
/// 存储迭代所需的临时向量，避免重复分配内存。
struct PcgWorkspace {
    /// 残差向量 r
    r: Vec<f64>,
    /// 预处理后的残差 z = M^{-1} * r
    z: Vec<f64>,
    /// 搜索方向 p
    p: Vec<f64>,
    /// 矩阵-向量乘积结果 Ap
    ap: Vec<f64>,
}

impl PcgWorkspace {
    fn new(n: usize) -> Self {
        Self {
            r: vec![0.0; n],
            z: vec![0.0; n],
            p: vec![0.0; n],
            ap: vec![0.0; n],
        }
    }
}

/// PCG 求解器
///
/// # 示例
///
/// ```
/// use pf_transport::numerics::csr::CsrBuilder;
/// use pf_transport::numerics::pcg::{PcgConfig, PcgSolver};
///
/// let mut builder = CsrBuilder::new(2);
/// builder.add(0, 0, 2.0);
/// builder.add(1, 1, 4.0);
/// let matrix = builder.build();
///
/// let mut solver = PcgSolver::new(PcgConfig::default());
/// let mut x = vec![0.0; 2];
/// let result = solver.solve(&matrix, &mut x, &[2.0, 4.0]);
/// assert!(result.converged);
/// assert!((x[0] - 1.0).abs() < 1e-6);
/// ```
pub struct PcgSolver {
    /// 配置
    config: PcgConfig,
}

impl PcgSolver {
    /// 创建求解器
    pub fn new(config: PcgConfig) -> Self {
        Self { config }
    }

    /// 配置引用
    pub fn config(&self) -> &PcgConfig {
        &self.config
    }

    /// 求解线性系统 Ax = b
    ///
    /// # 参数
    ///
    /// - `matrix`: 系数矩阵（对称正定）
    /// - `x`: 解向量（输入初始猜测，输出解）
    /// - `b`: 右端向量
    pub fn solve(&mut self, matrix: &CsrMatrix, x: &mut Vec<f64>, b: &[f64]) -> PcgResult {
        let n = matrix.dimension();
        let mut ws = PcgWorkspace::new(n);

        // 雅可比预处理的对角元
        let diag = match self.config.preconditioner {
            PreconditionerType::Jacobi => Some(matrix.diagonal()),
            PreconditionerType::None => None,
        };

        // 初始残差 r_0 = b - A*x_0
        matrix.mul_vec(x, &mut ws.r);
        for i in 0..n {
            ws.r[i] = b[i] - ws.r[i];
        }

        let b_norm = dot(b, b).sqrt();
        let initial_r_norm = dot(&ws.r, &ws.r).sqrt();

        // b 接近零：零解即为解
        if b_norm < self.config.atol {
            return PcgResult {
                converged: true,
                iterations: 0,
                residual_norm: initial_r_norm,
                initial_residual_norm: initial_r_norm,
                relative_residual: 0.0,
            };
        }

        apply_preconditioner(&ws.r, &mut ws.z, diag.as_deref());
        ws.p.copy_from_slice(&ws.z);
        let mut rho = dot(&ws.r, &ws.z);

        for iter in 0..self.config.max_iter {
            matrix.mul_vec(&ws.p, &mut ws.ap);

            let p_ap = dot(&ws.p, &ws.ap);
            if p_ap.abs() < 1e-300 {
                // 搜索方向退化，防止除零
                let r_norm = dot(&ws.r, &ws.r).sqrt();
                return PcgResult {
                    converged: false,
                    iterations: iter,
                    residual_norm: r_norm,
                    initial_residual_norm: initial_r_norm,
                    relative_residual: r_norm / b_norm,
                };
            }
            let alpha = rho / p_ap;

            for i in 0..n {
                x[i] += alpha * ws.p[i];
                ws.r[i] -= alpha * ws.ap[i];
            }

            let r_norm = dot(&ws.r, &ws.r).sqrt();
            let relative_residual = r_norm / b_norm;

            if iter % 50 == 0 {
                debug!(iter, relative_residual, "PCG 迭代");
            }

            if r_norm < self.config.atol || relative_residual < self.config.rtol {
                return PcgResult {
                    converged: true,
                    iterations: iter + 1,
                    residual_norm: r_norm,
                    initial_residual_norm: initial_r_norm,
                    relative_residual,
                };
            }

            apply_preconditioner(&ws.r, &mut ws.z, diag.as_deref());
            let rho_new = dot(&ws.r, &ws.z);
            let beta = rho_new / rho;
            rho = rho_new;

            for i in 0..n {
                ws.p[i] = ws.z[i] + beta * ws.p[i];
            }
        }

        // 达到最大迭代次数，未收敛
        let r_norm = dot(&ws.r, &ws.r).sqrt();
        PcgResult {
            converged: false,
            iterations: self.config.max_iter,
            residual_norm: r_norm,
            initial_residual_norm: initial_r_norm,
            relative_residual: r_norm / b_norm,
        }
    }
}

/// 应用预处理: z = M^{-1} * r
fn apply_preconditioner(r: &[f64], z: &mut [f64], diag: Option<&[f64]>) {
    match diag {
        Some(diag) => {
            for i in 0..r.len() {
                let d = diag[i];
                z[i] = if d.abs() > 1e-300 { r[i] / d } else { r[i] };
            }
        }
        None => z.copy_from_slice(r),
    }
}

/// 点积
#[inline]
fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y.iter()).map(|(a, b)| a * b).sum()
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::csr::CsrBuilder;

    /// 测试对角系统求解
    #[test]
    fn test_pcg_diagonal_system() {
        let n = 10;
        let mut builder = CsrBuilder::new(n);
        for i in 0..n {
            builder.add(i, i, (i + 1) as f64);
        }
        let matrix = builder.build();

        let b = vec![1.0; n];
        let mut x = vec![0.0; n];

        let mut solver = PcgSolver::new(PcgConfig::default());
        let result = solver.solve(&matrix, &mut x, &b);

        assert!(result.converged, "PCG 应该收敛");
        for i in 0..n {
            let expected = 1.0 / ((i + 1) as f64);
            assert!(
                (x[i] - expected).abs() < 1e-6,
                "x[{}] = {}, 期望 {}",
                i,
                x[i],
                expected
            );
        }
    }

    /// 一维泊松问题（三对角拉普拉斯 + 两端固定）
    #[test]
    fn test_pcg_1d_laplacian() {
        let n = 20;
        let mut builder = CsrBuilder::new(n);
        for i in 0..n {
            builder.add(i, i, 2.0);
            if i > 0 {
                builder.add(i, i - 1, -1.0);
            }
            if i + 1 < n {
                builder.add(i, i + 1, -1.0);
            }
        }
        let matrix = builder.build();

        // b 对应左端 x=1, 右端 x=0 的消元右端项
        let mut b = vec![0.0; n];
        b[0] = 1.0;
        let mut x = vec![0.0; n];

        let mut solver = PcgSolver::new(PcgConfig::default());
        let result = solver.solve(&matrix, &mut x, &b);
        assert!(result.converged);

        // 解应线性递减
        for i in 0..n {
            let expected = (n - i) as f64 / (n + 1) as f64;
            assert!((x[i] - expected).abs() < 1e-5, "x[{}] = {}", i, x[i]);
        }
    }

    #[test]
    fn test_pcg_zero_rhs() {
        let mut builder = CsrBuilder::new(3);
        for i in 0..3 {
            builder.add(i, i, 1.0);
        }
        let matrix = builder.build();

        let mut x = vec![0.0; 3];
        let mut solver = PcgSolver::new(PcgConfig::default());
        let result = solver.solve(&matrix, &mut x, &[0.0; 3]);

        assert!(result.converged);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_pcg_without_preconditioner() {
        let mut builder = CsrBuilder::new(4);
        for i in 0..4 {
            builder.add(i, i, 3.0);
        }
        let matrix = builder.build();

        let config = PcgConfig {
            preconditioner: PreconditionerType::None,
            ..Default::default()
        };
        let mut x = vec![0.0; 4];
        let mut solver = PcgSolver::new(config);
        let result = solver.solve(&matrix, &mut x, &[3.0; 4]);

        assert!(result.converged);
        assert!(x.iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_pcg_max_iter_exhausted() {
        // 病态容差设置：不可能在 0 次迭代内收敛
        let mut builder = CsrBuilder::new(2);
        builder.add(0, 0, 2.0);
        builder.add(0, 1, -1.0);
        builder.add(1, 0, -1.0);
        builder.add(1, 1, 2.0);
        let matrix = builder.build();

        let config = PcgConfig {
            max_iter: 0,
            ..Default::default()
        };
        let mut x = vec![0.0; 2];
        let mut solver = PcgSolver::new(config);
        let result = solver.solve(&matrix, &mut x, &[1.0, 1.0]);

        assert!(!result.converged);
        assert_eq!(result.iterations, 0);
    }
}
