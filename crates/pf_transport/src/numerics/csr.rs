// crates/pf_transport/src/numerics/csr.rs

//! 压缩稀疏行（CSR）矩阵格式
//!
//! CSR 是最常用的稀疏矩阵存储格式之一，特别适合：
//! - 高效的矩阵-向量乘法 (SpMV)
//! - 行遍历操作
//! - 与图拉普拉斯装配的自然配合
//!
//! # 特性开关
//!
//! - `parallel`: 启用基于 `rayon` 的并行矩阵-向量乘法
//!
//! # 格式说明
//!
//! CSR 使用三个数组存储：
//! - `row_ptr`: 行指针，长度 n_rows + 1，row_ptr[i] 是第 i 行第一个非零元的索引
//! - `col_idx`: 列索引，与非零元一一对应
//! - `values`: 非零元值
//!
//! # 使用示例
//!
//! ```
//! use pf_transport::numerics::csr::CsrBuilder;
//!
//! let mut builder = CsrBuilder::new(3);
//! builder.add(0, 0, 4.0);
//! builder.add(0, 1, -1.0);
//! builder.add(1, 0, -1.0);
//! builder.add(1, 1, 4.0);
//! builder.add(2, 2, 4.0);
//!
//! let matrix = builder.build();
//!
//! let x = vec![1.0, 2.0, 3.0];
//! let mut y = vec![0.0; 3];
//! matrix.mul_vec(&x, &mut y);
//! assert!((y[0] - 2.0).abs() < 1e-12);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use std::collections::BTreeMap;

/// CSR 矩阵构建器
///
/// 以 (row, col) -> value 的有序映射累积非零元，`build` 时一次性
/// 转换为 CSR 三数组。同一位置的 `add` 相互累加，`set` 覆盖。
#[derive(Debug, Clone)]
pub struct CsrBuilder {
    /// 方阵维度
    n: usize,
    /// 非零元累积
    entries: BTreeMap<(usize, usize), f64>,
}

impl CsrBuilder {
    /// 创建 n x n 矩阵的构建器
    pub fn new(n: usize) -> Self {
        Self {
            n,
            entries: BTreeMap::new(),
        }
    }

    /// 累加非零元: A[row, col] += value
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.n && col < self.n);
        *self.entries.entry((row, col)).or_insert(0.0) += value;
    }

    /// 覆盖非零元: A[row, col] = value
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.n && col < self.n);
        self.entries.insert((row, col), value);
    }

    /// 当前累积的非零元数量
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// 构建 CSR 矩阵
    pub fn build(self) -> CsrMatrix {
        let mut row_ptr = vec![0usize; self.n + 1];
        let mut col_idx = Vec::with_capacity(self.entries.len());
        let mut values = Vec::with_capacity(self.entries.len());

        // BTreeMap 已按 (row, col) 升序排列
        for (&(row, col), &value) in &self.entries {
            row_ptr[row + 1] += 1;
            col_idx.push(col);
            values.push(value);
        }
        for i in 0..self.n {
            row_ptr[i + 1] += row_ptr[i];
        }

        CsrMatrix {
            n: self.n,
            row_ptr,
            col_idx,
            values,
        }
    }
}

/// CSR 稀疏矩阵（方阵）
#[derive(Debug, Clone)]
pub struct CsrMatrix {
    /// 维度
    n: usize,
    /// 行指针数组（长度 n+1）
    row_ptr: Vec<usize>,
    /// 列索引数组
    col_idx: Vec<usize>,
    /// 非零元素值
    values: Vec<f64>,
}

impl CsrMatrix {
    /// 矩阵维度
    #[inline]
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// 非零元数量
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// 提取对角元素（缺失的对角元记 0）
    pub fn diagonal(&self) -> Vec<f64> {
        let mut diag = vec![0.0; self.n];
        for row in 0..self.n {
            for j in self.row_ptr[row]..self.row_ptr[row + 1] {
                if self.col_idx[j] == row {
                    diag[row] = self.values[j];
                }
            }
        }
        diag
    }

    /// 单行的矩阵-向量乘积
    #[inline]
    fn row_dot(&self, row: usize, x: &[f64]) -> f64 {
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];
        let mut sum = 0.0;
        for j in start..end {
            sum += self.values[j] * x[self.col_idx[j]];
        }
        sum
    }

    /// 矩阵-向量乘法: y = A * x
    #[cfg(not(feature = "parallel"))]
    pub fn mul_vec(&self, x: &[f64], y: &mut [f64]) {
        for row in 0..self.n {
            y[row] = self.row_dot(row, x);
        }
    }

    /// 矩阵-向量乘法: y = A * x（rayon 并行）
    #[cfg(feature = "parallel")]
    pub fn mul_vec(&self, x: &[f64], y: &mut [f64]) {
        y.par_iter_mut()
            .enumerate()
            .for_each(|(row, out)| *out = self.row_dot(row, x));
    }
}

// ============================================================================
// 测试
// ============================================================================
