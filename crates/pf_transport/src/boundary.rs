// crates/pf_transport/src/boundary.rs

//! 边界条件
//!
//! 稳态输运支持两类孔隙边界条件：
//!
//! - [`BcKind::Value`]: 定值（Dirichlet），固定该孔隙的待求解量
//! - [`BcKind::Rate`]: 定流率（Neumann），向该孔隙注入给定净流率
//!
//! 同一孔隙只允许一种边界条件；重复设置会被拒绝，除非先显式移除。

use pf_foundation::error::{PfError, PfResult};
use std::collections::BTreeMap;

/// 边界条件类型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BcKind {
    /// 定值边界（Dirichlet）：固定待求解量
    Value(f64),
    /// 定流率边界（Neumann）：给定注入净流率
    Rate(f64),
}

impl std::fmt::Display for BcKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BcKind::Value(v) => write!(f, "定值边界 ({})", v),
            BcKind::Rate(q) => write!(f, "定流率边界 ({})", q),
        }
    }
}

/// 孔隙边界条件集合
///
/// 以孔隙索引为键的有序映射，保证遍历顺序确定。
#[derive(Debug, Clone, Default)]
pub struct BoundarySet {
    /// 孔隙 -> 边界条件
    bcs: BTreeMap<usize, BcKind>,
}

impl BoundarySet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 为一组孔隙设置定值边界
    ///
    /// # 错误
    /// 任一孔隙已有边界条件时返回 `BcConflict`，整组不生效。
    pub fn set_value(&mut self, pores: &[usize], value: f64) -> PfResult<()> {
        self.set(pores, BcKind::Value(value))
    }

    /// 为一组孔隙设置定流率边界
    ///
    /// 流率按孔隙逐个计，正值为注入。
    pub fn set_rate(&mut self, pores: &[usize], rate: f64) -> PfResult<()> {
        self.set(pores, BcKind::Rate(rate))
    }

    fn set(&mut self, pores: &[usize], kind: BcKind) -> PfResult<()> {
        for &p in pores {
            if let Some(existing) = self.bcs.get(&p) {
                return Err(PfError::BcConflict {
                    pore: p,
                    existing: existing.to_string(),
                });
            }
        }
        for &p in pores {
            self.bcs.insert(p, kind);
        }
        Ok(())
    }

    /// 移除一组孔隙上的边界条件
    pub fn remove(&mut self, pores: &[usize]) {
        for p in pores {
            self.bcs.remove(p);
        }
    }

    /// 清空全部边界条件
    pub fn clear(&mut self) {
        self.bcs.clear();
    }

    /// 查询单个孔隙的边界条件
    pub fn get(&self, pore: usize) -> Option<BcKind> {
        self.bcs.get(&pore).copied()
    }

    /// 遍历全部边界条件
    pub fn iter(&self) -> impl Iterator<Item = (usize, BcKind)> + '_ {
        self.bcs.iter().map(|(&p, &k)| (p, k))
    }

    /// 定值边界孔隙数
    pub fn value_count(&self) -> usize {
        self.bcs
            .values()
            .filter(|k| matches!(k, BcKind::Value(_)))
            .count()
    }

    /// 边界条件总数
    pub fn len(&self) -> usize {
        self.bcs.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.bcs.is_empty()
    }

    /// 定值边界的取值范围 (min, max)
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for kind in self.bcs.values() {
            if let BcKind::Value(v) = kind {
                range = Some(match range {
                    None => (*v, *v),
                    Some((lo, hi)) => (lo.min(*v), hi.max(*v)),
                });
            }
        }
        range
    }

    /// 取值等于给定值的定值边界孔隙
    pub fn pores_at_value(&self, value: f64) -> Vec<usize> {
        self.bcs
            .iter()
            .filter_map(|(&p, &k)| match k {
                BcKind::Value(v) if v == value => Some(p),
                _ => None,
            })
            .collect()
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_and_rate() {
        let mut bcs = BoundarySet::new();
        bcs.set_value(&[0, 1], 1.0).unwrap();
        bcs.set_rate(&[5], 1e-9).unwrap();

        assert_eq!(bcs.len(), 3);
        assert_eq!(bcs.value_count(), 2);
        assert_eq!(bcs.get(0), Some(BcKind::Value(1.0)));
        assert_eq!(bcs.get(5), Some(BcKind::Rate(1e-9)));
        assert_eq!(bcs.get(9), None);
    }

    #[test]
    fn test_conflict_rejected_atomically() {
        let mut bcs = BoundarySet::new();
        bcs.set_value(&[1], 1.0).unwrap();

        // 组 [0, 1] 中 1 冲突：0 也不应被设置
        let err = bcs.set_rate(&[0, 1], 2.0).unwrap_err();
        assert!(matches!(err, PfError::BcConflict { pore: 1, .. }));
        assert_eq!(bcs.get(0), None);
    }

    #[test]
    fn test_remove_then_reset() {
        let mut bcs = BoundarySet::new();
        bcs.set_value(&[3], 1.0).unwrap();
        bcs.remove(&[3]);
        bcs.set_rate(&[3], 0.5).unwrap();

        assert_eq!(bcs.get(3), Some(BcKind::Rate(0.5)));
    }

    #[test]
    fn test_value_range() {
        let mut bcs = BoundarySet::new();
        assert!(bcs.value_range().is_none());

        bcs.set_value(&[0], 2.0).unwrap();
        bcs.set_value(&[1], -1.0).unwrap();
        bcs.set_rate(&[2], 100.0).unwrap(); // 不计入取值范围

        assert_eq!(bcs.value_range(), Some((-1.0, 2.0)));
    }

    #[test]
    fn test_pores_at_value() {
        let mut bcs = BoundarySet::new();
        bcs.set_value(&[0, 2], 1.0).unwrap();
        bcs.set_value(&[1], 0.0).unwrap();

        assert_eq!(bcs.pores_at_value(1.0), vec![0, 2]);
        assert_eq!(bcs.pores_at_value(0.0), vec![1]);
    }
}
