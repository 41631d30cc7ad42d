// crates/pf_network/src/topology.rs

//! 网络拓扑
//!
//! [`Network`] 持有孔隙坐标、喉道连接、邻接表，以及网络自身的
//! 属性存储和标签存储。拓扑在构造后冻结：坐标与连接不可再修改，
//! 属性与标签可自由读写。
//!
//! # 不变量
//!
//! - 每条喉道连接 `[lo, hi]` 满足 `lo < hi` 且均在 `0..Np` 内
//!   （构造时归一化，自环被拒绝）
//! - 邻接表与连接数组始终一致（构造时一次性建立）

use crate::data::{Element, PropertyStore};
use crate::labels::{LabelMode, LabelStore};
use glam::DVec3;
use pf_foundation::error::{PfError, PfResult};

/// 孔隙网络
///
/// 孔隙为节点、喉道为边的无向图，附带属性与标签存储。
#[derive(Debug, Clone)]
pub struct Network {
    /// 孔隙坐标 [m]
    coords: Vec<DVec3>,
    /// 喉道连接（归一化为 lo < hi）
    conns: Vec<[usize; 2]>,
    /// 孔隙 -> 关联喉道索引
    incident: Vec<Vec<usize>>,
    /// 网络属性
    store: PropertyStore,
    /// 网络标签
    labels: LabelStore,
}

impl Network {
    /// 从坐标与连接构造网络
    ///
    /// 连接按 `lo < hi` 归一化，邻接表立即建立。
    ///
    /// # 错误
    /// - 连接索引越界返回 `IndexOutOfBounds`
    /// - 自环（两端相同）返回 `InvalidInput`
    pub fn new(coords: Vec<DVec3>, conns: Vec<[usize; 2]>) -> PfResult<Self> {
        let np = coords.len();
        let mut normalized = Vec::with_capacity(conns.len());
        for (t, &[a, b]) in conns.iter().enumerate() {
            PfError::check_index("孔隙", a, np)?;
            PfError::check_index("孔隙", b, np)?;
            if a == b {
                return Err(PfError::invalid_input(format!(
                    "喉道 {} 两端连接同一孔隙 {}",
                    t, a
                )));
            }
            normalized.push([a.min(b), a.max(b)]);
        }

        let mut incident = vec![Vec::new(); np];
        for (t, &[a, b]) in normalized.iter().enumerate() {
            incident[a].push(t);
            incident[b].push(t);
        }

        let nt = normalized.len();
        let mut labels = LabelStore::new(np, nt);
        // 全集标签，作为覆盖全网络的几何对象的默认选择集
        labels.set_mask("pore.all", vec![true; np])?;
        labels.set_mask("throat.all", vec![true; nt])?;

        Ok(Self {
            coords,
            conns: normalized,
            incident,
            store: PropertyStore::new(np, nt),
            labels,
        })
    }

    // ========================================================================
    // 基本访问
    // ========================================================================

    /// 孔隙数量
    #[inline]
    pub fn pore_count(&self) -> usize {
        self.coords.len()
    }

    /// 喉道数量
    #[inline]
    pub fn throat_count(&self) -> usize {
        self.conns.len()
    }

    /// 孔隙坐标
    #[inline]
    pub fn coords(&self) -> &[DVec3] {
        &self.coords
    }

    /// 喉道连接
    #[inline]
    pub fn conns(&self) -> &[[usize; 2]] {
        &self.conns
    }

    /// 网络属性存储
    #[inline]
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// 网络属性存储（可变）
    #[inline]
    pub fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.store
    }

    /// 网络标签存储
    #[inline]
    pub fn labels(&self) -> &LabelStore {
        &self.labels
    }

    /// 网络标签存储（可变）
    #[inline]
    pub fn labels_mut(&mut self) -> &mut LabelStore {
        &mut self.labels
    }

    // ========================================================================
    // 邻接查询
    // ========================================================================

    /// 单个孔隙的关联喉道
    #[inline]
    pub fn incident_throats(&self, pore: usize) -> &[usize] {
        &self.incident[pore]
    }

    /// 孔隙集合的邻居孔隙（不含输入集合自身，升序去重）
    pub fn find_neighbor_pores(&self, pores: &[usize]) -> PfResult<Vec<usize>> {
        let np = self.pore_count();
        let mut in_set = vec![false; np];
        for &p in pores {
            PfError::check_index("孔隙", p, np)?;
            in_set[p] = true;
        }

        let mut found = vec![false; np];
        for &p in pores {
            for &t in &self.incident[p] {
                let [a, b] = self.conns[t];
                let other = if a == p { b } else { a };
                if !in_set[other] {
                    found[other] = true;
                }
            }
        }
        Ok(found
            .iter()
            .enumerate()
            .filter_map(|(i, &f)| f.then_some(i))
            .collect())
    }

    /// 孔隙集合的邻居喉道
    ///
    /// 按喉道端点落入集合的个数筛选：`Or` 为任一端点、`And` 为两端
    /// 都在（集合内部喉道）、`Xor` 为恰好一端（边界喉道）、`Nor`
    /// 为两端都不在。结果升序。
    pub fn find_neighbor_throats(&self, pores: &[usize], mode: LabelMode) -> PfResult<Vec<usize>> {
        let np = self.pore_count();
        let mut in_set = vec![false; np];
        for &p in pores {
            PfError::check_index("孔隙", p, np)?;
            in_set[p] = true;
        }

        Ok(self
            .conns
            .iter()
            .enumerate()
            .filter_map(|(t, &[a, b])| {
                let k = in_set[a] as usize + in_set[b] as usize;
                mode.accepts(k).then_some(t)
            })
            .collect())
    }

    /// 查找连接两个孔隙的喉道
    pub fn find_connecting_throat(&self, p1: usize, p2: usize) -> PfResult<Option<usize>> {
        PfError::check_index("孔隙", p1, self.pore_count())?;
        PfError::check_index("孔隙", p2, self.pore_count())?;
        let key = [p1.min(p2), p1.max(p2)];
        Ok(self.incident[p1]
            .iter()
            .copied()
            .find(|&t| self.conns[t] == key))
    }

    /// 喉道两端的中心间距 [m]
    #[inline]
    pub fn throat_spacing(&self, throat: usize) -> f64 {
        let [a, b] = self.conns[throat];
        (self.coords[a] - self.coords[b]).length()
    }

    // ========================================================================
    // 标签便捷查询
    // ========================================================================

    /// 标签下的孔隙索引
    pub fn pores_with_label(&self, label: &str) -> PfResult<Vec<usize>> {
        let key = format!("pore.{}", label.trim_start_matches("pore."));
        self.labels.indices(&key)
    }

    /// 标签下的喉道索引
    pub fn throats_with_label(&self, label: &str) -> PfResult<Vec<usize>> {
        let key = format!("throat.{}", label.trim_start_matches("throat."));
        self.labels.indices(&key)
    }

    /// 网络概要（孔隙数、喉道数、属性数、标签数）
    pub fn summary(&self) -> NetworkSummary {
        NetworkSummary {
            pore_count: self.pore_count(),
            throat_count: self.throat_count(),
            property_count: self.store.len(),
            pore_label_count: self.labels.keys_of(Element::Pore).len(),
            throat_label_count: self.labels.keys_of(Element::Throat).len(),
        }
    }
}

/// 网络概要信息
#[derive(Debug, Clone, Copy)]
pub struct NetworkSummary {
    /// 孔隙数量
    pub pore_count: usize,
    /// 喉道数量
    pub throat_count: usize,
    /// 属性数量
    pub property_count: usize,
    /// 孔隙标签数量
    pub pore_label_count: usize,
    /// 喉道标签数量
    pub throat_label_count: usize,
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 路径图: 0 - 1 - 2 - 3
    fn chain4() -> Network {
        let coords = (0..4).map(|i| DVec3::new(i as f64, 0.0, 0.0)).collect();
        Network::new(coords, vec![[0, 1], [1, 2], [2, 3]]).unwrap()
    }

    #[test]
    fn test_construction() {
        let net = chain4();
        assert_eq!(net.pore_count(), 4);
        assert_eq!(net.throat_count(), 3);
        assert_eq!(net.incident_throats(1), [0, 1]);
    }

    #[test]
    fn test_conns_normalized() {
        let coords = vec![DVec3::ZERO, DVec3::X];
        let net = Network::new(coords, vec![[1, 0]]).unwrap();
        assert_eq!(net.conns()[0], [0, 1]);
    }

    #[test]
    fn test_self_loop_rejected() {
        let coords = vec![DVec3::ZERO, DVec3::X];
        assert!(Network::new(coords, vec![[0, 0]]).is_err());
    }

    #[test]
    fn test_conn_out_of_range_rejected() {
        let coords = vec![DVec3::ZERO, DVec3::X];
        assert!(Network::new(coords, vec![[0, 5]]).is_err());
    }

    #[test]
    fn test_all_labels_created() {
        let net = chain4();
        assert_eq!(net.labels().count("pore.all").unwrap(), 4);
        assert_eq!(net.labels().count("throat.all").unwrap(), 3);
    }

    #[test]
    fn test_find_neighbor_pores() {
        let net = chain4();
        assert_eq!(net.find_neighbor_pores(&[0]).unwrap(), vec![1]);
        assert_eq!(net.find_neighbor_pores(&[1, 2]).unwrap(), vec![0, 3]);
    }

    #[test]
    fn test_find_neighbor_throats_modes() {
        let net = chain4();
        // {1, 2}: 喉道0 (0-1) 一端命中, 喉道1 (1-2) 两端命中, 喉道2 (2-3) 一端命中
        assert_eq!(
            net.find_neighbor_throats(&[1, 2], LabelMode::Or).unwrap(),
            vec![0, 1, 2]
        );
        assert_eq!(
            net.find_neighbor_throats(&[1, 2], LabelMode::And).unwrap(),
            vec![1]
        );
        assert_eq!(
            net.find_neighbor_throats(&[1, 2], LabelMode::Xor).unwrap(),
            vec![0, 2]
        );
        assert!(net
            .find_neighbor_throats(&[1, 2], LabelMode::Nor)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_find_connecting_throat() {
        let net = chain4();
        assert_eq!(net.find_connecting_throat(2, 1).unwrap(), Some(1));
        assert_eq!(net.find_connecting_throat(0, 3).unwrap(), None);
    }

    #[test]
    fn test_throat_spacing() {
        let net = chain4();
        assert!((net.throat_spacing(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary() {
        let mut net = chain4();
        net.store_mut().fill_scalar("pore.diameter", 1.0).unwrap();
        let s = net.summary();
        assert_eq!(s.pore_count, 4);
        assert_eq!(s.property_count, 1);
        assert_eq!(s.pore_label_count, 1); // pore.all
    }
}
