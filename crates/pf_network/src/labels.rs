// crates/pf_network/src/labels.rs

//! 标签系统
//!
//! 标签是覆盖孔隙或喉道全集的命名布尔掩码，用于选取元素子集
//! （如 `"pore.left"` 标记网络左侧表面的孔隙）。
//!
//! 标签键与属性键同样使用 `"pore.<名称>"` / `"throat.<名称>"` 约定。
//!
//! # 示例
//! ```
//! use pf_network::labels::LabelStore;
//!
//! let mut labels = LabelStore::new(10, 15);
//! labels.apply("pore.inlet", &[0, 1, 2]).unwrap();
//!
//! assert_eq!(labels.indices("pore.inlet").unwrap(), vec![0, 1, 2]);
//! assert_eq!(labels.count("pore.inlet").unwrap(), 3);
//! ```

use crate::data::Element;
use pf_foundation::error::{PfError, PfResult};
use std::collections::HashMap;

/// 集合成员关系的组合模式
///
/// 用于邻居查询等基于端点成员数的筛选：对一条喉道，统计其两个端点
/// 落在给定孔隙集合中的个数 k，再按模式筛选。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    /// 至少一个端点在集合中 (k >= 1)
    Or,
    /// 两个端点都在集合中 (k == 2)
    And,
    /// 恰好一个端点在集合中 (k == 1)
    Xor,
    /// 两个端点都不在集合中 (k == 0)
    Nor,
}

impl LabelMode {
    /// 端点命中数 k 是否满足该模式
    #[inline]
    pub fn accepts(&self, k: usize) -> bool {
        match self {
            LabelMode::Or => k >= 1,
            LabelMode::And => k == 2,
            LabelMode::Xor => k == 1,
            LabelMode::Nor => k == 0,
        }
    }
}

/// 标签存储
///
/// 每个标签是一条覆盖对应元素全集的布尔掩码。
#[derive(Debug, Clone, Default)]
pub struct LabelStore {
    /// 孔隙数量
    pore_count: usize,
    /// 喉道数量
    throat_count: usize,
    /// 标签掩码
    masks: HashMap<String, Vec<bool>>,
}

impl LabelStore {
    /// 创建新的标签存储
    pub fn new(pore_count: usize, throat_count: usize) -> Self {
        Self {
            pore_count,
            throat_count,
            masks: HashMap::new(),
        }
    }

    fn expected_len(&self, key: &str) -> PfResult<usize> {
        Ok(match Element::parse_key(key)? {
            Element::Pore => self.pore_count,
            Element::Throat => self.throat_count,
        })
    }

    /// 将索引列表加入标签（标签不存在时自动创建）
    ///
    /// # 错误
    /// 索引越界时返回 `IndexOutOfBounds`。
    pub fn apply(&mut self, key: &str, indices: &[usize]) -> PfResult<()> {
        let len = self.expected_len(key)?;
        for &i in indices {
            PfError::check_index("标签元素", i, len)?;
        }
        let mask = self
            .masks
            .entry(key.to_string())
            .or_insert_with(|| vec![false; len]);
        for &i in indices {
            mask[i] = true;
        }
        Ok(())
    }

    /// 从标签中移除索引列表
    pub fn discard(&mut self, key: &str, indices: &[usize]) -> PfResult<()> {
        let len = self.expected_len(key)?;
        if let Some(mask) = self.masks.get_mut(key) {
            for &i in indices {
                PfError::check_index("标签元素", i, len)?;
                mask[i] = false;
            }
        }
        Ok(())
    }

    /// 整体覆盖标签掩码
    pub fn set_mask(&mut self, key: &str, mask: Vec<bool>) -> PfResult<()> {
        let expected = self.expected_len(key)?;
        if mask.len() != expected {
            return Err(PfError::size_mismatch(key, expected, mask.len()));
        }
        self.masks.insert(key.to_string(), mask);
        Ok(())
    }

    /// 获取标签掩码
    pub fn mask(&self, key: &str) -> Option<&[bool]> {
        self.masks.get(key).map(|v| v.as_slice())
    }

    /// 获取标签下的元素索引（升序）
    ///
    /// # 错误
    /// 标签不存在时返回 `NotFound`。
    pub fn indices(&self, key: &str) -> PfResult<Vec<usize>> {
        let mask = self
            .masks
            .get(key)
            .ok_or_else(|| PfError::not_found(format!("标签 '{}'", key)))?;
        Ok(mask
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect())
    }

    /// 标签下的元素个数
    pub fn count(&self, key: &str) -> PfResult<usize> {
        let mask = self
            .masks
            .get(key)
            .ok_or_else(|| PfError::not_found(format!("标签 '{}'", key)))?;
        Ok(mask.iter().filter(|&&b| b).count())
    }

    /// 标签是否存在
    pub fn contains(&self, key: &str) -> bool {
        self.masks.contains_key(key)
    }

    /// 删除标签
    pub fn remove(&mut self, key: &str) -> Option<Vec<bool>> {
        self.masks.remove(key)
    }

    /// 列出指定元素类别的标签键名，按字典序排序
    pub fn keys_of(&self, element: Element) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .masks
            .keys()
            .filter(|k| Element::parse_key(k).map(|e| e == element).unwrap_or(false))
            .map(|s| s.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// 列出所有标签键名（未排序）
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.masks.keys().map(|s| s.as_str())
    }

    /// 组合多个标签：返回满足模式的元素索引
    ///
    /// 对每个元素统计其出现在几个给定标签中，`Or` 为并集、`And` 为
    /// 全部命中、`Xor` 为恰好一个、`Nor` 为全部未命中。
    pub fn combine(&self, keys: &[&str], mode: LabelMode) -> PfResult<Vec<usize>> {
        if keys.is_empty() {
            return Err(PfError::invalid_input("组合标签列表不能为空"));
        }
        let element = Element::parse_key(keys[0])?;
        let len = match element {
            Element::Pore => self.pore_count,
            Element::Throat => self.throat_count,
        };
        let mut hits = vec![0usize; len];
        for key in keys {
            if Element::parse_key(key)? != element {
                return Err(PfError::invalid_input(
                    "组合标签必须属于同一元素类别".to_string(),
                ));
            }
            let mask = self
                .masks
                .get(*key)
                .ok_or_else(|| PfError::not_found(format!("标签 '{}'", key)))?;
            for (i, &b) in mask.iter().enumerate() {
                if b {
                    hits[i] += 1;
                }
            }
        }
        let accepted = |k: usize| match mode {
            LabelMode::Or => k >= 1,
            LabelMode::And => k == keys.len(),
            LabelMode::Xor => k == 1,
            LabelMode::Nor => k == 0,
        };
        Ok((0..len).filter(|&i| accepted(hits[i])).collect())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_indices() {
        let mut labels = LabelStore::new(5, 3);
        labels.apply("pore.left", &[0, 2]).unwrap();

        assert!(labels.contains("pore.left"));
        assert_eq!(labels.indices("pore.left").unwrap(), vec![0, 2]);
        assert_eq!(labels.count("pore.left").unwrap(), 2);
    }

    #[test]
    fn test_apply_out_of_range() {
        let mut labels = LabelStore::new(3, 3);
        assert!(labels.apply("pore.x", &[5]).is_err());
        // 失败的 apply 不应创建标签
        assert!(!labels.contains("pore.x"));
    }

    #[test]
    fn test_discard() {
        let mut labels = LabelStore::new(4, 2);
        labels.apply("pore.a", &[0, 1, 2]).unwrap();
        labels.discard("pore.a", &[1]).unwrap();

        assert_eq!(labels.indices("pore.a").unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_missing_label_error() {
        let labels = LabelStore::new(2, 2);
        assert!(labels.indices("pore.ghost").is_err());
        assert!(labels.count("throat.ghost").is_err());
    }

    #[test]
    fn test_combine_modes() {
        let mut labels = LabelStore::new(4, 2);
        labels.apply("pore.a", &[0, 1]).unwrap();
        labels.apply("pore.b", &[1, 2]).unwrap();

        assert_eq!(
            labels.combine(&["pore.a", "pore.b"], LabelMode::Or).unwrap(),
            vec![0, 1, 2]
        );
        assert_eq!(
            labels
                .combine(&["pore.a", "pore.b"], LabelMode::And)
                .unwrap(),
            vec![1]
        );
        assert_eq!(
            labels
                .combine(&["pore.a", "pore.b"], LabelMode::Xor)
                .unwrap(),
            vec![0, 2]
        );
        assert_eq!(
            labels
                .combine(&["pore.a", "pore.b"], LabelMode::Nor)
                .unwrap(),
            vec![3]
        );
    }

    #[test]
    fn test_combine_mixed_elements_rejected() {
        let mut labels = LabelStore::new(2, 2);
        labels.apply("pore.a", &[0]).unwrap();
        labels.apply("throat.b", &[0]).unwrap();

        assert!(labels
            .combine(&["pore.a", "throat.b"], LabelMode::Or)
            .is_err());
    }

    #[test]
    fn test_mode_accepts() {
        assert!(LabelMode::Or.accepts(1));
        assert!(LabelMode::Or.accepts(2));
        assert!(!LabelMode::Or.accepts(0));
        assert!(LabelMode::And.accepts(2));
        assert!(!LabelMode::And.accepts(1));
        assert!(LabelMode::Xor.accepts(1));
        assert!(!LabelMode::Xor.accepts(2));
        assert!(LabelMode::Nor.accepts(0));
    }
}
