// crates/pf_network/src/data.rs

//! 属性存储
//!
//! 为网络元素（孔隙、喉道）提供字符串键控的标量场和向量场存储。
//!
//! # 设计原则
//! - 键带元素前缀：`"pore.diameter"`、`"throat.length"`
//! - 维度检查：写入时验证数组长度与对应元素数量一致
//! - 标量用 `f64`，向量用 `glam::DVec3`
//!
//! # 示例
//! ```
//! use pf_network::data::PropertyStore;
//!
//! let mut store = PropertyStore::new(100, 150);
//!
//! store.set_scalar("pore.diameter", vec![1e-5; 100]).unwrap();
//! store.fill_scalar("throat.diameter", 0.5e-5).unwrap();
//!
//! let d = store.scalar("pore.diameter").unwrap();
//! assert_eq!(d.len(), 100);
//! ```

use glam::DVec3;
use pf_foundation::error::{PfError, PfResult};
use std::collections::HashMap;

/// 网络元素类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// 孔隙（节点）
    Pore,
    /// 喉道（边）
    Throat,
}

impl Element {
    /// 解析带前缀的属性键，返回元素类别
    ///
    /// # 错误
    /// 键不以 `"pore."` 或 `"throat."` 开头时返回 `InvalidInput`。
    pub fn parse_key(key: &str) -> PfResult<Element> {
        if key.starts_with("pore.") {
            Ok(Element::Pore)
        } else if key.starts_with("throat.") {
            Ok(Element::Throat)
        } else {
            Err(PfError::invalid_input(format!(
                "属性键 '{}' 必须以 'pore.' 或 'throat.' 开头",
                key
            )))
        }
    }

    /// 元素类别名称
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Pore => "pore",
            Element::Throat => "throat",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 属性存储
///
/// 字符串键控的按元素数据容器。孔隙键对应长度 Np 的数组，
/// 喉道键对应长度 Nt 的数组。
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    /// 孔隙元素数量
    pore_count: usize,
    /// 喉道元素数量
    throat_count: usize,
    /// 标量属性
    scalars: HashMap<String, Vec<f64>>,
    /// 向量属性
    vectors: HashMap<String, Vec<DVec3>>,
}

impl PropertyStore {
    /// 创建新的属性存储
    ///
    /// # 参数
    /// - `pore_count`: 孔隙数量
    /// - `throat_count`: 喉道数量
    pub fn new(pore_count: usize, throat_count: usize) -> Self {
        Self {
            pore_count,
            throat_count,
            scalars: HashMap::new(),
            vectors: HashMap::new(),
        }
    }

    /// 获取孔隙数量
    #[inline]
    pub fn pore_count(&self) -> usize {
        self.pore_count
    }

    /// 获取喉道数量
    #[inline]
    pub fn throat_count(&self) -> usize {
        self.throat_count
    }

    /// 键对应的期望数组长度
    fn expected_len(&self, key: &str) -> PfResult<usize> {
        Ok(match Element::parse_key(key)? {
            Element::Pore => self.pore_count,
            Element::Throat => self.throat_count,
        })
    }

    // ========================================================================
    // 标量属性
    // ========================================================================

    /// 设置标量场
    ///
    /// # 错误
    /// 数组长度与键前缀对应的元素数量不符时返回维度不匹配错误。
    pub fn set_scalar(&mut self, key: &str, values: Vec<f64>) -> PfResult<()> {
        let expected = self.expected_len(key)?;
        if values.len() != expected {
            return Err(PfError::size_mismatch(key, expected, values.len()));
        }
        self.scalars.insert(key.to_string(), values);
        Ok(())
    }

    /// 以单一数值填充标量场（广播）
    pub fn fill_scalar(&mut self, key: &str, value: f64) -> PfResult<()> {
        let expected = self.expected_len(key)?;
        self.scalars.insert(key.to_string(), vec![value; expected]);
        Ok(())
    }

    /// 获取标量场（不可变）
    pub fn scalar(&self, key: &str) -> Option<&[f64]> {
        self.scalars.get(key).map(|v| v.as_slice())
    }

    /// 获取标量场（可变）
    pub fn scalar_mut(&mut self, key: &str) -> Option<&mut [f64]> {
        self.scalars.get_mut(key).map(|v| v.as_mut_slice())
    }

    /// 获取标量场，缺失时返回描述性错误
    pub fn require_scalar(&self, key: &str) -> PfResult<&[f64]> {
        self.scalar(key)
            .ok_or_else(|| PfError::property_not_found(key, vec!["属性存储".into()]))
    }

    /// 检查标量场是否存在
    pub fn has_scalar(&self, key: &str) -> bool {
        self.scalars.contains_key(key)
    }

    /// 删除标量场
    pub fn remove_scalar(&mut self, key: &str) -> Option<Vec<f64>> {
        self.scalars.remove(key)
    }

    // ========================================================================
    // 向量属性
    // ========================================================================

    /// 设置向量场
    pub fn set_vector(&mut self, key: &str, values: Vec<DVec3>) -> PfResult<()> {
        let expected = self.expected_len(key)?;
        if values.len() != expected {
            return Err(PfError::size_mismatch(key, expected, values.len()));
        }
        self.vectors.insert(key.to_string(), values);
        Ok(())
    }

    /// 获取向量场（不可变）
    pub fn vector(&self, key: &str) -> Option<&[DVec3]> {
        self.vectors.get(key).map(|v| v.as_slice())
    }

    /// 检查向量场是否存在
    pub fn has_vector(&self, key: &str) -> bool {
        self.vectors.contains_key(key)
    }

    /// 删除向量场
    pub fn remove_vector(&mut self, key: &str) -> Option<Vec<DVec3>> {
        self.vectors.remove(key)
    }

    // ========================================================================
    // 枚举与批量操作
    // ========================================================================

    /// 列出所有标量场键名（未排序）
    pub fn scalar_keys(&self) -> impl Iterator<Item = &str> {
        self.scalars.keys().map(|s| s.as_str())
    }

    /// 列出所有向量场键名（未排序）
    pub fn vector_keys(&self) -> impl Iterator<Item = &str> {
        self.vectors.keys().map(|s| s.as_str())
    }

    /// 列出指定元素类别的标量场键名，按字典序排序
    pub fn scalar_keys_of(&self, element: Element) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .scalars
            .keys()
            .filter(|k| Element::parse_key(k).map(|e| e == element).unwrap_or(false))
            .map(|s| s.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// 清空所有属性
    pub fn clear(&mut self) {
        self.scalars.clear();
        self.vectors.clear();
    }

    /// 属性总数（标量 + 向量）
    pub fn len(&self) -> usize {
        self.scalars.len() + self.vectors.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.vectors.is_empty()
    }
}

// ============================================================================
// 测试
// ============================================================================
