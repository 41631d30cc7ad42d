// crates/pf_models/src/framework.rs

//! 属性模型框架
//!
//! 属性模型是将若干输入属性映射为一个输出属性数组的可调用对象。
//! 模型按输出属性名注册到 [`ModelRegistry`]，注册表负责：
//!
//! - 维护名称 -> 模型的有序映射（插入序稳定）
//! - 依赖拓扑排序（同一注册表内，模型 A 依赖模型 B 的输出则 B 先算）
//! - 环检测（依赖构成环时无法确定再生顺序，报错而非死循环）
//! - 下游闭包计算（某属性变化后需要重算哪些模型）
//!
//! 依赖中引用了注册表外部的属性（如 physics 模型引用相上的
//! `pore.diffusivity`）不构成排序边，它们由求值上下文在查找链上解析。

use crate::context::ModelContext;
use pf_foundation::error::{PfError, PfResult};
use pf_network::data::Element;
use std::collections::{HashMap, HashSet};

/// 属性模型
///
/// 实现者提供输出元素类别、输入依赖键和求值函数。求值结果的
/// 长度必须等于目标对象在该元素类别下的子集大小。
pub trait PropertyModel: Send + Sync {
    /// 输出属性所在的元素类别
    fn element(&self) -> Element;

    /// 输入依赖的属性键
    ///
    /// 依赖以字符串键给出（即"按名称查找的命名参数"）。列出的键
    /// 不必都存在：仅当某键是同一注册表中另一模型的输出时才构成
    /// 排序约束。
    fn dependencies(&self) -> Vec<String>;

    /// 对目标子集求值
    fn evaluate(&self, ctx: &ModelContext<'_>) -> PfResult<Vec<f64>>;
}

/// 再生模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegenMode {
    /// 注册时立即求值（依赖必须已可用）
    #[default]
    Normal,
    /// 注册时不求值，等待显式再生
    Deferred,
}

/// 注册表条目
pub struct ModelEntry {
    /// 输出属性键，如 `"throat.diffusive_conductance"`
    pub propname: String,
    /// 模型实例
    pub model: Box<dyn PropertyModel>,
    /// 再生模式
    pub regen_mode: RegenMode,
}

/// 模型注册表
///
/// 输出属性名到模型的有序映射。重复注册同名属性会替换原模型
/// 并保留其插入位置。
#[derive(Default)]
pub struct ModelRegistry {
    /// 条目（插入序）
    entries: Vec<ModelEntry>,
    /// 名称到条目索引的映射
    name_index: HashMap<String, usize>,
}

impl ModelRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册模型
    ///
    /// 同名属性已存在时替换模型，保留位置。
    pub fn add(
        &mut self,
        propname: impl Into<String>,
        model: Box<dyn PropertyModel>,
        regen_mode: RegenMode,
    ) {
        let propname = propname.into();
        if let Some(&idx) = self.name_index.get(&propname) {
            self.entries[idx] = ModelEntry {
                propname,
                model,
                regen_mode,
            };
        } else {
            let idx = self.entries.len();
            self.name_index.insert(propname.clone(), idx);
            self.entries.push(ModelEntry {
                propname,
                model,
                regen_mode,
            });
        }
    }

    /// 按输出属性名获取条目
    pub fn get(&self, propname: &str) -> Option<&ModelEntry> {
        self.name_index
            .get(propname)
            .and_then(|&idx| self.entries.get(idx))
    }

    /// 移除模型
    pub fn remove(&mut self, propname: &str) -> bool {
        if let Some(idx) = self.name_index.remove(propname) {
            self.entries.remove(idx);
            // 重建索引
            self.name_index.clear();
            for (i, e) in self.entries.iter().enumerate() {
                self.name_index.insert(e.propname.clone(), i);
            }
            true
        } else {
            false
        }
    }

    /// 是否包含指定输出属性
    pub fn contains(&self, propname: &str) -> bool {
        self.name_index.contains_key(propname)
    }

    /// 所有输出属性名（插入序）
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.propname.as_str()).collect()
    }

    /// 模型数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ========================================================================
    // 依赖拓扑
    // ========================================================================

    /// 条目间的依赖边: edges[u] = 依赖 u 输出的条目集合
    fn internal_edges(&self) -> Vec<Vec<usize>> {
        let mut edges = vec![Vec::new(); self.entries.len()];
        for (v, entry) in self.entries.iter().enumerate() {
            for dep in entry.model.dependencies() {
                if let Some(&u) = self.name_index.get(&dep) {
                    if u != v {
                        edges[u].push(v);
                    }
                }
            }
        }
        edges
    }

    /// 计算全部模型的拓扑求值顺序
    ///
    /// 顺序在满足依赖约束的前提下尽量保持插入序（Kahn 算法，
    /// 每轮取插入序最靠前的零入度节点）。
    ///
    /// # 错误
    /// 依赖构成环时返回 [`PfError::ModelCycle`]，携带环上属性名。
    pub fn topo_order(&self) -> PfResult<Vec<String>> {
        let n = self.entries.len();
        let edges = self.internal_edges();
        let mut indeg = vec![0usize; n];
        for targets in &edges {
            for &v in targets {
                indeg[v] += 1;
            }
        }

        let mut done = vec![false; n];
        let mut order = Vec::with_capacity(n);
        for _ in 0..n {
            // 取插入序最靠前的零入度未处理节点
            let next = (0..n).find(|&i| !done[i] && indeg[i] == 0);
            let u = match next {
                Some(u) => u,
                None => {
                    let cycle: Vec<String> = (0..n)
                        .filter(|&i| !done[i])
                        .map(|i| self.entries[i].propname.clone())
                        .collect();
                    return Err(PfError::model_cycle(cycle));
                }
            };
            done[u] = true;
            order.push(self.entries[u].propname.clone());
            for &v in &edges[u] {
                indeg[v] -= 1;
            }
        }
        Ok(order)
    }

    /// 计算依赖于给定键（直接或传递）的模型，按拓扑序返回
    ///
    /// 给定键本身若是某模型的输出，该模型也包含在内。
    pub fn downstream_of(&self, changed: &[&str]) -> PfResult<Vec<String>> {
        let changed_set: HashSet<&str> = changed.iter().copied().collect();

        // 种子：输出被点名的模型，或依赖中含被点名键的模型
        let mut affected: HashSet<usize> = HashSet::new();
        let mut queue: Vec<usize> = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            let hit = changed_set.contains(entry.propname.as_str())
                || entry
                    .model
                    .dependencies()
                    .iter()
                    .any(|d| changed_set.contains(d.as_str()));
            if hit && affected.insert(i) {
                queue.push(i);
            }
        }

        // 沿内部依赖边传播
        let edges = self.internal_edges();
        while let Some(u) = queue.pop() {
            for &v in &edges[u] {
                if affected.insert(v) {
                    queue.push(v);
                }
            }
        }

        let order = self.topo_order()?;
        Ok(order
            .into_iter()
            .filter(|p| {
                self.name_index
                    .get(p)
                    .map(|&i| affected.contains(&i))
                    .unwrap_or(false)
            })
            .collect())
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("props", &self.names())
            .finish()
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试用模型：固定依赖列表，求值返回空数组
    struct Stub {
        element: Element,
        deps: Vec<String>,
    }

    impl Stub {
        fn new(deps: &[&str]) -> Box<Self> {
            Box::new(Self {
                element: Element::Pore,
                deps: deps.iter().map(|s| s.to_string()).collect(),
            })
        }
    }

    impl PropertyModel for Stub {
        fn element(&self) -> Element {
            self.element
        }
        fn dependencies(&self) -> Vec<String> {
            self.deps.clone()
        }
        fn evaluate(&self, _ctx: &ModelContext<'_>) -> PfResult<Vec<f64>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_add_get_remove() {
        let mut reg = ModelRegistry::new();
        reg.add("pore.a", Stub::new(&[]), RegenMode::Normal);

        assert!(reg.contains("pore.a"));
        assert_eq!(reg.len(), 1);
        assert!(reg.get("pore.a").is_some());

        assert!(reg.remove("pore.a"));
        assert!(!reg.remove("pore.a"));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut reg = ModelRegistry::new();
        reg.add("pore.a", Stub::new(&[]), RegenMode::Normal);
        reg.add("pore.b", Stub::new(&[]), RegenMode::Normal);
        reg.add("pore.a", Stub::new(&["pore.x"]), RegenMode::Deferred);

        assert_eq!(reg.names(), vec!["pore.a", "pore.b"]);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("pore.a").unwrap().regen_mode, RegenMode::Deferred);
    }

    #[test]
    fn test_topo_order_resolves_attachment_order() {
        // 先注册下游，再注册上游：拓扑序应颠倒过来
        let mut reg = ModelRegistry::new();
        reg.add("pore.volume", Stub::new(&["pore.diameter"]), RegenMode::Deferred);
        reg.add("pore.diameter", Stub::new(&["pore.seed"]), RegenMode::Deferred);
        reg.add("pore.seed", Stub::new(&[]), RegenMode::Deferred);

        let order = reg.topo_order().unwrap();
        assert_eq!(order, vec!["pore.seed", "pore.diameter", "pore.volume"]);
    }

    #[test]
    fn test_topo_order_stable_for_independent_models() {
        let mut reg = ModelRegistry::new();
        reg.add("pore.b", Stub::new(&[]), RegenMode::Deferred);
        reg.add("pore.a", Stub::new(&[]), RegenMode::Deferred);

        // 无依赖关系时保持插入序
        assert_eq!(reg.topo_order().unwrap(), vec!["pore.b", "pore.a"]);
    }

    #[test]
    fn test_cycle_detected() {
        let mut reg = ModelRegistry::new();
        reg.add("pore.a", Stub::new(&["pore.b"]), RegenMode::Deferred);
        reg.add("pore.b", Stub::new(&["pore.a"]), RegenMode::Deferred);

        let err = reg.topo_order().unwrap_err();
        assert!(matches!(err, PfError::ModelCycle { .. }));
        assert!(err.to_string().contains("pore.a"));
    }

    #[test]
    fn test_external_deps_do_not_constrain() {
        // 依赖注册表外部的键不构成排序边
        let mut reg = ModelRegistry::new();
        reg.add(
            "throat.conductance",
            Stub::new(&["pore.viscosity", "throat.size_factor"]),
            RegenMode::Deferred,
        );
        assert_eq!(reg.topo_order().unwrap(), vec!["throat.conductance"]);
    }

    #[test]
    fn test_downstream_of_transitive() {
        let mut reg = ModelRegistry::new();
        reg.add("pore.seed", Stub::new(&[]), RegenMode::Deferred);
        reg.add("pore.diameter", Stub::new(&["pore.seed"]), RegenMode::Deferred);
        reg.add("pore.volume", Stub::new(&["pore.diameter"]), RegenMode::Deferred);
        reg.add("pore.unrelated", Stub::new(&[]), RegenMode::Deferred);

        let down = reg.downstream_of(&["pore.seed"]).unwrap();
        assert_eq!(down, vec!["pore.seed", "pore.diameter", "pore.volume"]);
    }

    #[test]
    fn test_downstream_of_external_key() {
        // 外部键（非模型输出）变化：仅依赖它的模型及其下游受影响
        let mut reg = ModelRegistry::new();
        reg.add(
            "pore.viscosity",
            Stub::new(&["pore.temperature"]),
            RegenMode::Deferred,
        );
        reg.add(
            "throat.conductance",
            Stub::new(&["pore.viscosity"]),
            RegenMode::Deferred,
        );
        reg.add("pore.other", Stub::new(&[]), RegenMode::Deferred);

        let down = reg.downstream_of(&["pore.temperature"]).unwrap();
        assert_eq!(down, vec!["pore.viscosity", "throat.conductance"]);
    }
}
