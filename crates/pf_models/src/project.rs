// crates/pf_models/src/project.rs

//! 项目与对象关联
//!
//! [`Project`] 持有一个网络以及挂在其上的 Geometry / Phase / Physics
//! 对象，并负责：
//!
//! - 对象的创建、命名与按序关联（physics 先 phase 后 geometry）
//! - 按类别把子集数组插值拼接为全域数组（interleave）
//! - 模型注册与按依赖序再生（含跨对象的下游传播）
//!
//! # 覆盖语义
//!
//! Geometry 拥有网络孔隙/喉道的一个不相交子集；Phase 覆盖全域；
//! Physics 继承其关联 geometry 的子集。插值拼接时未被覆盖的元素
//! 填充 NaN，由网络健康检查以警告形式报告。

use crate::context::ModelContext;
use crate::framework::{ModelRegistry, PropertyModel, RegenMode};
use pf_foundation::error::{PfError, PfResult};
use pf_network::data::{Element, PropertyStore};
use pf_network::topology::Network;
use std::collections::HashSet;

// ============================================================================
// 对象句柄
// ============================================================================

/// Geometry 对象句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub(crate) usize);

/// Phase 对象句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseId(pub(crate) usize);

/// Physics 对象句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicsId(pub(crate) usize);

/// 模型挂载目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// 几何对象
    Geometry(GeometryId),
    /// 相对象
    Phase(PhaseId),
    /// 物理对象
    Physics(PhysicsId),
}

// ============================================================================
// 对象定义
// ============================================================================

/// 几何对象
///
/// 持有网络元素的一个子集及该子集上的尺寸属性与模型。
pub struct Geometry {
    name: String,
    /// 子集孔隙（全局索引，升序）
    pores: Vec<usize>,
    /// 子集喉道（全局索引，升序）
    throats: Vec<usize>,
    store: PropertyStore,
    models: ModelRegistry,
}

impl Geometry {
    /// 对象名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 子集孔隙的全局索引
    pub fn pores(&self) -> &[usize] {
        &self.pores
    }

    /// 子集喉道的全局索引
    pub fn throats(&self) -> &[usize] {
        &self.throats
    }

    /// 属性存储（数组长度为子集大小）
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// 属性存储（可变）
    pub fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.store
    }

    /// 模型注册表
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }
}

/// 相对象
///
/// 覆盖全域的热物性数据与模型。创建时带默认温度与压力。
pub struct Phase {
    name: String,
    store: PropertyStore,
    models: ModelRegistry,
}

impl Phase {
    /// 对象名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 属性存储（数组长度为 Np / Nt）
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// 属性存储（可变）
    pub fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.store
    }

    /// 模型注册表
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }
}

/// 物理对象
///
/// 将相物性与几何尺寸组合为输运系数（传导率）。先关联 phase，
/// 再关联 geometry；子集与存储尺寸继承自关联的 geometry。
pub struct Physics {
    name: String,
    phase: Option<PhaseId>,
    geometry: Option<GeometryId>,
    store: PropertyStore,
    models: ModelRegistry,
}

impl Physics {
    /// 对象名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 关联的相
    pub fn phase(&self) -> Option<PhaseId> {
        self.phase
    }

    /// 关联的几何
    pub fn geometry(&self) -> Option<GeometryId> {
        self.geometry
    }

    /// 属性存储（数组长度为关联 geometry 的子集大小）
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// 属性存储（可变）
    pub fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.store
    }

    /// 模型注册表
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }
}

// ============================================================================
// 项目
// ============================================================================

/// 项目：网络 + 对象 + 再生编排
pub struct Project {
    network: Network,
    geometries: Vec<Geometry>,
    phases: Vec<Phase>,
    physics: Vec<Physics>,
}

impl Project {
    /// 以网络创建项目
    pub fn new(network: Network) -> Self {
        Self {
            network,
            geometries: Vec::new(),
            phases: Vec::new(),
            physics: Vec::new(),
        }
    }

    /// 网络引用
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// 网络引用（可变）
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    // ========================================================================
    // 对象创建与关联
    // ========================================================================

    /// 检查名称在全部对象中唯一
    fn check_name_free(&self, name: &str) -> PfResult<()> {
        let taken = self.geometries.iter().any(|g| g.name == name)
            || self.phases.iter().any(|p| p.name == name)
            || self.physics.iter().any(|p| p.name == name);
        if taken {
            Err(PfError::duplicate_name(name))
        } else {
            Ok(())
        }
    }

    /// 创建几何对象，持有给定的孔隙/喉道子集
    ///
    /// 索引去重排序后存储。
    ///
    /// # 错误
    /// - 名称重复返回 `DuplicateName`
    /// - 索引越界返回 `IndexOutOfBounds`
    /// - 与既有几何对象的子集重叠返回 `InvalidInput`
    pub fn add_geometry(
        &mut self,
        name: impl Into<String>,
        pores: &[usize],
        throats: &[usize],
    ) -> PfResult<GeometryId> {
        let name = name.into();
        self.check_name_free(&name)?;

        let np = self.network.pore_count();
        let nt = self.network.throat_count();
        let mut pores: Vec<usize> = pores.to_vec();
        pores.sort_unstable();
        pores.dedup();
        let mut throats: Vec<usize> = throats.to_vec();
        throats.sort_unstable();
        throats.dedup();
        for &p in &pores {
            PfError::check_index("孔隙", p, np)?;
        }
        for &t in &throats {
            PfError::check_index("喉道", t, nt)?;
        }

        // 与既有几何对象不得重叠
        for g in &self.geometries {
            let gp: HashSet<usize> = g.pores.iter().copied().collect();
            let gt: HashSet<usize> = g.throats.iter().copied().collect();
            let pore_overlap = pores.iter().filter(|p| gp.contains(p)).count();
            let throat_overlap = throats.iter().filter(|t| gt.contains(t)).count();
            if pore_overlap > 0 || throat_overlap > 0 {
                return Err(PfError::invalid_input(format!(
                    "几何对象 '{}' 与 '{}' 的子集重叠 ({} 孔隙, {} 喉道)",
                    name, g.name, pore_overlap, throat_overlap
                )));
            }
        }

        let store = PropertyStore::new(pores.len(), throats.len());
        self.geometries.push(Geometry {
            name,
            pores,
            throats,
            store,
            models: ModelRegistry::new(),
        });
        Ok(GeometryId(self.geometries.len() - 1))
    }

    /// 创建覆盖整个网络的几何对象
    pub fn add_geometry_all(&mut self, name: impl Into<String>) -> PfResult<GeometryId> {
        let pores = self.network.labels().indices("pore.all")?;
        let throats = self.network.labels().indices("throat.all")?;
        self.add_geometry(name, &pores, &throats)
    }

    /// 创建相对象（带默认温度 298.15 K 与压力 101325 Pa）
    pub fn add_phase(&mut self, name: impl Into<String>) -> PfResult<PhaseId> {
        let name = name.into();
        self.check_name_free(&name)?;

        let mut store =
            PropertyStore::new(self.network.pore_count(), self.network.throat_count());
        store.fill_scalar(
            "pore.temperature",
            pf_foundation::constants::DEFAULT_TEMPERATURE,
        )?;
        store.fill_scalar("pore.pressure", pf_foundation::constants::DEFAULT_PRESSURE)?;

        self.phases.push(Phase {
            name,
            store,
            models: ModelRegistry::new(),
        });
        Ok(PhaseId(self.phases.len() - 1))
    }

    /// 创建未关联的物理对象
    pub fn add_physics(&mut self, name: impl Into<String>) -> PfResult<PhysicsId> {
        let name = name.into();
        self.check_name_free(&name)?;
        self.physics.push(Physics {
            name,
            phase: None,
            geometry: None,
            store: PropertyStore::new(0, 0),
            models: ModelRegistry::new(),
        });
        Ok(PhysicsId(self.physics.len() - 1))
    }

    /// 将物理对象关联到相
    pub fn associate_phase(&mut self, physics: PhysicsId, phase: PhaseId) -> PfResult<()> {
        PfError::check_index("Phase", phase.0, self.phases.len())?;
        let phys = self.physics_entry_mut(physics)?;
        phys.phase = Some(phase);
        Ok(())
    }

    /// 将物理对象关联到几何
    ///
    /// # 错误
    /// 物理对象尚未关联相时返回 `NotAssociated`：physics 的子集与
    /// 数据都挂靠在相的类别之下，必须先有相。
    pub fn associate_geometry(&mut self, physics: PhysicsId, geometry: GeometryId) -> PfResult<()> {
        PfError::check_index("Geometry", geometry.0, self.geometries.len())?;
        let (np, nt) = {
            let g = self.geometry(geometry)?;
            (g.pores.len(), g.throats.len())
        };
        let phys = self.physics_entry_mut(physics)?;
        if phys.phase.is_none() {
            return Err(PfError::not_associated(
                phys.name.clone(),
                "phase（physics 必须先关联 phase 再关联 geometry）",
            ));
        }
        phys.geometry = Some(geometry);
        // 存储尺寸继承 geometry 子集
        phys.store = PropertyStore::new(np, nt);
        Ok(())
    }

    /// 一步创建并按序关联物理对象
    pub fn add_physics_to(
        &mut self,
        name: impl Into<String>,
        phase: PhaseId,
        geometry: GeometryId,
    ) -> PfResult<PhysicsId> {
        let id = self.add_physics(name)?;
        self.associate_phase(id, phase)?;
        self.associate_geometry(id, geometry)?;
        Ok(id)
    }

    // ========================================================================
    // 对象访问
    // ========================================================================

    /// 按句柄访问几何对象
    pub fn geometry(&self, id: GeometryId) -> PfResult<&Geometry> {
        PfError::check_index("Geometry", id.0, self.geometries.len())?;
        Ok(&self.geometries[id.0])
    }

    /// 按句柄访问几何对象（可变）
    pub fn geometry_mut(&mut self, id: GeometryId) -> PfResult<&mut Geometry> {
        PfError::check_index("Geometry", id.0, self.geometries.len())?;
        Ok(&mut self.geometries[id.0])
    }

    /// 按句柄访问相对象
    pub fn phase(&self, id: PhaseId) -> PfResult<&Phase> {
        PfError::check_index("Phase", id.0, self.phases.len())?;
        Ok(&self.phases[id.0])
    }

    /// 按句柄访问相对象（可变）
    pub fn phase_mut(&mut self, id: PhaseId) -> PfResult<&mut Phase> {
        PfError::check_index("Phase", id.0, self.phases.len())?;
        Ok(&mut self.phases[id.0])
    }

    /// 按句柄访问物理对象
    pub fn physics(&self, id: PhysicsId) -> PfResult<&Physics> {
        PfError::check_index("Physics", id.0, self.physics.len())?;
        Ok(&self.physics[id.0])
    }

    fn physics_entry_mut(&mut self, id: PhysicsId) -> PfResult<&mut Physics> {
        PfError::check_index("Physics", id.0, self.physics.len())?;
        Ok(&mut self.physics[id.0])
    }

    /// 按名称查找几何对象
    pub fn find_geometry(&self, name: &str) -> Option<GeometryId> {
        self.geometries
            .iter()
            .position(|g| g.name == name)
            .map(GeometryId)
    }

    /// 按名称查找相对象
    pub fn find_phase(&self, name: &str) -> Option<PhaseId> {
        self.phases.iter().position(|p| p.name == name).map(PhaseId)
    }

    /// 按名称查找物理对象
    pub fn find_physics(&self, name: &str) -> Option<PhysicsId> {
        self.physics
            .iter()
            .position(|p| p.name == name)
            .map(PhysicsId)
    }

    /// 所有几何对象句柄
    pub fn geometry_ids(&self) -> Vec<GeometryId> {
        (0..self.geometries.len()).map(GeometryId).collect()
    }

    /// 所有相对象句柄
    pub fn phase_ids(&self) -> Vec<PhaseId> {
        (0..self.phases.len()).map(PhaseId).collect()
    }

    /// 所有物理对象句柄
    pub fn physics_ids(&self) -> Vec<PhysicsId> {
        (0..self.physics.len()).map(PhysicsId).collect()
    }

    /// 目标对象名称
    pub fn target_name(&self, target: Target) -> PfResult<&str> {
        Ok(match target {
            Target::Geometry(id) => self.geometry(id)?.name(),
            Target::Phase(id) => self.phase(id)?.name(),
            Target::Physics(id) => self.physics(id)?.name(),
        })
    }

    /// 目标对象的属性存储
    pub fn target_store(&self, target: Target) -> PfResult<&PropertyStore> {
        Ok(match target {
            Target::Geometry(id) => &self.geometry(id)?.store,
            Target::Phase(id) => &self.phase(id)?.store,
            Target::Physics(id) => &self.physics(id)?.store,
        })
    }

    fn target_store_mut(&mut self, target: Target) -> PfResult<&mut PropertyStore> {
        Ok(match target {
            Target::Geometry(id) => {
                PfError::check_index("Geometry", id.0, self.geometries.len())?;
                &mut self.geometries[id.0].store
            }
            Target::Phase(id) => {
                PfError::check_index("Phase", id.0, self.phases.len())?;
                &mut self.phases[id.0].store
            }
            Target::Physics(id) => {
                PfError::check_index("Physics", id.0, self.physics.len())?;
                &mut self.physics[id.0].store
            }
        })
    }

    /// 目标对象的模型注册表
    pub fn target_models(&self, target: Target) -> PfResult<&ModelRegistry> {
        Ok(match target {
            Target::Geometry(id) => &self.geometry(id)?.models,
            Target::Phase(id) => &self.phase(id)?.models,
            Target::Physics(id) => &self.physics(id)?.models,
        })
    }

    fn target_models_mut(&mut self, target: Target) -> PfResult<&mut ModelRegistry> {
        Ok(match target {
            Target::Geometry(id) => {
                PfError::check_index("Geometry", id.0, self.geometries.len())?;
                &mut self.geometries[id.0].models
            }
            Target::Phase(id) => {
                PfError::check_index("Phase", id.0, self.phases.len())?;
                &mut self.phases[id.0].models
            }
            Target::Physics(id) => {
                PfError::check_index("Physics", id.0, self.physics.len())?;
                &mut self.physics[id.0].models
            }
        })
    }

    // ========================================================================
    // 插值拼接
    // ========================================================================

    /// 网络类别的全域数组：网络自身属性，否则由所有 geometry 拼接
    ///
    /// 未被任何 geometry 覆盖的元素填 NaN。两处都没有该键时返回 None。
    pub fn interleave_network(&self, key: &str) -> PfResult<Option<Vec<f64>>> {
        let element = Element::parse_key(key)?;
        if let Some(v) = self.network.store().scalar(key) {
            return Ok(Some(v.to_vec()));
        }

        let len = match element {
            Element::Pore => self.network.pore_count(),
            Element::Throat => self.network.throat_count(),
        };
        let mut out = vec![f64::NAN; len];
        let mut found = false;
        for g in &self.geometries {
            if let Some(values) = g.store.scalar(key) {
                found = true;
                let indices = match element {
                    Element::Pore => &g.pores,
                    Element::Throat => &g.throats,
                };
                for (local, &global) in indices.iter().enumerate() {
                    out[global] = values[local];
                }
            }
        }
        Ok(found.then_some(out))
    }

    /// 相类别的全域数组：相自身属性，否则由该相的 physics 拼接
    pub fn interleave_phase(&self, phase: PhaseId, key: &str) -> PfResult<Option<Vec<f64>>> {
        let element = Element::parse_key(key)?;
        let ph = self.phase(phase)?;
        if let Some(v) = ph.store.scalar(key) {
            return Ok(Some(v.to_vec()));
        }

        let len = match element {
            Element::Pore => self.network.pore_count(),
            Element::Throat => self.network.throat_count(),
        };
        let mut out = vec![f64::NAN; len];
        let mut found = false;
        for phys in &self.physics {
            if phys.phase != Some(phase) {
                continue;
            }
            let Some(gid) = phys.geometry else { continue };
            if let Some(values) = phys.store.scalar(key) {
                found = true;
                let g = &self.geometries[gid.0];
                let indices = match element {
                    Element::Pore => &g.pores,
                    Element::Throat => &g.throats,
                };
                for (local, &global) in indices.iter().enumerate() {
                    out[global] = values[local];
                }
            }
        }
        Ok(found.then_some(out))
    }

    // ========================================================================
    // 模型注册与再生
    // ========================================================================

    /// 向目标对象注册属性模型
    ///
    /// `RegenMode::Normal` 时立即求值一次（仅该模型本身；其依赖必须
    /// 已经可用），`Deferred` 时等待显式再生。
    ///
    /// # 错误
    /// 输出键的元素前缀与模型的输出元素类别不符时返回 `InvalidInput`。
    pub fn add_model(
        &mut self,
        target: Target,
        propname: impl Into<String>,
        model: Box<dyn PropertyModel>,
        regen_mode: RegenMode,
    ) -> PfResult<()> {
        let propname = propname.into();
        let key_element = Element::parse_key(&propname)?;
        if key_element != model.element() {
            return Err(PfError::invalid_input(format!(
                "属性键 '{}' 与模型输出元素类别 {} 不符",
                propname,
                model.element()
            )));
        }

        self.target_models_mut(target)?
            .add(propname.clone(), model, regen_mode);
        if regen_mode == RegenMode::Normal {
            self.run_model(target, &propname)?;
        }
        Ok(())
    }

    /// 求值单个模型并写回目标存储
    fn run_model(&mut self, target: Target, propname: &str) -> PfResult<()> {
        let values = {
            let registry = self.target_models(target)?;
            let entry = registry.get(propname).ok_or_else(|| {
                PfError::not_found(format!(
                    "模型 '{}' (对象 '{}')",
                    propname,
                    self.target_name(target).unwrap_or("?")
                ))
            })?;
            let ctx = ModelContext::new(self, target);
            entry.model.evaluate(&ctx)?
        };
        self.target_store_mut(target)?.set_scalar(propname, values)
    }

    /// 再生目标对象的全部模型（依赖拓扑序）
    ///
    /// 返回按求值顺序排列的属性名。
    pub fn regenerate(&mut self, target: Target) -> PfResult<Vec<String>> {
        let order = self.target_models(target)?.topo_order()?;
        for prop in &order {
            self.run_model(target, prop)?;
        }
        Ok(order)
    }

    /// 再生项目中全部对象的模型
    ///
    /// 类别顺序 geometry -> phase -> physics 保证跨对象依赖
    /// （物理模型读取相与几何属性）先于使用者求值。
    pub fn regenerate_all(&mut self) -> PfResult<()> {
        for id in self.geometry_ids() {
            self.regenerate(Target::Geometry(id))?;
        }
        for id in self.phase_ids() {
            self.regenerate(Target::Phase(id))?;
        }
        for id in self.physics_ids() {
            self.regenerate(Target::Physics(id))?;
        }
        Ok(())
    }

    /// 上游属性变化后的下游再生
    ///
    /// 重算目标对象上传递依赖 `changed_key` 的全部模型，并将变化
    /// 传播到下游对象：相的变化传播到该相的 physics，几何的变化
    /// 传播到关联该几何的 physics。
    ///
    /// 返回被重算的属性名（含传播部分，按求值顺序）。
    pub fn regenerate_downstream(
        &mut self,
        target: Target,
        changed_key: &str,
    ) -> PfResult<Vec<String>> {
        let mut changed: Vec<String> = vec![changed_key.to_string()];
        let mut regenerated: Vec<String> = Vec::new();

        let props = self
            .target_models(target)?
            .downstream_of(&[changed_key])?;
        for prop in &props {
            self.run_model(target, prop)?;
        }
        changed.extend(props.iter().cloned());
        regenerated.extend(props);

        // 跨对象传播
        let downstream_physics: Vec<PhysicsId> = match target {
            Target::Phase(pid) => self
                .physics_ids()
                .into_iter()
                .filter(|&id| self.physics[id.0].phase == Some(pid))
                .collect(),
            Target::Geometry(gid) => self
                .physics_ids()
                .into_iter()
                .filter(|&id| self.physics[id.0].geometry == Some(gid))
                .collect(),
            Target::Physics(_) => Vec::new(),
        };

        for phys_id in downstream_physics {
            let changed_refs: Vec<&str> = changed.iter().map(|s| s.as_str()).collect();
            let props = self
                .target_models(Target::Physics(phys_id))?
                .downstream_of(&changed_refs)?;
            for prop in &props {
                self.run_model(Target::Physics(phys_id), prop)?;
            }
            regenerated.extend(props);
        }

        Ok(regenerated)
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pf_network::generation::Cubic;

    fn small_project() -> Project {
        let net = Cubic::new([2, 2, 2]).build().unwrap();
        Project::new(net)
    }

    #[test]
    fn test_add_geometry_all() {
        let mut proj = small_project();
        let gid = proj.add_geometry_all("geo_01").unwrap();

        let g = proj.geometry(gid).unwrap();
        assert_eq!(g.pores().len(), 8);
        assert_eq!(g.throats().len(), 12);
        assert_eq!(g.name(), "geo_01");
    }

    #[test]
    fn test_geometry_overlap_rejected() {
        let mut proj = small_project();
        proj.add_geometry("geo_a", &[0, 1, 2], &[0, 1]).unwrap();

        let err = proj.add_geometry("geo_b", &[2, 3], &[5]).unwrap_err();
        assert!(err.to_string().contains("重叠"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut proj = small_project();
        proj.add_phase("water").unwrap();
        assert!(matches!(
            proj.add_phase("water").unwrap_err(),
            PfError::DuplicateName { .. }
        ));
    }

    #[test]
    fn test_phase_defaults() {
        let mut proj = small_project();
        let pid = proj.add_phase("water").unwrap();

        let t = proj.phase(pid).unwrap().store().scalar("pore.temperature");
        assert!(t.is_some());
        assert!((t.unwrap()[0] - 298.15).abs() < 1e-12);

        let p = proj.phase(pid).unwrap().store().scalar("pore.pressure");
        assert!((p.unwrap()[0] - 101325.0).abs() < 1e-9);
    }

    #[test]
    fn test_physics_needs_phase_before_geometry() {
        // 关联顺序约束：physics 先关联 geometry 必须失败
        let mut proj = small_project();
        let gid = proj.add_geometry_all("geo_01").unwrap();
        let phys = proj.add_physics("phys_01").unwrap();

        let err = proj.associate_geometry(phys, gid).unwrap_err();
        assert!(matches!(err, PfError::NotAssociated { .. }));
        assert!(err.to_string().contains("phase"));
    }

    #[test]
    fn test_physics_association_in_order() {
        let mut proj = small_project();
        let gid = proj.add_geometry_all("geo_01").unwrap();
        let pid = proj.add_phase("water").unwrap();
        let phys = proj.add_physics("phys_01").unwrap();

        proj.associate_phase(phys, pid).unwrap();
        proj.associate_geometry(phys, gid).unwrap();

        let p = proj.physics(phys).unwrap();
        assert_eq!(p.phase(), Some(pid));
        assert_eq!(p.geometry(), Some(gid));
        // 存储尺寸继承 geometry
        assert_eq!(p.store().pore_count(), 8);
        assert_eq!(p.store().throat_count(), 12);
    }

    #[test]
    fn test_interleave_network_from_geometries() {
        let mut proj = small_project();
        let g1 = proj.add_geometry("g1", &[0, 1, 2, 3], &[]).unwrap();
        let g2 = proj.add_geometry("g2", &[4, 5], &[]).unwrap();

        proj.geometry_mut(g1)
            .unwrap()
            .store_mut()
            .set_scalar("pore.diameter", vec![1.0, 2.0, 3.0, 4.0])
            .unwrap();
        proj.geometry_mut(g2)
            .unwrap()
            .store_mut()
            .set_scalar("pore.diameter", vec![5.0, 6.0])
            .unwrap();

        let full = proj.interleave_network("pore.diameter").unwrap().unwrap();
        assert_eq!(full.len(), 8);
        assert!((full[0] - 1.0).abs() < 1e-12);
        assert!((full[5] - 6.0).abs() < 1e-12);
        // 未覆盖的孔隙为 NaN
        assert!(full[6].is_nan());
        assert!(full[7].is_nan());
    }

    #[test]
    fn test_interleave_missing_key_is_none() {
        let proj = small_project();
        assert!(proj.interleave_network("pore.ghost").unwrap().is_none());
    }

    #[test]
    fn test_find_by_name() {
        let mut proj = small_project();
        let pid = proj.add_phase("water").unwrap();

        assert_eq!(proj.find_phase("water"), Some(pid));
        assert_eq!(proj.find_phase("oil"), None);
    }
}
