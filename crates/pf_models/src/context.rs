// crates/pf_models/src/context.rs

//! 模型求值上下文
//!
//! [`ModelContext`] 是模型求值时的只读窗口，提供：
//!
//! - 目标对象的子集索引（全局编号）
//! - 按查找链解析字符串属性键（子集对齐或全域）
//! - 网络拓扑（连接、坐标）
//!
//! 查找链按目标类别确定（见 crate 级文档）。查找失败返回
//! [`PfError::PropertyNotFound`]，携带完整的查找位置列表。

use crate::project::{Project, Target};
use glam::DVec3;
use pf_foundation::error::{PfError, PfResult};
use pf_network::data::Element;
use pf_network::topology::Network;

/// 模型求值上下文
pub struct ModelContext<'a> {
    project: &'a Project,
    target: Target,
}

impl<'a> ModelContext<'a> {
    /// 创建上下文
    pub fn new(project: &'a Project, target: Target) -> Self {
        Self { project, target }
    }

    /// 所属项目
    pub fn project(&self) -> &Project {
        self.project
    }

    /// 求值目标
    pub fn target(&self) -> Target {
        self.target
    }

    /// 网络引用
    pub fn network(&self) -> &Network {
        self.project.network()
    }

    /// 喉道连接（全局）
    pub fn conns(&self) -> &[[usize; 2]] {
        self.project.network().conns()
    }

    /// 孔隙坐标（全局）
    pub fn coords(&self) -> &[DVec3] {
        self.project.network().coords()
    }

    // ========================================================================
    // 子集索引
    // ========================================================================

    /// 目标对象在指定元素类别下的全局索引
    ///
    /// - Geometry: 自身子集
    /// - Phase: 全域
    /// - Physics: 关联 geometry 的子集（未关联时报 `NotAssociated`）
    pub fn indices(&self, element: Element) -> PfResult<Vec<usize>> {
        match self.target {
            Target::Geometry(id) => {
                let g = self.project.geometry(id)?;
                Ok(match element {
                    Element::Pore => g.pores().to_vec(),
                    Element::Throat => g.throats().to_vec(),
                })
            }
            Target::Phase(_) => {
                let len = self.domain_len(element);
                Ok((0..len).collect())
            }
            Target::Physics(id) => {
                let phys = self.project.physics(id)?;
                let gid = phys.geometry().ok_or_else(|| {
                    PfError::not_associated(phys.name().to_string(), "geometry")
                })?;
                let g = self.project.geometry(gid)?;
                Ok(match element {
                    Element::Pore => g.pores().to_vec(),
                    Element::Throat => g.throats().to_vec(),
                })
            }
        }
    }

    /// 目标子集大小
    pub fn count(&self, element: Element) -> PfResult<usize> {
        Ok(self.indices(element)?.len())
    }

    fn domain_len(&self, element: Element) -> usize {
        match element {
            Element::Pore => self.project.network().pore_count(),
            Element::Throat => self.project.network().throat_count(),
        }
    }

    // ========================================================================
    // 属性查找
    // ========================================================================

    /// 按查找链解析键，返回全域数组
    pub fn lookup_global(&self, key: &str) -> PfResult<Vec<f64>> {
        Element::parse_key(key)?;
        let mut searched: Vec<String> = Vec::new();

        match self.target {
            Target::Geometry(id) => {
                // geometry 自身属性包含在网络类别的拼接之中
                let g = self.project.geometry(id)?;
                searched.push(format!("geometry '{}'", g.name()));
            }
            Target::Phase(id) => {
                let name = self.project.phase(id)?.name().to_string();
                if let Some(v) = self.project.interleave_phase(id, key)? {
                    return Ok(v);
                }
                searched.push(format!("phase '{}' 及其 physics", name));
            }
            Target::Physics(id) => {
                let phys = self.project.physics(id)?;
                let name = phys.name().to_string();
                let phase_id = phys
                    .phase()
                    .ok_or_else(|| PfError::not_associated(name.clone(), "phase"))?;
                let phase_name = self.project.phase(phase_id)?.name().to_string();
                if let Some(v) = self.project.interleave_phase(phase_id, key)? {
                    return Ok(v);
                }
                searched.push(format!("physics '{}'", name));
                searched.push(format!("phase '{}' 及其 physics", phase_name));
            }
        }

        if let Some(v) = self.project.interleave_network(key)? {
            return Ok(v);
        }
        searched.push("network 及其 geometry".to_string());

        Err(PfError::property_not_found(key, searched))
    }

    /// 按查找链解析键，返回与目标子集对齐的数组
    pub fn lookup(&self, key: &str) -> PfResult<Vec<f64>> {
        let element = Element::parse_key(key)?;
        let global = self.lookup_global(key)?;
        let indices = self.indices(element)?;
        Ok(indices.iter().map(|&i| global[i]).collect())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Project;
    use pf_network::generation::Cubic;

    fn project_with_objects() -> (Project, Target) {
        let net = Cubic::new([2, 2, 1]).build().unwrap();
        let mut proj = Project::new(net);
        let gid = proj.add_geometry_all("geo").unwrap();
        let pid = proj.add_phase("water").unwrap();
        let phys = proj.add_physics_to("phys", pid, gid).unwrap();
        (proj, Target::Physics(phys))
    }

    #[test]
    fn test_physics_lookup_finds_phase_property() {
        let (proj, target) = project_with_objects();
        let ctx = ModelContext::new(&proj, target);

        // 相的默认温度可经 physics 查找链取得
        let t = ctx.lookup("pore.temperature").unwrap();
        assert_eq!(t.len(), 4);
        assert!((t[0] - 298.15).abs() < 1e-12);
    }

    #[test]
    fn test_physics_lookup_finds_geometry_property() {
        let (mut proj, target) = project_with_objects();
        let gid = proj.find_geometry("geo").unwrap();
        proj.geometry_mut(gid)
            .unwrap()
            .store_mut()
            .fill_scalar("throat.diameter", 0.5)
            .unwrap();

        let ctx = ModelContext::new(&proj, target);
        let d = ctx.lookup("throat.diameter").unwrap();
        assert_eq!(d.len(), 4);
        assert!((d[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_lookup_missing_reports_search_chain() {
        let (proj, target) = project_with_objects();
        let ctx = ModelContext::new(&proj, target);

        let err = ctx.lookup("pore.ghost").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("pore.ghost"));
        assert!(msg.contains("water"));
        assert!(msg.contains("network"));
    }

    #[test]
    fn test_lookup_before_phase_association_fails() {
        // 关联建立前经由 physics 查找属性应报描述性错误
        let net = Cubic::new([2, 1, 1]).build().unwrap();
        let mut proj = Project::new(net);
        let phys = proj.add_physics("phys_bare").unwrap();

        let ctx = ModelContext::new(&proj, Target::Physics(phys));
        let err = ctx.lookup("pore.temperature").unwrap_err();
        assert!(matches!(err, PfError::NotAssociated { .. }));
        assert!(err.to_string().contains("phys_bare"));
    }

    #[test]
    fn test_phase_indices_cover_domain() {
        let (proj, _) = project_with_objects();
        let pid = proj.find_phase("water").unwrap();
        let ctx = ModelContext::new(&proj, Target::Phase(pid));

        assert_eq!(ctx.indices(Element::Pore).unwrap().len(), 4);
        assert_eq!(ctx.count(Element::Throat).unwrap(), 4);
    }
}
