// crates/pf_io/src/exporters/vtp.rs

//! VTP 格式导出器
//!
//! 导出 VTK PolyData 格式，用于 ParaView 可视化：孔隙为点、
//! 喉道为线段，孔隙属性进 PointData、喉道属性进 CellData。
//!
//! # 功能
//!
//! - 导出网络自身的属性与标签（标签以 UInt8 数组写出）
//! - 附带相数据：相（及其 physics）的属性插值拼接为全域数组后
//!   以 `<相名>.<属性键>` 命名写出
//! - ASCII 编码

use crate::error::IoResult;
use pf_models::project::{PhaseId, Project};
use pf_network::data::Element;
use pf_network::topology::Network;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// VTP 导出器
#[derive(Debug, Clone, Default)]
pub struct VtpExporter {
    /// 是否导出标签
    include_labels: bool,
}

impl VtpExporter {
    /// 创建导出器（默认包含标签）
    pub fn new() -> Self {
        Self {
            include_labels: true,
        }
    }

    /// 设置是否导出标签
    pub fn include_labels(mut self, include: bool) -> Self {
        self.include_labels = include;
        self
    }

    /// 导出网络
    pub fn export_network(&self, path: impl AsRef<Path>, net: &Network) -> IoResult<()> {
        let file = File::create(path.as_ref())?;
        let mut w = BufWriter::new(file);

        self.write_header(&mut w, net)?;
        self.write_points(&mut w, net)?;
        self.write_lines(&mut w, net)?;
        self.write_network_data(&mut w, net, &[])?;
        self.write_footer(&mut w)?;

        w.flush()?;
        Ok(())
    }

    /// 导出项目：网络属性 + 指定相的属性
    pub fn export_project(
        &self,
        path: impl AsRef<Path>,
        project: &Project,
        phases: &[PhaseId],
    ) -> IoResult<()> {
        let net = project.network();
        let file = File::create(path.as_ref())?;
        let mut w = BufWriter::new(file);

        // 收集相数据数组：(名称, 元素类别, 全域数组)
        let mut phase_arrays: Vec<(String, Element, Vec<f64>)> = Vec::new();
        for &pid in phases {
            let phase = project.phase(pid)?;
            let phase_name = phase.name().to_string();

            // 相自身键 + 该相全部 physics 的键
            let mut keys: BTreeSet<String> = phase
                .store()
                .scalar_keys()
                .map(|k| k.to_string())
                .collect();
            for phys_id in project.physics_ids() {
                let phys = project.physics(phys_id)?;
                if phys.phase() == Some(pid) {
                    keys.extend(phys.store().scalar_keys().map(|k| k.to_string()));
                }
            }

            for key in keys {
                if let Some(values) = project.interleave_phase(pid, &key)? {
                    let element = Element::parse_key(&key)?;
                    phase_arrays.push((format!("{}.{}", phase_name, key), element, values));
                }
            }
        }

        self.write_header(&mut w, net)?;
        self.write_points(&mut w, net)?;
        self.write_lines(&mut w, net)?;
        self.write_network_data(&mut w, net, &phase_arrays)?;
        self.write_footer(&mut w)?;

        w.flush()?;
        Ok(())
    }

    // ========================================================================
    // 写出
    // ========================================================================

    fn write_header<W: Write>(&self, w: &mut W, net: &Network) -> IoResult<()> {
        writeln!(w, r#"<?xml version="1.0"?>"#)?;
        writeln!(
            w,
            r#"<VTKFile type="PolyData" version="0.1" byte_order="LittleEndian">"#
        )?;
        writeln!(w, "  <PolyData>")?;
        writeln!(
            w,
            r#"    <Piece NumberOfPoints="{}" NumberOfVerts="0" NumberOfLines="{}" NumberOfStrips="0" NumberOfPolys="0">"#,
            net.pore_count(),
            net.throat_count()
        )?;
        Ok(())
    }

    fn write_points<W: Write>(&self, w: &mut W, net: &Network) -> IoResult<()> {
        writeln!(w, "      <Points>")?;
        writeln!(
            w,
            r#"        <DataArray type="Float64" NumberOfComponents="3" format="ascii">"#
        )?;
        for c in net.coords() {
            writeln!(w, "          {:e} {:e} {:e}", c.x, c.y, c.z)?;
        }
        writeln!(w, "        </DataArray>")?;
        writeln!(w, "      </Points>")?;
        Ok(())
    }

    fn write_lines<W: Write>(&self, w: &mut W, net: &Network) -> IoResult<()> {
        writeln!(w, "      <Lines>")?;
        writeln!(
            w,
            r#"        <DataArray type="Int64" Name="connectivity" format="ascii">"#
        )?;
        for &[a, b] in net.conns() {
            writeln!(w, "          {} {}", a, b)?;
        }
        writeln!(w, "        </DataArray>")?;
        writeln!(
            w,
            r#"        <DataArray type="Int64" Name="offsets" format="ascii">"#
        )?;
        for t in 0..net.throat_count() {
            writeln!(w, "          {}", 2 * (t + 1))?;
        }
        writeln!(w, "        </DataArray>")?;
        writeln!(w, "      </Lines>")?;
        Ok(())
    }

    /// 写出 PointData 与 CellData
    fn write_network_data<W: Write>(
        &self,
        w: &mut W,
        net: &Network,
        phase_arrays: &[(String, Element, Vec<f64>)],
    ) -> IoResult<()> {
        for element in [Element::Pore, Element::Throat] {
            let section = match element {
                Element::Pore => "PointData",
                Element::Throat => "CellData",
            };
            writeln!(w, "      <{}>", section)?;

            // 网络属性
            for key in net.store().scalar_keys_of(element) {
                let values = net.store().scalar(key).unwrap_or(&[]);
                self.write_scalar_array(w, &format!("network.{}", key), values)?;
            }

            // 相属性
            for (name, el, values) in phase_arrays {
                if *el == element {
                    self.write_scalar_array(w, name, values)?;
                }
            }

            // 标签
            if self.include_labels {
                for key in net.labels().keys_of(element) {
                    if let Some(mask) = net.labels().mask(key) {
                        self.write_label_array(w, key, mask)?;
                    }
                }
            }

            writeln!(w, "      </{}>", section)?;
        }
        Ok(())
    }

    fn write_scalar_array<W: Write>(&self, w: &mut W, name: &str, values: &[f64]) -> IoResult<()> {
        writeln!(
            w,
            r#"        <DataArray type="Float64" Name="{}" format="ascii">"#,
            name
        )?;
        for v in values {
            writeln!(w, "          {:e}", v)?;
        }
        writeln!(w, "        </DataArray>")?;
        Ok(())
    }

    fn write_label_array<W: Write>(&self, w: &mut W, name: &str, mask: &[bool]) -> IoResult<()> {
        writeln!(
            w,
            r#"        <DataArray type="UInt8" Name="{}" format="ascii">"#,
            name
        )?;
        for &b in mask {
            writeln!(w, "          {}", b as u8)?;
        }
        writeln!(w, "        </DataArray>")?;
        Ok(())
    }

    fn write_footer<W: Write>(&self, w: &mut W) -> IoResult<()> {
        writeln!(w, "    </Piece>")?;
        writeln!(w, "  </PolyData>")?;
        writeln!(w, "</VTKFile>")?;
        Ok(())
    }
}

// ============================================================================
// 测试
// ============================================================================
