// crates/pf_io/src/exporters/csv.rs

//! CSV 格式导出器
//!
//! 把网络属性导出为两张平面表：`<前缀>_pores.csv`（每行一个孔隙）
//! 与 `<前缀>_throats.csv`（每行一条喉道），列为属性键，按字典序。

use crate::error::IoResult;
use pf_network::data::Element;
use pf_network::topology::Network;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV 导出器
#[derive(Debug, Clone)]
pub struct CsvExporter {
    /// 分隔符
    delimiter: char,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporter {
    /// 创建导出器，默认逗号分隔
    pub fn new() -> Self {
        Self { delimiter: ',' }
    }

    /// 设置分隔符
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// 导出网络到 `<前缀>_pores.csv` 与 `<前缀>_throats.csv`
    ///
    /// # 参数
    /// - `dir`: 输出目录（不存在时自动创建）
    /// - `prefix`: 文件名前缀
    pub fn export_network(
        &self,
        dir: impl AsRef<Path>,
        prefix: &str,
        net: &Network,
    ) -> IoResult<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        self.write_pores(&dir.join(format!("{}_pores.csv", prefix)), net)?;
        self.write_throats(&dir.join(format!("{}_throats.csv", prefix)), net)?;
        Ok(())
    }

    fn write_pores(&self, path: &Path, net: &Network) -> IoResult<()> {
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);
        let d = self.delimiter;
        let keys = net.store().scalar_keys_of(Element::Pore);

        // 表头
        write!(w, "pore{0}x{0}y{0}z", d)?;
        for key in &keys {
            write!(w, "{}{}", d, key)?;
        }
        writeln!(w)?;

        for (p, c) in net.coords().iter().enumerate() {
            write!(w, "{0}{1}{2:e}{1}{3:e}{1}{4:e}", p, d, c.x, c.y, c.z)?;
            for key in &keys {
                let values = net.store().scalar(key).unwrap_or(&[]);
                write!(w, "{}{:e}", d, values[p])?;
            }
            writeln!(w)?;
        }
        w.flush()?;
        Ok(())
    }

    fn write_throats(&self, path: &Path, net: &Network) -> IoResult<()> {
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);
        let d = self.delimiter;
        let keys = net.store().scalar_keys_of(Element::Throat);

        write!(w, "throat{0}pore1{0}pore2", d)?;
        for key in &keys {
            write!(w, "{}{}", d, key)?;
        }
        writeln!(w)?;

        for (t, &[a, b]) in net.conns().iter().enumerate() {
            write!(w, "{0}{1}{2}{1}{3}", t, d, a, b)?;
            for key in &keys {
                let values = net.store().scalar(key).unwrap_or(&[]);
                write!(w, "{}{:e}", d, values[t])?;
            }
            writeln!(w)?;
        }
        w.flush()?;
        Ok(())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pf_network::generation::Cubic;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pf_csv_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_export_writes_both_tables() {
        let mut net = Cubic::new([2, 1, 1]).build().unwrap();
        net.store_mut().fill_scalar("pore.diameter", 2e-5).unwrap();
        net.store_mut().fill_scalar("throat.length", 5e-5).unwrap();

        let dir = temp_dir("basic");
        CsvExporter::new().export_network(&dir, "net", &net).unwrap();

        let pores = fs::read_to_string(dir.join("net_pores.csv")).unwrap();
        assert!(pores.starts_with("pore,x,y,z,pore.diameter"));
        assert_eq!(pores.lines().count(), 3); // 表头 + 2 孔隙

        let throats = fs::read_to_string(dir.join("net_throats.csv")).unwrap();
        assert!(throats.starts_with("throat,pore1,pore2,throat.length"));
        assert_eq!(throats.lines().count(), 2); // 表头 + 1 喉道
        assert!(throats.lines().nth(1).unwrap().starts_with("0,0,1,"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_with_custom_delimiter() {
        let net = Cubic::new([2, 1, 1]).build().unwrap();
        let dir = temp_dir("delim");
        CsvExporter::new()
            .delimiter(';')
            .export_network(&dir, "net", &net)
            .unwrap();

        let pores = fs::read_to_string(dir.join("net_pores.csv")).unwrap();
        assert!(pores.starts_with("pore;x;y;z"));

        let _ = fs::remove_dir_all(&dir);
    }
}
