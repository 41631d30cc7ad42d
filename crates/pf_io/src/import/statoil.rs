// crates/pf_io/src/import/statoil.rs

//! Statoil 网络文件导入
//!
//! Statoil 格式是孔隙网络抽取程序输出的四文件格式：
//!
//! - `<prefix>_node1.dat`: 首行 `Np Lx Ly Lz`，随后每行
//!   `编号 x y z 配位数 ...`（其余列忽略）
//! - `<prefix>_node2.dat`: 每行 `编号 体积 半径 形状因子 黏土体积`
//! - `<prefix>_link1.dat`: 首行 `Nt`，随后每行
//!   `编号 孔隙1 孔隙2 半径 形状因子 总长度`
//! - `<prefix>_link2.dat`: 每行
//!   `编号 孔隙1 孔隙2 孔隙1段长 孔隙2段长 喉道段长 体积 黏土体积`
//!
//! 孔隙编号为 1 基；连接到编号 -1 / 0 的喉道是进出口储层的伪连接，
//! 导入时剔除，并把对端孔隙打上 `inlet` / `outlet` 标签。
//!
//! node2 与 link2 可缺省（相应体积属性不生成，仅记录一条警告）。

use crate::error::{IoError, IoResult};
use glam::DVec3;
use pf_network::topology::Network;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// link1 的一行记录
struct Link1Row {
    /// 孔隙编号（1 基；<=0 为储层伪连接）
    p1: i64,
    p2: i64,
    /// 喉道半径 [m]
    radius: f64,
    /// 形状因子
    shape_factor: f64,
    /// 总长度（孔心到孔心）[m]
    total_length: f64,
}

/// link2 的一行记录
struct Link2Row {
    /// 孔隙1段长 [m]
    length_pore1: f64,
    /// 孔隙2段长 [m]
    length_pore2: f64,
    /// 喉道段长 [m]
    length_throat: f64,
    /// 体积 [m³]
    volume: f64,
    /// 黏土体积 [m³]
    clay_volume: f64,
}

/// 从目录加载 Statoil 四文件网络
///
/// # 参数
/// - `dir`: 数据目录
/// - `prefix`: 文件名前缀（如 `"berea"`）
///
/// # 错误
/// node1/link1 缺失或格式错误时报错；node2/link2 缺失仅记录警告。
pub fn load_statoil(dir: impl AsRef<Path>, prefix: &str) -> IoResult<Network> {
    let dir = dir.as_ref();
    let node1_path = dir.join(format!("{}_node1.dat", prefix));
    let node2_path = dir.join(format!("{}_node2.dat", prefix));
    let link1_path = dir.join(format!("{}_link1.dat", prefix));
    let link2_path = dir.join(format!("{}_link2.dat", prefix));

    let coords = read_node1(&node1_path)?;
    let np = coords.len();
    let link1 = read_link1(&link1_path)?;

    // 剔除储层伪连接，收集 inlet/outlet 标签
    let mut conns: Vec<[usize; 2]> = Vec::new();
    let mut kept_rows: Vec<usize> = Vec::new();
    let mut inlet: Vec<usize> = Vec::new();
    let mut outlet: Vec<usize> = Vec::new();
    for (row, link) in link1.iter().enumerate() {
        let boundary = |p: i64| p <= 0;
        match (boundary(link.p1), boundary(link.p2)) {
            (false, false) => {
                let a = to_zero_based(link.p1, np, &link1_path, row + 2)?;
                let b = to_zero_based(link.p2, np, &link1_path, row + 2)?;
                conns.push([a, b]);
                kept_rows.push(row);
            }
            (true, false) => {
                let b = to_zero_based(link.p2, np, &link1_path, row + 2)?;
                mark_boundary(link.p1, b, &mut inlet, &mut outlet);
            }
            (false, true) => {
                let a = to_zero_based(link.p1, np, &link1_path, row + 2)?;
                mark_boundary(link.p2, a, &mut inlet, &mut outlet);
            }
            // 两端都是储层：无信息可保留
            (true, true) => {}
        }
    }

    let mut net = Network::new(coords, conns).map_err(IoError::Core)?;
    net.labels_mut().apply("pore.inlet", &inlet)?;
    net.labels_mut().apply("pore.outlet", &outlet)?;

    // link1 喉道属性
    let diameter: Vec<f64> = kept_rows.iter().map(|&r| 2.0 * link1[r].radius).collect();
    let shape: Vec<f64> = kept_rows.iter().map(|&r| link1[r].shape_factor).collect();
    let total: Vec<f64> = kept_rows.iter().map(|&r| link1[r].total_length).collect();
    net.store_mut().set_scalar("throat.diameter", diameter)?;
    net.store_mut().set_scalar("throat.shape_factor", shape)?;
    net.store_mut().set_scalar("throat.total_length", total)?;

    // node2 孔隙属性（可缺省）
    match read_node2(&node2_path, np) {
        Ok((volume, radius, shape_factor, clay)) => {
            net.store_mut().set_scalar("pore.volume", volume)?;
            net.store_mut()
                .set_scalar("pore.diameter", radius.iter().map(|r| 2.0 * r).collect())?;
            net.store_mut()
                .set_scalar("pore.shape_factor", shape_factor)?;
            net.store_mut().set_scalar("pore.clay_volume", clay)?;
        }
        Err(IoError::FileNotFound { path }) => {
            warn!(path = %path.display(), "node2 缺失, 跳过孔隙体积属性");
        }
        Err(e) => return Err(e),
    }

    // link2 喉道属性（可缺省）
    match read_link2(&link2_path, link1.len()) {
        Ok(rows) => {
            let pick = |f: fn(&Link2Row) -> f64| -> Vec<f64> {
                kept_rows.iter().map(|&r| f(&rows[r])).collect()
            };
            net.store_mut()
                .set_scalar("throat.length", pick(|r| r.length_throat))?;
            net.store_mut()
                .set_scalar("throat.conduit_lengths_pore1", pick(|r| r.length_pore1))?;
            net.store_mut()
                .set_scalar("throat.conduit_lengths_pore2", pick(|r| r.length_pore2))?;
            net.store_mut()
                .set_scalar("throat.volume", pick(|r| r.volume))?;
            net.store_mut()
                .set_scalar("throat.clay_volume", pick(|r| r.clay_volume))?;
        }
        Err(IoError::FileNotFound { path }) => {
            warn!(path = %path.display(), "link2 缺失, 跳过喉道体积属性");
        }
        Err(e) => return Err(e),
    }

    info!(
        pores = net.pore_count(),
        throats = net.throat_count(),
        inlet = inlet_count(&net),
        "Statoil 网络导入完成"
    );
    Ok(net)
}

fn inlet_count(net: &Network) -> usize {
    net.labels().count("pore.inlet").unwrap_or(0)
}

/// 1 基编号转 0 基并检查范围
fn to_zero_based(p: i64, np: usize, file: &Path, line: usize) -> IoResult<usize> {
    if p < 1 || p as usize > np {
        return Err(IoError::parse(
            file,
            line,
            format!("孔隙编号 {} 超出范围 1..={}", p, np),
        ));
    }
    Ok((p - 1) as usize)
}

/// 记录储层对端孔隙的标签（-1 为 inlet，0 为 outlet）
fn mark_boundary(reservoir: i64, pore: usize, inlet: &mut Vec<usize>, outlet: &mut Vec<usize>) {
    if reservoir < 0 {
        inlet.push(pore);
    } else {
        outlet.push(pore);
    }
}

/// 读取文件内容，不存在时返回 FileNotFound
fn read_to_string(path: &Path) -> IoResult<String> {
    if !path.exists() {
        return Err(IoError::file_not_found(path));
    }
    Ok(fs::read_to_string(path)?)
}

/// 按空白拆分一行并解析为 f64 列表
fn parse_floats(line: &str, file: &Path, lineno: usize, min_fields: usize) -> IoResult<Vec<f64>> {
    let fields: Vec<f64> = line
        .split_whitespace()
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|_| IoError::parse(file, lineno, format!("无法解析数值 '{}'", tok)))
        })
        .collect::<IoResult<_>>()?;
    if fields.len() < min_fields {
        return Err(IoError::parse(
            file,
            lineno,
            format!("字段不足: 期望至少 {}, 实际 {}", min_fields, fields.len()),
        ));
    }
    Ok(fields)
}

/// 读取 node1：返回孔隙坐标
fn read_node1(path: &Path) -> IoResult<Vec<DVec3>> {
    let content = read_to_string(path)?;
    let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (lineno, header) = lines
        .next()
        .ok_or_else(|| IoError::parse(path, 1, "文件为空".to_string()))?;
    let header = parse_floats(header, path, lineno + 1, 1)?;
    let np = header[0] as usize;

    let mut coords = vec![DVec3::ZERO; np];
    let mut seen = vec![false; np];
    for (lineno, line) in lines {
        let fields = parse_floats(line, path, lineno + 1, 4)?;
        let idx = fields[0] as usize;
        if idx < 1 || idx > np {
            return Err(IoError::parse(
                path,
                lineno + 1,
                format!("孔隙编号 {} 超出范围 1..={}", idx, np),
            ));
        }
        coords[idx - 1] = DVec3::new(fields[1], fields[2], fields[3]);
        seen[idx - 1] = true;
    }
    if let Some(missing) = seen.iter().position(|&s| !s) {
        return Err(IoError::MissingData(format!(
            "node1 缺少孔隙 {} 的记录",
            missing + 1
        )));
    }
    Ok(coords)
}

/// 读取 node2：返回 (体积, 半径, 形状因子, 黏土体积)
#[allow(clippy::type_complexity)]
fn read_node2(path: &Path, np: usize) -> IoResult<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>)> {
    let content = read_to_string(path)?;
    let mut volume = vec![0.0; np];
    let mut radius = vec![0.0; np];
    let mut shape = vec![0.0; np];
    let mut clay = vec![0.0; np];
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_floats(line, path, lineno + 1, 5)?;
        let idx = fields[0] as usize;
        if idx < 1 || idx > np {
            return Err(IoError::parse(
                path,
                lineno + 1,
                format!("孔隙编号 {} 超出范围 1..={}", idx, np),
            ));
        }
        volume[idx - 1] = fields[1];
        radius[idx - 1] = fields[2];
        shape[idx - 1] = fields[3];
        clay[idx - 1] = fields[4];
    }
    Ok((volume, radius, shape, clay))
}

/// 读取 link1
fn read_link1(path: &Path) -> IoResult<Vec<Link1Row>> {
    let content = read_to_string(path)?;
    let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (lineno, header) = lines
        .next()
        .ok_or_else(|| IoError::parse(path, 1, "文件为空".to_string()))?;
    let nt = parse_floats(header, path, lineno + 1, 1)?[0] as usize;

    let mut rows = Vec::with_capacity(nt);
    for (lineno, line) in lines {
        let fields = parse_floats(line, path, lineno + 1, 6)?;
        rows.push(Link1Row {
            p1: fields[1] as i64,
            p2: fields[2] as i64,
            radius: fields[3],
            shape_factor: fields[4],
            total_length: fields[5],
        });
    }
    if rows.len() != nt {
        return Err(IoError::MissingData(format!(
            "link1 声明 {} 条喉道, 实际 {} 条",
            nt,
            rows.len()
        )));
    }
    Ok(rows)
}

/// 读取 link2（行序与 link1 对应）
fn read_link2(path: &Path, nt: usize) -> IoResult<Vec<Link2Row>> {
    let content = read_to_string(path)?;
    let mut rows = Vec::with_capacity(nt);
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_floats(line, path, lineno + 1, 8)?;
        rows.push(Link2Row {
            length_pore1: fields[3],
            length_pore2: fields[4],
            length_throat: fields[5],
            volume: fields[6],
            clay_volume: fields[7],
        });
    }
    if rows.len() != nt {
        return Err(IoError::MissingData(format!(
            "link2 应与 link1 同为 {} 行, 实际 {} 行",
            nt,
            rows.len()
        )));
    }
    Ok(rows)
}

// ============================================================================
// 测试
// ============================================================================
