// crates/pf_network/src/generation.rs

//! 结构化网络生成
//!
//! 提供立方（简单立方格点、6 连通）网络生成器，并自动打上表面标签。
//!
//! # 标签约定
//!
//! - `left` / `right`: x 方向两端面
//! - `front` / `back`: y 方向两端面
//! - `bottom` / `top`: z 方向两端面
//! - `surface`: 上述六个面的并集
//! - `internal`: surface 的补集

use crate::topology::Network;
use glam::DVec3;
use pf_foundation::error::{PfError, PfResult};

/// 立方网络生成器
///
/// # 示例
/// ```
/// use pf_network::generation::Cubic;
///
/// let net = Cubic::new([5, 5, 5]).with_spacing(1e-4).build().unwrap();
/// assert_eq!(net.pore_count(), 125);
/// assert_eq!(net.throat_count(), 300);
/// ```
#[derive(Debug, Clone)]
pub struct Cubic {
    /// 三个方向的孔隙数 [nx, ny, nz]
    shape: [usize; 3],
    /// 格点间距 [m]
    spacing: f64,
}

impl Cubic {
    /// 创建生成器，默认间距 1.0 m
    pub fn new(shape: [usize; 3]) -> Self {
        Self {
            shape,
            spacing: 1.0,
        }
    }

    /// 设置格点间距 [m]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// 线性索引: i = (x * ny + y) * nz + z
    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        let [_, ny, nz] = self.shape;
        (x * ny + y) * nz + z
    }

    /// 生成网络
    ///
    /// # 错误
    /// 任一方向孔隙数为 0 或间距非正时返回 `InvalidInput`。
    pub fn build(&self) -> PfResult<Network> {
        let [nx, ny, nz] = self.shape;
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(PfError::invalid_input(format!(
                "网络形状 {:?} 各方向必须至少为 1",
                self.shape
            )));
        }
        if !(self.spacing > 0.0) || !self.spacing.is_finite() {
            return Err(PfError::invalid_input(format!(
                "格点间距必须为正有限值, 实际 {}",
                self.spacing
            )));
        }

        let np = nx * ny * nz;
        let mut coords = Vec::with_capacity(np);
        for x in 0..nx {
            for y in 0..ny {
                for z in 0..nz {
                    coords.push(
                        DVec3::new(x as f64 + 0.5, y as f64 + 0.5, z as f64 + 0.5) * self.spacing,
                    );
                }
            }
        }

        // 沿三个轴向建立连接
        let mut conns = Vec::with_capacity(3 * np);
        for x in 0..nx {
            for y in 0..ny {
                for z in 0..nz {
                    let i = self.index(x, y, z);
                    if x + 1 < nx {
                        conns.push([i, self.index(x + 1, y, z)]);
                    }
                    if y + 1 < ny {
                        conns.push([i, self.index(x, y + 1, z)]);
                    }
                    if z + 1 < nz {
                        conns.push([i, self.index(x, y, z + 1)]);
                    }
                }
            }
        }

        let mut net = Network::new(coords, conns)?;
        self.apply_face_labels(&mut net)?;
        Ok(net)
    }

    /// 打上六面标签及 surface/internal
    fn apply_face_labels(&self, net: &mut Network) -> PfResult<()> {
        let [nx, ny, nz] = self.shape;
        let mut faces: [(&str, Vec<usize>); 6] = [
            ("pore.left", Vec::new()),
            ("pore.right", Vec::new()),
            ("pore.front", Vec::new()),
            ("pore.back", Vec::new()),
            ("pore.bottom", Vec::new()),
            ("pore.top", Vec::new()),
        ];
        let mut surface = Vec::new();

        for x in 0..nx {
            for y in 0..ny {
                for z in 0..nz {
                    let i = self.index(x, y, z);
                    let mut on_surface = false;
                    if x == 0 {
                        faces[0].1.push(i);
                        on_surface = true;
                    }
                    if x == nx - 1 {
                        faces[1].1.push(i);
                        on_surface = true;
                    }
                    if y == 0 {
                        faces[2].1.push(i);
                        on_surface = true;
                    }
                    if y == ny - 1 {
                        faces[3].1.push(i);
                        on_surface = true;
                    }
                    if z == 0 {
                        faces[4].1.push(i);
                        on_surface = true;
                    }
                    if z == nz - 1 {
                        faces[5].1.push(i);
                        on_surface = true;
                    }
                    if on_surface {
                        surface.push(i);
                    }
                }
            }
        }

        for (key, indices) in &faces {
            net.labels_mut().apply(key, indices)?;
        }

        let mut on_surface = vec![false; net.pore_count()];
        for &p in &surface {
            on_surface[p] = true;
        }
        let internal: Vec<usize> = on_surface
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| (!b).then_some(i))
            .collect();
        net.labels_mut().apply("pore.surface", &surface)?;
        net.labels_mut().apply("pore.internal", &internal)?;
        Ok(())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_counts_5x5x5() {
        let net = Cubic::new([5, 5, 5]).build().unwrap();
        assert_eq!(net.pore_count(), 125);
        // 3 * n^2 * (n-1) = 3 * 25 * 4
        assert_eq!(net.throat_count(), 300);
    }

    #[test]
    fn test_cubic_counts_2x2x2() {
        let net = Cubic::new([2, 2, 2]).build().unwrap();
        assert_eq!(net.pore_count(), 8);
        assert_eq!(net.throat_count(), 12);
    }

    #[test]
    fn test_chain_shape() {
        let net = Cubic::new([10, 1, 1]).build().unwrap();
        assert_eq!(net.pore_count(), 10);
        assert_eq!(net.throat_count(), 9);
    }

    #[test]
    fn test_spacing_applied() {
        let net = Cubic::new([2, 1, 1]).with_spacing(1e-4).build().unwrap();
        assert!((net.throat_spacing(0) - 1e-4).abs() < 1e-16);
        // 坐标位于格点中心
        assert!((net.coords()[0].x - 0.5e-4).abs() < 1e-16);
    }

    #[test]
    fn test_face_labels() {
        let net = Cubic::new([3, 3, 3]).build().unwrap();
        assert_eq!(net.pores_with_label("left").unwrap().len(), 9);
        assert_eq!(net.pores_with_label("right").unwrap().len(), 9);
        assert_eq!(net.pores_with_label("surface").unwrap().len(), 26);
        assert_eq!(net.pores_with_label("internal").unwrap().len(), 1);
    }

    #[test]
    fn test_left_right_disjoint() {
        let net = Cubic::new([3, 2, 2]).build().unwrap();
        let left = net.pores_with_label("left").unwrap();
        let right = net.pores_with_label("right").unwrap();
        assert!(left.iter().all(|p| !right.contains(p)));
    }

    #[test]
    fn test_invalid_shape_rejected() {
        assert!(Cubic::new([0, 3, 3]).build().is_err());
        assert!(Cubic::new([3, 3, 3]).with_spacing(0.0).build().is_err());
        assert!(Cubic::new([3, 3, 3]).with_spacing(-1.0).build().is_err());
    }

    #[test]
    fn test_single_pore_has_no_throats() {
        let net = Cubic::new([1, 1, 1]).build().unwrap();
        assert_eq!(net.pore_count(), 1);
        assert_eq!(net.throat_count(), 0);
    }
}
