// crates/pf_transport/tests/conservation.rs

//! 质量守恒测试
//!
//! 稳态解必须满足：入口净流率与出口净流率相抵，且每个内部
//! 孔隙的净流量为零。

use pf_models::project::{PhaseId, Project};
use pf_network::generation::Cubic;
use pf_transport::{GenericTransport, TransportSettings};

/// 带确定性非均匀传导率的立方网络项目
fn heterogeneous_project(shape: [usize; 3]) -> (Project, PhaseId) {
    let net = Cubic::new(shape).with_spacing(1e-4).build().unwrap();
    let nt = net.throat_count();
    let mut proj = Project::new(net);
    let pid = proj.add_phase("phase").unwrap();

    // 按喉道编号生成 1e-12..8e-12 的确定性传导率
    let g: Vec<f64> = (0..nt).map(|t| 1e-12 * (1 + t % 8) as f64).collect();
    proj.phase_mut(pid)
        .unwrap()
        .store_mut()
        .set_scalar("throat.conductance", g)
        .unwrap();
    (proj, pid)
}

fn transport() -> GenericTransport {
    GenericTransport::new(TransportSettings {
        quantity: "pore.quantity".into(),
        conductance: "throat.conductance".into(),
    })
}

#[test]
fn test_inlet_outlet_rates_balance() {
    let (mut proj, pid) = heterogeneous_project([4, 4, 4]);
    let inlet = proj.network().pores_with_label("left").unwrap();
    let outlet = proj.network().pores_with_label("right").unwrap();

    let mut alg = transport();
    alg.set_value_bc(&inlet, 1.0).unwrap();
    alg.set_value_bc(&outlet, 0.0).unwrap();
    alg.run(&mut proj, pid).unwrap();

    let q_in = alg.rate(&proj, &inlet).unwrap();
    let q_out = alg.rate(&proj, &outlet).unwrap();

    assert!(q_in > 0.0);
    // 入口流出 = 出口流入
    assert!(
        (q_in + q_out).abs() < q_in * 1e-6,
        "q_in = {}, q_out = {}",
        q_in,
        q_out
    );
}

#[test]
fn test_internal_pores_conserve_mass() {
    let (mut proj, pid) = heterogeneous_project([4, 3, 3]);
    let inlet = proj.network().pores_with_label("left").unwrap();
    let outlet = proj.network().pores_with_label("right").unwrap();

    let mut alg = transport();
    alg.set_value_bc(&inlet, 10.0).unwrap();
    alg.set_value_bc(&outlet, 2.0).unwrap();
    alg.run(&mut proj, pid).unwrap();

    // 单个内部孔隙的净流出率应为零
    let boundary: std::collections::HashSet<usize> =
        inlet.iter().chain(outlet.iter()).copied().collect();
    let q_max_in = alg.rate(&proj, &inlet).unwrap();
    for p in 0..proj.network().pore_count() {
        if boundary.contains(&p) {
            continue;
        }
        let q = alg.rate(&proj, &[p]).unwrap();
        assert!(
            q.abs() < q_max_in * 1e-5,
            "孔隙 {} 净流率 {} 不守恒",
            p,
            q
        );
    }
}

#[test]
fn test_whole_domain_rate_is_zero() {
    // 整个域的"边界"没有喉道穿过，净流率恒为零
    let (mut proj, pid) = heterogeneous_project([3, 3, 3]);
    let inlet = proj.network().pores_with_label("left").unwrap();
    let outlet = proj.network().pores_with_label("right").unwrap();

    let mut alg = transport();
    alg.set_value_bc(&inlet, 1.0).unwrap();
    alg.set_value_bc(&outlet, 0.0).unwrap();
    alg.run(&mut proj, pid).unwrap();

    let all: Vec<usize> = (0..proj.network().pore_count()).collect();
    let q = alg.rate(&proj, &all).unwrap();
    assert!(q.abs() < 1e-300);
}

#[test]
fn test_rate_additive_over_disjoint_sets() {
    let (mut proj, pid) = heterogeneous_project([4, 2, 2]);
    let inlet = proj.network().pores_with_label("left").unwrap();
    let outlet = proj.network().pores_with_label("right").unwrap();

    let mut alg = transport();
    alg.set_value_bc(&inlet, 1.0).unwrap();
    alg.set_value_bc(&outlet, 0.0).unwrap();
    alg.run(&mut proj, pid).unwrap();

    // 集合内部喉道（y/z 向）两端都固定在同一边界值，贡献为零，
    // 因此整体流率应等于各孔隙单独流率之和。
    let q_group = alg.rate(&proj, &inlet).unwrap();
    let q_sum: f64 = inlet
        .iter()
        .map(|&p| alg.rate(&proj, &[p]).unwrap())
        .sum();
    assert!((q_group - q_sum).abs() < q_group.abs() * 1e-6 + 1e-300);
}
