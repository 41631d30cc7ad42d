// apps/pf_cli/src/commands/run.rs

//! run 命令：按配置搭建项目并求解稳态输运

use anyhow::{bail, Context};
use clap::Args;
use pf_config::{AlgorithmKind, OutputFormat, PhaseKind, SimulationConfig};
use pf_io::{CsvExporter, VtpExporter};
use pf_models::framework::RegenMode;
use pf_models::library::geometry::{
    DiffusiveSizeFactor, HydraulicSizeFactor, NeighborMinDiameter, PoreSeed, SphereVolume,
    SpheresAndCylindersLength, WeibullDiameter,
};
use pf_models::library::phase::{
    AirViscosity, FullerDiffusivity, IdealGasMolarDensity, WaterDensity, WaterViscosity,
};
use pf_models::library::physics::{GenericDiffusiveConductance, GenericHydraulicConductance};
use pf_models::library::ConduitPart;
use pf_models::project::{PhaseId, Project, Target};
use pf_network::generation::Cubic;
use pf_network::validate::check_network;
use pf_transport::{FickianDiffusion, StokesFlow};
use std::path::PathBuf;
use tracing::{info, warn};

/// run 命令参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径（缺省时使用默认配置）
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// 执行 run 命令
pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("加载配置 {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let config = config.validated()?;

    // 网络与项目
    let (mut project, phase) = build_project(&config)?;

    let health = check_network(project.network());
    if health.has_errors() {
        bail!("网络健康检查未通过:\n{}", health);
    }
    if health.has_warnings() {
        warn!("网络健康检查警告:\n{}", health);
    }

    let inlet = project
        .network()
        .pores_with_label(&config.bc.inlet_label)?;
    let outlet = project
        .network()
        .pores_with_label(&config.bc.outlet_label)?;

    let spacing = config.network.spacing;
    let [nx, ny, nz] = config.network.shape;
    let area = (ny as f64 * spacing) * (nz as f64 * spacing);
    let length = nx as f64 * spacing;

    // 求解
    match config.algorithm {
        AlgorithmKind::Stokes => {
            let mut alg = StokesFlow::new();
            alg.set_value_bc(&inlet, config.bc.inlet_value)?;
            alg.set_value_bc(&outlet, config.bc.outlet_value)?;
            let result = alg.run(&mut project, phase)?;
            info!(
                iterations = result.iterations,
                residual = result.relative_residual,
                "Stokes 流动求解完成"
            );

            let q = alg.rate(&project, &inlet)?;
            let k = alg.effective_permeability(&project, phase, area, length)?;
            println!("入口净流率   Q = {:.6e} m³/s", q);
            println!("有效渗透率   K = {:.6e} m²", k);
        }
        AlgorithmKind::Fickian => {
            let mut alg = FickianDiffusion::new();
            alg.set_value_bc(&inlet, config.bc.inlet_value)?;
            alg.set_value_bc(&outlet, config.bc.outlet_value)?;
            let result = alg.run(&mut project, phase)?;
            info!(
                iterations = result.iterations,
                residual = result.relative_residual,
                "Fickian 扩散求解完成"
            );

            let q = alg.rate(&project, &inlet)?;
            let d_eff = alg.effective_diffusivity(&project, area, length)?;
            println!("入口净流率   Q = {:.6e} mol/s", q);
            println!("有效扩散系数 D_eff = {:.6e} m²/s", d_eff);
        }
    }

    // 导出
    match config.output.format {
        OutputFormat::Vtp => {
            std::fs::create_dir_all(&config.output.directory)?;
            let path = config
                .output
                .directory
                .join(format!("{}.vtp", config.output.prefix));
            VtpExporter::new().export_project(&path, &project, &[phase])?;
            info!(path = %path.display(), "VTP 导出完成");
        }
        OutputFormat::Csv => {
            CsvExporter::new().export_network(
                &config.output.directory,
                &config.output.prefix,
                project.network(),
            )?;
            info!(dir = %config.output.directory.display(), "CSV 导出完成");
        }
        OutputFormat::None => {}
    }

    Ok(())
}

/// 按配置搭建项目：几何模型链 + 相 + 物理传导率
pub fn build_project(config: &SimulationConfig) -> anyhow::Result<(Project, PhaseId)> {
    let spacing = config.network.spacing;
    let net = Cubic::new(config.network.shape)
        .with_spacing(spacing)
        .build()?;
    let mut project = Project::new(net);

    // 几何："球孔隙-圆柱喉道"标准模型链
    let gid = project.add_geometry_all("geo_01")?;
    let geo = Target::Geometry(gid);
    project.add_model(
        geo,
        "pore.seed",
        PoreSeed::new(config.network.seed).with_range(0.02, 0.98),
        RegenMode::Deferred,
    )?;
    project.add_model(
        geo,
        "pore.diameter",
        WeibullDiameter::new(0.35 * spacing, 2.8, 0.2 * spacing),
        RegenMode::Deferred,
    )?;
    project.add_model(geo, "pore.volume", SphereVolume::new(), RegenMode::Deferred)?;
    project.add_model(
        geo,
        "throat.diameter",
        NeighborMinDiameter::new(),
        RegenMode::Deferred,
    )?;
    project.add_model(
        geo,
        "throat.length",
        SpheresAndCylindersLength::new(),
        RegenMode::Deferred,
    )?;
    for part in [ConduitPart::Pore1, ConduitPart::Throat, ConduitPart::Pore2] {
        project.add_model(
            geo,
            format!("throat.diffusive_size_factors.{}", part.suffix()),
            DiffusiveSizeFactor::new(part),
            RegenMode::Deferred,
        )?;
        project.add_model(
            geo,
            format!("throat.hydraulic_size_factors.{}", part.suffix()),
            HydraulicSizeFactor::new(part),
            RegenMode::Deferred,
        )?;
    }

    // 相
    let pid = match config.phase {
        PhaseKind::Water => {
            let pid = project.add_phase("water")?;
            let phase = Target::Phase(pid);
            project.add_model(phase, "pore.viscosity", WaterViscosity::new(), RegenMode::Deferred)?;
            project.add_model(phase, "pore.density", WaterDensity::new(), RegenMode::Deferred)?;
            pid
        }
        PhaseKind::Air => {
            let pid = project.add_phase("air")?;
            let phase = Target::Phase(pid);
            project.add_model(phase, "pore.viscosity", AirViscosity::new(), RegenMode::Deferred)?;
            project.add_model(
                phase,
                "pore.diffusivity",
                FullerDiffusivity::new(),
                RegenMode::Deferred,
            )?;
            project.add_model(
                phase,
                "pore.molar_density",
                IdealGasMolarDensity::new(),
                RegenMode::Deferred,
            )?;
            pid
        }
    };

    // 扩散算法在水相下也需要扩散系数
    if config.phase == PhaseKind::Water && config.algorithm == AlgorithmKind::Fickian {
        project.add_model(
            Target::Phase(pid),
            "pore.diffusivity",
            FullerDiffusivity::new(),
            RegenMode::Deferred,
        )?;
    }

    // 物理
    let phys = project.add_physics("phys_01")?;
    project.associate_phase(phys, pid)?;
    project.associate_geometry(phys, gid)?;
    project.add_model(
        Target::Physics(phys),
        "throat.hydraulic_conductance",
        GenericHydraulicConductance::new(),
        RegenMode::Deferred,
    )?;
    if config.algorithm == AlgorithmKind::Fickian || config.phase == PhaseKind::Air {
        project.add_model(
            Target::Physics(phys),
            "throat.diffusive_conductance",
            GenericDiffusiveConductance::new(),
            RegenMode::Deferred,
        )?;
    }

    // 按依赖序统一再生
    project.regenerate_all()?;

    info!(
        pores = project.network().pore_count(),
        throats = project.network().throat_count(),
        "项目搭建完成"
    );
    Ok((project, pid))
}
