// apps/pf_cli/src/commands/info.rs

//! info 命令：打印网络概要

use anyhow::bail;
use clap::Args;
use pf_config::SimulationConfig;
use pf_io::load_statoil;
use pf_network::data::Element;
use pf_network::topology::Network;
use pf_network::validate::check_network;
use std::path::PathBuf;

/// info 命令参数
#[derive(Args)]
pub struct InfoArgs {
    /// 配置文件路径（按配置生成网络后打印）
    #[arg(short, long, conflicts_with = "statoil")]
    pub config: Option<PathBuf>,

    /// Statoil 网络数据目录
    #[arg(long, requires = "prefix")]
    pub statoil: Option<PathBuf>,

    /// Statoil 文件名前缀
    #[arg(long)]
    pub prefix: Option<String>,
}

/// 执行 info 命令
pub fn execute(args: InfoArgs) -> anyhow::Result<()> {
    let net = match (&args.statoil, &args.config) {
        (Some(dir), _) => {
            let prefix = args.prefix.as_deref().unwrap_or_default();
            load_statoil(dir, prefix)?
        }
        (None, Some(path)) => {
            let config = SimulationConfig::load(path)?.validated()?;
            let (project, _) = super::run::build_project(&config)?;
            print_summary(project.network());
            return Ok(());
        }
        (None, None) => bail!("需要 --config 或 --statoil/--prefix 之一"),
    };

    print_summary(&net);
    Ok(())
}

/// 打印网络概要、属性统计与标签
fn print_summary(net: &Network) {
    let summary = net.summary();
    println!("网络概要");
    println!("  孔隙数量: {}", summary.pore_count);
    println!("  喉道数量: {}", summary.throat_count);
    println!("  属性数量: {}", summary.property_count);

    for element in [Element::Pore, Element::Throat] {
        let keys = net.store().scalar_keys_of(element);
        if !keys.is_empty() {
            println!("{} 属性:", element.as_str());
            for key in keys {
                let values = net.store().scalar(key).unwrap_or(&[]);
                let finite: Vec<f64> =
                    values.iter().copied().filter(|v| v.is_finite()).collect();
                if finite.is_empty() {
                    println!("  {:<40} (无有限值)", key);
                    continue;
                }
                let mean = finite.iter().sum::<f64>() / finite.len() as f64;
                let min = finite.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = finite.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                println!(
                    "  {:<40} 均值 {:.4e}  范围 [{:.4e}, {:.4e}]",
                    key, mean, min, max
                );
            }
        }

        let labels = net.labels().keys_of(element);
        if !labels.is_empty() {
            println!("{} 标签:", element.as_str());
            for label in labels {
                println!(
                    "  {:<40} {} 个元素",
                    label,
                    net.labels().count(label).unwrap_or(0)
                );
            }
        }
    }

    let health = check_network(net);
    println!("健康检查: {}", health.summary());
}
