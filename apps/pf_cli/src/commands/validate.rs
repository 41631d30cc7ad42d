// apps/pf_cli/src/commands/validate.rs

//! validate 命令：验证配置文件

use anyhow::bail;
use clap::Args;
use pf_config::SimulationConfig;
use std::path::PathBuf;

/// validate 命令参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    pub config: PathBuf,
}

/// 执行 validate 命令
pub fn execute(args: ValidateArgs) -> anyhow::Result<()> {
    let config = SimulationConfig::load(&args.config)?;
    let report = config.validate();

    if report.has_errors() || report.has_warnings() {
        println!("{}", report);
    }
    if report.has_errors() {
        bail!("配置验证未通过: {}", report.summary());
    }

    println!("配置有效: {}", args.config.display());
    Ok(())
}
