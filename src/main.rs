// ==========================================
// 健身连锁记录系统 - 命令行入口
// ==========================================
// 用法: gym-reports [--config <path>] [--report <name>] [--json]
// 退出码: 有 Failed 产物时为 1
// ==========================================

use anyhow::Context;
use clap::Parser;
use gym_reports::api::ReportApi;
use gym_reports::config::ReportConfig;
use gym_reports::domain::ReportArtifact;
use gym_reports::{logging, ArtifactStatus};
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate the gym chain's summary charts from its flat-file records
#[derive(Parser, Debug)]
#[command(name = "gym-reports")]
#[command(about = "Aggregate gym records into named report charts", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generate a single report by name (default: all reports)
    #[arg(short, long)]
    report: Option<String>,

    /// Print results as JSON on stdout
    #[arg(long)]
    json: bool,

    /// List available reports and exit
    #[arg(long)]
    list: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!(version = gym_reports::VERSION, "{}", gym_reports::APP_NAME);

    let config = match &cli.config {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => ReportConfig::default(),
    };
    tracing::info!(
        data_dir = %config.data_directory().display(),
        reports_dir = %config.reports_directory().display(),
        "配置已加载"
    );

    let api = ReportApi::from_config(config).context("配置校验失败")?;

    if cli.list {
        let reports = api.list_reports();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            for report in &reports {
                let tag = if report.supplementary { " (supplementary)" } else { "" };
                println!("{}{}: {}", report.name, tag, report.artifact_names.join(", "));
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let artifacts = match &cli.report {
        Some(name) => {
            let artifacts = api.generate_report(name)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&artifacts)?);
            }
            artifacts
        }
        None => {
            let summary = api.generate_all();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            summary.artifacts
        }
    };

    if !cli.json {
        print_table(&artifacts);
    }

    let failed = artifacts
        .iter()
        .any(|a| a.status == ArtifactStatus::Failed);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_table(artifacts: &[ReportArtifact]) {
    for artifact in artifacts {
        let detail = match &artifact.reason {
            Some(reason) => reason.clone(),
            None => artifact.output_path.display().to_string(),
        };
        println!(
            "{:<8} {:<36} {}",
            artifact.status.to_string(),
            artifact.report_name,
            detail
        );
        if !artifact.warnings.is_empty() {
            println!("         {} warning(s)", artifact.warnings.len());
        }
    }
}
