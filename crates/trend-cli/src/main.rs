//! 다중 타임프레임 추세 계산기 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 스냅샷 평가
//! trend evaluate -i demos/snapshot.toml
//!
//! # 설정 파일 지정 + JSON 출력
//! trend --config config/default.toml evaluate -i demos/snapshot.toml --format json
//!
//! # 포지션 사이징
//! trend size --equity 100000 --entry 50420 --stop-loss 50380
//!
//! # 상태 가중치 표
//! trend states
//!
//! # 점수 분류
//! trend classify 52.5
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use trend_cli::commands::classify::render_classification;
use trend_cli::commands::evaluate::{render, run_evaluate, EvaluateCliConfig};
use trend_cli::commands::size::{render_plan, run_size, SizeCliConfig};
use trend_cli::commands::states::{render_groups, render_weight_table};
use trend_cli::commands::OutputFormat;
use trend_core::logging::{init_logging, LogConfig, LogFormat};
use trend_core::AppConfig;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Parser)]
#[command(name = "trend")]
#[command(about = "Multi-timeframe trend calculator - 타임프레임별 추세 점수 계산", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: config/default.toml이 있으면 사용)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (예: info, debug, trend_scoring=debug)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 스냅샷 파일 평가
    Evaluate {
        /// 스냅샷 파일 (TOML 또는 JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// 상태가 없는 타임프레임을 횡보(SW)로 채우기
        #[arg(long, default_value = "false")]
        fill_sideways: bool,

        /// 출력 형식 (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// 리스크 기반 포지션 사이징
    Size {
        /// 자본금
        #[arg(long, default_value = "100000")]
        equity: Decimal,

        /// 진입가
        #[arg(long)]
        entry: Decimal,

        /// 손절가
        #[arg(long)]
        stop_loss: Decimal,

        /// 참고용 익절가
        #[arg(long)]
        take_profit: Option<Decimal>,

        /// 출력 형식 (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// 상태 코드와 가중치 표 출력
    States,

    /// 점수를 추세 라벨과 자세로 분류
    Classify {
        /// 점수 (%)
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            AppConfig::load_default().context("Failed to load config/default.toml")
        }
        None => AppConfig::from_env().context("Failed to load config from environment"),
    }
}

fn main() -> Result<()> {
    // .env 파일은 선택 사항
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let app = load_config(cli.config.as_deref())?;

    let mut log_config = LogConfig::from_app_config(&app.logging);
    if let Some(level) = &cli.log_level {
        log_config.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        let format: LogFormat = format.parse().map_err(|e| anyhow!("{}", e))?;
        log_config = log_config.with_format(format);
    }
    init_logging(log_config).map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Evaluate {
            input,
            fill_sideways,
            format,
        } => {
            let config = EvaluateCliConfig {
                input_path: input,
                fill_sideways,
                format: OutputFormat::parse(&format)?,
            };

            info!("Evaluating snapshot: {}", config.input_path.display());

            match run_evaluate(&config, &app) {
                Ok(outcome) => println!("{}", render(&outcome, config.format)?),
                Err(e) => {
                    error!("Evaluation failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Size {
            equity,
            entry,
            stop_loss,
            take_profit,
            format,
        } => {
            let config = SizeCliConfig {
                equity,
                entry,
                stop_loss,
                take_profit,
            };
            let plan = run_size(&config, &app.risk)?;

            match OutputFormat::parse(&format)? {
                OutputFormat::Text => println!("{}", render_plan(&plan, &app.risk)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
            }
        }

        Commands::States => {
            let large = app.timeframes.large_group()?;
            let small = app.timeframes.small_group()?;

            println!("{}", render_weight_table());
            println!();
            println!("{}", render_groups(&large, &small));
        }

        Commands::Classify { score } => {
            println!("{}", render_classification(score));
        }
    }

    Ok(())
}
