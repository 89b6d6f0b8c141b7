use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod contestant;
mod tournament;

use contestant::ContestantSpec;

/// 三张牌扑克循环赛：两两对战，按固定得分表计分并打印结果
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 每场比赛的局数
    #[arg(long, default_value_t = 1001)]
    rounds: u32,

    /// 发牌和内置机器人的随机种子，不指定时使用系统熵源
    #[arg(long)]
    seed: Option<u64>,

    /// 外部机器人每次决策的时间上限（毫秒）
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,

    /// 参赛者：`builtin:<adaptive|threshold|equity>` 或外部机器人命令。
    /// 不指定时使用三个内置策略。
    contestants: Vec<ContestantSpec>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let line_up = if args.contestants.is_empty() {
        ContestantSpec::default_line_up()
    } else {
        args.contestants
    };
    if line_up.len() < 2 {
        bail!("至少需要两个参赛者");
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!("共 {} 个参赛者，每场 {} 局", line_up.len(), args.rounds);
    let reports =
        tournament::round_robin(&line_up, args.rounds, Duration::from_millis(args.timeout_ms), &mut rng).await?;

    for report in reports {
        println!("{}", report);
    }
    Ok(())
}
