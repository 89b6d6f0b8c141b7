use std::io::{self, Read, Write};

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use poker_trio_core::{respond, Action, DecisionResponse, PolicyKind};

/// 三张牌扑克决策机器人：从标准输入读取一个请求，向标准输出写出一个动作
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 决策策略 (adaptive, threshold, equity)
    #[arg(long, default_value_t = PolicyKind::Adaptive)]
    policy: PolicyKind,

    /// 随机种子，不指定时使用系统熵源
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    // 标准输出只能有响应，日志写到 stderr，且默认关闭
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .init();

    let args = Args::parse();

    let mut raw = Vec::new();
    io::stdin().read_to_end(&mut raw).context("读取标准输入失败")?;
    let raw = String::from_utf8_lossy(&raw);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let response = answer(&raw, args.policy, &mut rng);
    let payload = serde_json::to_string(&response)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(payload.as_bytes()).context("写出响应失败")?;
    stdout.flush()?;
    Ok(())
}

/// 处理一次请求；请求有任何问题都默认跟注
fn answer<R: Rng + ?Sized>(raw: &str, policy: PolicyKind, rng: &mut R) -> DecisionResponse {
    match respond(raw, policy, rng) {
        Ok(response) => {
            debug!(%policy, action = %response.action, "决策完成");
            response
        }
        Err(e) => {
            warn!("无法处理请求，默认跟注: {}", e);
            DecisionResponse { action: Action::Call }
        }
    }
}
