use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use rand::rngs::StdRng;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use poker_trio_core::{Action, DecisionRequest, DecisionResponse, PolicyKind};

const BUILTIN_PREFIX: &str = "builtin:";

/// 命令行上给出的参赛者
/// - `builtin:<策略>`：进程内直接调用决策引擎
/// - 其他：外部机器人程序（可带参数，以空白分隔），通过 stdin/stdout 交换 JSON
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContestantSpec {
    Builtin(PolicyKind),
    Process { program: PathBuf, args: Vec<String> },
}

/// 一场比赛中实际参赛的一方
pub enum Contestant {
    Builtin { policy: PolicyKind, rng: StdRng },
    Process { program: PathBuf, args: Vec<String>, timeout: Duration },
}

impl ContestantSpec {
    /// 原始脚本的默认阵容
    pub fn default_line_up() -> Vec<ContestantSpec> {
        PolicyKind::ALL.into_iter().map(ContestantSpec::Builtin).collect()
    }

    pub fn build(&self, rng: StdRng, limit: Duration) -> Contestant {
        match self {
            ContestantSpec::Builtin(policy) => Contestant::Builtin { policy: *policy, rng },
            ContestantSpec::Process { program, args } => Contestant::Process {
                program: program.clone(),
                args: args.clone(),
                timeout: limit,
            },
        }
    }
}

impl Contestant {
    /// 询问一次动作。外部程序超时、写了 stderr、异常退出或输出无法解析都算错误。
    pub async fn ask(&mut self, request: &DecisionRequest) -> anyhow::Result<Action> {
        match self {
            Contestant::Builtin { policy, rng } => Ok(request.decide(*policy, rng)?),
            Contestant::Process { program, args, timeout: limit } => {
                let exchange = run_process(program, args, request);
                timeout(*limit, exchange)
                    .await
                    .map_err(|_| anyhow!("{} 在 {:?} 内没有响应", program.display(), limit))?
            }
        }
    }
}

async fn run_process(program: &PathBuf, args: &[String], request: &DecisionRequest) -> anyhow::Result<Action> {
    let payload = serde_json::to_vec(request)?;

    let mut child = Command::new(program)
        .args(args)
        // 机器人的日志会写到 stderr，而 stderr 非空会被视为错误
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("无法启动 {}", program.display()))?;

    {
        let mut stdin = child.stdin.take().context("无法打开子进程的 stdin")?;
        stdin.write_all(&payload).await?;
        stdin.shutdown().await?;
    }

    let output = child.wait_with_output().await?;
    if !output.stderr.is_empty() {
        bail!("{}: {}", program.display(), String::from_utf8_lossy(&output.stderr).trim());
    }
    if !output.status.success() {
        bail!("{} 异常退出: {}", program.display(), output.status);
    }

    let response: DecisionResponse = serde_json::from_slice(&output.stdout)
        .with_context(|| format!("{} 的输出无法解析: {:?}", program.display(), String::from_utf8_lossy(&output.stdout)))?;
    Ok(response.action)
}

impl FromStr for ContestantSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(policy) = s.strip_prefix(BUILTIN_PREFIX) {
            return Ok(ContestantSpec::Builtin(policy.parse()?));
        }
        let mut parts = s.split_whitespace();
        let program = parts.next().ok_or_else(|| anyhow!("参赛者不能为空"))?;
        Ok(ContestantSpec::Process {
            program: PathBuf::from(program),
            args: parts.map(str::to_string).collect(),
        })
    }
}

impl fmt::Display for ContestantSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContestantSpec::Builtin(policy) => write!(f, "{}{}", BUILTIN_PREFIX, policy),
            ContestantSpec::Process { program, args } if args.is_empty() => write!(f, "{}", program.display()),
            ContestantSpec::Process { program, args } => write!(f, "{} {}", program.display(), args.join(" ")),
        }
    }
}
