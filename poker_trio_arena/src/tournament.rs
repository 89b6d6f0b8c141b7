use std::fmt;
use std::time::Duration;

use futures_util::future::try_join;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use poker_trio_core::{deal, MatchState, OpponentStats, Seat};

use crate::contestant::{Contestant, ContestantSpec};

/// 一场比赛的结果，打印格式与原来的比赛脚本一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub names: [String; 2],
    pub state: MatchState,
}

/// 两个参赛者之间打 `rounds` 局
///
/// 每局两个座位拿到同样的牌，各自带着对手到目前为止的动作统计被同时询问，
/// 然后按得分表结算。任何一方出错都会中止整场比赛。
pub async fn play(
    a: &mut Contestant,
    b: &mut Contestant,
    rounds: u32,
    rng: &mut StdRng,
) -> anyhow::Result<MatchState> {
    let mut state = MatchState::new();

    for _ in 0..rounds {
        let deal = deal(rng);
        let request_a = state.request_for(Seat::A, &deal);
        let request_b = state.request_for(Seat::B, &deal);

        let (action_a, action_b) = try_join(a.ask(&request_a), b.ask(&request_b)).await?;
        let outcome = state.settle([action_a, action_b]);
        debug!(round = outcome.round, hole = ?deal.hole, table = %deal.table, a = %action_a, b = %action_b, payoff = ?outcome.payoff, "本局结算");
    }

    Ok(state)
}

/// 循环赛：每两个参赛者之间打一场，顺序与阵容顺序一致
pub async fn round_robin(
    line_up: &[ContestantSpec],
    rounds: u32,
    limit: Duration,
    rng: &mut StdRng,
) -> anyhow::Result<Vec<MatchReport>> {
    let mut reports = Vec::new();

    for i in 0..line_up.len() {
        for j in i + 1..line_up.len() {
            let names = [line_up[i].to_string(), line_up[j].to_string()];
            info!("开始比赛: {} vs {} ({} 局)", names[0], names[1], rounds);

            let mut a = line_up[i].build(StdRng::seed_from_u64(rng.random()), limit);
            let mut b = line_up[j].build(StdRng::seed_from_u64(rng.random()), limit);
            let state = play(&mut a, &mut b, rounds, rng).await?;

            info!("比赛结束: {} {} vs {} {}", names[0], state.score(Seat::A), names[1], state.score(Seat::B));
            reports.push(MatchReport { names, state });
        }
    }

    Ok(reports)
}

fn tally(stats: &OpponentStats) -> String {
    format!("{{fold: {}, call: {}, raise: {}}}", stats.fold, stats.call, stats.raise)
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{} vs {} ({} hands)", self.names[0], self.names[1], self.state.round)?;
        writeln!(f, "Score: {} vs {}", self.state.score(Seat::A), self.state.score(Seat::B))?;
        writeln!(f, "Actions A: {}", tally(&self.state.actions[Seat::A.index()]))?;
        write!(f, "Actions B: {}", tally(&self.state.actions[Seat::B.index()]))
    }
}
