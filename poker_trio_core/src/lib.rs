//! # 三张牌扑克核心逻辑库
//!
//! 每位玩家两张底牌加一张公共牌。这个 `core` crate 包含牌力评估、
//! 精确胜率枚举、对手动作频率模型、决策策略，以及比赛驱动与机器人之间
//! 通信消息和一对一比赛的状态定义。
//! 它不做任何 I/O，可以被机器人进程和比赛驱动直接复用。

mod card;
mod equity;
mod logic;
mod message;
mod opponent;
mod policy;
mod state;

pub use card::*;

pub use equity::*;

pub use logic::*;

pub use message::*;

pub use opponent::*;

pub use policy::*;

pub use state::*;
