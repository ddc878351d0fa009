mod leaderboard;
mod timeframe;

#[cfg(feature = "github")]
pub mod github;

pub use leaderboard::*;
pub use timeframe::*;

pub type GithubHandle = String;
