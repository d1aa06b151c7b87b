//! Contest endpoints: recent winners and winner selection

use crate::errors::Result;
use crate::types::Winner;
use serde::Deserialize;
use serde_json::json;

use super::client::LibraryClient;

#[derive(Deserialize)]
struct RecentWinners {
    recent_winners: Vec<Winner>,
}

impl LibraryClient {
    /// Fetch the most recent contest winners, newest first
    pub async fn recent_winners(&self) -> Result<Vec<Winner>> {
        let response: RecentWinners = self.get_json("getRecentWinners", &[]).await?;
        Ok(response.recent_winners)
    }

    /// Draw a new contest winner from recent reviewers (admin)
    pub async fn select_contest_winner(&self) -> Result<()> {
        let _: serde_json::Value = self.post_json("selectContestWinner", &json!({})).await?;
        Ok(())
    }
}
