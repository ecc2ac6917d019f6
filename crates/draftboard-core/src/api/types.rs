// Wire types for the draft service: years, teams, drafts, picks, players.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A draft season.
pub type Year = u32;

/// A participating team, as named by the service (e.g. "KC").
pub type Team = String;

/// Opaque draft identifier issued by `POST /draft/start`.
pub type DraftId = String;

// ---------------------------------------------------------------------------
// PlayerId
// ---------------------------------------------------------------------------

/// Player identifier. The service emits integers, but the board contract only
/// promises "an identifier", so string ids are carried verbatim too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Numeric(n) => write!(f, "{n}"),
            PlayerId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PlayerId {
    fn from(n: i64) -> Self {
        PlayerId::Numeric(n)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Draft / Pick
// ---------------------------------------------------------------------------

/// One slot in the draft order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    /// 1-based position across the whole draft. Unique within a board.
    pub overall: u32,
    /// 1-based round number.
    pub round: u32,
    /// 1-based position within the round.
    pub pick: u32,
    /// Team holding this pick.
    pub team: Team,
    /// Drafted player, or `None` while the pick is still open.
    pub player_id: Option<PlayerId>,
}

/// Lifecycle of a draft as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    /// Computer teams are picking.
    Simulating,
    /// The user's team is on the clock.
    WaitingForUser,
    /// Every pick has been made.
    Complete,
    #[serde(other)]
    Unknown,
}

impl DraftStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DraftStatus::Simulating => "simulating",
            DraftStatus::WaitingForUser => "your pick",
            DraftStatus::Complete => "complete",
            DraftStatus::Unknown => "unknown",
        }
    }
}

/// A draft and its full pick sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(alias = "draft_id")]
    pub id: DraftId,
    pub year: Year,
    /// Index into `board` of the pick currently on the clock.
    pub current_index: usize,
    /// Picks in service order. Never resorted client-side.
    pub board: Vec<Pick>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DraftStatus>,
}

/// Body of `GET /draft/{id}/board`. The id is implied by the request path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardSnapshot {
    pub year: Year,
    pub current_index: usize,
    pub board: Vec<Pick>,
    #[serde(default)]
    pub status: Option<DraftStatus>,
}

impl BoardSnapshot {
    /// Attach the id the snapshot was requested for.
    pub fn into_draft(self, id: DraftId) -> Draft {
        Draft {
            id,
            year: self.year,
            current_index: self.current_index,
            board: self.board,
            status: self.status,
        }
    }
}

/// Body of `POST /draft/start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartDraftRequest {
    pub year: Year,
    pub user_team: Team,
}

/// Accepted shapes of the `POST /draft/start` response: either the full draft
/// or just the handle of the draft that was created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StartDraftResponse {
    Full(Draft),
    Handle { draft_id: DraftId },
}

impl StartDraftResponse {
    /// The created draft. A bare handle becomes a draft with an empty board
    /// for `year`; the board itself is loaded when the draft is opened.
    pub fn into_draft(self, year: Year) -> Draft {
        match self {
            StartDraftResponse::Full(draft) => draft,
            StartDraftResponse::Handle { draft_id } => Draft {
                id: draft_id,
                year,
                current_index: 0,
                board: Vec::new(),
                status: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Draft progress and players
// ---------------------------------------------------------------------------

/// Position of the draft clock, returned by status/advance/pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftProgress {
    pub round: u32,
    pub pick: u32,
    pub status: DraftStatus,
    /// Only reported by the status endpoint.
    #[serde(default)]
    pub index: Option<usize>,
}

/// An undrafted player for the draft's year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailablePlayer {
    pub player_id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub overall_rank: Option<u32>,
}

/// Scouting detail for a single player. Stats and profile are free-form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDetail {
    pub player_id: PlayerId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub overall_rank: Option<f64>,
    #[serde(default)]
    pub stats: BTreeMap<String, Value>,
    #[serde(default)]
    pub profile: BTreeMap<String, Value>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
