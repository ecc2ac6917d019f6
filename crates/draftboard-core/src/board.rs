// Draft board flow: one active draft id, its board snapshot, and the draft
// lifecycle actions around it (status, advance, pick, available players).
//
// Every slot is invalidated when the active id changes or the flow is left,
// so nothing loaded for one draft can ever be shown for another.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{
    AvailablePlayer, Draft, DraftApi, DraftId, DraftProgress, PlayerDetail, PlayerId,
};
use crate::resource::{AsyncResource, ResourceState};

pub const BOARD_FAILURE: &str = "Failed to load draft board";
pub const AVAILABLE_FAILURE: &str = "Failed to load available players";
pub const PROGRESS_FAILURE: &str = "Failed to update draft";
pub const PLAYER_FAILURE: &str = "Failed to load player";

/// Everything a board view needs to render, captured at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardFlowSnapshot {
    pub draft_id: Option<DraftId>,
    pub board: ResourceState<Draft>,
    pub available: ResourceState<Vec<AvailablePlayer>>,
    pub progress: ResourceState<DraftProgress>,
    pub player: ResourceState<PlayerDetail>,
}

/// Controller for the board flow.
pub struct BoardController {
    api: Arc<dyn DraftApi>,
    draft_id: Arc<watch::Sender<Option<DraftId>>>,
    board: AsyncResource<Draft>,
    available: AsyncResource<Vec<AvailablePlayer>>,
    progress: AsyncResource<DraftProgress>,
    player: AsyncResource<PlayerDetail>,
}

impl BoardController {
    /// Create an inactive controller. Nothing is loaded until `activate`.
    pub fn new(api: Arc<dyn DraftApi>) -> Self {
        let (draft_id, _) = watch::channel(None);
        Self {
            api,
            draft_id: Arc::new(draft_id),
            board: AsyncResource::new("board", BOARD_FAILURE),
            available: AsyncResource::new("available", AVAILABLE_FAILURE),
            progress: AsyncResource::new("progress", PROGRESS_FAILURE),
            player: AsyncResource::new("player", PLAYER_FAILURE),
        }
    }

    /// Enter the flow for `draft_id`, or switch to it.
    ///
    /// Loads the board and the available players, superseding anything in
    /// flight. Returns `false` (and does nothing) if `draft_id` is already
    /// the active id or is empty.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(&self, draft_id: impl Into<DraftId>) -> bool {
        let draft_id = draft_id.into();
        if draft_id.is_empty() {
            warn!("Ignoring empty draft id");
            return false;
        }

        let changed = self.draft_id.send_if_modified(|current| {
            if current.as_deref() == Some(draft_id.as_str()) {
                return false;
            }
            *current = Some(draft_id.clone());
            true
        });
        if !changed {
            debug!(draft_id = %draft_id, "Board flow already active");
            return false;
        }

        self.progress.reset();
        self.player.reset();
        info!(draft_id = %draft_id, "Board flow entered");
        load_board(&self.api, &self.board, draft_id.clone());
        load_available(&self.api, &self.available, draft_id);
        true
    }

    /// Fetch the board snapshot for the active id again.
    pub fn reload(&self) -> bool {
        let Some(draft_id) = self.draft_id() else {
            return false;
        };
        load_board(&self.api, &self.board, draft_id);
        true
    }

    /// Fetch the available players for the active id again.
    pub fn load_available(&self) -> bool {
        let Some(draft_id) = self.draft_id() else {
            return false;
        };
        load_available(&self.api, &self.available, draft_id);
        true
    }

    /// Refresh the draft clock without touching the board.
    pub fn check_status(&self) -> bool {
        let Some(draft_id) = self.progress_target() else {
            return false;
        };
        let api = Arc::clone(&self.api);
        self.progress
            .trigger(async move { api.draft_status(&draft_id).await });
        true
    }

    /// Let the computer teams pick until the user is on the clock.
    pub fn advance(&self) -> bool {
        let Some(draft_id) = self.progress_target() else {
            return false;
        };
        info!(draft_id = %draft_id, "Advancing draft");
        let api = Arc::clone(&self.api);
        let id = draft_id.clone();
        self.progress.trigger_then(
            async move { api.advance(&id).await },
            self.reload_after_progress(draft_id),
        );
        true
    }

    /// Draft `player_id` for the user's team.
    pub fn pick_player(&self, player_id: PlayerId) -> bool {
        let Some(draft_id) = self.progress_target() else {
            return false;
        };
        info!(draft_id = %draft_id, player_id = %player_id, "Making pick");
        let api = Arc::clone(&self.api);
        let id = draft_id.clone();
        self.progress.trigger_then(
            async move { api.pick_player(&id, &player_id).await },
            self.reload_after_progress(draft_id),
        );
        true
    }

    /// Load scouting detail for one player.
    pub fn show_player(&self, player_id: PlayerId) -> bool {
        if self.draft_id().is_none() {
            return false;
        }
        let api = Arc::clone(&self.api);
        self.player
            .trigger(async move { api.player(&player_id).await });
        true
    }

    /// Leave the flow: every slot goes back to Idle and the id is forgotten.
    pub fn teardown(&self) {
        let previous = self.draft_id.send_replace(None);
        self.board.reset();
        self.available.reset();
        self.progress.reset();
        self.player.reset();
        if let Some(draft_id) = previous {
            info!(draft_id = %draft_id, "Board flow left");
        }
    }

    pub fn draft_id(&self) -> Option<DraftId> {
        self.draft_id.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.draft_id.borrow().is_some()
    }

    pub fn subscribe_draft_id(&self) -> watch::Receiver<Option<DraftId>> {
        self.draft_id.subscribe()
    }

    pub fn board(&self) -> &AsyncResource<Draft> {
        &self.board
    }

    pub fn available(&self) -> &AsyncResource<Vec<AvailablePlayer>> {
        &self.available
    }

    pub fn progress(&self) -> &AsyncResource<DraftProgress> {
        &self.progress
    }

    pub fn player(&self) -> &AsyncResource<PlayerDetail> {
        &self.player
    }

    pub fn snapshot(&self) -> BoardFlowSnapshot {
        BoardFlowSnapshot {
            draft_id: self.draft_id(),
            board: self.board.state(),
            available: self.available.state(),
            progress: self.progress.state(),
            player: self.player.state(),
        }
    }

    /// Active id, if the progress slot is free to take a new action.
    fn progress_target(&self) -> Option<DraftId> {
        let draft_id = self.draft_id()?;
        if self.progress.is_loading() {
            debug!(draft_id = %draft_id, "Draft action already in flight");
            return None;
        }
        Some(draft_id)
    }

    /// Follow-up for a committed advance/pick: the board and the available
    /// list are out of date, so fetch both, unless the flow moved on.
    fn reload_after_progress(
        &self,
        draft_id: DraftId,
    ) -> impl FnOnce(&DraftProgress) + Send + 'static {
        let api = Arc::clone(&self.api);
        let board = self.board.clone();
        let available = self.available.clone();
        let active = Arc::clone(&self.draft_id);
        move |progress: &DraftProgress| {
            info!(
                draft_id = %draft_id,
                round = progress.round,
                pick = progress.pick,
                status = progress.status.label(),
                "Draft moved"
            );
            // Trigger while holding the id so a concurrent teardown or
            // switch lands after the reload and resets it.
            active.send_if_modified(|current| {
                if current.as_deref() == Some(draft_id.as_str()) {
                    load_board(&api, &board, draft_id.clone());
                    load_available(&api, &available, draft_id.clone());
                } else {
                    debug!(draft_id = %draft_id, "Draft no longer active, skipping reload");
                }
                false
            });
        }
    }
}

fn load_board(api: &Arc<dyn DraftApi>, board: &AsyncResource<Draft>, draft_id: DraftId) -> u64 {
    let api = Arc::clone(api);
    board.trigger_then(
        async move { api.get_board(&draft_id).await },
        |draft: &Draft| {
            info!(
                draft_id = %draft.id,
                year = draft.year,
                picks = draft.board.len(),
                current_index = draft.current_index,
                "Board loaded"
            );
        },
    )
}

fn load_available(
    api: &Arc<dyn DraftApi>,
    available: &AsyncResource<Vec<AvailablePlayer>>,
    draft_id: DraftId,
) -> u64 {
    let api = Arc::clone(api);
    available.trigger(async move { api.available_players(&draft_id).await })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
