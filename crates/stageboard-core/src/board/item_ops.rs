//! Moving items between stages.

use super::{BoardController, MoveOutcome};
use crate::{
    error::{BoardError, Result},
    events::BoardEvent,
    models::{ItemKind, Placement},
    params::MoveItem,
};

impl BoardController {
    /// Moves an item to another stage, or out of every stage.
    ///
    /// The target is checked against the local board before anything is
    /// sent: the item must exist and an assigned stage must exist and hold
    /// items of the item's kind. Moving an item to where it already is sends
    /// nothing.
    ///
    /// Moves of the same item go out one at a time in the order they were
    /// requested. A move still waiting when a newer one for the same item
    /// arrives is dropped and reports [`MoveOutcome::Superseded`].
    ///
    /// # Errors
    ///
    /// Returns `BoardError::ItemNotFound`, `BoardError::StageNotFound` or
    /// `BoardError::StageKindMismatch` when the move does not fit the board
    /// Returns the backend error when the request fails; the item keeps its
    /// previous stage and the user is notified
    pub async fn move_item(&self, params: &MoveItem) -> Result<MoveOutcome> {
        let MoveItem {
            kind,
            item_id,
            target,
        } = params;
        let (kind, item_id) = (*kind, *item_id);

        self.check_move(kind, item_id, target).await?;

        let ticket = self.moves.issue((kind, item_id)).await;
        let Some(_gate) = ticket.acquire().await else {
            log::debug!("Move of {kind:?} item {item_id} superseded before sending");
            return Ok(MoveOutcome::Superseded);
        };

        let current = self
            .state
            .lock()
            .await
            .item(kind, item_id)
            .map(|item| item.placement.clone())
            .ok_or(BoardError::ItemNotFound { kind, id: item_id })?;
        if &current == target {
            log::debug!("{kind:?} item {item_id} is already in {target}");
            return Ok(MoveOutcome::Unchanged);
        }

        log::debug!("Moving {kind:?} item {item_id} from {current} to {target}");
        match self.backend.move_item(kind, item_id, target).await {
            Ok(item) => {
                if !self.state.lock().await.replace_item(item.clone()) {
                    log::debug!("{kind:?} item {item_id} left the board before the move returned");
                }
                log::info!("Moved {kind:?} item {item_id} to {}", item.placement);
                self.publish(BoardEvent::ItemMoved {
                    project_id: self.project_id,
                    item: item.clone(),
                });
                Ok(MoveOutcome::Applied(item))
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Checks a move against the local board.
    pub(super) async fn check_move(
        &self,
        kind: ItemKind,
        item_id: u64,
        target: &Placement,
    ) -> Result<()> {
        let state = self.state.lock().await;

        if state.item(kind, item_id).is_none() {
            return Err(BoardError::ItemNotFound { kind, id: item_id });
        }

        if let Placement::Assigned(stage_id) = target {
            let stage = state.stage(stage_id).ok_or_else(|| BoardError::StageNotFound {
                id: stage_id.clone(),
            })?;
            if stage.stage_type != kind.stage_type() {
                return Err(BoardError::StageKindMismatch {
                    stage_id: stage_id.clone(),
                    expected: kind.stage_type(),
                    found: stage.stage_type,
                });
            }
        }

        Ok(())
    }
}
