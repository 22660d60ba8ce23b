//! Reordering the stages of one stage type.

use std::collections::HashSet;

use super::{
    reorder::{move_stage, renumber, InsertSide},
    BoardController, ReorderOutcome,
};
use crate::{
    error::{BoardError, Result},
    events::BoardEvent,
    models::{StageId, StageType},
    params::ReorderStages,
};

impl BoardController {
    /// Puts the stages of one type into the given order.
    ///
    /// `ordered` must list every stage of the type exactly once. Each stage
    /// gets its index in `ordered` as its new order and the complete set is
    /// sent in one request. Nothing is sent when no order would change.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::InvalidInput`, `BoardError::StageNotFound` or
    /// `BoardError::StageKindMismatch` when `ordered` is not a permutation of
    /// the current stages of the type
    /// Returns the backend error when the request fails; stage orders stay as
    /// they were and the user is notified
    pub async fn reorder_stages(&self, params: &ReorderStages) -> Result<ReorderOutcome> {
        let stage_type = params.stage_type;
        self.check_reorder(params).await?;
        let orders = renumber(&params.ordered);

        let ticket = self.reorders.issue(stage_type).await;
        let Some(_gate) = ticket.acquire().await else {
            log::debug!("Reorder of {stage_type:?} stages superseded before sending");
            return Ok(ReorderOutcome::Superseded);
        };

        let unchanged = {
            let state = self.state.lock().await;
            orders.iter().all(|wanted| {
                state
                    .stage(&wanted.stage_id)
                    .is_some_and(|stage| stage.order == wanted.order)
            })
        };
        if unchanged {
            log::debug!("{stage_type:?} stages are already in the requested order");
            return Ok(ReorderOutcome::Unchanged);
        }

        log::debug!("Reordering {} {stage_type:?} stage(s)", orders.len());
        match self
            .backend
            .reorder_stages(self.project_id, stage_type, &orders)
            .await
        {
            Ok(stages) => {
                let reordered = {
                    let mut state = self.state.lock().await;
                    state.stages = stages.clone();
                    state.stages_of(stage_type)
                };
                log::info!("Reordered {} {stage_type:?} stage(s)", reordered.len());
                self.publish(BoardEvent::StagesReordered {
                    project_id: self.project_id,
                    stage_type,
                    stages,
                });
                Ok(ReorderOutcome::Applied(reordered))
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Moves one stage next to another and reorders the whole type.
    ///
    /// # Errors
    ///
    /// Same as [`BoardController::reorder_stages`], plus
    /// `BoardError::InvalidInput` when a stage is dropped on itself
    pub async fn drop_stage(
        &self,
        stage_type: StageType,
        stage_id: &StageId,
        target: &StageId,
        side: InsertSide,
    ) -> Result<ReorderOutcome> {
        let params = self.plan_stage_move(stage_type, stage_id, target, side).await?;
        self.reorder_stages(&params).await
    }

    /// Computes the full order that results from dropping `stage_id` on one
    /// side of `target`.
    pub(super) async fn plan_stage_move(
        &self,
        stage_type: StageType,
        stage_id: &StageId,
        target: &StageId,
        side: InsertSide,
    ) -> Result<ReorderStages> {
        if stage_id == target {
            return Err(BoardError::invalid_input("target")
                .with_reason(format!("Stage {stage_id} cannot be dropped on itself")));
        }

        let current = {
            let state = self.state.lock().await;
            for id in [stage_id, target] {
                let stage = state
                    .stage(id)
                    .ok_or_else(|| BoardError::StageNotFound { id: id.clone() })?;
                if stage.stage_type != stage_type {
                    return Err(BoardError::StageKindMismatch {
                        stage_id: id.clone(),
                        expected: stage_type,
                        found: stage.stage_type,
                    });
                }
            }
            state.ordered_stage_ids(stage_type)
        };

        let ordered = move_stage(&current, stage_id, target, side).ok_or_else(|| {
            BoardError::invalid_input("target")
                .with_reason(format!("Cannot place stage {stage_id} next to {target}"))
        })?;

        Ok(ReorderStages {
            stage_type,
            ordered,
        })
    }

    /// Checks that `ordered` is a permutation of the local stages of the type.
    async fn check_reorder(&self, params: &ReorderStages) -> Result<()> {
        let state = self.state.lock().await;
        let expected = state.ordered_stage_ids(params.stage_type).len();

        let mut seen = HashSet::new();
        for id in &params.ordered {
            let stage = state
                .stage(id)
                .ok_or_else(|| BoardError::StageNotFound { id: id.clone() })?;
            if stage.stage_type != params.stage_type {
                return Err(BoardError::StageKindMismatch {
                    stage_id: id.clone(),
                    expected: params.stage_type,
                    found: stage.stage_type,
                });
            }
            if !seen.insert(id) {
                return Err(BoardError::invalid_input("ordered")
                    .with_reason(format!("Stage {id} is listed more than once")));
            }
        }

        if seen.len() != expected {
            return Err(BoardError::invalid_input("ordered").with_reason(format!(
                "Expected all {expected} {} stage(s), got {}",
                params.stage_type.as_str(),
                seen.len()
            )));
        }

        Ok(())
    }
}
