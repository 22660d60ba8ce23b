//! Command handlers
//!
//! Creation goes straight to the store. Moves and reorders are played as a
//! drag gesture against a loaded [`BoardController`], so the terminal takes
//! the same path as any interactive board.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use stageboard_core::{
    board::{DragOutcome, DragPayload, DragSession, DropReport, DropTarget, ReorderOutcome},
    display::{CreateResult, MoveResult, ReorderResult, Stages},
    models::{ItemKind, Placement, StageId, StageType},
    params::{MoveItem, ReorderStages},
    BoardController, Notification, SqliteBackend,
};

use crate::{
    cli::{BoardArgs, DragStageArgs, ItemCommands, MoveItemArgs, StageCommands},
    renderer::TerminalRenderer,
};

pub struct Cli {
    project_id: u64,
    store: Arc<SqliteBackend>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(project_id: u64, store: SqliteBackend, renderer: TerminalRenderer) -> Self {
        Self {
            project_id,
            store: Arc::new(store),
            renderer,
        }
    }

    pub async fn handle_stage_command(&self, command: StageCommands) -> Result<()> {
        match command {
            StageCommands::Add(args) => {
                let stage = self
                    .store
                    .create_stage(&args.into_params(self.project_id))
                    .await
                    .context("Failed to create stage")?;
                self.renderer.render(&CreateResult::new(stage).to_string())
            }
            StageCommands::List(args) => {
                let controller = self.controller().await?;
                let stages = match args.stage_type {
                    Some(stage_type) => controller.stages(stage_type).await,
                    None => {
                        let mut all = Vec::new();
                        for kind in ItemKind::all() {
                            all.extend(controller.stages(kind.stage_type()).await);
                        }
                        all
                    }
                };
                self.renderer.render(&Stages(stages).to_string())
            }
            StageCommands::Reorder(args) => {
                let params: ReorderStages = args.into();
                let stage_type = params.stage_type;
                let controller = self.controller().await?;
                match controller
                    .reorder_stages(&params)
                    .await
                    .context("Failed to reorder stages")?
                {
                    ReorderOutcome::Applied(stages) => self
                        .renderer
                        .render(&ReorderResult::new(stage_type, stages).to_string()),
                    ReorderOutcome::Unchanged | ReorderOutcome::Superseded => {
                        self.info("Stages are already in that order")
                    }
                }
            }
            StageCommands::Drag(args) => self.drag_stage(args).await,
        }
    }

    pub async fn handle_item_command(&self, command: ItemCommands) -> Result<()> {
        match command {
            ItemCommands::Add(args) => {
                let item = self
                    .store
                    .create_item(&args.into_params(self.project_id))
                    .await
                    .context("Failed to create item")?;
                self.renderer.render(&CreateResult::new(item).to_string())
            }
            ItemCommands::Move(args) => self.move_item(args).await,
        }
    }

    pub async fn show_board(&self, args: BoardArgs) -> Result<()> {
        let controller = BoardController::builder(self.store.clone())
            .with_bucket_order(args.order)
            .load(self.project_id)
            .await
            .context("Failed to load board")?;
        let board = controller.board(args.kind).await;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&board)?);
            Ok(())
        } else {
            self.renderer.render(&board.to_string())
        }
    }

    async fn move_item(&self, args: MoveItemArgs) -> Result<()> {
        let params: MoveItem = args.into();
        let controller = self.controller().await?;

        let from = controller
            .item(params.kind, params.item_id)
            .await
            .map(|item| item.placement)
            .ok_or_else(|| anyhow!("{} {} not found", params.kind, params.item_id))?;

        let stage_type = match &params.target {
            Placement::Assigned(stage_id) => self.stage_type_of(stage_id).await?,
            Placement::Unassigned => params.kind.stage_type(),
        };

        let mut session = DragSession::new();
        session.start(DragPayload::Item {
            kind: params.kind,
            item_id: params.item_id,
        });
        let outcome = session.drop(Some(&DropTarget::Column {
            stage_type,
            placement: params.target.clone(),
        }));

        let DragOutcome::DroppedValid(action) = outcome else {
            bail!(
                "Cannot move {} {} to {}: it belongs to the {} board",
                params.kind,
                params.item_id,
                params.target,
                stage_type
            );
        };

        match controller.apply_drop(action).await {
            DropReport::Moved(item) => self.renderer.render(&MoveResult::new(item, from).to_string()),
            DropReport::Unchanged | DropReport::Superseded => {
                self.info(&format!("{} {} is already in {}", params.kind, params.item_id, from))
            }
            report => self.fail(report),
        }
    }

    async fn drag_stage(&self, args: DragStageArgs) -> Result<()> {
        let dragged = StageId::from(args.id);
        let target = StageId::from(args.over);
        let stage_type = self.stage_type_of(&dragged).await?;
        let target_type = self.stage_type_of(&target).await?;

        let mut session = DragSession::new();
        session.start(DragPayload::Stage {
            stage_type,
            stage_id: dragged.clone(),
        });
        let outcome = session.drop(Some(&DropTarget::Header {
            stage_type: target_type,
            stage_id: target.clone(),
            side: args.side,
        }));

        let DragOutcome::DroppedValid(action) = outcome else {
            bail!("Cannot drop {stage_type} stage {dragged} on {target_type} stage {target}");
        };

        let controller = self.controller().await?;
        match controller.apply_drop(action).await {
            DropReport::Reordered(stages) => self
                .renderer
                .render(&ReorderResult::new(stage_type, stages).to_string()),
            DropReport::Unchanged | DropReport::Superseded => {
                self.info(&format!("Stage {dragged} is already {} {target}", args.side))
            }
            report => self.fail(report),
        }
    }

    async fn controller(&self) -> Result<BoardController> {
        BoardController::builder(self.store.clone())
            .load(self.project_id)
            .await
            .context("Failed to load board")
    }

    async fn stage_type_of(&self, stage_id: &StageId) -> Result<StageType> {
        self.store
            .get_stage(stage_id)
            .await
            .context("Failed to look up stage")?
            .filter(|stage| stage.project_id == self.project_id)
            .map(|stage| stage.stage_type)
            .ok_or_else(|| anyhow!("Stage {stage_id} not found"))
    }

    fn info(&self, message: &str) -> Result<()> {
        self.renderer.render(&Notification::info(message).to_string())
    }

    fn fail(&self, report: DropReport) -> Result<()> {
        match report {
            DropReport::Failed(message) => Err(anyhow!(message)),
            _ => Err(anyhow!("The drop did not match the current board")),
        }
    }
}
