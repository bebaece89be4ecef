use crate::input::{CellMetrics, MouseButtons, PointerAction, PointerTracker};
use crate::render::CanvasRenderer;
use crate::settings::Settings;
use crate::utils::js_random_seed;
use minesweeper_core as game;
use game::{Changes, GameController, GameOutcome, OutcomeListener};
use rand::SeedableRng;
use rand::rngs::StdRng;
use web_sys::{HtmlAudioElement, HtmlCanvasElement};
use yew::prelude::*;

/// Forwards the end of a game into the component's message queue.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct OutcomeLink {
    finished: Callback<GameOutcome>,
}

impl OutcomeListener for OutcomeLink {
    fn on_win(&mut self) {
        self.finished.emit(GameOutcome::Won);
    }

    fn on_loss(&mut self) {
        self.finished.emit(GameOutcome::Lost);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum PointerMsg {
    Move { x: i32, y: i32 },
    Down { x: i32, y: i32, buttons: u16 },
    Up { x: i32, y: i32 },
    Leave,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pointer(PointerMsg),
    Finished(GameOutcome),
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub settings: Settings,
}

fn format_for_counter(value: i32) -> String {
    format!("{:03}", value.clamp(-99, 999))
}

#[derive(Debug)]
pub(crate) struct GameView {
    game: GameController<OutcomeLink>,
    seed: u64,
    metrics: CellMetrics,
    canvas: NodeRef,
    renderer: Option<CanvasRenderer>,
    tracker: PointerTracker,
    boom: Option<HtmlAudioElement>,
}

impl GameView {
    fn start_game(ctx: &Context<Self>, seed: u64) -> GameController<OutcomeLink> {
        log::debug!("seed: {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let listener = OutcomeLink {
            finished: ctx.link().callback(Msg::Finished),
        };

        GameController::new(ctx.props().settings.game_config, &mut rng, listener)
            .expect("settings are validated before the game view is mounted")
    }

    fn pointer_action(&mut self, msg: PointerMsg) -> Option<PointerAction> {
        match msg {
            PointerMsg::Move { x, y } => Some(
                self.metrics
                    .cell_at(x, y)
                    .map_or(PointerAction::Leave, PointerAction::Move),
            ),
            PointerMsg::Down { x, y, buttons } => {
                let buttons = MouseButtons::from_bits_truncate(buttons);
                log::trace!("({}, {}) pointer down ({:?})", x, y, buttons);
                self.tracker.press(self.metrics.cell_at(x, y), buttons);
                None
            }
            PointerMsg::Up { x, y } => {
                log::trace!("({}, {}) pointer up", x, y);
                self.tracker.release(self.metrics.cell_at(x, y))
            }
            PointerMsg::Leave => {
                self.tracker.cancel();
                Some(PointerAction::Leave)
            }
        }
    }

    fn repaint(&self, changes: &Changes) {
        if let Some(renderer) = &self.renderer {
            renderer.paint_cells(&self.game, changes.iter());
        }
    }

    fn play_boom(&self) {
        if let Some(boom) = &self.boom {
            if let Err(err) = boom.play() {
                log::warn!("failed to play sound: {:?}", err);
            }
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings = &ctx.props().settings;
        let seed = settings.seed.unwrap_or_else(js_random_seed);
        let game = Self::start_game(ctx, seed);
        let metrics = CellMetrics::new(&settings.render, game.size());
        let boom = settings.boom_sound.as_deref().and_then(|src| {
            HtmlAudioElement::new_with_src(src)
                .map_err(|err| log::warn!("failed to load {}: {:?}", src, err))
                .ok()
        });

        Self {
            game,
            seed,
            metrics,
            canvas: NodeRef::default(),
            renderer: None,
            tracker: PointerTracker::default(),
            boom,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Pointer(pointer) => {
                let Some(action) = self.pointer_action(pointer) else {
                    return false;
                };
                if !matches!(action, PointerAction::Move(_) | PointerAction::Leave) {
                    log::debug!("{:?}", action);
                }

                let changes = action.dispatch(&mut self.game);
                self.repaint(&changes);
                changes.has_update()
            }
            Msg::Finished(outcome) => {
                log::info!("game finished: {:?}", outcome);
                if outcome == GameOutcome::Lost {
                    self.play_boom();
                }
                true
            }
            Msg::NewGame => {
                self.seed = js_random_seed();
                self.game = Self::start_game(ctx, self.seed);
                self.tracker.cancel();
                if let Some(renderer) = &self.renderer {
                    renderer.paint_all(&self.game);
                }
                true
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }

        let Some(canvas) = self.canvas.cast::<HtmlCanvasElement>() else {
            log::error!("canvas element is missing");
            return;
        };
        let render = ctx.props().settings.render.clone();
        match CanvasRenderer::new(&canvas, self.metrics, render) {
            Ok(renderer) => {
                renderer.paint_all(&self.game);
                self.renderer = Some(renderer);
            }
            Err(err) => log::error!("failed to set up canvas: {:?}", err),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let (width, height) = self.metrics.surface_size();
        let mines_left = format_for_counter(self.game.mines_left());
        let (status_class, status) = match self.game.outcome() {
            GameOutcome::InProgress => ("playing", ""),
            GameOutcome::Won => ("won", "Cleared!"),
            GameOutcome::Lost => ("lost", "Boom!"),
        };

        let onpointermove = link.callback(|e: PointerEvent| {
            Msg::Pointer(PointerMsg::Move {
                x: e.offset_x(),
                y: e.offset_y(),
            })
        });
        let onpointerdown = link.callback(|e: PointerEvent| {
            Msg::Pointer(PointerMsg::Down {
                x: e.offset_x(),
                y: e.offset_y(),
                buttons: e.buttons(),
            })
        });
        let onpointerup = link.callback(|e: PointerEvent| {
            Msg::Pointer(PointerMsg::Up {
                x: e.offset_x(),
                y: e.offset_y(),
            })
        });
        let onpointerleave = link.callback(|_: PointerEvent| Msg::Pointer(PointerMsg::Leave));
        let cb_new_game = link.callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <div class="minesweeper" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside>{mines_left}</aside>
                    <span class={classes!("banner", status_class)}>{status}</span>
                    <button onclick={cb_new_game}>{"New game"}</button>
                </nav>
                <canvas
                    ref={self.canvas.clone()}
                    width={width.to_string()}
                    height={height.to_string()}
                    {onpointermove}
                    {onpointerdown}
                    {onpointerup}
                    {onpointerleave}
                />
            </div>
        }
    }
}
