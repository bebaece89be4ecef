use core::f64::consts::TAU;

use minesweeper_core::{CellState, CellView, Coord2, GameController, OutcomeListener};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::input::CellMetrics;
use crate::settings::RenderConfig;

const TILE_COLOR: &str = "#ddd";
const HOVERED_TILE_COLOR: &str = "#f4f4f4";
const TILE_SHADE: &str = "#888";
const FLAG_COLOR: &str = "#d22";
const POLE_COLOR: &str = "#333";
const MINE_COLOR: &str = "#111";

/// What a cell looks like, independent of the drawing surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellPaint {
    Flagged,
    Closed { hovered: bool, mine: bool },
    Opened { mine: bool, digit: Option<u8> },
}

impl From<CellView> for CellPaint {
    fn from(view: CellView) -> Self {
        match view {
            CellView { has_flag: true, .. } => Self::Flagged,
            CellView {
                state: CellState::Closed,
                hovered,
                has_mine,
                ..
            } => Self::Closed {
                hovered,
                mine: has_mine,
            },
            CellView {
                state: CellState::Opened,
                has_mine,
                adjacent_mine_count,
                ..
            } => Self::Opened {
                mine: has_mine,
                digit: (adjacent_mine_count > 0).then_some(adjacent_mine_count),
            },
        }
    }
}

/// Paints the board onto a 2D canvas.
#[derive(Debug)]
pub(crate) struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    metrics: CellMetrics,
    render: RenderConfig,
}

impl CanvasRenderer {
    pub(crate) fn new(
        canvas: &HtmlCanvasElement,
        metrics: CellMetrics,
        render: RenderConfig,
    ) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        ctx.set_text_align("center");
        ctx.set_font(&format!("normal normal {}px Tahoma", render.font_size()));

        Ok(Self {
            ctx,
            metrics,
            render,
        })
    }

    pub(crate) fn paint_all<L: OutcomeListener>(&self, game: &GameController<L>) {
        let (width, height) = self.metrics.surface_size();
        self.ctx.set_fill_style_str(&self.render.background);
        self.ctx
            .fill_rect(0., 0., f64::from(width), f64::from(height));

        self.paint_cells(game, game.grid().coords());
    }

    pub(crate) fn paint_cells<L: OutcomeListener>(
        &self,
        game: &GameController<L>,
        cells: impl IntoIterator<Item = Coord2>,
    ) {
        for coords in cells {
            if let Some(view) = game.cell_view(coords) {
                if let Err(err) = self.paint_cell(coords, view.into()) {
                    log::error!("failed to paint cell {:?}: {:?}", coords, err);
                }
            }
        }
    }

    fn paint_cell(&self, coords: Coord2, paint: CellPaint) -> Result<(), JsValue> {
        let (x, y) = self.metrics.origin(coords);
        let (width, height) = self.metrics.cell_size();

        match paint {
            CellPaint::Flagged => {
                self.paint_tile(x, y, false);
                self.paint_flag(x, y);
            }
            CellPaint::Closed { hovered, mine } => {
                self.paint_tile(x, y, hovered);
                if mine {
                    self.paint_mine(x, y)?;
                }
            }
            CellPaint::Opened { mine, digit } => {
                self.ctx.set_fill_style_str(&self.render.background);
                self.ctx.fill_rect(x, y, width, height);
                self.ctx.set_stroke_style_str(TILE_SHADE);
                self.ctx.stroke_rect(x, y, width, height);

                if mine {
                    self.paint_mine(x, y)?;
                }
                if let Some(digit) = digit {
                    self.ctx.set_fill_style_str(self.render.digit_color(digit));
                    self.ctx
                        .fill_text(&digit.to_string(), x + width / 2., y + height / 1.5)?;
                }
            }
        }

        Ok(())
    }

    fn paint_tile(&self, x: f64, y: f64, hovered: bool) {
        let (width, height) = self.metrics.cell_size();
        let bevel = (width.min(height) / 16.).max(1.);

        self.ctx.set_fill_style_str(TILE_SHADE);
        self.ctx.fill_rect(x, y, width, height);
        self.ctx
            .set_fill_style_str(if hovered { HOVERED_TILE_COLOR } else { TILE_COLOR });
        self.ctx
            .fill_rect(x, y, width - bevel, height - bevel);
    }

    fn paint_flag(&self, x: f64, y: f64) {
        let (width, height) = self.metrics.cell_size();
        let (flag_width, flag_height) = (width / 1.5, height / 1.5);
        let left = x + flag_width / 2.3;
        let top = y + flag_height / 2.3;

        self.ctx.set_stroke_style_str(POLE_COLOR);
        self.ctx.set_line_width((width / 24.).max(1.));
        self.ctx.begin_path();
        self.ctx.move_to(left, top);
        self.ctx.line_to(left, top + flag_height);
        self.ctx.stroke();

        self.ctx.set_fill_style_str(FLAG_COLOR);
        self.ctx.begin_path();
        self.ctx.move_to(left, top);
        self.ctx.line_to(left + flag_width * 0.75, top + flag_height * 0.25);
        self.ctx.line_to(left, top + flag_height * 0.5);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn paint_mine(&self, x: f64, y: f64) -> Result<(), JsValue> {
        let (width, height) = self.metrics.cell_size();
        let radius = width.min(height) / 4.;

        self.ctx.set_fill_style_str(MINE_COLOR);
        self.ctx.begin_path();
        self.ctx
            .arc(x + width / 2., y + height / 2., radius, 0., TAU)?;
        self.ctx.fill();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(state: CellState) -> CellView {
        CellView {
            state,
            has_mine: false,
            has_flag: false,
            adjacent_mine_count: 0,
            hovered: false,
        }
    }

    #[test]
    fn flags_take_precedence_over_hover_and_mines() {
        let flagged = CellView {
            has_flag: true,
            has_mine: true,
            hovered: true,
            ..view(CellState::Closed)
        };

        assert_eq!(CellPaint::from(flagged), CellPaint::Flagged);
    }

    #[test]
    fn closed_cells_show_hover_and_revealed_mines() {
        let hovered = CellView {
            hovered: true,
            ..view(CellState::Closed)
        };
        let lost_mine = CellView {
            has_mine: true,
            ..view(CellState::Closed)
        };

        assert_eq!(
            CellPaint::from(hovered),
            CellPaint::Closed {
                hovered: true,
                mine: false
            }
        );
        assert_eq!(
            CellPaint::from(lost_mine),
            CellPaint::Closed {
                hovered: false,
                mine: true
            }
        );
    }

    #[test]
    fn opened_cells_show_digits_only_when_positive() {
        let empty = view(CellState::Opened);
        let three = CellView {
            adjacent_mine_count: 3,
            ..view(CellState::Opened)
        };

        assert_eq!(
            CellPaint::from(empty),
            CellPaint::Opened {
                mine: false,
                digit: None
            }
        );
        assert_eq!(
            CellPaint::from(three),
            CellPaint::Opened {
                mine: false,
                digit: Some(3)
            }
        );
    }
}
