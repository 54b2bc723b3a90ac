//! Checkerboard underlay for the alpha slider track.

use floem::context::PaintCx;
use floem::kurbo::Rect;
use floem::peniko::Color;
use floem_renderer::Renderer;

use crate::constants;

const LIGHT: Color = Color::rgb8(255, 255, 255);
const DARK: Color = Color::rgb8(204, 204, 204);

/// Paint a checkerboard pattern into `rect`.
///
/// Fills the whole rect light, then strides over every other cell with the
/// dark color, clipping partial cells to the rect edges.
pub(crate) fn paint_checkerboard(cx: &mut PaintCx, rect: Rect) {
    let cell = constants::CHECKER_CELL;
    cx.fill(&rect, LIGHT, 0.0);

    let mut row = 0usize;
    let mut y = rect.y0;
    while y < rect.y1 {
        // Dark cells sit on odd (row + col), so even rows start one cell in.
        let mut x = rect.x0 + if row % 2 == 0 { cell } else { 0.0 };
        while x < rect.x1 {
            let cell_rect = Rect::new(x, y, (x + cell).min(rect.x1), (y + cell).min(rect.y1));
            cx.fill(&cell_rect, DARK, 0.0);
            x += 2.0 * cell;
        }
        y += cell;
        row += 1;
    }
}
