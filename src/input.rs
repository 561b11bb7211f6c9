//! Input plumbing: normalized events, click targets and pixel → cell conversion.
//!
//! Nothing here knows about farming. Render code registers rectangles with an
//! action ID; the mouse handler in `main.rs` converts a click to a terminal
//! cell and asks [`ClickState::hit_test`] which action sits there.

use ratzilla::ratatui::layout::Rect;

/// All possible input events, normalized from keyboard, mouse, and touch sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press from keyboard.
    Key(char),
    /// A click/tap on a registered target, identified by a semantic action ID.
    Click(u16),
}

/// A region on screen that can be tapped/clicked to trigger an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cell coordinates.
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared state between the render loop and click handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width target on one row, ignored if the row lies outside `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Register one target per cell of a `rows` × `cols` grid drawn at
    /// (`x`, `y`), each cell `cell_width` columns wide and one row tall.
    /// Cell (r, c) gets `base + r * cols + c`. Cells falling outside `clip`
    /// are skipped.
    pub fn add_grid_targets(
        &mut self,
        clip: Rect,
        x: u16,
        y: u16,
        cell_width: u16,
        rows: usize,
        cols: usize,
        base: u16,
    ) {
        for r in 0..rows {
            let row_y = y + r as u16;
            if row_y < clip.y || row_y >= clip.y + clip.height {
                continue;
            }
            for c in 0..cols {
                let cell_x = x + c as u16 * cell_width;
                if cell_x + cell_width > clip.x + clip.width {
                    break;
                }
                let id = base + (r * cols + c) as u16;
                self.add_click_target(Rect::new(cell_x, row_y, cell_width, 1), id);
            }
        }
    }

    /// Register click targets for a horizontal tab bar.
    ///
    /// `tab_widths` holds `(display_width, action_id)` for each padded label.
    /// Each target covers its label plus half of the separator on either
    /// side; the first and last tabs stretch to the edges of `total_width`.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        let half_sep = separator_width / 2;
        for (i, &(w, action_id)) in tab_widths.iter().enumerate() {
            let left = if i == 0 { 0 } else { starts[i] - (separator_width - half_sep) };
            let right = if i == n - 1 {
                total_width
            } else {
                (starts[i] + w + half_sep).min(total_width)
            };
            let width = right.saturating_sub(left);
            if width > 0 {
                self.add_click_target(Rect::new(x + left, y, width, height), action_id);
            }
        }
    }

    /// Action at a terminal cell. Later registrations win where targets overlap.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Determine whether a screen width (in columns) should use narrow layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel offset inside the terminal element to a cell index along
/// one axis. `None` when the click is outside or the sizes are degenerate.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}
