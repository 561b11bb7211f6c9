//! Clickable UI pieces shared by the farm screens.
//!
//! Each widget draws itself and registers matching click targets in one go,
//! so a label and its hit region cannot drift apart.
//!
//! - [`TabBar`]: a single row of selectable labels (the crop picker).
//! - [`ClickableList`]: lines of text where some rows trigger an action.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A horizontal row of labels, each bound to an action ID.
///
/// ```ignore
/// TabBar::new(" | ")
///     .tab("1 Carrots $5", selected_style, SELECT_CROP_BASE)
///     .tab("2 Tomatoes $8", normal_style, SELECT_CROP_BASE + 1)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Wrap the bar in a block. Targets follow the block's inner area.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// `(display_width, action_id)` of each padded label, in order.
    fn widths(&self) -> Vec<(u16, u16)> {
        self.tabs
            .iter()
            .map(|(label, _, id)| (Line::from(pad(label)).width() as u16, *id))
            .collect()
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let sep_width = Line::from(self.separator).width() as u16;
        let tab_widths = self.widths();

        let mut spans: Vec<Span> = Vec::new();
        for (i, (label, style, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::styled(pad(label), *style));
        }

        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        let paragraph = match self.block {
            Some(block) => Paragraph::new(Line::from(spans)).block(block),
            None => Paragraph::new(Line::from(spans)),
        };
        f.render_widget(paragraph, area);

        // Inner x/width for accuracy, full outer height for tap tolerance.
        cs.register_tab_targets(
            &tab_widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

fn pad(label: &str) -> String {
    format!(" {} ", label)
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with the action each clickable line triggers.
///
/// Targets are bound to line indices, so inserting a header above an action
/// moves its hit row along with it.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Actions"));
/// cl.push_clickable(Line::from("[p] Plant"), PLANT);
/// cl.register_targets_with_block(area, &block, &mut cs, 0, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register targets for content drawn inside `block` within `area`.
    pub fn register_targets_with_block(
        &self,
        area: Rect,
        block: &Block,
        cs: &mut ClickState,
        scroll: u16,
        inner_width: u16,
    ) {
        let inner = block.inner(area);
        let top = inner.y - area.y;
        let bottom = (area.y + area.height) - (inner.y + inner.height);
        self.register_targets(area, cs, top, bottom, scroll, inner_width);
    }

    /// Register click targets for all clickable lines.
    ///
    /// `top_offset`/`bottom_offset` are rows taken by borders, `scroll` is the
    /// vertical scroll in visual rows. With `inner_width == 0` every line is
    /// one row; otherwise lines wider than `inner_width` are assumed to wrap.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let mut starts: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut heights: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            starts.push(cumulative);
            let h = match inner_width as usize {
                0 => 1,
                w => line.width().div_ceil(w).max(1) as u16,
            };
            heights.push(h);
            cumulative += h;
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            for vr in starts[li]..starts[li] + heights[li] {
                if vr < scroll {
                    continue;
                }
                let screen_row = content_y + (vr - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratzilla::ratatui::widgets::Borders;

    // ── TabBar ─────────────────────────────────────────────────

    #[test]
    fn tab_widths_include_padding() {
        let bar = TabBar::new(" | ")
            .tab("1 Carrots", Style::default(), 100)
            .tab("2 Corn", Style::default(), 101);
        assert_eq!(bar.widths(), vec![(11, 100), (8, 101)]);
    }

    // ── ClickableList ──────────────────────────────────────────

    #[test]
    fn clickable_list_skips_plain_lines() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Actions"));
        cl.push_clickable(Line::from("[P] Plant"), 1);
        cl.push_clickable(Line::from("[W] Water"), 2);
        cl.push(Line::from(""));

        // Borders::ALL → content starts one row below area.y.
        let area = Rect::new(0, 5, 40, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(3, 6), None);
        assert_eq!(cs.hit_test(3, 7), Some(1));
        assert_eq!(cs.hit_test(3, 8), Some(2));
        assert_eq!(cs.hit_test(3, 9), None);
    }

    #[test]
    fn clickable_list_with_block_matches_manual_offsets() {
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from("[Z] Sleep"), 4);

        let area = Rect::new(10, 2, 30, 6);
        let block = Block::default().borders(Borders::ALL);
        let mut cs = ClickState::new();
        cl.register_targets_with_block(area, &block, &mut cs, 0, 0);
        assert_eq!(cs.hit_test(12, 3), Some(4));

        let top_only = Block::default().borders(Borders::TOP | Borders::BOTTOM);
        let mut cs = ClickState::new();
        cl.register_targets_with_block(area, &top_only, &mut cs, 0, 0);
        assert_eq!(cs.hit_test(10, 3), Some(4));
    }

    #[test]
    fn clickable_list_scroll_and_clip() {
        let mut cl = ClickableList::new();
        for i in 0..6 {
            cl.push_clickable(Line::from(format!("row {}", i)), 50 + i);
        }

        // Three content rows, first two lines scrolled away.
        let area = Rect::new(0, 0, 20, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 2, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(1, 1), Some(52));
        assert_eq!(cs.hit_test(1, 3), Some(54));
        assert_eq!(cs.hit_test(1, 4), None);
    }

    #[test]
    fn clickable_list_wrapped_line_spans_rows() {
        let mut cl = ClickableList::new();
        // 25 columns in a 10-wide area → three visual rows.
        cl.push_clickable(Line::from("Buy 5 seeds of the crop!!"), 11);
        cl.push_clickable(Line::from("Sleep"), 4);

        let area = Rect::new(0, 0, 10, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 0, 10);

        assert_eq!(cs.hit_test(0, 0), Some(11));
        assert_eq!(cs.hit_test(0, 2), Some(11));
        assert_eq!(cs.hit_test(0, 3), Some(4));
    }

    #[test]
    fn clickable_list_empty_registers_nothing() {
        let cl: ClickableList = ClickableList::new();
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 10, 10), &mut cs, 1, 1, 0, 0);
        assert!(cs.targets.is_empty());
        assert!(cl.into_lines().is_empty());
    }
}
