/// Farm Vibes rendering: status header, plot grid, crop picker, actions and log.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::logic::{self, EMPTY_GLYPH, GROWING_GLYPH};
use super::state::{FarmState, GRID_SIZE, MAX_ENERGY};

/// Terminal columns per plot: the glyph with a space either side.
const CELL_WIDTH: u16 = 3;
/// Grid panel width: cells, one leading space, two borders.
const GRID_PANEL_WIDTH: u16 = GRID_SIZE as u16 * CELL_WIDTH + 3;

pub fn render(state: &FarmState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    if is_narrow_layout(area.width) {
        render_narrow(state, f, area, click_state);
    } else {
        render_wide(state, f, area, click_state);
    }
}

fn render_wide(state: &FarmState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                     // Header
            Constraint::Length(GRID_SIZE as u16 + 2),  // Grid + borders
            Constraint::Min(10),                       // Actions
            Constraint::Length(8),                     // Log
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(GRID_PANEL_WIDTH), Constraint::Min(20)])
        .split(rows[1]);

    render_header(state, f, rows[0], false);
    render_grid(state, f, middle[0], click_state, false);
    render_crop_picker(state, f, middle[1], click_state);
    render_actions(state, f, rows[2], click_state, false);
    render_log(state, f, rows[3], false);
}

fn render_narrow(state: &FarmState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(GRID_SIZE as u16 + 2),
            Constraint::Min(10),
            Constraint::Length(5),
        ])
        .split(area);

    render_header(state, f, rows[0], true);
    render_crop_picker(state, f, rows[1], click_state);
    render_grid(state, f, rows[2], click_state, true);
    render_actions(state, f, rows[3], click_state, true);
    render_log(state, f, rows[4], true);
}

fn borders_for(is_narrow: bool) -> Borders {
    if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    }
}

fn render_header(state: &FarmState, f: &mut Frame, area: Rect, is_narrow: bool) {
    let player = &state.player;
    let ready = logic::mature_plots(&state.grid).len();

    let line = if is_narrow {
        Line::from(Span::styled(
            logic::status_line(player),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
    } else {
        let energy_color = if player.energy == 0 {
            Color::Red
        } else {
            Color::Cyan
        };
        let mut spans = vec![
            Span::styled(
                format!("Day {}", player.day),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("Money: ${}", player.money),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("Energy: {}/{}", player.energy, MAX_ENERGY),
                Style::default().fg(energy_color),
            ),
        ];
        if ready > 0 {
            spans.push(Span::styled(
                format!("  {} ready", ready),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    };

    let widget = Paragraph::new(line)
        .block(
            Block::default()
                .borders(borders_for(is_narrow))
                .border_style(Style::default().fg(Color::Green))
                .title(" Farm Vibes "),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn glyph_style(glyph: char, is_cursor: bool) -> Style {
    let base = match glyph {
        EMPTY_GLYPH => Style::default().fg(Color::DarkGray),
        GROWING_GLYPH => Style::default().fg(Color::Green),
        _ => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    };
    if is_cursor {
        base.add_modifier(Modifier::REVERSED)
    } else {
        base
    }
}

fn render_grid(
    state: &FarmState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    is_narrow: bool,
) {
    let glyphs = logic::glyph_grid(&state.grid, state.catalog);

    let lines: Vec<Line> = glyphs
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let mut spans = vec![Span::raw(" ")];
            for (col, &glyph) in cells.iter().enumerate() {
                let is_cursor = row == state.cursor_row && col == state.cursor_col;
                spans.push(Span::styled(format!(" {} ", glyph), glyph_style(glyph, is_cursor)));
            }
            Line::from(spans)
        })
        .collect();

    let block = Block::default()
        .borders(borders_for(is_narrow))
        .border_style(Style::default().fg(Color::Green))
        .title(" Your Farm ");
    let inner = block.inner(area);
    f.render_widget(Paragraph::new(lines).block(block), area);

    click_state.borrow_mut().add_grid_targets(
        inner,
        inner.x + 1,
        inner.y,
        CELL_WIDTH,
        GRID_SIZE,
        GRID_SIZE,
        CELL_BASE,
    );
}

fn render_crop_picker(
    state: &FarmState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut bar = TabBar::new(" | ");
    for (i, crop) in state.catalog.iter().enumerate().take(9) {
        let style = if i == state.selected_crop {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        let label = format!(
            "{} {} ${} x{}",
            i + 1,
            crop.name,
            crop.seed_price,
            state.player.seed_count(&crop.id)
        );
        bar = bar.tab(label, style, SELECT_CROP_BASE + i as u16);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Seeds [1-9] ");
    bar.block(block)
        .render(f, area, &mut click_state.borrow_mut());
}

/// One line about the plot under the cursor.
fn plot_summary(state: &FarmState) -> String {
    let (row, col) = (state.cursor_row, state.cursor_col);
    let Some(plot) = state.plot(row, col) else {
        return String::new();
    };
    let Some(id) = &plot.crop else {
        return format!("({}, {}): empty", row, col);
    };
    let name = state
        .catalog
        .get(id)
        .map(|c| c.name.as_str())
        .unwrap_or(id.as_str());
    let water = if plot.watered { ", watered" } else { "" };
    if plot.days_left == 0 {
        format!("({}, {}): {} ready{}", row, col, name, water)
    } else {
        format!(
            "({}, {}): {}, {} day(s) left{}",
            row, col, name, plot.days_left, water
        )
    }
}

fn render_actions(
    state: &FarmState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    is_narrow: bool,
) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::White);
    let dim = Style::default().fg(Color::DarkGray);

    let (crop_name, price) = state
        .selected_crop_info()
        .map(|c| (c.name.as_str(), c.seed_price))
        .unwrap_or(("-", 0));

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(format!(" {}", plot_summary(state)), dim)));
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [p] ", key),
            Span::styled(format!("Plant {}", crop_name), text),
        ]),
        PLANT,
    );
    cl.push_clickable(
        Line::from(vec![Span::styled(" [w] ", key), Span::styled("Water", text)]),
        WATER,
    );
    cl.push_clickable(
        Line::from(vec![Span::styled(" [g] ", key), Span::styled("Harvest", text)]),
        HARVEST,
    );
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [b] ", key),
            Span::styled(format!("Buy 1 {} (${})", crop_name, price), text),
        ]),
        BUY_ONE,
    );
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [B] ", key),
            Span::styled(format!("Buy 5 {} (${})", crop_name, price.saturating_mul(5)), text),
        ]),
        BUY_FIVE,
    );
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [z] ", key),
            Span::styled("Sleep until tomorrow", text),
        ]),
        SLEEP,
    );
    match &state.prompt {
        Some(typed) => cl.push(Line::from(vec![
            Span::styled(" > ", key),
            Span::styled(
                format!("{}_", typed),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ])),
        None => cl.push_clickable(
            Line::from(vec![
                Span::styled(" [:] ", key),
                Span::styled("Type a command", dim),
            ]),
            OPEN_PROMPT,
        ),
    }

    let block = Block::default()
        .borders(borders_for(is_narrow))
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Actions [hjkl move, Esc closes prompt] ");

    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_log(state: &FarmState, f: &mut Frame, area: Rect, is_narrow: bool) {
    let last = state.log.len().saturating_sub(1);
    let lines: Vec<Line> = state
        .log
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let color = if i == last { Color::White } else { Color::DarkGray };
            Line::from(Span::styled(format!(" {}", entry), Style::default().fg(color)))
        })
        .collect();

    let block = Block::default()
        .borders(borders_for(is_narrow))
        .border_style(Style::default().fg(Color::Blue))
        .title(" Log ");
    let inner = block.inner(area);

    // Scroll so the newest entry sits on the last visible row.
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let total = paragraph.line_count(inner.width) as u16;
    let scroll = total.saturating_sub(inner.height);
    f.render_widget(paragraph.scroll((scroll, 0)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::farm::catalog::CropId;
    use crate::games::farm::logic::{buy_seeds, plant_seed, water_plot};

    #[test]
    fn grid_panel_fits_cells() {
        // Leading space + cells + two border columns.
        assert_eq!(GRID_PANEL_WIDTH, 1 + 15 + 2);
    }

    #[test]
    fn cursor_cell_is_reversed() {
        let style = glyph_style('C', true);
        assert!(style.add_modifier.contains(Modifier::REVERSED));
        let style = glyph_style(EMPTY_GLYPH, false);
        assert!(!style.add_modifier.contains(Modifier::REVERSED));
        assert_eq!(style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn plot_summary_follows_growth() {
        let mut state = FarmState::new();
        assert_eq!(plot_summary(&state), "(0, 0): empty");

        let tomato = CropId::new("tomato");
        buy_seeds(&mut state, &tomato, 1).unwrap();
        plant_seed(&mut state, 0, 0, &tomato).unwrap();
        assert_eq!(plot_summary(&state), "(0, 0): Tomatoes, 2 day(s) left");

        water_plot(&mut state, 0, 0).unwrap();
        state.grid[0][0].days_left = 0;
        assert_eq!(plot_summary(&state), "(0, 0): Tomatoes ready, watered");
    }
}
