use super::grid::{leading_gap, month_grid, DayCell, DAYS_IN_WEEK};
use super::state::{HitAreas, PickerState};
use crate::theme::picker::{
    MONTH_STYLE, NAV_STYLE, OUTSIDE_MONTH_STYLE, PLACEHOLDER_STYLE, SELECTED_MODIFIER, TODAY_STYLE,
    WEEKDAY_STYLE,
};
use crate::theme::BASE_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
};
use time::Date;

/// Outer width of the trigger and the popover, borders included.
const CONTROL_WIDTH: u16 = 30;

/// Blank line kept above the trigger.
const TOP_MARGIN: u16 = 1;

/// Trigger button height, borders included.
const TRIGGER_HEIGHT: u16 = 3;

/// Popover lines that are not week rows: two borders plus the header lines.
const POPOVER_CHROME: u16 = 4;

/// Month-title and weekday lines between the top border and the grid.
const HEADER_LINES: u16 = 2;

/// Columns per day cell.
pub(super) const CELL_WIDTH: u16 = 4;

/// Columns of the whole grid: seven cells.
const GRID_WIDTH: u16 = 28;

/// Columns of the month/year title between the navigation arrows.
const TITLE_WIDTH: usize = 24;

/// Width of each navigation arrow's click target.
const NAV_WIDTH: u16 = 2;

static WEEKDAYS: &str = "Sun Mon Tue Wed Thu Fri Sat ";

static PLACEHOLDER: &str = "Select a Date";

static EMPTY_CELL: &str = "    ";

/// The date-picker control: a trigger button plus, while open, a popover
/// calendar directly below it.  The embedding application owns the selection
/// and today's date and passes both in per render; the popover's own state
/// lives in [`PickerState`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DatePicker {
    selected: Option<Date>,
    today: Date,
}

impl DatePicker {
    pub(crate) fn new(selected: Option<Date>, today: Date) -> DatePicker {
        DatePicker { selected, today }
    }

    fn trigger_label(&self) -> Span<'static> {
        match self.selected {
            Some(date) => {
                let month = date.month();
                let day = date.day();
                let year = date.year();
                Span::styled(format!("{month} {day}, {year}"), BASE_STYLE)
            }
            None => Span::styled(PLACEHOLDER, PLACEHOLDER_STYLE),
        }
    }

    fn cells(&self, month: Date) -> Vec<DayCell> {
        month_grid(month)
            .into_iter()
            .map(|date| DayCell::classify(date, month, self.selected, self.today))
            .collect()
    }
}

impl StatefulWidget for DatePicker {
    type State = PickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut PickerState) {
        let month = state.visible_month();
        let cells = month.map(|m| self.cells(m));
        let popover_height = cells
            .as_ref()
            .map_or(0, |c| week_rows(c).saturating_add(POPOVER_CHROME));
        let [column] = Layout::horizontal([Constraint::Length(CONTROL_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let [_, trigger_area, popover_area] = Layout::vertical([
            Constraint::Length(TOP_MARGIN),
            Constraint::Length(TRIGGER_HEIGHT),
            Constraint::Length(popover_height),
        ])
        .flex(Flex::Start)
        .areas(column);

        Paragraph::new(self.trigger_label())
            .block(Block::bordered())
            .style(BASE_STYLE)
            .render(trigger_area, buf);

        let Some((month, cells)) = month.zip(cells) else {
            state.record_areas(HitAreas {
                trigger: trigger_area,
                ..HitAreas::default()
            });
            return;
        };

        Clear.render(popover_area, buf);
        let block = Block::bordered();
        let inner = block.inner(popover_area);
        Paragraph::new(popover_text(month, &cells))
            .block(block)
            .style(BASE_STYLE)
            .render(popover_area, buf);
        state.record_areas(HitAreas {
            trigger: trigger_area,
            popover: popover_area,
            prev: Rect::new(inner.x, inner.y, NAV_WIDTH, 1).intersection(inner),
            next: Rect::new(
                inner.right().saturating_sub(NAV_WIDTH),
                inner.y,
                NAV_WIDTH,
                1,
            )
            .intersection(inner),
            grid: Rect::new(
                inner.x,
                inner.y.saturating_add(HEADER_LINES),
                GRID_WIDTH.min(inner.width),
                week_rows(&cells),
            )
            .intersection(inner),
        });
    }
}

// Rows the grid occupies, counting the partial week a month clipped at the
// calendar's edge ends up with.
fn week_rows(cells: &[DayCell]) -> u16 {
    let days = grid_gap(cells).saturating_add(cells.len());
    u16::try_from(days.div_ceil(DAYS_IN_WEEK)).unwrap_or(u16::MAX)
}

fn grid_gap(cells: &[DayCell]) -> usize {
    cells.first().map_or(0, |cell| leading_gap(cell.date))
}

fn popover_text(month: Date, cells: &[DayCell]) -> Text<'static> {
    let gap = grid_gap(cells);
    let rows = usize::from(week_rows(cells));
    let mut lines = Vec::with_capacity(rows.saturating_add(2));
    lines.push(header_line(month));
    lines.push(Line::styled(WEEKDAYS, WEEKDAY_STYLE));
    // Every cell lands in its weekday's column; a clipped month leaves blank
    // cells at the corners instead of days from beyond the calendar.
    for row in 0..rows {
        lines.push(Line::from_iter((0..DAYS_IN_WEEK).map(|col| {
            (row * DAYS_IN_WEEK + col)
                .checked_sub(gap)
                .and_then(|index| cells.get(index))
                .map_or_else(|| Span::styled(EMPTY_CELL, BASE_STYLE), day_span)
        })));
    }
    Text::from(lines)
}

fn header_line(month: Date) -> Line<'static> {
    let name = month.month();
    let year = month.year();
    let title = format!("{name} {year}");
    Line::from_iter([
        Span::styled("← ", NAV_STYLE),
        Span::styled(format!("{title:^width$}", width = TITLE_WIDTH), MONTH_STYLE),
        Span::styled(" →", NAV_STYLE),
    ])
}

// Today wears brackets; a selected cell reverses whatever base it has.
fn day_span(cell: &DayCell) -> Span<'static> {
    let day = cell.date.day();
    let content = if cell.today {
        format!("[{day:2}]")
    } else {
        format!(" {day:2} ")
    };
    let mut style = if cell.today {
        TODAY_STYLE
    } else if cell.outside_month {
        OUTSIDE_MONTH_STYLE
    } else {
        BASE_STYLE
    };
    if cell.selected {
        style = style.add_modifier(SELECTED_MODIFIER);
    }
    Span::styled(content, style)
}
