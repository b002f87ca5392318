use super::grid::{leading_gap, month_grid, shift_months, OutOfTimeError, DAYS_IN_WEEK};
use super::widget::CELL_WIDTH;
use crossterm::event::KeyCode;
use ratatui::layout::{Position, Rect};
use time::Date;

/// What routing an event through the picker produced, reported to the
/// embedding application.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickerOutput {
    /// The event was consumed without changing the selection.
    Handled,
    /// The event was not for this control, or navigation ran off the
    /// calendar.
    Ignored,
    /// A day cell was chosen; the new selection.
    Picked(Date),
}

/// Live state of the control.  The popover's entire mounted state is the
/// `visible` field: `Some(anchor)` while it is open, dropped on close, so
/// reopening always re-derives the visible month from the current selection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct PickerState {
    visible: Option<Date>,
    areas: HitAreas,
}

impl PickerState {
    pub(crate) fn new() -> PickerState {
        PickerState::default()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.visible.is_some()
    }

    /// The date anchoring the month on display, while the popover is open.
    pub(crate) fn visible_month(&self) -> Option<Date> {
        self.visible
    }

    /// Trigger activation: close if open, otherwise open on the selection's
    /// month, falling back to today's.
    pub(crate) fn toggle(&mut self, selected: Option<Date>, today: Date) {
        if self.is_open() {
            self.close();
        } else {
            self.visible = Some(selected.unwrap_or(today));
        }
    }

    pub(crate) fn close(&mut self) {
        self.visible = None;
    }

    /// Keyboard routing.  Arrow keys and Esc only act while the popover is
    /// open; Enter and Space always reach the trigger.
    pub(crate) fn handle_key(
        &mut self,
        key: KeyCode,
        selected: Option<Date>,
        today: Date,
    ) -> PickerOutput {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle(selected, today);
                PickerOutput::Handled
            }
            KeyCode::Left if self.is_open() => self.navigated(-1),
            KeyCode::Right if self.is_open() => self.navigated(1),
            KeyCode::Esc if self.is_open() => {
                self.close();
                PickerOutput::Handled
            }
            _ => PickerOutput::Ignored,
        }
    }

    /// Mouse routing against the regions recorded by the last render.  A
    /// click outside the control's boundary dismisses the popover; clicks
    /// inside it never do, matching the trigger's outside-click contract.
    pub(crate) fn handle_click(
        &mut self,
        position: Position,
        selected: Option<Date>,
        today: Date,
    ) -> PickerOutput {
        if self.areas.trigger.contains(position) {
            self.toggle(selected, today);
            return PickerOutput::Handled;
        }
        let Some(month) = self.visible else {
            // Closed: the trigger is the only live region.
            return PickerOutput::Ignored;
        };
        if self.areas.prev.contains(position) {
            return self.navigated(-1);
        }
        if self.areas.next.contains(position) {
            return self.navigated(1);
        }
        if let Some(date) = self.date_at(position, month) {
            // Deliberately leaves the popover open and the month in place.
            return PickerOutput::Picked(date);
        }
        if self.areas.popover.contains(position) {
            return PickerOutput::Handled;
        }
        self.close();
        PickerOutput::Handled
    }

    pub(super) fn record_areas(&mut self, areas: HitAreas) {
        self.areas = areas;
    }

    fn navigated(&mut self, delta: i32) -> PickerOutput {
        let Some(month) = self.visible else {
            return PickerOutput::Ignored;
        };
        match shift_months(month, delta) {
            Ok(date) => {
                self.visible = Some(date);
                PickerOutput::Handled
            }
            Err(OutOfTimeError) => PickerOutput::Ignored,
        }
    }

    fn date_at(&self, position: Position, month: Date) -> Option<Date> {
        let grid = self.areas.grid;
        if !grid.contains(position) {
            return None;
        }
        let col = usize::from((position.x - grid.x) / CELL_WIDTH);
        let row = usize::from(position.y - grid.y);
        let cells = month_grid(month);
        // The blank corner cells of a clipped month map to no date at all.
        let gap = cells.first().copied().map_or(0, leading_gap);
        (row * DAYS_IN_WEEK + col)
            .checked_sub(gap)
            .and_then(|index| cells.get(index).copied())
    }
}

/// Screen regions the widget covered on its last render, used to route
/// clicks.  All-zero (hitting nothing) until the first render, and the
/// popover regions are zeroed again whenever it is rendered closed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct HitAreas {
    pub(super) trigger: Rect,
    pub(super) popover: Rect,
    pub(super) prev: Rect,
    pub(super) next: Rect,
    pub(super) grid: Rect,
}
