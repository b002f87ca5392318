use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) mod picker {
    use super::*;

    /// Trigger label shown while no date is selected.
    pub(crate) const PLACEHOLDER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const MONTH_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const NAV_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    /// Leading/trailing days belonging to the months adjacent to the visible
    /// one.
    pub(crate) const OUTSIDE_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const TODAY_STYLE: Style = Style::new()
        .fg(Color::LightYellow)
        .bg(Color::Black)
        .add_modifier(Modifier::BOLD);

    /// Layered on top of whatever the cell otherwise looks like.
    pub(crate) const SELECTED_MODIFIER: Modifier = Modifier::REVERSED;
}
