mod grid;
mod state;
mod widget;
pub(crate) use self::state::{PickerOutput, PickerState};
pub(crate) use self::widget::DatePicker;
