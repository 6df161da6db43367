pub use crate::binding::{BoundValue, Change, Property, SubKey, Subscription};
pub use crate::color::Color;
pub use crate::effects::Dispose;
pub use crate::error::{BindingError, ParseError};
pub use crate::geometry::{Rect, Size, Vec2};
pub use crate::input::{
    Cursor, FocusDirection, InputEvent, Key, KeyEvent, Modifiers, PointerButton, PointerEvent,
    PointerEventKind,
};
pub use crate::scene::{DisplayList, DrawCmd, TextExtent};
pub use crate::timer::{Clock, SystemClock, TestClock, TimerHandle, Timers, now, set_clock};
