pub mod app;
pub mod calendar_panel;
pub mod command;
pub mod context;
pub mod geometry;
pub mod glyphs;
pub mod mouse;
pub mod surface;

pub use self::calendar_panel::{render_plain, CalendarPanel};
pub use self::context::{Context, Mode, Theme};
pub use self::glyphs::{GlyphMode, Glyphs, Icon};
