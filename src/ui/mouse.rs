use std::io::{self, Write};
use std::sync::{Arc, Mutex, Weak};

use termion::event::{MouseButton, MouseEvent};
use termion::input::MouseTerminal;
use unsegen::input::{Behavior, Event, Input};

use super::geometry::{Hit, PanelGeometry};
use super::Context;

type SharedTerminal<W> = Mutex<Option<MouseTerminal<W>>>;

/// Mouse reporting is enabled while this guard lives.
pub struct MouseCapture<W: Write> {
    terminal: Arc<SharedTerminal<W>>,
}

impl<W: Write> MouseCapture<W> {
    pub fn enable(out: W) -> io::Result<Self> {
        let mut terminal = MouseTerminal::from(out);
        terminal.flush()?;
        Ok(MouseCapture {
            terminal: Arc::new(Mutex::new(Some(terminal))),
        })
    }

    /// A handle that can switch reporting off early, e.g. from a panic hook.
    pub fn release_handle(&self) -> MouseRelease<W> {
        MouseRelease {
            terminal: Arc::downgrade(&self.terminal),
        }
    }
}

pub struct MouseRelease<W: Write> {
    terminal: Weak<SharedTerminal<W>>,
}

impl<W: Write> MouseRelease<W> {
    pub fn release(&self) {
        if let Some(shared) = self.terminal.upgrade() {
            let mut terminal = match shared.lock() {
                Ok(terminal) => terminal,
                Err(poisoned) => poisoned.into_inner(),
            };
            // Dropping the terminal writes the disable sequence.
            terminal.take();
        }
    }
}

/// Applies a hit on the calendar panel to the view state.
pub fn apply_hit(context: &mut Context, hit: Hit) {
    let view = context.view_mut();
    match hit {
        Hit::PrevMonth => view.change_month(-1),
        Hit::NextMonth => view.change_month(1),
        Hit::Day(day) => {
            view.toggle_focus(day);
        }
        Hit::Footer => view.clear_focus(),
    }
}

/// Left clicks on the panel; everything else passes through.
pub struct ClickBehaviour<'a> {
    context: &'a mut Context,
    geometry: PanelGeometry,
}

impl<'a> ClickBehaviour<'a> {
    pub fn new(context: &'a mut Context, geometry: PanelGeometry) -> Self {
        ClickBehaviour { context, geometry }
    }
}

impl Behavior for ClickBehaviour<'_> {
    fn input(self, input: Input) -> Option<Input> {
        if let Event::Mouse(MouseEvent::Press(MouseButton::Left, x, y)) = input.event {
            // Terminal mouse coordinates are 1-based.
            let days = self.context.view().days_in_month();
            if let Some(hit) = self
                .geometry
                .hit(i32::from(x) - 1, i32::from(y) - 1, days)
            {
                log::debug!("Click on {:?}", hit);
                apply_hit(self.context, hit);
            }
            None
        } else {
            Some(input)
        }
    }
}
