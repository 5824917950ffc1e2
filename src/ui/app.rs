use std::cell::Cell;
use std::convert::TryFrom;

use crate::config::Config;
use crate::events::{Dispatcher, Event};

use super::geometry::PanelGeometry;
use super::mouse::ClickBehaviour;
use super::{CalendarPanel, Context, Glyphs, Mode};

use unsegen::base::{GraphemeCluster, Terminal};
use unsegen::input::{
    EditBehavior, Input, Key, Navigatable, NavigateBehavior, OperationResult, ScrollBehavior,
    Scrollable,
};
use unsegen::widget::*;

use super::command::CommandParser;

const KEY_HINTS: &str = "h/l month  [/] day  t today  : command  q quit";

pub struct App<'a> {
    config: &'a Config,
    context: Context,
    glyphs: Glyphs,
    geometry: Cell<PanelGeometry>,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, context: Context) -> App<'a> {
        // Glyphs are resolved once and applied on every draw.
        let glyphs = Glyphs::materialize(config.glyphs);
        App {
            config,
            context,
            glyphs,
            geometry: Cell::new(PanelGeometry::default()),
        }
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let spacer = " ".with_demand(|_| Demand2D {
            width: ColDemand::exact(1),
            height: RowDemand::exact(1),
        });

        let mut layout = HLayout::new()
            .separator(GraphemeCluster::try_from(' ').unwrap())
            .widget(spacer);

        if let Mode::Command = self.context.mode {
            layout = layout.widget(self.context.input_sink().as_widget());
        }

        let message = self
            .context
            .last_error_message
            .as_deref()
            .unwrap_or(if self.context.mode == Mode::Normal {
                KEY_HINTS
            } else {
                ""
            });

        layout.widget(message.with_demand(|_| Demand2D {
            width: ColDemand::at_least(0),
            height: RowDemand::exact(1),
        }))
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        VLayout::new()
            .widget(CalendarPanel::new(&self.context, &self.glyphs, &self.geometry))
            .widget(self.bottom_bar())
    }

    fn handle_input(&mut self, input: Input) {
        if input.matches(Key::Esc) {
            self.context.leave_command_mode();
            self.context.last_error_message = None;
            self.context.view_mut().clear_focus();
            return;
        }

        match self.context.mode {
            Mode::Normal => {
                let geometry = self.geometry.get();
                let mouse = self.config.mouse;
                let context = &mut self.context;
                let mut quit = false;
                let mut command = false;
                let mut today = false;

                let leftover = input
                    .chain((Key::Char('q'), || quit = true))
                    .chain((Key::Char(':'), || command = true))
                    .chain((Key::Char('t'), || today = true))
                    .chain(
                        NavigateBehavior::new(&mut MonthBehaviour(context))
                            .left_on(Key::Char('h'))
                            .left_on(Key::Left)
                            .right_on(Key::Char('l'))
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(&mut FocusBehaviour(context))
                            .forwards_on(Key::Char(']'))
                            .backwards_on(Key::Char('[')),
                    )
                    .finish();

                if let Some(input) = leftover {
                    if mouse {
                        let _ = input.chain(ClickBehaviour::new(context, geometry)).finish();
                    }
                }

                if quit {
                    self.context.quit = true;
                }
                if command {
                    self.context.enter_command_mode();
                }
                if today {
                    self.context.view_mut().jump_to_today();
                }
            }
            Mode::Command => {
                input
                    .chain(
                        EditBehavior::new(self.context.input_sink_mut())
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(self.context.input_sink_mut())
                            .backwards_on(Key::Up)
                            .forwards_on(Key::Down),
                    )
                    .chain(CommandParser::new(&mut self.context))
                    .finish();
            }
        }
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("Starting on {}", self.context.view().view_month());

        while !self.context.quit {
            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();

            // Handle events
            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::Input(input) => self.handle_input(input),
            }
        }

        log::info!("Quitting");
        Ok(())
    }
}

struct MonthBehaviour<'a>(&'a mut Context);

impl Navigatable for MonthBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        Err(())
    }

    fn move_left(&mut self) -> OperationResult {
        self.0.view_mut().change_month(-1);
        Ok(())
    }

    fn move_right(&mut self) -> OperationResult {
        self.0.view_mut().change_month(1);
        Ok(())
    }

    fn move_up(&mut self) -> OperationResult {
        Err(())
    }
}

struct FocusBehaviour<'a>(&'a mut Context);

impl Scrollable for FocusBehaviour<'_> {
    fn scroll_backwards(&mut self) -> OperationResult {
        self.0.view_mut().move_focus(-1).map_err(|e| {
            log::debug!("{}", e);
        })
    }

    fn scroll_forwards(&mut self) -> OperationResult {
        self.0.view_mut().move_focus(1).map_err(|e| {
            log::debug!("{}", e);
        })
    }
}
