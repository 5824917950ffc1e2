use chrono::{Local, NaiveDateTime};

use crate::datetime::MonthIndex;
use crate::view::CalendarView;

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub month_header_style: StyleModifier,
    pub year_style: StyleModifier,
    pub chevron_style: StyleModifier,
    pub future_day_style: StyleModifier,
    pub past_day_style: StyleModifier,
    pub today_day_style: StyleModifier,
    pub today_pulse_style: StyleModifier,
    pub focus_day_style: StyleModifier,
    pub focus_label_style: StyleModifier,
    pub progress_fill_style: StyleModifier,
    pub progress_track_style: StyleModifier,
    pub footer_label_style: StyleModifier,
    pub momentum_style: StyleModifier,
    pub clock_style: StyleModifier,
    pub error_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        let dim = StyleModifier::new().fg_color(Color::LightBlack);

        Theme {
            month_header_style: StyleModifier::new()
                .fg_color(Color::White)
                .format(TextFormatModifier::new().italic(true)),
            year_style: dim,
            chevron_style: dim,
            future_day_style: StyleModifier::new().fg_color(Color::Ansi(245)),
            past_day_style: dim,
            today_day_style: StyleModifier::new()
                .fg_color(Color::White)
                .format(TextFormatModifier::new().bold(true)),
            today_pulse_style: StyleModifier::new().fg_color(Color::White),
            focus_day_style: StyleModifier::new()
                .fg_color(Color::White)
                .format(TextFormatModifier::new().bold(true)),
            focus_label_style: StyleModifier::new()
                .fg_color(Color::White)
                .format(TextFormatModifier::new().italic(true)),
            progress_fill_style: StyleModifier::new().fg_color(Color::White),
            progress_track_style: dim,
            footer_label_style: dim,
            momentum_style: StyleModifier::new()
                .fg_color(Color::White)
                .format(TextFormatModifier::new().italic(true)),
            clock_style: dim,
            error_style: StyleModifier::new().fg_color(Color::LightRed),
        }
    }
}

pub struct Context {
    pub mode: Mode,
    pub theme: Theme,
    pub last_error_message: Option<String>,
    pub quit: bool,
    command_line: PromptLine,
    view: CalendarView,
}

impl Context {
    pub fn new(view: CalendarView) -> Self {
        Context {
            mode: Mode::Normal,
            theme: Theme::default(),
            last_error_message: None,
            quit: false,
            command_line: PromptLine::with_prompt(":".to_owned()),
            view,
        }
    }

    pub fn starting_at(month: Option<MonthIndex>) -> Self {
        let now = local_now();
        let view = match month {
            Some(month) => CalendarView::with_month(month, now),
            None => CalendarView::new(now),
        };
        Context::new(view)
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CalendarView {
        &mut self.view
    }

    pub fn update(&mut self) {
        self.view.tick(local_now());
    }

    pub fn input_sink(&self) -> &PromptLine {
        &self.command_line
    }

    pub fn input_sink_mut(&mut self) -> &mut PromptLine {
        &mut self.command_line
    }

    pub fn enter_command_mode(&mut self) {
        self.last_error_message = None;
        self.mode = Mode::Command;
    }

    pub fn leave_command_mode(&mut self) {
        self.mode = Mode::Normal;
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
