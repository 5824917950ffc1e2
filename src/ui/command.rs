use std::result::Result as StdResult;
use unsegen::input::*;

use nom::{
    character::complete::{alpha1, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt, rest},
    sequence::{preceded, tuple},
    IResult,
};

use super::context::Context;
use crate::datetime::MonthIndex;
use crate::error::{Error, ErrorKind, Result};

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

/// `[count]name [argument]`, e.g. `3n`, `focus 12`, `goto 2026-10`.
fn command_line(input: &str) -> IResult<&str, (Option<u32>, &str, Option<&str>)> {
    all_consuming(tuple((
        preceded(space0, opt(map_res(digit1, |s: &str| s.parse::<u32>()))),
        alpha1,
        opt(preceded(space1, rest)),
    )))(input)
}

fn find_action(name: &str) -> Option<&'static Action> {
    COMMANDS
        .iter()
        .find(|(names, _)| names.contains(&name))
        .map(|(_, act)| act)
}

pub fn run_command(context: &mut Context, cmd: &str) -> Result<()> {
    let (_, (repeat, name, arg)) = command_line(cmd.trim_end())?;

    let act = find_action(name).ok_or_else(|| Error::new(ErrorKind::UnknownCommand, name))?;
    log::debug!("Running command '{}'", cmd);

    match (act, arg.map(str::trim).filter(|a| !a.is_empty())) {
        (Action::Repeatable(a), None) => a(context, repeat.unwrap_or(1)),
        (Action::NoArg(a), None) if repeat.is_none() => a(context),
        (Action::Arg(a), Some(arg)) if repeat.is_none() => a(context, arg),
        (Action::Arg(_), None) => Err(Error::new(ErrorKind::MissingArgument, name)),
        _ => Err(Error::new(ErrorKind::CommandParse, cmd)),
    }
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    fn report_error(&mut self, error: Error) {
        log::info!("Command failed: {}", error);
        self.context.last_error_message = Some(format!("{}", error));
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(key) = input.event {
            match key {
                Key::Char('\n') => {
                    let cmd = self.context.input_sink_mut().finish_line().to_owned();
                    if let Err(e) = run_command(self.context, &cmd) {
                        self.report_error(e);
                    } else {
                        self.context.leave_command_mode();
                    }
                    None
                }
                _ => Some(input),
            }
        } else {
            Some(input)
        }
    }
}

pub type ActionResult = StdResult<(), Error>;

pub enum Action {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, u32) -> ActionResult),
}

const COMMANDS: &[(&[&str], Action)] = &[
    (
        &["n", "next"],
        Action::Repeatable(|c, p| {
            c.view_mut().change_month(p as i32);
            Ok(())
        }),
    ),
    (
        &["p", "prev"],
        Action::Repeatable(|c, p| {
            c.view_mut().change_month(-(p as i32));
            Ok(())
        }),
    ),
    (
        &["t", "today"],
        Action::NoArg(|c| {
            c.view_mut().jump_to_today();
            Ok(())
        }),
    ),
    (
        &["c", "clear"],
        Action::NoArg(|c| {
            c.view_mut().clear_focus();
            Ok(())
        }),
    ),
    (
        &["f", "focus"],
        Action::Arg(|c, arg| {
            let day = arg
                .parse::<u32>()
                .map_err(|_| Error::new(ErrorKind::DayOutOfRange, arg))?;
            c.view_mut().focus(day)
        }),
    ),
    (
        &["g", "goto"],
        Action::Arg(|c, arg| {
            let month = arg.parse::<MonthIndex>()?;
            c.view_mut().jump_to(month);
            Ok(())
        }),
    ),
    (
        &["q", "quit"],
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::CalendarView;
    use chrono::{Month, NaiveDate};

    fn context() -> Context {
        Context::new(CalendarView::new(
            NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        ))
    }

    #[test]
    fn parses_count_name_and_argument() {
        assert_eq!(command_line("3n"), Ok(("", (Some(3), "n", None))));
        assert_eq!(command_line("next"), Ok(("", (None, "next", None))));
        assert_eq!(
            command_line("focus 12"),
            Ok(("", (None, "focus", Some("12"))))
        );
        assert!(command_line("").is_err());
        assert!(command_line("12").is_err());
    }

    #[test]
    fn repeatable_navigation() {
        let mut c = context();
        run_command(&mut c, "3n").unwrap();
        assert_eq!(c.view().view_month(), MonthIndex::new(Month::January, 2027));

        run_command(&mut c, "prev").unwrap();
        assert_eq!(c.view().view_month(), MonthIndex::new(Month::December, 2026));

        run_command(&mut c, "t").unwrap();
        assert_eq!(c.view().view_month(), MonthIndex::new(Month::October, 2026));
    }

    #[test]
    fn focus_and_clear() {
        let mut c = context();
        run_command(&mut c, "focus 12").unwrap();
        assert_eq!(c.view().focused_day(), Some(12));

        run_command(&mut c, "clear").unwrap();
        assert_eq!(c.view().focused_day(), None);

        let err = run_command(&mut c, "f 32").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DayOutOfRange));
        let err = run_command(&mut c, "focus").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MissingArgument));
    }

    #[test]
    fn goto_month() {
        let mut c = context();
        run_command(&mut c, "f 3").unwrap();
        run_command(&mut c, "goto 1999-02").unwrap();
        assert_eq!(c.view().view_month(), MonthIndex::new(Month::February, 1999));
        assert_eq!(c.view().focused_day(), None);

        let err = run_command(&mut c, "goto feb").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MonthParse));
    }

    #[test]
    fn rejects_unknown_and_malformed_commands() {
        let mut c = context();
        let err = run_command(&mut c, "frobnicate").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnknownCommand));

        assert!(run_command(&mut c, "2today").is_err());
        assert!(run_command(&mut c, "next 4").is_err());
        assert!(run_command(&mut c, "?!").is_err());
        assert_eq!(c.view().view_month(), MonthIndex::new(Month::October, 2026));
        assert!(!c.quit);

        run_command(&mut c, "q").unwrap();
        assert!(c.quit);
    }
}
