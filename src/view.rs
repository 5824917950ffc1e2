use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::datetime::{day_progress, momentum_percent, MonthIndex};
use crate::error::{Error, ErrorKind, Result};

/// Small deterministic displacement of a day dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrganicOffset {
    pub x: f64,
    pub y: f64,
}

impl OrganicOffset {
    pub fn of_index(index: usize) -> Self {
        let phase = index as f64 * 0.5;
        OrganicOffset {
            x: phase.sin() * 2.0,
            y: phase.cos() * 2.0,
        }
    }

    /// Offset in terminal cells, each axis in `-1..=1`.
    pub fn cells(&self) -> (i32, i32) {
        ((self.x / 2.0).round() as i32, (self.y / 2.0).round() as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    Focused,
    Today,
    Past,
    Future,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub is_today: bool,
    pub is_past: bool,
    pub is_focused: bool,
    pub offset: OrganicOffset,
}

impl DayCell {
    pub fn index(&self) -> usize {
        (self.day - 1) as usize
    }

    /// Visual state, most specific first.
    pub fn state(&self) -> DayState {
        if self.is_focused {
            DayState::Focused
        } else if self.is_today {
            DayState::Today
        } else if self.is_past {
            DayState::Past
        } else {
            DayState::Future
        }
    }
}

/// View state of the calendar widget: displayed month, current instant and
/// focused day. All mutation goes through the methods below.
#[derive(Debug, Clone)]
pub struct CalendarView {
    view_month: MonthIndex,
    days_in_month: u32,
    now: NaiveDateTime,
    focused_day: Option<u32>,
}

impl CalendarView {
    pub fn new(now: NaiveDateTime) -> Self {
        Self::with_month(MonthIndex::from(now.date()), now)
    }

    pub fn with_month(view_month: MonthIndex, now: NaiveDateTime) -> Self {
        CalendarView {
            view_month,
            days_in_month: view_month.num_days(),
            now,
            focused_day: None,
        }
    }

    pub fn view_month(&self) -> MonthIndex {
        self.view_month
    }

    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    pub fn now(&self) -> &NaiveDateTime {
        &self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn focused_day(&self) -> Option<u32> {
        self.focused_day
    }

    pub fn shows_current_month(&self) -> bool {
        self.view_month.contains(&self.today())
    }

    pub fn tick(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    pub fn change_month(&mut self, offset: i32) {
        self.jump_to(self.view_month.offset(offset));
    }

    pub fn jump_to(&mut self, month: MonthIndex) {
        self.focused_day = None;
        self.view_month = month;
        self.days_in_month = month.num_days();
        log::debug!("Showing {}", self.view_month);
    }

    pub fn jump_to_today(&mut self) {
        self.jump_to(MonthIndex::from(self.today()));
    }

    fn contains_day(&self, day: u32) -> bool {
        (1..=self.days_in_month).contains(&day)
    }

    /// Focuses `day`, or clears the focus if `day` already has it.
    /// Returns whether `day` is focused afterwards.
    pub fn toggle_focus(&mut self, day: u32) -> bool {
        if !self.contains_day(day) {
            log::warn!("Ignoring focus on day {} of {}", day, self.view_month);
            return false;
        }

        if self.focused_day == Some(day) {
            self.focused_day = None;
        } else {
            self.focused_day = Some(day);
        }
        log::debug!("Focused day: {:?}", self.focused_day);

        self.focused_day.is_some()
    }

    pub fn focus(&mut self, day: u32) -> Result<()> {
        if !self.contains_day(day) {
            return Err(Error::new(
                ErrorKind::DayOutOfRange,
                &format!("{} has no day {}", self.view_month, day),
            ));
        }
        self.focused_day = Some(day);
        Ok(())
    }

    pub fn clear_focus(&mut self) {
        self.focused_day = None;
    }

    /// Moves the focus by `days` within the month. Without a focused day,
    /// forward movement starts at the first day and backward at the last.
    pub fn move_focus(&mut self, days: i32) -> Result<()> {
        let target = match self.focused_day {
            Some(day) => day as i64 + i64::from(days),
            None if days > 0 => i64::from(days),
            None => i64::from(self.days_in_month) + 1 + i64::from(days),
        };

        if target < 1 || target > i64::from(self.days_in_month) {
            return Err(Error::new(
                ErrorKind::DayOutOfRange,
                &format!("{} has no day {}", self.view_month, target),
            ));
        }

        self.focus(target as u32)
    }

    pub fn day_cell(&self, index: usize) -> Option<DayCell> {
        let day = index as u32 + 1;
        if !self.contains_day(day) {
            return None;
        }

        let today = self.today();
        Some(DayCell {
            day,
            is_today: self.view_month.contains(&today) && today.day() == day,
            is_past: self.view_month.is_day_before(day, &today),
            is_focused: self.focused_day == Some(day),
            offset: OrganicOffset::of_index(index),
        })
    }

    pub fn day_cells(&self) -> impl Iterator<Item = DayCell> + '_ {
        (0..self.days_in_month as usize).filter_map(move |index| self.day_cell(index))
    }

    pub fn day_progress(&self) -> f64 {
        day_progress(&self.now)
    }

    pub fn momentum(&self) -> u32 {
        momentum_percent(self.day_progress())
    }
}
