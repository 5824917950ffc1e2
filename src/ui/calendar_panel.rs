use chrono::Timelike;
use std::cell::Cell;
use unsegen::base::*;
use unsegen::widget::*;

use super::geometry::*;
use super::surface::{Surface, TextCanvas, WindowSurface};
use super::{Context, Glyphs, Icon, Theme};
use crate::datetime::ordinal;
use crate::view::{CalendarView, DayState};

fn centered_x(geometry: &PanelGeometry, text: &str) -> i32 {
    geometry.left + (PANEL_WIDTH - text.chars().count() as i32) / 2
}

/// `OCTOBER` becomes `O C T O B E R`.
fn tracked(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn paint_header<S: Surface>(
    surface: &mut S,
    geometry: &PanelGeometry,
    view: &CalendarView,
    theme: &Theme,
    glyphs: &Glyphs,
) {
    let (x, y) = geometry.prev_chevron();
    surface.put(x, y, &glyphs.glyph(Icon::ChevronLeft).to_string(), theme.chevron_style);
    let (x, y) = geometry.next_chevron();
    surface.put(x, y, &glyphs.glyph(Icon::ChevronRight).to_string(), theme.chevron_style);

    let month = view.view_month();
    let name = tracked(month.name());
    surface.put(
        centered_x(geometry, &name),
        geometry.top + MONTH_ROW,
        &name,
        theme.month_header_style,
    );

    let year = month.year().to_string();
    surface.put(
        centered_x(geometry, &year),
        geometry.top + YEAR_ROW,
        &year,
        theme.year_style,
    );
}

fn paint_grid<S: Surface>(
    surface: &mut S,
    geometry: &PanelGeometry,
    view: &CalendarView,
    theme: &Theme,
    glyphs: &Glyphs,
) {
    // The today marker alternates between two styles on every tick.
    let today_style = if view.now().second() % 2 == 0 {
        theme.today_day_style
    } else {
        theme.today_pulse_style
    };

    for cell in view.day_cells() {
        let (icon, style) = match cell.state() {
            DayState::Focused => (Icon::FocusedDot, theme.focus_day_style),
            DayState::Today => (Icon::TodayDot, today_style),
            DayState::Past => (Icon::PastDot, theme.past_day_style),
            DayState::Future => (Icon::FutureDot, theme.future_day_style),
        };

        let (x, y) = geometry.dot(cell.index(), &cell.offset);
        surface.put(x, y, &glyphs.glyph(icon).to_string(), style);

        if cell.is_focused {
            let label = ordinal(cell.day);
            let (x, y) = geometry.label((x, y), label.chars().count());
            surface.put(x, y, &label, theme.focus_label_style);
        }
    }
}

fn paint_footer<S: Surface>(
    surface: &mut S,
    geometry: &PanelGeometry,
    view: &CalendarView,
    theme: &Theme,
    glyphs: &Glyphs,
) {
    let filled = ((view.day_progress() * f64::from(PANEL_WIDTH)).floor() as i32).min(PANEL_WIDTH);
    let fill: String = std::iter::repeat(glyphs.glyph(Icon::ProgressFill))
        .take(filled as usize)
        .collect();
    let track: String = std::iter::repeat(glyphs.glyph(Icon::ProgressTrack))
        .take((PANEL_WIDTH - filled) as usize)
        .collect();

    let row = geometry.top + PROGRESS_ROW;
    surface.put(geometry.left, row, &fill, theme.progress_fill_style);
    surface.put(geometry.left + filled, row, &track, theme.progress_track_style);

    let row = geometry.top + LABEL_ROW;
    surface.put(geometry.left, row, "DAWN", theme.footer_label_style);
    surface.put(
        geometry.left + PANEL_WIDTH - 4,
        row,
        "DUSK",
        theme.footer_label_style,
    );
    let momentum = format!("{}% MOMENTUM", view.momentum());
    surface.put(
        centered_x(geometry, &momentum),
        row,
        &momentum,
        theme.momentum_style,
    );

    let clock = view.now().format("%H:%M:%S").to_string();
    surface.put(
        centered_x(geometry, &clock),
        geometry.top + CLOCK_ROW,
        &clock,
        theme.clock_style,
    );
}

pub fn paint<S: Surface>(
    surface: &mut S,
    geometry: &PanelGeometry,
    view: &CalendarView,
    theme: &Theme,
    glyphs: &Glyphs,
) {
    paint_header(surface, geometry, view, theme, glyphs);
    paint_grid(surface, geometry, view, theme, glyphs);
    paint_footer(surface, geometry, view, theme, glyphs);
}

/// A single frame as plain text.
pub fn render_plain(view: &CalendarView, glyphs: &Glyphs) -> String {
    let mut canvas = TextCanvas::new(PANEL_WIDTH as usize, PANEL_HEIGHT as usize);
    paint(
        &mut canvas,
        &PanelGeometry::default(),
        view,
        &Theme::default(),
        glyphs,
    );
    canvas.into_string()
}

pub struct CalendarPanel<'a> {
    context: &'a Context,
    glyphs: &'a Glyphs,
    geometry: &'a Cell<PanelGeometry>,
}

impl<'a> CalendarPanel<'a> {
    /// `geometry` receives the placement used by the last draw, for hit-testing.
    pub fn new(
        context: &'a Context,
        glyphs: &'a Glyphs,
        geometry: &'a Cell<PanelGeometry>,
    ) -> Self {
        CalendarPanel {
            context,
            glyphs,
            geometry,
        }
    }
}

impl Widget for CalendarPanel<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(PANEL_WIDTH as usize),
            height: RowDemand::at_least(PANEL_HEIGHT as usize),
        }
    }

    fn draw(&self, window: Window, _hints: RenderingHints) {
        let geometry = PanelGeometry::centered(
            window.get_width().raw_value(),
            window.get_height().raw_value(),
        );
        self.geometry.set(geometry);

        let mut surface = WindowSurface::new(window);
        paint(
            &mut surface,
            &geometry,
            self.context.view(),
            &self.context.theme,
            self.glyphs,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn view_at(hh: u32, mm: u32, ss: u32) -> CalendarView {
        CalendarView::new(
            NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(hh, mm, ss)
                .unwrap(),
        )
    }

    fn grid_rows(frame: &str) -> Vec<&str> {
        frame
            .lines()
            .skip(GRID_TOP as usize)
            .take(GRID_HEIGHT as usize)
            .collect()
    }

    #[test]
    fn header_shows_month_and_year() {
        let frame = render_plain(&view_at(8, 0, 0), &Glyphs::ASCII);
        let lines: Vec<&str> = frame.lines().collect();

        assert_eq!(lines.len(), PANEL_HEIGHT as usize);
        assert!(lines[MONTH_ROW as usize].starts_with(" <"));
        assert!(lines[MONTH_ROW as usize].ends_with(">"));
        assert!(lines[MONTH_ROW as usize].contains("O C T O B E R"));
        assert_eq!(lines[YEAR_ROW as usize].trim(), "2026");
    }

    #[test]
    fn dots_reflect_day_states() {
        let mut view = view_at(12, 0, 0);
        view.toggle_focus(12);
        let frame = render_plain(&view, &Glyphs::ASCII);

        let count = |glyph: char| {
            grid_rows(&frame)
                .iter()
                .map(|row| row.chars().filter(|c| *c == glyph).count())
                .sum::<usize>()
        };

        assert_eq!(count('*'), 1);
        assert_eq!(count('@'), 1);
        assert_eq!(count('o'), 17);
        assert_eq!(count('.'), 12);
    }

    #[test]
    fn focused_day_shows_its_ordinal_above_the_dot() {
        let mut view = view_at(12, 0, 0);
        view.toggle_focus(22);
        let frame = render_plain(&view, &Glyphs::ASCII);
        let lines: Vec<&str> = frame.lines().collect();

        let geometry = PanelGeometry::default();
        let cell = view.day_cell(21).unwrap();
        let (x, y) = geometry.dot(cell.index(), &cell.offset);

        assert_eq!(lines[y as usize].chars().nth(x as usize), Some('*'));
        assert!(lines[y as usize - 1].contains("22nd"));

        view.toggle_focus(22);
        let frame = render_plain(&view, &Glyphs::ASCII);
        assert!(!frame.contains("22nd"));
    }

    #[test]
    fn footer_shows_progress_and_clock() {
        let frame = render_plain(&view_at(12, 0, 0), &Glyphs::ASCII);
        let lines: Vec<&str> = frame.lines().collect();

        let bar = lines[PROGRESS_ROW as usize];
        assert_eq!(bar.chars().filter(|c| *c == '=').count(), 21);
        assert_eq!(bar.chars().filter(|c| *c == '-').count(), 21);

        let labels = lines[LABEL_ROW as usize];
        assert!(labels.starts_with("DAWN"));
        assert!(labels.ends_with("DUSK"));
        assert!(labels.contains("50% MOMENTUM"));

        assert_eq!(lines[CLOCK_ROW as usize].trim(), "12:00:00");
    }

    #[test]
    fn unicode_glyphs_are_used_when_materialized() {
        let frame = render_plain(&view_at(0, 0, 0), &Glyphs::UNICODE);
        assert!(frame.contains('‹') && frame.contains('›'));
        assert!(frame.contains('●'));
        assert!(frame.contains("0% MOMENTUM"));
    }
}
