use crate::view::OrganicOffset;

pub const COLUMNS: i32 = 7;
pub const CELL_WIDTH: i32 = 6;
pub const CELL_HEIGHT: i32 = 4;
/// 31 days never need more than five rows.
pub const GRID_ROWS: i32 = 5;

pub const PANEL_WIDTH: i32 = COLUMNS * CELL_WIDTH;

pub const MONTH_ROW: i32 = 0;
pub const YEAR_ROW: i32 = 1;
pub const GRID_TOP: i32 = 3;
pub const GRID_HEIGHT: i32 = GRID_ROWS * CELL_HEIGHT;
pub const FOOTER_TOP: i32 = GRID_TOP + GRID_HEIGHT + 1;
pub const PROGRESS_ROW: i32 = FOOTER_TOP;
pub const LABEL_ROW: i32 = FOOTER_TOP + 1;
pub const CLOCK_ROW: i32 = FOOTER_TOP + 3;
pub const PANEL_HEIGHT: i32 = CLOCK_ROW + 1;

/// Width of the clickable area around each chevron.
const CHEVRON_HIT_WIDTH: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    PrevMonth,
    NextMonth,
    Day(u32),
    Footer,
}

/// Placement of the calendar panel inside the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelGeometry {
    pub left: i32,
    pub top: i32,
}

impl PanelGeometry {
    pub fn centered(width: i32, height: i32) -> Self {
        PanelGeometry {
            left: ((width - PANEL_WIDTH) / 2).max(0),
            top: ((height - PANEL_HEIGHT) / 2).max(0),
        }
    }

    pub fn prev_chevron(&self) -> (i32, i32) {
        (self.left + 1, self.top + MONTH_ROW)
    }

    pub fn next_chevron(&self) -> (i32, i32) {
        (self.left + PANEL_WIDTH - 2, self.top + MONTH_ROW)
    }

    fn cell_origin(&self, index: usize) -> (i32, i32) {
        let index = index as i32;
        (
            self.left + (index % COLUMNS) * CELL_WIDTH,
            self.top + GRID_TOP + (index / COLUMNS) * CELL_HEIGHT,
        )
    }

    /// Position of a day's dot, jittered inside its cell.
    pub fn dot(&self, index: usize, offset: &OrganicOffset) -> (i32, i32) {
        let (x, y) = self.cell_origin(index);
        let (dx, dy) = offset.cells();
        (x + CELL_WIDTH / 2 + dx, y + CELL_HEIGHT / 2 + dy)
    }

    /// Start of an ordinal label centred one row above the dot.
    pub fn label(&self, dot: (i32, i32), label_width: usize) -> (i32, i32) {
        (dot.0 - label_width as i32 / 2, dot.1 - 1)
    }

    /// Maps an absolute terminal cell to a panel element. Grid cells after
    /// `days_in_month` hit nothing.
    pub fn hit(&self, col: i32, row: i32, days_in_month: u32) -> Option<Hit> {
        let x = col - self.left;
        let y = row - self.top;

        if x < 0 || x >= PANEL_WIDTH || y < 0 {
            return None;
        }

        if y <= YEAR_ROW {
            if x < CHEVRON_HIT_WIDTH {
                return Some(Hit::PrevMonth);
            } else if x >= PANEL_WIDTH - CHEVRON_HIT_WIDTH {
                return Some(Hit::NextMonth);
            }
            return None;
        }

        if y >= GRID_TOP && y < GRID_TOP + GRID_HEIGHT {
            let index = ((y - GRID_TOP) / CELL_HEIGHT) * COLUMNS + x / CELL_WIDTH;
            let day = index as u32 + 1;
            return if day <= days_in_month {
                Some(Hit::Day(day))
            } else {
                None
            };
        }

        if y >= FOOTER_TOP - 1 && y < PANEL_HEIGHT {
            return Some(Hit::Footer);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_in_large_terminals_and_pins_in_small_ones() {
        assert_eq!(
            PanelGeometry::centered(PANEL_WIDTH + 20, PANEL_HEIGHT + 10),
            PanelGeometry { left: 10, top: 5 }
        );
        assert_eq!(PanelGeometry::centered(10, 10), PanelGeometry::default());
    }

    #[test]
    fn every_dot_hits_its_own_day() {
        let geometry = PanelGeometry { left: 7, top: 3 };

        for index in 0..31 {
            let offset = OrganicOffset::of_index(index);
            let (col, row) = geometry.dot(index, &offset);
            assert_eq!(
                geometry.hit(col, row, 31),
                Some(Hit::Day(index as u32 + 1)),
                "index {}",
                index
            );
        }
    }

    #[test]
    fn labels_stay_in_the_grid() {
        let geometry = PanelGeometry::default();

        for index in 0..31 {
            let dot = geometry.dot(index, &OrganicOffset::of_index(index));
            let (x, y) = geometry.label(dot, "31st".len());
            assert!(y >= GRID_TOP);
            assert!(x >= 0 && x + 4 <= PANEL_WIDTH);
        }
    }

    #[test]
    fn chevrons_and_footer() {
        let geometry = PanelGeometry { left: 2, top: 1 };

        let (x, y) = geometry.prev_chevron();
        assert_eq!(geometry.hit(x, y, 30), Some(Hit::PrevMonth));
        let (x, y) = geometry.next_chevron();
        assert_eq!(geometry.hit(x, y, 30), Some(Hit::NextMonth));

        assert_eq!(geometry.hit(2 + 20, 1 + MONTH_ROW, 30), None);
        assert_eq!(geometry.hit(2 + 20, 1 + CLOCK_ROW, 30), Some(Hit::Footer));
        assert_eq!(geometry.hit(2 + 20, 1 + PROGRESS_ROW, 30), Some(Hit::Footer));
        assert_eq!(geometry.hit(2 + 20, 1 + PANEL_HEIGHT, 30), None);
        assert_eq!(geometry.hit(1, 1 + CLOCK_ROW, 30), None);
    }

    #[test]
    fn trailing_cells_are_empty() {
        let geometry = PanelGeometry::default();
        // Index 29 is the 30th cell: second column of the fifth row.
        let (col, row) = (CELL_WIDTH + 1, GRID_TOP + 4 * CELL_HEIGHT + 1);
        assert_eq!(geometry.hit(col, row, 30), Some(Hit::Day(30)));
        assert_eq!(geometry.hit(col, row, 28), None);
    }
}
