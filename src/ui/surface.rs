use unsegen::base::{ColIndex, Cursor, RowIndex, StyleModifier, Window};

/// Something the calendar panel can be painted on.
pub trait Surface {
    fn put(&mut self, x: i32, y: i32, text: &str, style: StyleModifier);
}

pub struct WindowSurface<'w> {
    window: Window<'w>,
}

impl<'w> WindowSurface<'w> {
    pub fn new(window: Window<'w>) -> Self {
        WindowSurface { window }
    }
}

impl Surface for WindowSurface<'_> {
    fn put(&mut self, x: i32, y: i32, text: &str, style: StyleModifier) {
        let mut cursor = Cursor::new(&mut self.window);
        cursor.move_to(ColIndex::new(x), RowIndex::new(y));
        cursor.set_style_modifier(style);
        cursor.write(text);
    }
}

/// Plain character grid, used for `--show` and in tests. Styles are dropped.
pub struct TextCanvas {
    width: usize,
    rows: Vec<Vec<char>>,
}

impl TextCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        TextCanvas {
            width,
            rows: vec![vec![' '; width]; height],
        }
    }

    pub fn row(&self, y: usize) -> String {
        self.rows[y].iter().collect::<String>()
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_owned())
            .collect()
    }

    pub fn into_string(self) -> String {
        let mut out = self.lines().join("\n");
        out.push('\n');
        out
    }
}

impl Surface for TextCanvas {
    fn put(&mut self, x: i32, y: i32, text: &str, _style: StyleModifier) {
        if y < 0 || y as usize >= self.rows.len() {
            return;
        }
        let width = self.width;
        let row = &mut self.rows[y as usize];

        for (i, c) in text.chars().enumerate() {
            let col = x + i as i32;
            if col >= 0 && (col as usize) < width {
                row[col as usize] = c;
            }
        }
    }
}
