// src/layout.rs
//! Геометрия гексовой сетки: перевод (строка, столбец) в пиксели холста.
//!
//! Гексы с плоской вершиной, нечётные столбцы сдвинуты вниз на половину высоты гекса.
//! Сетка центрируется на холсте с полем `1.5 × size` под подписи.

/// Точка на холсте в пикселях
pub type Point = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    pub rows: usize,
    pub cols: usize,
    /// Радиус гекса (центр → вершина)
    pub size: f64,
}

impl HexLayout {
    #[must_use]
    pub fn new(rows: usize, cols: usize, size: u32) -> Self {
        Self {
            rows,
            cols,
            size: f64::from(size),
        }
    }

    #[must_use]
    pub fn hex_width(&self) -> f64 {
        self.size * 2.0
    }

    #[must_use]
    pub fn hex_height(&self) -> f64 {
        3f64.sqrt() * self.size
    }

    /// Размер сетки без полей
    #[must_use]
    pub fn grid_size(&self) -> (f64, f64) {
        (
            self.cols as f64 * self.hex_width() * 0.75 + self.size,
            self.rows as f64 * self.hex_height() + self.hex_height() * 0.5,
        )
    }

    /// Размер холста: сетка плюс поля под подписи
    #[must_use]
    pub fn canvas_size(&self) -> (f64, f64) {
        let (w, h) = self.grid_size();
        (w + self.size * 1.5, h + self.size * 1.5)
    }

    /// Сдвиг, центрирующий сетку на холсте
    #[must_use]
    pub fn offset(&self) -> Point {
        let (cw, ch) = self.canvas_size();
        let (gw, gh) = self.grid_size();
        ((cw - gw) / 2.0, (ch - gh) / 2.0)
    }

    fn column_x(&self, col: usize) -> f64 {
        col as f64 * self.hex_width() * 0.75 + self.size + self.offset().0
    }

    fn row_y(&self, row: usize, col: usize) -> f64 {
        row as f64 * self.hex_height() + (col % 2) as f64 * (self.hex_height() / 2.0)
            + self.offset().1
    }

    /// Центр гекса
    #[must_use]
    pub fn hex_center(&self, row: usize, col: usize) -> Point {
        (self.column_x(col), self.row_y(row, col) + self.size)
    }

    /// Точка привязки иконки: по горизонтали центр гекса, по вертикали на полразмера выше.
    /// Иконка крепится к ней верхним краем, а не центром.
    #[must_use]
    pub fn icon_anchor(&self, row: usize, col: usize) -> Point {
        (self.column_x(col), self.row_y(row, col) + self.size / 2.0)
    }

    /// Шесть вершин гекса (углы 0°, 60°, …, 300°)
    #[must_use]
    pub fn hex_corners(&self, center: Point) -> [Point; 6] {
        std::array::from_fn(|i| {
            let angle = (60.0 * i as f64).to_radians();
            (
                center.0 + self.size * angle.cos(),
                center.1 + self.size * angle.sin(),
            )
        })
    }

    /// Позиция подписи строки (слева от сетки)
    #[must_use]
    pub fn row_label_position(&self, row: usize) -> Point {
        let (x_off, y_off) = self.offset();
        (
            x_off,
            row as f64 * self.hex_height() + self.size + self.hex_height() / 2.0 + y_off,
        )
    }

    /// Позиция подписи столбца (над сеткой)
    #[must_use]
    pub fn col_label_position(&self, col: usize) -> Point {
        (self.column_x(col), self.offset().1)
    }
}

/// Буквенная подпись строки: A…Z, затем AA, AB, …
#[must_use]
pub fn row_label(row: usize) -> String {
    let mut n = row + 1;
    let mut label = Vec::new();
    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Числовая подпись столбца, с единицы
#[must_use]
pub fn col_label(col: usize) -> String {
    (col + 1).to_string()
}
