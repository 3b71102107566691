use crate::palette::Swatch;

/// Смещения соседей (строка, столбец) для чётных столбцов
const EVEN_COL_NEIGHBORS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, -1)];
/// Смещения соседей (строка, столбец) для нечётных столбцов
const ODD_COL_NEIGHBORS: [(i32, i32); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Сетка цветов гексов: `rows × cols`, построчно, индексация с нуля.
///
/// `None` означает «ещё не посещён» и отличается от любого реального цвета.
/// Записи видны последующим чтениям в рамках того же обхода.
#[derive(Debug, Clone)]
pub struct ColorGrid {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Option<Swatch>>,
}

impl ColorGrid {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![None; rows * cols],
        }
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) is outside a {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Swatch> {
        self.data[self.idx(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, swatch: Swatch) {
        let idx = self.idx(row, col);
        self.data[idx] = Some(swatch);
    }

    /// Координаты шести соседей гекса в пределах сетки (со смещением по чётности столбца)
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let offsets = if col % 2 == 0 {
            &EVEN_COL_NEIGHBORS
        } else {
            &ODD_COL_NEIGHBORS
        };
        let (rows, cols) = (self.rows as i32, self.cols as i32);

        offsets.iter().filter_map(move |&(dr, dc)| {
            let nr = row as i32 + dr;
            let nc = col as i32 + dc;
            (nr >= 0 && nr < rows && nc >= 0 && nc < cols).then_some((nr as usize, nc as usize))
        })
    }

    /// Цвета уже окрашенных соседей
    #[must_use]
    pub fn neighbor_colors(&self, row: usize, col: usize) -> Vec<Swatch> {
        self.neighbors(row, col)
            .filter_map(|(r, c)| self.get(r, c))
            .collect()
    }

    /// Все ли клетки получили цвет
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.data.iter().all(Option::is_some)
    }

    /// Итератор по окрашенным клеткам: `(row, col, цвет)` в порядке обхода
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Swatch)> + '_ {
        self.data.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|swatch| (i / self.cols, i % self.cols, swatch))
        })
    }
}
