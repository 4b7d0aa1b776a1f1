//! Fixed-column grid arrangement for result cards

/// Places results into `columns` columns, cycling by result index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    columns: usize,
}

impl GridLayout {
    /// Create a layout; zero columns is treated as one
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Column that the result at `index` lands in
    pub fn column_of(&self, index: usize) -> usize {
        index % self.columns
    }

    /// Split `items` into one vector per column, preserving order within each
    pub fn arrange<T: Clone>(&self, items: &[T]) -> Vec<Vec<T>> {
        let mut grid: Vec<Vec<T>> = vec![Vec::new(); self.columns];
        for (index, item) in items.iter().enumerate() {
            grid[self.column_of(index)].push(item.clone());
        }
        grid
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(3)
    }
}
