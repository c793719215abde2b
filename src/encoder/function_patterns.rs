use crate::models::{BitMatrix, Version};

/// Module matrix under construction together with its function mask.
/// true = function module (not data), false = data module.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub modules: BitMatrix,
    pub function: BitMatrix,
}

impl Canvas {
    /// Blank canvas with every function pattern drawn and the format
    /// information cells reserved (left light until the mask is known).
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut canvas = Self {
            modules: BitMatrix::square(size),
            function: BitMatrix::square(size),
        };

        // Finder patterns + separators (9x9 areas, clipped to bounds)
        canvas.draw_finder(3, 3);
        canvas.draw_finder(size - 4, 3);
        canvas.draw_finder(3, size - 4);

        // Timing patterns between the finders (row 6 and column 6)
        for i in 8..size - 8 {
            canvas.set_function(6, i, i % 2 == 0);
            canvas.set_function(i, 6, i % 2 == 0);
        }

        // Format info areas
        for i in 0..9 {
            if i != 6 {
                canvas.set_function(8, i, false);
                canvas.set_function(i, 8, false);
            }
        }
        for i in 0..8 {
            canvas.set_function(size - 1 - i, 8, false);
            canvas.set_function(8, size - 1 - i, false);
        }

        // Dark module
        canvas.set_function(8, size - 8, true);

        canvas
    }

    pub fn size(&self) -> usize {
        self.modules.width()
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.function.get(x, y)
    }

    /// Write a module and mark it as a function module
    pub fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
        self.function.set(x, y, true);
    }

    /// 7x7 finder centred at (cx, cy) plus its light separator ring.
    /// Rings at Chebyshev distance 2 and 4 are light.
    fn draw_finder(&mut self, cx: usize, cy: usize) {
        let size = self.size() as isize;
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let x = cx as isize + dx;
                let y = cy as isize + dy;
                if x < 0 || y < 0 || x >= size || y >= size {
                    continue;
                }
                let dist = dx.abs().max(dy.abs());
                self.set_function(x as usize, y as usize, dist != 2 && dist != 4);
            }
        }
    }
}

/// Function module mask for a QR version
pub struct FunctionMask {
    mask: BitMatrix,
}

impl FunctionMask {
    pub fn new(version: Version) -> Self {
        Self {
            mask: Canvas::new(version).function,
        }
    }

    pub fn size(&self) -> usize {
        self.mask.width()
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    pub fn as_matrix(&self) -> &BitMatrix {
        &self.mask
    }

    pub fn data_modules_count(&self) -> usize {
        self.size() * self.size() - self.mask.count_ones()
    }
}
