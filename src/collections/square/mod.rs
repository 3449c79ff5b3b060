mod coord;

pub use self::coord::Coord;

use std::fmt;
use std::fmt::Display;
use std::ops::{Deref, DerefMut, Index, IndexMut};

pub trait IsSquare {
    fn len(&self) -> usize {
        self.width().pow(2)
    }

    fn col_at(&self, index: usize) -> usize {
        assert!(index < self.len());
        index % self.width()
    }

    fn row_at(&self, index: usize) -> usize {
        assert!(index < self.len());
        index / self.width()
    }

    fn coord_at(&self, index: usize) -> Coord {
        Coord::new(self.col_at(index), self.row_at(index))
    }

    fn width(&self) -> usize;
}

/// A container of elements represented in a square grid
#[derive(Clone, Debug, PartialEq)]
pub struct Square<T> {
    width: usize,
    elements: Vec<T>,
}

impl<T> Square<T> {
    /// Creates a new square with a specified width and fill with the default value
    pub fn with_width(width: usize) -> Square<T>
    where
        T: Clone + Default,
    {
        Self {
            width,
            elements: vec![Default::default(); width.pow(2)],
        }
    }

    /// Create a new `Square` of a specified width and fill with a specified value
    pub fn with_width_and_value(width: usize, val: T) -> Square<T>
    where
        T: Clone,
    {
        Square {
            width,
            elements: vec![val; width.pow(2)],
        }
    }

    /// Returns the width (and height) of the grid
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns an iterator over the rows of the square
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.elements.chunks(self.width)
    }
}

impl<T> Deref for Square<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<T> DerefMut for Square<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.elements
    }
}

impl<T> IsSquare for Square<T> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn width(&self) -> usize {
        self.width()
    }
}

impl<T> Index<usize> for Square<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<T> IndexMut<usize> for Square<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.elements[index]
    }
}

impl<T> Index<Coord> for Square<T> {
    type Output = T;

    fn index(&self, coord: Coord) -> &Self::Output {
        &self.elements[coord.as_index(self.width)]
    }
}

impl<T> IndexMut<Coord> for Square<T> {
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        let index = coord.as_index(self.width);
        &mut self.elements[index]
    }
}

impl<T> fmt::Display for Square<T>
where
    T: Display + Ord,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.elements.iter().max().unwrap().to_string().len();
        for row in self.rows() {
            for element in row {
                write!(f, "{:>1$} ", element, len)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A square with a width but no elements, for coordinate math
pub struct UnitSquare {
    width: usize,
}

impl UnitSquare {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl IsSquare for UnitSquare {
    fn width(&self) -> usize {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::{Coord, IsSquare, Square, UnitSquare};

    #[test]
    fn coord_round_trip() {
        let square = UnitSquare::new(3);
        assert_eq!(Coord::new(1, 2), square.coord_at(7));
        assert_eq!(7, square.coord_at(7).as_index(3));
    }

    #[test]
    fn index_by_coord() {
        let mut square = Square::with_width_and_value(3, 0);
        square[Coord::new(2, 1)] = 5;
        assert_eq!(5, square[5]);
    }
}
