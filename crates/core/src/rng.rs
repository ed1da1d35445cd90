//! RNG module - shape selection for newly spawned pieces
//!
//! [`ShapeSource`] is the seam the session draws from. [`SimpleRng`] picks each
//! shape uniformly at random from a deterministic LCG, and [`ShapeCycle`]
//! replays a fixed sequence for tests and scripted games.

use crate::types::Shape;

/// Supplies the shape of each newly spawned piece.
pub trait ShapeSource {
    fn next_shape(&mut self) -> Shape;
}

impl<S: ShapeSource + ?Sized> ShapeSource for &mut S {
    fn next_shape(&mut self) -> Shape {
        (**self).next_shape()
    }
}

impl<S: ShapeSource + ?Sized> ShapeSource for Box<S> {
    fn next_shape(&mut self) -> Shape {
        (**self).next_shape()
    }
}

/// Seeded 32-bit linear congruential generator.
///
/// Same seed, same shape sequence, on every platform.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    const MUL: u32 = 1_664_525;
    const INC: u32 = 1_013_904_223;

    /// Seed `0` is treated as `1`.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    /// Advance and return the raw state.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(Self::MUL).wrapping_add(Self::INC);
        self.state
    }

    /// Value in `0..max`, taken from the high half of the state; the low bits
    /// of a power-of-two LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeSource for SimpleRng {
    fn next_shape(&mut self) -> Shape {
        Shape::ALL[self.next_range(Shape::ALL.len() as u32) as usize]
    }
}

/// Repeats a fixed shape sequence forever.
#[derive(Debug, Clone)]
pub struct ShapeCycle {
    shapes: Vec<Shape>,
    next: usize,
}

impl ShapeCycle {
    /// # Panics
    ///
    /// Panics if `shapes` is empty.
    pub fn new(shapes: &[Shape]) -> Self {
        assert!(!shapes.is_empty(), "shape cycle needs at least one shape");
        Self {
            shapes: shapes.to_vec(),
            next: 0,
        }
    }

    /// A cycle that only ever yields `shape`.
    pub fn repeat(shape: Shape) -> Self {
        Self::new(&[shape])
    }
}

impl ShapeSource for ShapeCycle {
    fn next_shape(&mut self) -> Shape {
        let shape = self.shapes[self.next];
        self.next = (self.next + 1) % self.shapes.len();
        shape
    }
}
