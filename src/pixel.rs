use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Complex {
    pub real: f32,
    pub imaginary: f32,
}

impl Complex {
    pub const ZERO: Self = Complex {
        real: 0.0,
        imaginary: 0.0,
    };

    pub fn magnitude_squared(self) -> f32 {
        self.real * self.real + self.imaginary * self.imaginary
    }

    /// One Mandelbrot iteration: `z^2 + c`.
    pub fn step(self, c: Complex) -> Self {
        Complex {
            real: self.real * self.real - self.imaginary * self.imaginary + c.real,
            imaginary: 2.0 * self.real * self.imaginary + c.imaginary,
        }
    }
}
