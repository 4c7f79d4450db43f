use cgmath::BaseFloat;

/// A RGBA `Color`. Each color component is a floating point value
/// with a range from 0 to 1.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color<S> {
    pub r: S,
    pub g: S,
    pub b: S,
    pub a: S,
}

impl<S: BaseFloat> From<[u8; 4]> for Color<S> {
    fn from(v: [u8; 4]) -> Self {
        let max = S::from(255.0).unwrap();
        Color::new(
            S::from(v[0]).unwrap() / max,
            S::from(v[1]).unwrap() / max,
            S::from(v[2]).unwrap() / max,
            S::from(v[3]).unwrap() / max,
        )
    }
}

impl<S: BaseFloat> Color<S> {
    pub fn new(r: S, g: S, b: S, a: S) -> Self {
        Color { r, g, b, a }
    }

    /// Clip to [0.0, 1.0] range.
    pub fn clip(&self) -> Self {
        let mut color = *self;
        color.r = self.r.max(S::zero()).min(S::one());
        color.g = self.g.max(S::zero()).min(S::one());
        color.b = self.b.max(S::zero()).min(S::one());
        color.a = self.a.max(S::zero()).min(S::one());
        color
    }

    /// Truncate alpha channel.
    pub fn rgb(&self) -> [S; 3] {
        [self.r, self.g, self.b]
    }

    pub fn rgba(&self) -> [S; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl<S: BaseFloat> Color<S> {
    pub fn white() -> Self {
        Color::new(S::one(), S::one(), S::one(), S::one())
    }

    pub fn gray() -> Self {
        let half = S::from(0.5).unwrap();
        Color::new(half, half, half, S::one())
    }

    pub fn black() -> Self {
        Color::new(S::zero(), S::zero(), S::zero(), S::one())
    }

    pub fn yellow() -> Self {
        Color::new(S::one(), S::one(), S::zero(), S::one())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_bytes() {
        let c: Color<f32> = [255, 0, 51, 255].into();
        assert_eq!(c.rgba(), [1.0, 0.0, 0.2, 1.0]);
        assert_eq!(Color::new(1.5, -0.5, 0.5, 1.0).clip().rgb(), [1.0, 0.0, 0.5]);
    }
}
