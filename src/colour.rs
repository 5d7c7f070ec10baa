/// A fill colour, expressed in the RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

/// The colours the CP72 template draws with
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// Background of the goods table header row
    pub const LIGHT_GREY: Colour = Colour::Grey { g: 0.827 };
    /// Dark teal behind section header labels
    pub const BANNER: Colour = Colour::RGB {
        r: 0.10,
        g: 0.31,
        b: 0.36,
    };
}
