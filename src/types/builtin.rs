//! Builtin bead palettes.

use super::{Colour, Palette};

const fn c(v: u32) -> Colour {
    Colour::from_u32(v)
}

/// Full 48-colour set. Gold appears twice (positions 9 and 47); both are kept.
const STANDARD: [Colour; 48] = [
    c(0xFFFFFF), // white
    c(0x000000), // black
    c(0xF0E6C8), // cream
    c(0xF7D53C), // yellow
    c(0xF28C28), // orange
    c(0xE03A3E), // red
    c(0xB41E3C), // cherry
    c(0xF4A6C0), // pink
    c(0xD9448C), // magenta
    c(0xD4A017), // gold
    c(0x8E44AD), // purple
    c(0xC8A2D8), // lavender
    c(0x2E4FA3), // dark blue
    c(0x3B7DD8), // blue
    c(0x8EC9F0), // light blue
    c(0x2AB5B0), // turquoise
    c(0x1E8C4E), // dark green
    c(0x4CB848), // green
    c(0xA8D86E), // light green
    c(0x6B4226), // brown
    c(0xA0682E), // light brown
    c(0xD9B38C), // tan
    c(0xF2C9A0), // peach
    c(0xE8A07A), // salmon
    c(0x7F7F7F), // grey
    c(0xBEBEBE), // light grey
    c(0x3F3F3F), // dark grey
    c(0x5E2D1C), // dark brown
    c(0x9B1B30), // plum red
    c(0xFFE8A3), // pastel yellow
    c(0xFFB7A1), // pastel orange
    c(0xB7E3C7), // pastel green
    c(0xB3C7F2), // pastel blue
    c(0xE2B6E8), // pastel lilac
    c(0x0F6E78), // teal
    c(0x1C2E5C), // navy
    c(0x556B2F), // olive
    c(0xC0C43A), // lime
    c(0xFF6F61), // coral
    c(0xFFD1DC), // blush
    c(0x7A3E8C), // violet
    c(0x9C7A54), // khaki
    c(0xC46A2B), // rust
    c(0xE7D7B1), // sand
    c(0x4A6FA5), // denim
    c(0x87A96B), // sage
    c(0x9E9E7A), // stone
    c(0xD4A017), // gold
];

const BASIC: [Colour; 24] = [
    c(0xFFFFFF), // white
    c(0x000000), // black
    c(0xF0E6C8), // cream
    c(0xF7D53C), // yellow
    c(0xF28C28), // orange
    c(0xE03A3E), // red
    c(0xF4A6C0), // pink
    c(0xD9448C), // magenta
    c(0x8E44AD), // purple
    c(0x2E4FA3), // dark blue
    c(0x3B7DD8), // blue
    c(0x8EC9F0), // light blue
    c(0x2AB5B0), // turquoise
    c(0x1E8C4E), // dark green
    c(0x4CB848), // green
    c(0xA8D86E), // light green
    c(0x6B4226), // brown
    c(0xA0682E), // light brown
    c(0xD9B38C), // tan
    c(0xF2C9A0), // peach
    c(0x7F7F7F), // grey
    c(0xBEBEBE), // light grey
    c(0x3F3F3F), // dark grey
    c(0xD4A017), // gold
];

const MINI: [Colour; 12] = [
    c(0xFFFFFF), // white
    c(0x000000), // black
    c(0xF7D53C), // yellow
    c(0xF28C28), // orange
    c(0xE03A3E), // red
    c(0xF4A6C0), // pink
    c(0x8E44AD), // purple
    c(0x3B7DD8), // blue
    c(0x8EC9F0), // light blue
    c(0x4CB848), // green
    c(0x6B4226), // brown
    c(0x7F7F7F), // grey
];

/// Access to the palettes shipped with beadwork.
pub struct BuiltinPalettes;

impl BuiltinPalettes {
    /// The 48-colour `standard` palette.
    pub fn standard() -> Palette {
        Palette::new("standard", STANDARD)
    }

    /// The 24-colour `basic` palette.
    pub fn basic() -> Palette {
        Palette::new("basic", BASIC)
    }

    /// The 12-colour `mini` palette.
    pub fn mini() -> Palette {
        Palette::new("mini", MINI)
    }

    /// All builtin palettes, largest first.
    pub fn all() -> Vec<Palette> {
        vec![Self::standard(), Self::basic(), Self::mini()]
    }
}
