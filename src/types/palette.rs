//! Ordered bead palettes and nearest-colour lookup.

use crate::error::{BeadError, Result};

use super::builtin::BuiltinPalettes;
use super::Colour;

/// A named, ordered, closed set of bead colours.
///
/// Entry order is significant: nearest-colour search returns the first entry
/// at the minimum distance. Duplicates are kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Palette name
    pub name: String,

    colours: Vec<Colour>,
}

impl Palette {
    /// Create a palette from opaque colours.
    pub fn new(name: impl Into<String>, colours: impl IntoIterator<Item = Colour>) -> Self {
        Self {
            name: name.into(),
            colours: colours.into_iter().map(Colour::opaque).collect(),
        }
    }

    /// Build a palette from hex strings such as `#FF0000`.
    pub fn from_hex_list<S: AsRef<str>>(name: impl Into<String>, hex: &[S]) -> Result<Self> {
        let colours = hex
            .iter()
            .map(|h| Colour::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, colours))
    }

    /// The colours in definition order.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Get the number of colours.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Whether `colour` (compared on RGB) is one of the palette entries.
    pub fn contains(&self, colour: Colour) -> bool {
        let colour = colour.opaque();
        self.colours.contains(&colour)
    }

    /// Index of the nearest entry to an 8-bit colour.
    ///
    /// Returns `None` only for an empty palette.
    pub fn nearest_index(&self, colour: Colour) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (i, &entry) in self.colours.iter().enumerate() {
            let dist = colour.distance_sq(entry);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Nearest palette colour to an 8-bit colour.
    pub fn nearest(&self, colour: Colour) -> Option<Colour> {
        self.nearest_index(colour).map(|i| self.colours[i])
    }

    /// Nearest palette colour to a floating-point RGB sample.
    ///
    /// Used by error diffusion, where the working buffer holds fractional
    /// channel values. Same first-minimum tie-break as [`Palette::nearest`].
    pub fn nearest_f32(&self, rgb: [f32; 3]) -> Option<Colour> {
        let mut best: Option<(Colour, f32)> = None;
        for &entry in &self.colours {
            let [er, eg, eb] = entry.to_f32();
            let dr = rgb[0] - er;
            let dg = rgb[1] - eg;
            let db = rgb[2] - eb;
            let dist = dr * dr + dg * dg + db * db;
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((entry, dist));
            }
        }
        best.map(|(c, _)| c)
    }
}

/// The set of palettes available to the pipeline, looked up by name.
#[derive(Debug, Clone)]
pub struct PaletteStore {
    palettes: Vec<Palette>,
}

impl PaletteStore {
    /// A store holding only the builtin palettes.
    pub fn builtin() -> Self {
        Self {
            palettes: BuiltinPalettes::all(),
        }
    }

    /// Add a user palette. Names must be unique across the store.
    pub fn add(&mut self, palette: Palette) -> Result<()> {
        if self.get(&palette.name).is_some() {
            return Err(BeadError::Config {
                message: format!("Palette '{}' is already defined", palette.name),
                help: Some("Builtin palettes cannot be redefined; pick another name".to_string()),
            });
        }
        self.palettes.push(palette);
        Ok(())
    }

    /// Builder-style variant of [`PaletteStore::add`].
    pub fn with_palette(mut self, palette: Palette) -> Result<Self> {
        self.add(palette)?;
        Ok(self)
    }

    /// Look up a palette by name.
    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.name == name)
    }

    /// Look up a palette, treating an unknown name as a usage error.
    pub fn palette(&self, name: &str) -> Result<&Palette> {
        self.get(name).ok_or_else(|| BeadError::Usage {
            message: format!("Unknown palette: {}", name),
            help: Some(format!("Available palettes: {}", self.names().collect::<Vec<_>>().join(", "))),
        })
    }

    /// The ordered colours of a named palette.
    pub fn colors(&self, name: &str) -> Result<&[Colour]> {
        Ok(self.palette(name)?.colours())
    }

    /// Nearest colour in a named palette.
    pub fn nearest(&self, colour: Colour, name: &str) -> Result<Colour> {
        let palette = self.palette(name)?;
        palette
            .nearest(colour)
            .ok_or_else(|| BeadError::input(format!("Palette '{}' is empty", name)))
    }

    /// Palette names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.iter().map(|p| p.name.as_str())
    }

    /// All palettes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }
}

impl Default for PaletteStore {
    fn default() -> Self {
        Self::builtin()
    }
}
