//! User Colors
//!
//! Every logged-in user gets an RGB color that the editing clients use to
//! tint that user's cursor and chat lines. Colors come from a fixed
//! six-entry palette; the wire form is `R,G,B`.

use std::fmt;

/// An RGB triple, serialized on the wire as `R,G,B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0, self.1, self.2)
    }
}

/// The default palette: red, blue, green, orange, magenta, light gray.
///
/// Assignment indexes the palette with the online-user count after a
/// login is recorded, wrapping around, so the first user of a fresh
/// server is blue. A different palette can be supplied through the
/// server configuration.
pub const PALETTE: [Rgb; 6] = [
    Rgb(255, 0, 0),
    Rgb(0, 0, 255),
    Rgb(0, 255, 0),
    Rgb(255, 200, 0),
    Rgb(255, 0, 255),
    Rgb(192, 192, 192),
];
