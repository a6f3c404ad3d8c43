//! Plain geometry values shipped with a codec in [`CodecRegistry::new`].
//!
//! Their [`Value::to_text`] is the display form used by the host (`(1.0, 2.0)`)
//! and cannot be parsed back, so reading them depends on the built-in codecs
//! writing the compact `x,y` form.
//!
//! [`CodecRegistry::new`]: crate::CodecRegistry::new

use alloc::format;
use alloc::string::String;

use crate::Value;

/// A 2D vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Value for Vec2 {
    fn to_text(&self) -> String {
        format!("({:.1}, {:.1})", self.x, self.y)
    }
}

/// An axis-aligned rectangle given by its corner and size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Value for Rect {
    fn to_text(&self) -> String {
        format!(
            "(x:{:.2}, y:{:.2}, width:{:.2}, height:{:.2})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, Vec2};
    use crate::{ConvertError, Value};

    #[test]
    fn display_forms() {
        assert_eq!(Vec2::new(1.0, 2.5).to_text(), "(1.0, 2.5)");
        assert_eq!(
            Rect::new(10.0, 20.0, 300.0, 150.5).to_text(),
            "(x:10.00, y:20.00, width:300.00, height:150.50)"
        );
    }

    #[test]
    fn no_parse_contract() {
        assert!(matches!(
            Vec2::from_text("(1.0, 2.5)"),
            Err(ConvertError::NoParseContract { .. })
        ));
        assert_eq!(Rect::new(1.0, 2.0, 3.0, 4.0).size(), Vec2::new(3.0, 4.0));
    }
}
