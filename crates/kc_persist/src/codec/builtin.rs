use alloc::format;
use alloc::string::String;

use super::Codec;
use crate::ConvertError;
use crate::math::{Rect, Vec2};

// Reads exactly `N` comma separated floats.
fn components<T, const N: usize>(text: &str) -> Result<[f32; N], ConvertError> {
    let mut out = [0.0; N];
    let mut parts = text.split(',');
    for slot in out.iter_mut() {
        let Some(part) = parts.next() else {
            return Err(ConvertError::invalid::<T>(text, format!("expected {N} components")));
        };
        *slot = part
            .trim()
            .parse::<f32>()
            .map_err(|err| ConvertError::invalid::<T>(text, err))?;
    }
    if parts.next().is_some() {
        return Err(ConvertError::invalid::<T>(text, format!("expected {N} components")));
    }
    Ok(out)
}

/// Stores a [`Vec2`] as `x,y`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vec2Codec;

impl Codec<Vec2> for Vec2Codec {
    fn serialize(&self, value: &Vec2) -> String {
        format!("{},{}", value.x, value.y)
    }

    fn deserialize(&self, _existing: Vec2, text: &str) -> Result<Vec2, ConvertError> {
        let [x, y] = components::<Vec2, 2>(text)?;
        Ok(Vec2::new(x, y))
    }
}

/// Stores a [`Rect`] as `x,y,width,height`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectCodec;

impl Codec<Rect> for RectCodec {
    fn serialize(&self, value: &Rect) -> String {
        format!("{},{},{},{}", value.x, value.y, value.width, value.height)
    }

    fn deserialize(&self, _existing: Rect, text: &str) -> Result<Rect, ConvertError> {
        let [x, y, width, height] = components::<Rect, 4>(text)?;
        Ok(Rect::new(x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::{RectCodec, Vec2Codec};
    use crate::Codec;
    use crate::math::{Rect, Vec2};

    #[test]
    fn vec2_compact_form() {
        let text = Vec2Codec.serialize(&Vec2::new(1.5, -2.0));
        assert_eq!(text, "1.5,-2");
        assert_eq!(Vec2Codec.deserialize(Vec2::ZERO, " 1.5 , -2 "), Ok(Vec2::new(1.5, -2.0)));
    }

    #[test]
    fn rect_compact_form() {
        let rect = Rect::new(10.0, 20.0, 300.0, 150.5);
        let text = RectCodec.serialize(&rect);
        assert_eq!(text, "10,20,300,150.5");
        assert_eq!(RectCodec.deserialize(Rect::default(), &text), Ok(rect));
    }

    #[test]
    fn wrong_component_count() {
        assert!(Vec2Codec.deserialize(Vec2::ZERO, "1").is_err());
        assert!(Vec2Codec.deserialize(Vec2::ZERO, "1,2,3").is_err());
        assert!(RectCodec.deserialize(Rect::default(), "1,2,x,4").is_err());
    }
}
