//! Bounding boxes in corner (XYXY) form.

use super::coord::Coord;
use super::{Normalized, Pixel};

/// An axis-aligned box given by its top-left and bottom-right corners.
///
/// Construction does not check that `min <= max`; a reversed box yields a
/// negative width or height downstream, which is passed through like any
/// other out-of-range value.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Coord::new(xmin, ymin),
            max: Coord::new(xmax, ymax),
        }
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.max.y
    }

    /// Width of the box. May be negative if `xmax < xmin`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the box. May be negative if `ymax < ymin`.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns true if all four coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns `(center_x, center_y, width, height)` in the box's own space.
    #[inline]
    pub fn to_cxcywh(&self) -> (f64, f64, f64, f64) {
        (
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            self.width(),
            self.height(),
        )
    }
}

impl BBoxXYXY<Pixel> {
    /// Returns true if the box lies within a `width` x `height` image.
    pub fn is_within(&self, width: f64, height: f64) -> bool {
        self.min.x >= 0.0
            && self.min.y >= 0.0
            && self.max.x <= width
            && self.max.y <= height
    }

    /// Converts to center/size form as fractions of the image size.
    ///
    /// Centers and sizes are computed in pixel space first and divided
    /// afterwards, so `cx = (x1 + x2) / 2 / width` holds bit for bit.
    /// The caller guarantees non-zero image dimensions.
    pub fn to_normalized_cxcywh(&self, image_width: f64, image_height: f64) -> CxCyWh<Normalized> {
        let (cx, cy, w, h) = self.to_cxcywh();
        CxCyWh::new(
            cx / image_width,
            cy / image_height,
            w / image_width,
            h / image_height,
        )
    }
}

/// A box in center/size form.
#[derive(Clone, Copy, PartialEq)]
pub struct CxCyWh<TSpace> {
    pub center: Coord<TSpace>,
    pub w: f64,
    pub h: f64,
}

impl<TSpace> CxCyWh<TSpace> {
    #[inline]
    pub fn new(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self {
            center: Coord::new(cx, cy),
            w,
            h,
        }
    }

    #[inline]
    pub fn cx(&self) -> f64 {
        self.center.x
    }

    #[inline]
    pub fn cy(&self) -> f64 {
        self.center.y
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.min.x)
            .field("ymin", &self.min.y)
            .field("xmax", &self.max.x)
            .field("ymax", &self.max.y)
            .finish()
    }
}

impl<TSpace> std::fmt::Debug for CxCyWh<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CxCyWh")
            .field("cx", &self.center.x)
            .field("cy", &self.center.y)
            .field("w", &self.w)
            .field("h", &self.h)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_dimensions() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(10.0, 20.0, 100.0, 80.0);
        assert_eq!(bbox.width(), 90.0);
        assert_eq!(bbox.height(), 60.0);
        assert_eq!(bbox.to_cxcywh(), (55.0, 50.0, 90.0, 60.0));
    }

    #[test]
    fn test_reversed_bbox_has_negative_size() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(30.0, 30.0, 10.0, 10.0);
        assert_eq!(bbox.width(), -20.0);
        assert_eq!(bbox.height(), -20.0);
    }

    #[test]
    fn test_to_normalized_cxcywh() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(10.0, 10.0, 30.0, 30.0);
        let norm = bbox.to_normalized_cxcywh(100.0, 50.0);
        assert_eq!(norm.cx(), 0.2);
        assert_eq!(norm.cy(), 0.4);
        assert_eq!(norm.w, 0.2);
        assert_eq!(norm.h, 0.4);
    }

    #[test]
    fn test_is_within() {
        let inside: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(0.0, 0.0, 100.0, 50.0);
        assert!(inside.is_within(100.0, 50.0));

        let outside: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(90.0, 10.0, 120.0, 20.0);
        assert!(!outside.is_within(100.0, 50.0));
    }
}
