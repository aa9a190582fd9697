//! Lengths, font sizes and colours

/// Length in English Metric Units, the OOXML coordinate unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Emu(pub i64);

impl Emu {
    pub const PER_INCH: i64 = 914_400;
    pub const PER_POINT: i64 = 12_700;

    pub fn inches(value: f64) -> Self {
        Self((value * Self::PER_INCH as f64).round() as i64)
    }

    pub fn points(value: f64) -> Self {
        Self((value * Self::PER_POINT as f64).round() as i64)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

/// Font size or spacing in points
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Pt(pub f64);

impl Pt {
    /// Value in hundredths of a point, as used by `sz` and `spcPts`
    pub fn hundredths(self) -> i64 {
        (self.0 * 100.0).round() as i64
    }
}

/// 24-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Upper-case hex without a leading `#`
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Position and size of a shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Rect {
    pub fn new(left: Emu, top: Emu, width: Emu, height: Emu) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build a rect from inch measurements
    pub fn inches(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(
            Emu::inches(left),
            Emu::inches(top),
            Emu::inches(width),
            Emu::inches(height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emu_conversions() {
        assert_eq!(Emu::inches(1.0), Emu(914_400));
        assert_eq!(Emu::inches(0.5).value(), 457_200);
        assert_eq!(Emu::points(72.0), Emu::inches(1.0));
    }

    #[test]
    fn test_pt_hundredths() {
        assert_eq!(Pt(36.0).hundredths(), 3600);
        assert_eq!(Pt(10.5).hundredths(), 1050);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::BLACK.hex(), "000000");
        assert_eq!(Rgb(255, 16, 1).hex(), "FF1001");
    }
}
