//! Font table
//!
//! The display ships one face in ten sizes. Any other requested size falls
//! back to the 18 point face.

/// Font faces available on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    Pt12,
    Pt14,
    Pt16,
    #[default]
    Pt18,
    Pt20,
    Pt22,
    Pt24,
    Pt26,
    Pt28,
    Pt30,
}

impl Font {
    /// Face used for a requested size
    pub fn for_size(size: i32) -> Self {
        match size {
            12 => Font::Pt12,
            14 => Font::Pt14,
            16 => Font::Pt16,
            18 => Font::Pt18,
            20 => Font::Pt20,
            22 => Font::Pt22,
            24 => Font::Pt24,
            26 => Font::Pt26,
            28 => Font::Pt28,
            30 => Font::Pt30,
            _ => Font::default(),
        }
    }

    /// Point size of the face
    pub const fn points(self) -> u8 {
        match self {
            Font::Pt12 => 12,
            Font::Pt14 => 14,
            Font::Pt16 => 16,
            Font::Pt18 => 18,
            Font::Pt20 => 20,
            Font::Pt22 => 22,
            Font::Pt24 => 24,
            Font::Pt26 => 26,
            Font::Pt28 => 28,
            Font::Pt30 => 30,
        }
    }
}
