//! Responsive breakpoint buckets

use std::fmt::{Display, Formatter};

/// Discrete screen-size tier, ordered smallest to largest
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScreenSize {
    #[default]
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl ScreenSize {
    /// Every tier in ascending order
    pub const ALL: [ScreenSize; 5] = [
        ScreenSize::Xs,
        ScreenSize::Sm,
        ScreenSize::Md,
        ScreenSize::Lg,
        ScreenSize::Xl,
    ];

    /// Resolve a tier from a (scaled) width.
    ///
    /// `thresholds` are the minimum widths of `Sm`, `Md`, `Lg` and `Xl`.
    pub fn from_width(width: f32, thresholds: &[f32; 4]) -> Self {
        let mut size = ScreenSize::Xs;
        for (threshold, tier) in thresholds.iter().zip(&Self::ALL[1..]) {
            if width >= *threshold {
                size = *tier;
            }
        }
        size
    }

    /// Position in [`ScreenSize::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The next smaller tier
    pub fn smaller(self) -> Option<ScreenSize> {
        match self {
            ScreenSize::Xs => None,
            ScreenSize::Sm => Some(ScreenSize::Xs),
            ScreenSize::Md => Some(ScreenSize::Sm),
            ScreenSize::Lg => Some(ScreenSize::Md),
            ScreenSize::Xl => Some(ScreenSize::Lg),
        }
    }

    /// Stable lowercase id (`"xs"`, `"sm"`, ...)
    pub fn id(self) -> &'static str {
        match self {
            ScreenSize::Xs => "xs",
            ScreenSize::Sm => "sm",
            ScreenSize::Md => "md",
            ScreenSize::Lg => "lg",
            ScreenSize::Xl => "xl",
        }
    }

    /// Inverse of [`ScreenSize::id`]
    pub fn from_id(id: &str) -> Option<ScreenSize> {
        Self::ALL.into_iter().find(|size| size.id() == id)
    }
}

impl Display for ScreenSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
