// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crayon_canvas::Argb;

/// A named ink color offered by the color picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPreset {
    /// Display name.
    pub name: &'static str,
    /// Ink color.
    pub color: Argb,
}

/// A named brush width offered by the size picker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushPreset {
    /// Display name.
    pub name: &'static str,
    /// Line width in image units.
    pub width: f32,
}

const fn color(name: &'static str, color: Argb) -> ColorPreset {
    ColorPreset { name, color }
}

/// Ink colors, in picker order. The first entry is the default brush color.
pub const PALETTE: [ColorPreset; 10] = [
    color("Red", Argb(0xFFFF_6B6B)),
    color("Blue", Argb(0xFF4E_CDC4)),
    color("Yellow", Argb(0xFFFF_D93D)),
    color("Green", Argb(0xFF96_CEB4)),
    color("Purple", Argb(0xFFA3_63D9)),
    color("Orange", Argb(0xFFFF_9A76)),
    color("Pink", Argb(0xFFFF_9FF3)),
    color("Cyan", Argb(0xFF45_B7D1)),
    color("Black", Argb::BLACK),
    color("White", Argb::WHITE),
];

/// Brush widths, in picker order.
pub const BRUSH_SIZES: [BrushPreset; 4] = [
    BrushPreset {
        name: "Fine",
        width: 3.0,
    },
    BrushPreset {
        name: "Medium",
        width: 8.0,
    },
    BrushPreset {
        name: "Thick",
        width: 15.0,
    },
    BrushPreset {
        name: "Extra",
        width: 25.0,
    },
];
