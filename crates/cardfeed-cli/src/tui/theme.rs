//! Colors used by the listing view

use ratatui::style::Color;

/// Theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub text_color: Color,
    pub dim_color: Color,
    pub accent_color: Color,
    pub border_color: Color,
    pub status_bar_bg_color: Color,
    pub processing_color: Color,
    pub success_color: Color,
    pub error_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_color: Color::Rgb(0xe6, 0xe1, 0xcf),
            dim_color: Color::Rgb(0x7a, 0x78, 0x70),
            accent_color: Color::Rgb(0xff, 0x8f, 0x40),
            border_color: Color::Rgb(0x3a, 0x3d, 0x45),
            status_bar_bg_color: Color::Rgb(0x1c, 0x1e, 0x24),
            processing_color: Color::Rgb(0x59, 0xc2, 0xff),
            success_color: Color::Rgb(0xaa, 0xd9, 0x4c),
            error_color: Color::Rgb(0xf0, 0x71, 0x78),
        }
    }
}
