use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Semantic colors
    pub selection: Color,
    pub accent: Color,
    pub active: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
            accent: Color::Rgb(0xd8, 0xa6, 0x57),
            active: Color::Rgb(0xa9, 0xb6, 0x65),
        }
    }
}
