use crossterm::style::Color;

pub struct Theme {
    pub tag: Color,      // Grey value prefixes (W:, O:, ...)
    pub word: Color,     // Blue
    pub operator: Color, // Yellow
    pub string: Color,   // Orange
    pub number: Color,   // Orange
    pub location: Color, // Grey
    pub punctuation: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    tag: Color::Rgb { r: 108, g: 112, b: 134 },
    word: Color::Rgb { r: 137, g: 180, b: 250 },
    operator: Color::Rgb { r: 249, g: 226, b: 175 },
    string: Color::Rgb { r: 250, g: 179, b: 135 },
    number: Color::Rgb { r: 250, g: 179, b: 135 },
    location: Color::Rgb { r: 108, g: 112, b: 134 },
    punctuation: Color::Rgb { r: 205, g: 214, b: 244 },
};
