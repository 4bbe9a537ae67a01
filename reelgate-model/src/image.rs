use std::fmt::{Display, Formatter};

/// TMDB image size variants used by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageSize {
    /// Small poster for result lists (300px wide).
    W300,
    /// Default artwork size (500px wide).
    #[default]
    W500,
}

impl ImageSize {
    /// Path segment understood by the image CDN.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
        }
    }
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
