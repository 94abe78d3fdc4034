use std::fmt;
use std::path::Path;

/// Error returned when a font cannot be read or parsed.
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Well-known locations of a sans-serif TTF on desktop Linux and Android.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/system/fonts/Roboto-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Parses a TrueType or OpenType font from raw bytes.
pub fn load_font(bytes: &[u8]) -> Result<fontdue::Font, FontLoadError> {
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| FontLoadError(e.to_string()))
}

pub fn load_font_file(path: &Path) -> Result<fontdue::Font, FontLoadError> {
    let bytes = std::fs::read(path)
        .map_err(|e| FontLoadError(format!("{}: {e}", path.display())))?;
    load_font(&bytes)
}

/// Loads `preferred` if given, otherwise the first readable system font.
pub fn system_font(preferred: Option<&Path>) -> Result<fontdue::Font, FontLoadError> {
    if let Some(path) = preferred {
        return load_font_file(path);
    }

    SYSTEM_FONT_CANDIDATES
        .iter()
        .find_map(|p| std::fs::read(p).ok())
        .ok_or_else(|| FontLoadError("no system font found".into()))
        .and_then(|bytes| load_font(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_rejected() {
        assert!(load_font(b"not a font").is_err());
    }

    #[test]
    fn missing_preferred_file_is_an_error() {
        match system_font(Some(Path::new("/nonexistent/font.ttf"))) {
            Err(err) => assert!(err.to_string().contains("/nonexistent/font.ttf")),
            Ok(_) => panic!("a missing file must not load"),
        }
    }
}
