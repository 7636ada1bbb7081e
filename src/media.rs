// Media allow-list: a file is linked when its extension, compared without
// case, is one of the known still-image or video container extensions.

use std::collections::HashSet;

/// Still image extensions linked by default.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "heic", "heif", "avif", "tif", "tiff", "bmp", "raw",
    "dng",
];

/// Video container extensions linked by default.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "avi", "mkv", "webm", "3gp", "mts", "m2ts", "mpg", "mpeg",
];

#[derive(Debug, Clone)]
pub struct MediaFilter {
    extensions: HashSet<String>,
}

impl Default for MediaFilter {
    fn default() -> Self {
        MediaFilter {
            extensions: IMAGE_EXTENSIONS
                .iter()
                .chain(VIDEO_EXTENSIONS)
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl MediaFilter {
    /// Default list plus `extra` (leading dots and case ignored).
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = MediaFilter::default();
        filter.extensions.extend(
            extra
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty()),
        );
        filter
    }

    /// Whether a file called `name` is media.
    pub fn matches(&self, name: &str) -> bool {
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                self.extensions.contains(&ext.to_ascii_lowercase())
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        let media = MediaFilter::default();
        assert!(media.matches("a.jpg"));
        assert!(media.matches("IMG_0001.JPEG"));
        assert!(media.matches("clip.Mp4"));
        assert!(media.matches("b.mov"));
        assert!(!media.matches("notes.txt"));
        assert!(!media.matches("backup.ZIP"));
    }

    #[test]
    fn needs_a_real_extension() {
        let media = MediaFilter::default();
        assert!(!media.matches("jpg"));
        assert!(!media.matches(".jpg"));
        assert!(!media.matches("archive.jpg.zip"));
    }

    #[test]
    fn extra_extensions_extend_the_list() {
        let media = MediaFilter::with_extra([".CR2", "nef", ""]);
        assert!(media.matches("shot.cr2"));
        assert!(media.matches("shot.NEF"));
        assert!(media.matches("shot.png"));
    }
}
