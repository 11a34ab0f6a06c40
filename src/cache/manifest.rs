/// Name of the current offline cache. Bump the suffix to invalidate old caches on activate.
pub const DEFAULT_CACHE_NAME: &str = "writepad-v1";

const BASE_URLS: &[&str] = &[
    "/writepad/writepad.html",
    "/writepad/letters.json",
    "/writepad/icons/icon-192x192.png",
    "/writepad/icons/icon-512x512.png",
    "https://cdnjs.cloudflare.com/ajax/libs/jszip/3.10.1/jszip.min.js",
];

// Norwegian letters are spelled out (Å -> AA, Æ -> AE, Ø -> OE) to keep file names ASCII.
const UPPERCASE: &[&str] = &[
    "K", "J", "H", "I", "Z", "M", "AA", "L", "Y", "N", "AE", "O", "X", "U", "B", "C", "T", "V",
    "A", "W", "D", "S", "OE", "R", "E", "G", "P", "Q", "F",
];
const NUMBERS_AND_SPECIALS: &[&str] = &["8", "9", "_", "4", "5", "7", "6", "2", "3", "1", "0"];

/// URLs to fetch into a named cache on install.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecacheManifest {
    pub cache_name: String,
    pub urls: Vec<String>,
}

impl PrecacheManifest {
    pub fn new(cache_name: impl Into<String>, urls: Vec<String>) -> Self {
        Self {
            cache_name: cache_name.into(),
            urls,
        }
    }

    /// The app shell plus every letter template image.
    pub fn writepad() -> Self {
        Self::writepad_named(DEFAULT_CACHE_NAME)
    }

    pub fn writepad_named(cache_name: impl Into<String>) -> Self {
        let mut urls: Vec<String> = BASE_URLS.iter().map(|u| u.to_string()).collect();
        urls.extend(letter_image_urls());
        Self::new(cache_name, urls)
    }

    /// URLs served from this origin (everything that is not an absolute `http(s)` URL).
    pub fn local_urls(&self) -> impl Iterator<Item = &str> {
        self.urls
            .iter()
            .map(String::as_str)
            .filter(|u| !is_remote(u))
    }
}

pub(crate) fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn letter_image_urls() -> impl Iterator<Item = String> {
    let upper = UPPERCASE
        .iter()
        .map(|l| format!("/writepad/letter_images/Uppercase/{l}.png"));
    let lower = UPPERCASE.iter().map(|l| {
        format!("/writepad/letter_images/Lowercase/{}.png", l.to_ascii_lowercase())
    });
    let other = NUMBERS_AND_SPECIALS
        .iter()
        .map(|l| format!("/writepad/letter_images/NumbersAndSpecials/{l}.png"));
    upper.chain(lower).chain(other)
}
