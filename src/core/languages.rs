//! Target languages offered for selection

/// Languages offered by the front ends, default first
pub const TARGET_LANGUAGES: &[&str] = &[
    "Japanese",
    "English (United States)",
    "Spanish",
    "Slovak",
    "Slovenian",
    "Czech",
    "Danish",
    "German",
    "Turkish",
    "Norwegian (Bokmål)",
    "Hungarian",
    "Finnish",
    "French",
    "Bulgarian",
    "Polish",
    "Portuguese",
    "Portuguese (Brazil)",
    "Latvian",
    "Lithuanian",
    "Romanian",
    "Russian",
    "English (United Kingdom)",
    "Korean",
    "Chinese (Simplified)",
    "Chinese (Traditional)",
    "Arabic",
    "Italian",
    "Indonesian",
    "Ukrainian",
    "Estonian",
    "Dutch",
    "Greek",
    "Swedish",
];

/// Language preselected in the front ends
pub const DEFAULT_TARGET_LANGUAGE: &str = "Japanese";

/// Whether `name` is one of the offered languages
pub fn is_listed(name: &str) -> bool {
    TARGET_LANGUAGES.contains(&name)
}
