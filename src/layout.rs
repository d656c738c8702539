//! Layout identity: which keyboard layout the foreground app is typing in,
//! and its short display code.

use std::fmt;

use crate::model::constants::PLACEHOLDER_LANGUAGE;
use crate::platform::{LayoutId, PlatformQuery};

/// Short upper-case display code such as `EN`, or `0x0409` when the
/// locale could not be named.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// First two characters of a locale name, upper-cased.
    pub fn from_locale_name(name: &str) -> Self {
        let code: String = name.trim().chars().take(2).collect();
        if code.is_empty() {
            return Self::placeholder();
        }
        Self(code.to_uppercase())
    }

    /// `0x` followed by the locale id as four hex digits.
    pub fn hex_fallback(lcid: u16) -> Self {
        Self(format!("0x{:04X}", lcid))
    }

    /// Normalise arbitrary text; blank becomes `--`.
    pub fn from_display(text: &str) -> Self {
        if text.trim().is_empty() {
            Self::placeholder()
        } else {
            Self(text.to_string())
        }
    }

    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_LANGUAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Layout bound to the foreground window's thread.
pub fn current_layout<P: PlatformQuery + ?Sized>(platform: &P) -> LayoutId {
    platform.foreground_layout()
}

/// Display code for `layout`.
pub fn short_name<P: PlatformQuery + ?Sized>(platform: &P, layout: LayoutId) -> LanguageCode {
    let lcid = layout.lcid();
    match platform.locale_name(lcid) {
        Some(name) if !name.is_empty() => LanguageCode::from_locale_name(&name),
        _ => LanguageCode::hex_fallback(lcid),
    }
}
