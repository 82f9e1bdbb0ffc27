//! Locale name mapping for the platform string formats.
//!
//! Sheet language columns use short internal codes (`tw`, `jp`, ...). The
//! fixed tables below cover the codes that do not map mechanically; anything
//! else falls through to a BCP 47 parse so that codes like `pt-BR` still
//! produce the platform spelling.

use unic_langid::LanguageIdentifier;

/// Android resource qualifier for a sheet language code (`tw` → `zh-rTW`).
pub fn android_locale(code: &str) -> String {
    match code {
        "tw" => "zh-rTW".to_string(),
        "cn" => "zh-rCN".to_string(),
        "jp" => "ja".to_string(),
        "kr" => "ko".to_string(),
        "cz" => "cs".to_string(),
        "se" => "sv".to_string(),
        _ => match code.parse::<LanguageIdentifier>() {
            Ok(id) => match id.region {
                Some(region) => format!("{}-r{}", id.language, region),
                None => code.to_string(),
            },
            Err(_) => code.to_string(),
        },
    }
}

/// Apple `.lproj` name for a sheet language code (`tw` → `zh-Hant`).
pub fn apple_locale(code: &str) -> String {
    match code {
        "tw" => "zh-Hant".to_string(),
        "cn" => "zh-Hans".to_string(),
        "jp" => "ja".to_string(),
        "kr" => "ko".to_string(),
        "cz" => "cs".to_string(),
        "se" => "sv".to_string(),
        _ => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_android_fixed_table() {
        assert_eq!(android_locale("tw"), "zh-rTW");
        assert_eq!(android_locale("cn"), "zh-rCN");
        assert_eq!(android_locale("jp"), "ja");
        assert_eq!(android_locale("kr"), "ko");
        assert_eq!(android_locale("cz"), "cs");
        assert_eq!(android_locale("se"), "sv");
    }

    #[test]
    fn test_android_region_fallthrough() {
        assert_eq!(android_locale("pt-BR"), "pt-rBR");
        assert_eq!(android_locale("en-GB"), "en-rGB");
    }

    #[test]
    fn test_android_plain_code_passthrough() {
        assert_eq!(android_locale("de"), "de");
        assert_eq!(android_locale("fr"), "fr");
    }

    #[test]
    fn test_apple_fixed_table() {
        assert_eq!(apple_locale("tw"), "zh-Hant");
        assert_eq!(apple_locale("cn"), "zh-Hans");
        assert_eq!(apple_locale("jp"), "ja");
    }

    #[test]
    fn test_apple_passthrough() {
        assert_eq!(apple_locale("de"), "de");
        assert_eq!(apple_locale("pt-BR"), "pt-BR");
    }
}
