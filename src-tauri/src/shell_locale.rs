use std::env;

use crate::LOCALE_ENV;

#[derive(Debug, Clone, Copy)]
pub struct ShellTexts {
    pub tray_open: &'static str,
    pub tray_quit: &'static str,
    pub tray_tooltip: &'static str,
    pub tray_tooltip_unread: &'static str,
    pub root_window_title: &'static str,
    pub popup_window_title: &'static str,
    pub tour_title: &'static str,
    pub tour_message: &'static str,
    pub startup_error_title: &'static str,
}

pub fn shell_texts_for_locale(locale: &str) -> ShellTexts {
    if locale == "cs-CZ" {
        return ShellTexts {
            tray_open: "Otevřít",
            tray_quit: "Ukončit Messenger",
            tray_tooltip: "Messenger Pro",
            tray_tooltip_unread: "Messenger Pro (nové zprávy)",
            root_window_title: "Messenger Pro",
            popup_window_title: "Messenger Hovor",
            tour_title: "Vítejte v Messenger Pro",
            tour_message: "Aplikace je připravena!\n\n\
                Aplikace běží na pozadí i po zavření okna.\n\n\
                Ovládání:\n\
                • Ikonu Messengeru najdete v oznamovací oblasti u hodin.\n\
                • Kliknutím na ikonu aplikaci otevřete.\n\
                • Kliknutím pravým tlačítkem na ikonu Messenger ukončíte.",
            startup_error_title: "Messenger Pro se nepodařilo spustit",
        };
    }

    ShellTexts {
        tray_open: "Open",
        tray_quit: "Close Messenger",
        tray_tooltip: "Messenger Pro",
        tray_tooltip_unread: "Messenger Pro (unread messages)",
        root_window_title: "Messenger Pro",
        popup_window_title: "Messenger Call",
        tour_title: "Welcome to Messenger Pro",
        tour_message: "App Is Ready!\n\n\
            This app keeps running in the background even after you close it.\n\n\
            Controls:\n\
            • You can find the Messenger icon in the tray near the clock.\n\
            • Click the icon to open the app.\n\
            • Right click the icon to shut Messenger down.",
        startup_error_title: "Messenger Pro failed to start",
    }
}

pub(crate) fn normalize_shell_locale(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw == "en-US" {
        return Some("en-US");
    }
    if raw == "cs-CZ" {
        return Some("cs-CZ");
    }

    let lowered = raw.to_ascii_lowercase();
    if lowered.starts_with("cs") || lowered.starts_with("cz") {
        return Some("cs-CZ");
    }
    if lowered.starts_with("en") {
        return Some("en-US");
    }
    None
}

pub(crate) fn resolve_shell_locale_from<E>(
    default_shell_locale: &'static str,
    configured_locale: Option<&str>,
    env_lookup: E,
) -> &'static str
where
    E: Fn(&str) -> Option<String>,
{
    if let Some(locale) = configured_locale.and_then(normalize_shell_locale) {
        return locale;
    }

    for env_key in [LOCALE_ENV, "LC_ALL", "LANG"] {
        if let Some(value) = env_lookup(env_key) {
            if let Some(locale) = normalize_shell_locale(&value) {
                return locale;
            }
        }
    }

    default_shell_locale
}

pub fn resolve_shell_locale(
    default_shell_locale: &'static str,
    configured_locale: Option<&str>,
) -> &'static str {
    resolve_shell_locale_from(default_shell_locale, configured_locale, |key| {
        env::var(key).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_texts_for_locale_returns_czech_copy() {
        let texts = shell_texts_for_locale("cs-CZ");
        assert_eq!(texts.tray_open, "Otevřít");
        assert_eq!(texts.popup_window_title, "Messenger Hovor");
    }

    #[test]
    fn shell_texts_for_locale_falls_back_to_english_copy() {
        let texts = shell_texts_for_locale("de-DE");
        assert_eq!(texts.tray_open, "Open");
        assert_eq!(texts.tray_quit, "Close Messenger");
    }

    #[test]
    fn normalize_shell_locale_accepts_language_prefixes() {
        assert_eq!(normalize_shell_locale("cs_CZ.UTF-8"), Some("cs-CZ"));
        assert_eq!(normalize_shell_locale("EN_gb"), Some("en-US"));
        assert_eq!(normalize_shell_locale("fr-FR"), None);
    }

    #[test]
    fn resolve_shell_locale_prefers_configured_locale_over_environment() {
        let locale = resolve_shell_locale_from("en-US", Some("cs"), |_| Some("en_US".into()));
        assert_eq!(locale, "cs-CZ");
    }

    #[test]
    fn resolve_shell_locale_walks_environment_keys_in_order() {
        let locale = resolve_shell_locale_from("en-US", None, |key| match key {
            "LC_ALL" => Some("C".to_string()),
            "LANG" => Some("cs_CZ.UTF-8".to_string()),
            _ => None,
        });
        assert_eq!(locale, "cs-CZ");

        assert_eq!(resolve_shell_locale_from("en-US", None, |_| None), "en-US");
    }
}
