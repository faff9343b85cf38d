//! Heuristic user-agent classification.
//!
//! Case-insensitive substring checks evaluated in a fixed priority order. The
//! label strings appear verbatim in breakdowns and summary text.

use serde::{Deserialize, Serialize};

pub const DESKTOP: &str = "Desktop";
pub const MOBILE_TABLET: &str = "Mobile/Tablet";

pub const WINDOWS: &str = "Windows";
pub const MACOS: &str = "macOS";
pub const ANDROID: &str = "Android";
pub const IOS: &str = "iOS";
pub const LINUX: &str = "Linux";
pub const UNKNOWN_OS: &str = "Unknown OS";

pub const CHROME: &str = "Chrome";
pub const FIREFOX: &str = "Firefox";
pub const SAFARI: &str = "Safari";
pub const EDGE: &str = "Edge";
pub const OPERA: &str = "Opera";
pub const BOT_CRAWLER: &str = "Bot/Crawler";
pub const UNKNOWN_BROWSER: &str = "Unknown Browser";

/// Labels derived from one user-agent string.
///
/// All three are `None` when no user agent was recorded, and all three are
/// `Some` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientLabels {
    pub device_type: Option<String>,
    pub os: Option<String>,
    pub browser: Option<String>,
}

/// Classify a user-agent string into device / OS / browser labels.
pub fn classify_user_agent(user_agent: Option<&str>) -> ClientLabels {
    let ua = match user_agent {
        Some(ua) if !ua.is_empty() => ua.to_lowercase(),
        _ => return ClientLabels::default(),
    };

    ClientLabels {
        device_type: Some(device_label(&ua).to_string()),
        os: Some(os_label(&ua).to_string()),
        browser: Some(browser_label(&ua).to_string()),
    }
}

fn contains_any(ua: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| ua.contains(n))
}

fn device_label(ua: &str) -> &'static str {
    if contains_any(ua, &["mobile", "android", "iphone", "ipad"]) {
        MOBILE_TABLET
    } else {
        DESKTOP
    }
}

fn os_label(ua: &str) -> &'static str {
    if ua.contains("windows") {
        WINDOWS
    } else if contains_any(ua, &["macintosh", "mac os x"]) {
        MACOS
    } else if ua.contains("android") {
        ANDROID
    } else if contains_any(ua, &["iphone", "ipad", "ios"]) {
        IOS
    } else if ua.contains("linux") {
        LINUX
    } else {
        UNKNOWN_OS
    }
}

fn browser_label(ua: &str) -> &'static str {
    if ua.contains("chrome") && !ua.contains("chromium") && !ua.contains("edg") {
        CHROME
    } else if ua.contains("firefox") {
        FIREFOX
    } else if ua.contains("safari") && !ua.contains("chrome") {
        SAFARI
    } else if ua.contains("edg") {
        EDGE
    } else if contains_any(ua, &["opera", "opr"]) {
        OPERA
    } else if contains_any(ua, &["bot", "crawler", "spider"]) {
        BOT_CRAWLER
    } else {
        UNKNOWN_BROWSER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(ua: &str) -> (String, String, String) {
        let l = classify_user_agent(Some(ua));
        (
            l.device_type.unwrap_or_default(),
            l.os.unwrap_or_default(),
            l.browser.unwrap_or_default(),
        )
    }

    #[test]
    fn windows_chrome_is_desktop() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0.0.0";
        assert_eq!(
            labels(ua),
            (DESKTOP.into(), WINDOWS.into(), CHROME.into())
        );
    }

    #[test]
    fn iphone_safari_matches_mac_os_x_token_first() {
        // "like Mac OS X" is checked before the iphone token.
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Safari/17.0";
        assert_eq!(
            labels(ua),
            (MOBILE_TABLET.into(), MACOS.into(), SAFARI.into())
        );
    }

    #[test]
    fn linux_firefox_is_desktop() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Firefox/120.0";
        assert_eq!(
            labels(ua),
            (DESKTOP.into(), LINUX.into(), FIREFOX.into())
        );
    }

    #[test]
    fn googlebot_is_bot_crawler() {
        let ua = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
        let (device, os, browser) = labels(ua);
        assert_eq!(browser, BOT_CRAWLER);
        assert_eq!(os, UNKNOWN_OS);
        assert_eq!(device, DESKTOP);
    }

    #[test]
    fn absent_or_empty_user_agent_yields_no_labels() {
        assert_eq!(classify_user_agent(None), ClientLabels::default());
        assert_eq!(classify_user_agent(Some("")), ClientLabels::default());
    }

    #[test]
    fn edge_is_not_reported_as_chrome() {
        let ua = "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 Chrome/120.0 Safari/537.36 Edg/120.0";
        assert_eq!(labels(ua).2, EDGE);
    }

    #[test]
    fn chrome_on_android_is_not_safari() {
        let ua = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile Safari/537.36";
        assert_eq!(
            labels(ua),
            (MOBILE_TABLET.into(), ANDROID.into(), CHROME.into())
        );
    }

    #[test]
    fn chromium_falls_through_to_later_rules() {
        // Chromium carries both "chrome" and "safari"; the chrome guard on the
        // Safari rule excludes it, so it lands on the fallback label.
        let ua = "Mozilla/5.0 (X11; Linux x86_64) Chromium/119.0 Chrome/119.0 Safari/537.36";
        assert_eq!(labels(ua).2, UNKNOWN_BROWSER);
    }

    #[test]
    fn legacy_opera_and_ipad() {
        assert_eq!(labels("Opera/9.80 (Macintosh; Intel Mac OS X 10.6.8)").2, OPERA);
        let (device, os, _) = labels("Mozilla/5.0 (iPad; CPU OS 17_1) AppleWebKit/605.1.15");
        assert_eq!(device, MOBILE_TABLET);
        assert_eq!(os, IOS);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(labels("CURL-SPIDER/1.0 WINDOWS").1, WINDOWS);
        assert_eq!(labels("CURL-SPIDER/1.0 WINDOWS").2, BOT_CRAWLER);
    }

    #[test]
    fn unrecognised_agent_gets_fallback_labels() {
        assert_eq!(
            labels("curl/8.4.0"),
            (DESKTOP.into(), UNKNOWN_OS.into(), UNKNOWN_BROWSER.into())
        );
    }
}
