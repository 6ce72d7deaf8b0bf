//! Platform helpers
//!
//! Device gating for the browser build (the game is keyboard-only, so phones
//! and tablets get a notice instead of a game) and a millisecond clock.

/// User agent fragments of phones
const MOBILE_AGENTS: [&str; 6] = ["iphone", "ipad", "ipod", "android", "blackberry", "windows phone"];
/// User agent fragments of tablets
const TABLET_AGENTS: [&str; 4] = ["ipad", "tablet", "playbook", "silk"];
/// Touch screens at most this wide (CSS px) count as handhelds
pub const SMALL_SCREEN_MAX_WIDTH: f64 = 900.0;

/// What the browser tells us about the device
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceProfile {
    pub user_agent: String,
    pub viewport_width: f64,
    pub max_touch_points: u32,
}

impl DeviceProfile {
    pub fn is_mobile_or_tablet(&self) -> bool {
        let ua = self.user_agent.to_lowercase();
        let mobile_ua = MOBILE_AGENTS.iter().any(|a| ua.contains(a));
        let tablet_ua = TABLET_AGENTS.iter().any(|a| ua.contains(a)) || is_android_tablet(&ua);
        let small_touch = self.viewport_width <= SMALL_SCREEN_MAX_WIDTH && self.max_touch_points > 0;
        mobile_ua || tablet_ua || small_touch
    }

    /// Read the profile of the current browser
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let navigator = window.navigator();
        Some(Self {
            user_agent: navigator.user_agent().unwrap_or_default(),
            viewport_width: window.inner_width().ok()?.as_f64()?,
            max_touch_points: u32::try_from(navigator.max_touch_points()).unwrap_or(0),
        })
    }
}

/// Android without "mobile" after it is a tablet
fn is_android_tablet(ua: &str) -> bool {
    ua.rfind("android")
        .is_some_and(|i| !ua[i + "android".len()..].contains("mobile"))
}

/// Whether the game should run on this device
pub fn is_supported_device(profile: &DeviceProfile) -> bool {
    !profile.is_mobile_or_tablet()
}

/// Milliseconds on a monotonic-enough clock
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the first call
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(ua: &str, width: f64, touch: u32) -> DeviceProfile {
        DeviceProfile {
            user_agent: ua.to_string(),
            viewport_width: width,
            max_touch_points: touch,
        }
    }

    #[test]
    fn test_desktop_supported() {
        let desktop = profile(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36",
            1440.0,
            0,
        );
        assert!(is_supported_device(&desktop));
        // Narrow window without touch is still a desktop
        assert!(is_supported_device(&profile("Mozilla/5.0 (Windows NT 10.0)", 640.0, 0)));
    }

    #[test]
    fn test_handhelds_rejected() {
        assert!(!is_supported_device(&profile("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", 390.0, 5)));
        assert!(!is_supported_device(&profile("Mozilla/5.0 (iPad; CPU OS 16_0)", 1024.0, 5)));
        assert!(!is_supported_device(&profile("Mozilla/5.0 (Linux; U; en-us; KFTT Build) Silk/3.68", 1280.0, 0)));
        // Touch laptop with a small window
        assert!(!is_supported_device(&profile("Mozilla/5.0 (Windows NT 10.0)", 800.0, 10)));
    }

    #[test]
    fn test_android_tablet_detection() {
        assert!(is_android_tablet("mozilla/5.0 (linux; android 13; sm-x700)"));
        assert!(!is_android_tablet("mozilla/5.0 (linux; android 13; pixel 7) mobile safari"));
        assert!(!is_android_tablet("mozilla/5.0 (x11; linux x86_64)"));
    }

    #[test]
    fn test_native_clock_moves_forward() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
