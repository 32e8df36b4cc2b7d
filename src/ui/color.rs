const fn nibble(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => panic!("invalid hex digit in color string"),
    }
}

/// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
/// Meant for literals; panics on malformed input, at compile time in consts.
pub const fn rgba_hex(s: &str) -> [f32; 4] {
    let raw = s.as_bytes();
    let skip = if !raw.is_empty() && raw[0] == b'#' { 1 } else { 0 };
    let digits = raw.len() - skip;
    let short = match digits {
        3 | 4 => true,
        6 | 8 => false,
        _ => panic!("color hex string must be 3, 4, 6, or 8 digits"),
    };
    let channels = if digits == 3 || digits == 6 { 3 } else { 4 };

    let mut out = [1.0_f32; 4];
    let mut c = 0;
    while c < channels {
        // 0xF * 17 == 0xFF
        let v = if short {
            nibble(raw[skip + c]) * 17
        } else {
            (nibble(raw[skip + c * 2]) << 4) | nibble(raw[skip + c * 2 + 1])
        };
        out[c] = v as f32 / 255.0;
        c += 1;
    }
    out
}

/// Same color with its alpha replaced.
#[inline(always)]
pub const fn with_alpha(c: [f32; 4], alpha: f32) -> [f32; 4] {
    [c[0], c[1], c[2], alpha]
}

/// Scales rgb by `1 + amount`, clamped to 1. Alpha is untouched.
#[inline(always)]
pub fn lighten(c: [f32; 4], amount: f32) -> [f32; 4] {
    let k = 1.0 + amount.max(0.0);
    [
        (c[0] * k).min(1.0),
        (c[1] * k).min(1.0),
        (c[2] * k).min(1.0),
        c[3],
    ]
}

#[inline(always)]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (b - a).mul_add(t, a)
}

#[inline(always)]
pub fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        lerp(a[0], b[0], t),
        lerp(a[1], b[1], t),
        lerp(a[2], b[2], t),
        lerp(a[3], b[3], t),
    ]
}

/* =========================== HUD PALETTE =========================== */

pub const WHITE: [f32; 4] = rgba_hex("#FFFFFF");
pub const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Main health bar fill.
pub const HEALTH_BAR_RGBA: [f32; 4] = WHITE;
/// Cyan glow hugging the leading edge of both bars when idle.
pub const HEALTH_GLOW_RGBA: [f32; 4] = with_alpha(rgba_hex("#7ED7FD"), 0.5);

/// Miss bar fill right after a miss, then the color it settles to.
pub const MISS_FLASH_BAR_RGBA: [f32; 4] = rgba_hex("#FF9393");
pub const MISS_BAR_RGBA: [f32; 4] = rgba_hex("#FF5D5D");
pub const MISS_GLOW_RGBA: [f32; 4] = rgba_hex("#FD0000");

/// Background path: bright at the start, dim and translucent at the end.
pub const BACKGROUND_START_RGBA: [f32; 4] = with_alpha(WHITE, 0.8);
pub const BACKGROUND_END_RGBA: [f32; 4] = [0.0, 0.0, 0.0, 0.2];

/// Key counter icon tint while the key is held.
pub const KEY_ACTIVE_RGBA: [f32; 4] = rgba_hex("#FFDE75");
pub const KEY_TEXT_RGBA: [f32; 4] = WHITE;

/// Profile overlay chrome.
pub const OVERLAY_BG_RGBA: [f32; 4] = rgba_hex("#1C1719F2");
pub const TAB_IDLE_RGBA: [f32; 4] = rgba_hex("#8A7F84");
pub const TAB_ACTIVE_RGBA: [f32; 4] = rgba_hex("#FF66AB");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms_decode_to_same_color() {
        assert_eq!(rgba_hex("#fff"), rgba_hex("FFFFFFFF"));
        assert_eq!(rgba_hex("#0000"), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn lighten_clamps_channels() {
        let c = lighten(MISS_GLOW_RGBA, 0.2);
        assert!((c[0] - 1.0).abs() <= 1e-6, "red should clamp to 1, got {}", c[0]);
        assert_eq!(c[1], 0.0);
        assert_eq!(c[3], 1.0);
    }

    #[test]
    fn lerp_color_hits_endpoints() {
        assert_eq!(lerp_color(TRANSPARENT, WHITE, 0.0), TRANSPARENT);
        assert_eq!(lerp_color(TRANSPARENT, WHITE, 1.0), WHITE);
    }
}
