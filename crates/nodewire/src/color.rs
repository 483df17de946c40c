use eframe::egui::Color32;
use eframe::egui::ecolor::{hsv_from_rgb, rgb_from_hsv};

/// Size of the 24-bit RGB space the hash is folded into.
const RGB_RANGE: u64 = 0xFF_FFFF;

/// Lightness factor applied to every derived color, in percent.
const LIGHTEN_PERCENT: u32 = 120;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Deterministic color for a connection's data type identifier.
///
/// Equal identifiers always produce equal colors, in any process on any
/// platform. Distinct identifiers usually differ, but nothing prevents two of
/// them from landing on the same color.
pub fn derive_color(type_id: &str) -> Color32 {
    let hash = type_hash(type_id);
    let hex = hash % RGB_RANGE;

    let base = Color32::from_rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    );
    let color = lighter(base, LIGHTEN_PERCENT);

    tracing::debug!(type_id, hash, color = %to_hex(color), "derived connection color");
    color
}

/// Stable 64-bit hash of an identifier.
///
/// FNV-1a over the UTF-8 bytes followed by a murmur-style finalizer. The
/// finalizer matters: short names that differ only in their last byte would
/// otherwise share most of their high bits, and those become the red channel.
pub fn type_hash(type_id: &str) -> u64 {
    let mut hash = type_id.bytes().fold(FNV_OFFSET, |acc, b| {
        (acc ^ b as u64).wrapping_mul(FNV_PRIME)
    });
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51_afd7_ed55_8ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    hash ^= hash >> 33;
    hash
}

/// Brighten a color by `percent` in HSV space, keeping its hue.
///
/// The value channel is scaled by `percent / 100`. Whatever would overflow
/// past full value is taken out of the saturation instead, so very bright
/// colors drift towards white rather than clipping. Factors at or below 100
/// return the color unchanged. Alpha is preserved.
pub fn lighter(color: Color32, percent: u32) -> Color32 {
    if percent <= 100 {
        return color;
    }

    let rgb = [
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    ];
    let (h, mut s, v) = hsv_from_rgb(rgb);

    let mut v = v * percent as f32 / 100.0;
    if v > 1.0 {
        s = (s - (v - 1.0)).max(0.0);
        v = 1.0;
    }

    let [r, g, b] = rgb_from_hsv((h, s, v));
    Color32::from_rgba_unmultiplied(to_channel(r), to_channel(g), to_channel(b), color.a())
}

/// Format a color as `#rrggbb`, or `#rrggbbaa` when it is not fully opaque.
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

fn to_channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
