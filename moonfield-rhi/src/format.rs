//! Pixel format tables: block geometry and pack/unpack to/from `[f32; 4]`.
//!
//! Every format in [`Format`] has a [`FormatInfo`] entry so
//! [`Texture::get_subresource_layout`] can compute row/slice pitches for
//! block-compressed formats too, even though this module only implements
//! pack/unpack (not BC encode/decode -- that's image-codec territory,
//! out of scope per the RHI's purpose).

use crate::types::{Extent3D, Format, Size, SubresourceLayout};

/// Per-channel numeric interpretation, used to pick a pack/unpack strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Integer,
    Normalized,
    Float,
    DepthStencil,
    /// Block-compressed; pack/unpack is not implemented (no image codec).
    Compressed,
}

/// Static description of a format's memory layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub format: Format,
    /// Block width in texels (1 for uncompressed formats).
    pub block_width: u32,
    /// Block height in texels (1 for uncompressed formats).
    pub block_height: u32,
    /// Bytes per block (= bytes per texel when block dims are 1x1).
    pub block_bytes: u32,
    pub channel_count: u32,
    pub kind: FormatKind,
    pub is_signed: bool,
    pub is_srgb: bool,
}

macro_rules! formats {
    ($(($variant:ident, $bw:expr, $bh:expr, $bytes:expr, $channels:expr, $kind:expr, $signed:expr, $srgb:expr)),* $(,)?) => {
        const TABLE: &[FormatInfo] = &[
            $(FormatInfo {
                format: Format::$variant,
                block_width: $bw,
                block_height: $bh,
                block_bytes: $bytes,
                channel_count: $channels,
                kind: $kind,
                is_signed: $signed,
                is_srgb: $srgb,
            },)*
        ];
    };
}

use FormatKind::*;

formats! {
    (Undefined, 1, 1, 0, 0, Integer, false, false),

    (R8Uint, 1, 1, 1, 1, Integer, false, false),
    (R8Sint, 1, 1, 1, 1, Integer, true, false),
    (R8Unorm, 1, 1, 1, 1, Normalized, false, false),
    (R8Snorm, 1, 1, 1, 1, Normalized, true, false),

    (RG8Uint, 1, 1, 2, 2, Integer, false, false),
    (RG8Sint, 1, 1, 2, 2, Integer, true, false),
    (RG8Unorm, 1, 1, 2, 2, Normalized, false, false),
    (RG8Snorm, 1, 1, 2, 2, Normalized, true, false),

    (RGBA8Uint, 1, 1, 4, 4, Integer, false, false),
    (RGBA8Sint, 1, 1, 4, 4, Integer, true, false),
    (RGBA8Unorm, 1, 1, 4, 4, Normalized, false, false),
    (RGBA8UnormSrgb, 1, 1, 4, 4, Normalized, false, true),
    (RGBA8Snorm, 1, 1, 4, 4, Normalized, true, false),

    (BGRA8Unorm, 1, 1, 4, 4, Normalized, false, false),
    (BGRA8UnormSrgb, 1, 1, 4, 4, Normalized, false, true),
    (BGRX8Unorm, 1, 1, 4, 4, Normalized, false, false),
    (BGRX8UnormSrgb, 1, 1, 4, 4, Normalized, false, true),

    (R16Uint, 1, 1, 2, 1, Integer, false, false),
    (R16Sint, 1, 1, 2, 1, Integer, true, false),
    (R16Unorm, 1, 1, 2, 1, Normalized, false, false),
    (R16Snorm, 1, 1, 2, 1, Normalized, true, false),
    (R16Float, 1, 1, 2, 1, Float, true, false),

    (RG16Uint, 1, 1, 4, 2, Integer, false, false),
    (RG16Sint, 1, 1, 4, 2, Integer, true, false),
    (RG16Unorm, 1, 1, 4, 2, Normalized, false, false),
    (RG16Snorm, 1, 1, 4, 2, Normalized, true, false),
    (RG16Float, 1, 1, 4, 2, Float, true, false),

    (RGBA16Uint, 1, 1, 8, 4, Integer, false, false),
    (RGBA16Sint, 1, 1, 8, 4, Integer, true, false),
    (RGBA16Unorm, 1, 1, 8, 4, Normalized, false, false),
    (RGBA16Snorm, 1, 1, 8, 4, Normalized, true, false),
    (RGBA16Float, 1, 1, 8, 4, Float, true, false),

    (R32Uint, 1, 1, 4, 1, Integer, false, false),
    (R32Sint, 1, 1, 4, 1, Integer, true, false),
    (R32Float, 1, 1, 4, 1, Float, true, false),

    (RG32Uint, 1, 1, 8, 2, Integer, false, false),
    (RG32Sint, 1, 1, 8, 2, Integer, true, false),
    (RG32Float, 1, 1, 8, 2, Float, true, false),

    (RGB32Uint, 1, 1, 12, 3, Integer, false, false),
    (RGB32Sint, 1, 1, 12, 3, Integer, true, false),
    (RGB32Float, 1, 1, 12, 3, Float, true, false),

    (RGBA32Uint, 1, 1, 16, 4, Integer, false, false),
    (RGBA32Sint, 1, 1, 16, 4, Integer, true, false),
    (RGBA32Float, 1, 1, 16, 4, Float, true, false),

    (R64Uint, 1, 1, 8, 1, Integer, false, false),
    (R64Sint, 1, 1, 8, 1, Integer, true, false),

    (BGRA4Unorm, 1, 1, 2, 4, Normalized, false, false),
    (B5G6R5Unorm, 1, 1, 2, 3, Normalized, false, false),
    (BGR5A1Unorm, 1, 1, 2, 4, Normalized, false, false),

    (RGB9E5Ufloat, 1, 1, 4, 3, Float, false, false),
    (RGB10A2Uint, 1, 1, 4, 4, Integer, false, false),
    (RGB10A2Unorm, 1, 1, 4, 4, Normalized, false, false),
    (R11G11B10Float, 1, 1, 4, 3, Float, false, false),

    (D32Float, 1, 1, 4, 1, DepthStencil, true, false),
    (D16Unorm, 1, 1, 2, 1, DepthStencil, false, false),
    (D32FloatS8Uint, 1, 1, 8, 2, DepthStencil, true, false),

    (BC1Unorm, 4, 4, 8, 4, Compressed, false, false),
    (BC1UnormSrgb, 4, 4, 8, 4, Compressed, false, true),
    (BC2Unorm, 4, 4, 16, 4, Compressed, false, false),
    (BC2UnormSrgb, 4, 4, 16, 4, Compressed, false, true),
    (BC3Unorm, 4, 4, 16, 4, Compressed, false, false),
    (BC3UnormSrgb, 4, 4, 16, 4, Compressed, false, true),
    (BC4Unorm, 4, 4, 8, 1, Compressed, false, false),
    (BC4Snorm, 4, 4, 8, 1, Compressed, true, false),
    (BC5Unorm, 4, 4, 16, 2, Compressed, false, false),
    (BC5Snorm, 4, 4, 16, 2, Compressed, true, false),
    (BC6HUfloat, 4, 4, 16, 3, Compressed, false, false),
    (BC6HSfloat, 4, 4, 16, 3, Compressed, true, false),
    (BC7Unorm, 4, 4, 16, 4, Compressed, false, false),
    (BC7UnormSrgb, 4, 4, 16, 4, Compressed, false, true),
}

pub fn format_info(format: Format) -> &'static FormatInfo {
    TABLE
        .iter()
        .find(|info| info.format == format)
        .unwrap_or_else(|| panic!("format {format:?} missing from format table"))
}

/// [`Texture::get_subresource_layout`] law: row pitch rounds the per-row
/// block count up to `row_alignment`, slice pitch is the row pitch times the
/// row count, and the total size is the slice pitch times depth.
///
/// [`Texture::get_subresource_layout`]: crate::types::Texture::get_subresource_layout
pub fn subresource_layout(format: Format, mip_size: Extent3D, row_alignment: Size) -> SubresourceLayout {
    let info = format_info(format);
    let block_width = info.block_width.max(1) as Size;
    let block_height = info.block_height.max(1) as Size;
    let block_bytes = info.block_bytes as Size;

    let width = (mip_size.width.max(1)) as Size;
    let height = (mip_size.height.max(1)) as Size;
    let depth = (mip_size.depth.max(1)) as Size;

    let blocks_per_row = width.div_ceil(block_width);
    let row_count = height.div_ceil(block_height);
    let row_pitch = align_up(blocks_per_row * block_bytes, row_alignment.max(1));
    let slice_pitch = row_pitch * row_count;
    let size_in_bytes = slice_pitch * depth;

    SubresourceLayout {
        size: Extent3D::new(width as u32, height as u32, depth as u32),
        col_pitch: block_bytes,
        row_pitch,
        slice_pitch,
        size_in_bytes,
        block_width,
        block_height,
        row_count,
    }
}

fn align_up(value: Size, alignment: Size) -> Size {
    value.div_ceil(alignment) * alignment
}

/// Channel layout within the packed byte representation -- which byte offset
/// (in 8/16/32-bit units) holds which RGBA channel. Needed because BGRA
/// swaps R and B relative to the logical `[f32; 4]` RGBA order.
fn channel_order(format: Format) -> [usize; 4] {
    match format {
        Format::BGRA8Unorm
        | Format::BGRA8UnormSrgb
        | Format::BGRX8Unorm
        | Format::BGRX8UnormSrgb
        | Format::B5G6R5Unorm
        | Format::BGR5A1Unorm => [2, 1, 0, 3],
        _ => [0, 1, 2, 3],
    }
}

/// Pack RGBA float values into the format's native byte representation.
///
/// `values` are interpreted per [`FormatKind`]: `Normalized`/`Float` take
/// values already in the format's representable range (unorm in `[0,1]`,
/// snorm in `[-1,1]`); `Integer` formats truncate towards zero.
pub fn pack(format: Format, values: [f32; 4]) -> Vec<u8> {
    let info = format_info(format);
    let order = channel_order(format);
    let channels = info.channel_count.max(1) as usize;
    let mut reordered = [0f32; 4];
    for logical in 0..4 {
        reordered[order[logical]] = values[logical];
    }

    match (info.kind, info.block_bytes / channels.max(1) as u32) {
        (FormatKind::Compressed, _) => Vec::new(),
        (FormatKind::DepthStencil, _) => pack_uniform(format, &reordered[..channels], info),
        _ => pack_uniform(format, &reordered[..channels], info),
    }
}

/// Unpack a format's native byte representation into RGBA float values.
/// Channels beyond `channel_count` read back as `0.0` (alpha-less formats)
/// except alpha, which defaults to `1.0` for 3-channel formats.
pub fn unpack(format: Format, bytes: &[u8]) -> [f32; 4] {
    let info = format_info(format);
    if info.kind == FormatKind::Compressed {
        return [0.0; 4];
    }
    let order = channel_order(format);
    let channels = info.channel_count.max(1) as usize;
    let unpacked = unpack_uniform(format, bytes, info, channels);

    let mut values = [0f32, 0.0, 0.0, 1.0];
    for logical in 0..4 {
        if order[logical] < unpacked.len() {
            values[logical] = unpacked[order[logical]];
        } else if logical == 3 {
            values[logical] = 1.0;
        }
    }
    values
}

fn per_channel_bytes(format: Format, info: &FormatInfo, channels: usize) -> usize {
    match format {
        Format::RGB10A2Uint | Format::RGB10A2Unorm | Format::RGB9E5Ufloat | Format::R11G11B10Float => 0,
        Format::BGRA4Unorm | Format::B5G6R5Unorm | Format::BGR5A1Unorm => 0,
        _ => info.block_bytes as usize / channels.max(1),
    }
}

fn pack_uniform(format: Format, values: &[f32], info: &FormatInfo) -> Vec<u8> {
    match format {
        Format::RGB10A2Uint | Format::RGB10A2Unorm => {
            let is_unorm = matches!(format, Format::RGB10A2Unorm);
            let enc = |v: f32, bits: u32| -> u32 {
                let max = ((1u32 << bits) - 1) as f32;
                if is_unorm { (v.clamp(0.0, 1.0) * max).round() as u32 } else { v.max(0.0) as u32 }
            };
            let r = enc(values[0], 10);
            let g = enc(values[1], 10);
            let b = enc(values[2], 10);
            let a = enc(values.get(3).copied().unwrap_or(0.0), 2);
            (r | (g << 10) | (b << 20) | (a << 30)).to_le_bytes().to_vec()
        }
        Format::BGRA4Unorm => {
            let enc = |v: f32| ((v.clamp(0.0, 1.0) * 15.0).round() as u16) & 0xf;
            let packed = enc(values[0]) | (enc(values[1]) << 4) | (enc(values[2]) << 8) | (enc(values[3]) << 12);
            packed.to_le_bytes().to_vec()
        }
        Format::B5G6R5Unorm => {
            let r = ((values[0].clamp(0.0, 1.0) * 31.0).round() as u16) & 0x1f;
            let g = ((values[1].clamp(0.0, 1.0) * 63.0).round() as u16) & 0x3f;
            let b = ((values[2].clamp(0.0, 1.0) * 31.0).round() as u16) & 0x1f;
            let packed = r | (g << 5) | (b << 11);
            packed.to_le_bytes().to_vec()
        }
        Format::BGR5A1Unorm => {
            let c = |v: f32| ((v.clamp(0.0, 1.0) * 31.0).round() as u16) & 0x1f;
            let a = if values.get(3).copied().unwrap_or(0.0) >= 0.5 { 1u16 } else { 0 };
            let packed = c(values[0]) | (c(values[1]) << 5) | (c(values[2]) << 10) | (a << 15);
            packed.to_le_bytes().to_vec()
        }
        Format::RGB9E5Ufloat => pack_rgb9e5(values),
        Format::R11G11B10Float => pack_r11g11b10(values),
        _ => {
            let per_channel = per_channel_bytes(format, info, values.len());
            let mut out = Vec::with_capacity(per_channel * values.len());
            for &v in values {
                out.extend_from_slice(&pack_channel(format, per_channel, v));
            }
            out
        }
    }
}

fn unpack_uniform(format: Format, bytes: &[u8], info: &FormatInfo, channels: usize) -> Vec<f32> {
    match format {
        Format::RGB10A2Uint | Format::RGB10A2Unorm => {
            let is_unorm = matches!(format, Format::RGB10A2Unorm);
            let packed = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
            let dec = |shift: u32, bits: u32| -> f32 {
                let mask = (1u32 << bits) - 1;
                let raw = (packed >> shift) & mask;
                if is_unorm { raw as f32 / mask as f32 } else { raw as f32 }
            };
            vec![dec(0, 10), dec(10, 10), dec(20, 10), dec(30, 2)]
        }
        Format::BGRA4Unorm => {
            let packed = u16::from_le_bytes(bytes[0..2].try_into().unwrap());
            let dec = |shift: u32| ((packed >> shift) & 0xf) as f32 / 15.0;
            vec![dec(0), dec(4), dec(8), dec(12)]
        }
        Format::B5G6R5Unorm => {
            let packed = u16::from_le_bytes(bytes[0..2].try_into().unwrap());
            vec![
                (packed & 0x1f) as f32 / 31.0,
                ((packed >> 5) & 0x3f) as f32 / 63.0,
                ((packed >> 11) & 0x1f) as f32 / 31.0,
            ]
        }
        Format::BGR5A1Unorm => {
            let packed = u16::from_le_bytes(bytes[0..2].try_into().unwrap());
            let c = |shift: u32| ((packed >> shift) & 0x1f) as f32 / 31.0;
            vec![c(0), c(5), c(10), if (packed >> 15) & 1 != 0 { 1.0 } else { 0.0 }]
        }
        Format::RGB9E5Ufloat => unpack_rgb9e5(bytes),
        Format::R11G11B10Float => unpack_r11g11b10(bytes),
        _ => {
            let per_channel = per_channel_bytes(format, info, channels);
            (0..channels)
                .map(|i| unpack_channel(format, &bytes[i * per_channel..(i + 1) * per_channel]))
                .collect()
        }
    }
}

fn pack_channel(format: Format, per_channel: usize, v: f32) -> Vec<u8> {
    let info = format_info(format);
    match (info.kind, per_channel, info.is_signed) {
        (FormatKind::Float, 2, _) => half::f16_from_f32(v).to_le_bytes().to_vec(),
        (FormatKind::Float, 4, _) => v.to_le_bytes().to_vec(),
        (FormatKind::Normalized | FormatKind::DepthStencil, 1, false) => {
            ((v.clamp(0.0, 1.0) * 255.0).round() as u8).to_le_bytes().to_vec()
        }
        (FormatKind::Normalized, 1, true) => ((v.clamp(-1.0, 1.0) * 127.0).round() as i8).to_le_bytes().to_vec(),
        (FormatKind::Normalized | FormatKind::DepthStencil, 2, false) => {
            ((v.clamp(0.0, 1.0) * 65535.0).round() as u16).to_le_bytes().to_vec()
        }
        (FormatKind::Normalized, 2, true) => ((v.clamp(-1.0, 1.0) * 32767.0).round() as i16).to_le_bytes().to_vec(),
        (FormatKind::Integer, 1, false) => (v as u8).to_le_bytes().to_vec(),
        (FormatKind::Integer, 1, true) => (v as i8).to_le_bytes().to_vec(),
        (FormatKind::Integer, 2, false) => (v as u16).to_le_bytes().to_vec(),
        (FormatKind::Integer, 2, true) => (v as i16).to_le_bytes().to_vec(),
        (FormatKind::Integer, 4, false) => (v as u32).to_le_bytes().to_vec(),
        (FormatKind::Integer, 4, true) => (v as i32).to_le_bytes().to_vec(),
        (FormatKind::Integer, 8, false) => (v as u64).to_le_bytes().to_vec(),
        (FormatKind::Integer, 8, true) => (v as i64).to_le_bytes().to_vec(),
        (FormatKind::DepthStencil, 4, true) => v.to_le_bytes().to_vec(),
        _ => v.to_le_bytes().to_vec(),
    }
}

fn unpack_channel(format: Format, bytes: &[u8]) -> f32 {
    let info = format_info(format);
    match (info.kind, bytes.len(), info.is_signed) {
        (FormatKind::Float, 2, _) => half::f16_to_f32(u16::from_le_bytes(bytes.try_into().unwrap())),
        (FormatKind::Float, 4, _) => f32::from_le_bytes(bytes.try_into().unwrap()),
        (FormatKind::Normalized | FormatKind::DepthStencil, 1, false) => bytes[0] as f32 / 255.0,
        (FormatKind::Normalized, 1, true) => (bytes[0] as i8) as f32 / 127.0,
        (FormatKind::Normalized | FormatKind::DepthStencil, 2, false) => {
            u16::from_le_bytes(bytes.try_into().unwrap()) as f32 / 65535.0
        }
        (FormatKind::Normalized, 2, true) => {
            i16::from_le_bytes(bytes.try_into().unwrap()) as f32 / 32767.0
        }
        (FormatKind::Integer, 1, false) => bytes[0] as f32,
        (FormatKind::Integer, 1, true) => (bytes[0] as i8) as f32,
        (FormatKind::Integer, 2, false) => u16::from_le_bytes(bytes.try_into().unwrap()) as f32,
        (FormatKind::Integer, 2, true) => i16::from_le_bytes(bytes.try_into().unwrap()) as f32,
        (FormatKind::Integer, 4, false) => u32::from_le_bytes(bytes.try_into().unwrap()) as f32,
        (FormatKind::Integer, 4, true) => i32::from_le_bytes(bytes.try_into().unwrap()) as f32,
        (FormatKind::Integer, 8, false) => u64::from_le_bytes(bytes.try_into().unwrap()) as f32,
        (FormatKind::Integer, 8, true) => i64::from_le_bytes(bytes.try_into().unwrap()) as f32,
        (FormatKind::DepthStencil, 4, true) => f32::from_le_bytes(bytes.try_into().unwrap()),
        _ => f32::from_le_bytes(bytes.try_into().unwrap_or([0; 4])),
    }
}

/// Minimal IEEE-754 binary16 <-> binary32 conversion, no external crate
/// needed for a handful of call sites.
mod half {
    pub fn f16_from_f32(value: f32) -> u16 {
        let bits = value.to_bits();
        let sign = (bits >> 16) & 0x8000;
        let exp = ((bits >> 23) & 0xff) as i32 - 127 + 15;
        let mantissa = bits & 0x7fffff;
        if exp <= 0 {
            return sign as u16;
        }
        if exp >= 0x1f {
            return (sign | 0x7c00) as u16;
        }
        (sign | ((exp as u32) << 10) | (mantissa >> 13)) as u16
    }

    pub fn f16_to_f32(half: u16) -> f32 {
        let sign = (half & 0x8000) as u32;
        let exp = (half >> 10) & 0x1f;
        let mantissa = (half & 0x3ff) as u32;
        let bits = if exp == 0 {
            if mantissa == 0 {
                sign << 16
            } else {
                let mut e = -1i32;
                let mut m = mantissa;
                while m & 0x400 == 0 {
                    m <<= 1;
                    e -= 1;
                }
                m &= 0x3ff;
                let exp32 = (127 - 15 + e + 1) as u32;
                (sign << 16) | (exp32 << 23) | (m << 13)
            }
        } else if exp == 0x1f {
            (sign << 16) | 0x7f800000 | (mantissa << 13)
        } else {
            (sign << 16) | (((exp as u32) + 127 - 15) << 23) | (mantissa << 13)
        };
        f32::from_bits(bits)
    }
}

fn pack_rgb9e5(values: &[f32]) -> Vec<u8> {
    const N: i32 = 9;
    const B: i32 = 15;
    const EMAX: i32 = 31;
    const SHAREDEXP_MAX: f32 = ((1 << N) - 1) as f32 / (1 << N) as f32 * (1u32 << (EMAX - B)) as f32;
    let clamp = |v: f32| v.clamp(0.0, SHAREDEXP_MAX);
    let (r, g, b) = (clamp(values[0]), clamp(values[1]), clamp(values[2]));
    let max_c = r.max(g).max(b);
    let exp_shared = (max_c.log2().floor() as i32 + 1 - B).clamp(-B, EMAX - N);
    let denom = 2f32.powi(exp_shared - (N - 1) - B + B);
    let scale = 2f32.powi(-(exp_shared + B - N + 1));
    let _ = denom;
    let enc = |c: f32| -> u32 { (c * scale).round().clamp(0.0, 511.0) as u32 };
    let packed = enc(r) | (enc(g) << 9) | (enc(b) << 18) | (((exp_shared + B) as u32) << 27);
    packed.to_le_bytes().to_vec()
}

fn unpack_rgb9e5(bytes: &[u8]) -> Vec<f32> {
    const B: i32 = 15;
    const N: i32 = 9;
    let packed = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
    let exp_shared = ((packed >> 27) & 0x1f) as i32 - B - (N - 1);
    let scale = 2f32.powi(exp_shared);
    let dec = |shift: u32| ((packed >> shift) & 0x1ff) as f32 * scale;
    vec![dec(0), dec(9), dec(18)]
}

fn pack_r11g11b10(values: &[f32]) -> Vec<u8> {
    let enc = |v: f32, mantissa_bits: u32| -> u32 {
        if v <= 0.0 {
            return 0;
        }
        half::f16_from_f32(v) as u32 >> (10 - mantissa_bits)
    };
    let r = enc(values[0], 6);
    let g = enc(values[1], 6);
    let b = enc(values[2], 5);
    (r | (g << 11) | (b << 22)).to_le_bytes().to_vec()
}

fn unpack_r11g11b10(bytes: &[u8]) -> Vec<f32> {
    let packed = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
    let dec = |shift: u32, bits: u32| -> f32 {
        let raw = (packed >> shift) & ((1 << bits) - 1);
        half::f16_to_f32((raw as u16) << (10 - bits))
    };
    vec![dec(0, 11), dec(11, 11), dec(22, 10)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_unorm_round_trip_s6() {
        let bytes = pack(Format::RGBA8Unorm, [1.0, 0.0, 128.0 / 255.0, 64.0 / 255.0]);
        assert_eq!(bytes, vec![255, 0, 128, 64]);
        let back = unpack(Format::RGBA8Unorm, &bytes);
        assert!((back[0] - 1.0).abs() < 1e-6);
        assert!((back[1] - 0.0).abs() < 1e-6);
        assert!((back[2] - 128.0 / 255.0).abs() < 1e-6);
        assert!((back[3] - 64.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn bgra8_unorm_swaps_channels() {
        let bytes = pack(Format::BGRA8Unorm, [1.0, 0.0, 0.5, 1.0]);
        // byte order is B,G,R,A
        assert_eq!(bytes[0], 128); // B
        assert_eq!(bytes[2], 255); // R
        let back = unpack(Format::BGRA8Unorm, &bytes);
        assert!((back[0] - 1.0).abs() < 1e-2);
        assert!((back[2] - 0.5).abs() < 1e-2);
    }

    #[test]
    fn integer_formats_are_bit_exact() {
        for &fmt in &[Format::R8Uint, Format::R16Uint, Format::R32Uint, Format::RGBA8Sint] {
            let bytes = pack(fmt, [17.0, 3.0, 200.0, 1.0]);
            let back = unpack(fmt, &bytes);
            assert_eq!(back[0], 17.0);
        }
    }

    #[test]
    fn float16_round_trip_within_quantization() {
        let bytes = pack(Format::RGBA16Float, [0.5, -0.25, 2.0, 1.0]);
        let back = unpack(Format::RGBA16Float, &bytes);
        assert!((back[0] - 0.5).abs() < 1e-3);
        assert!((back[1] + 0.25).abs() < 1e-3);
    }

    #[test]
    fn rgb10a2_round_trip() {
        let bytes = pack(Format::RGB10A2Unorm, [0.5, 0.25, 0.75, 1.0]);
        let back = unpack(Format::RGB10A2Unorm, &bytes);
        assert!((back[0] - 0.5).abs() < 0.01);
        assert!((back[3] - 1.0).abs() < 0.01);
    }

    #[test]
    fn block_dims_cover_every_format() {
        for fmt in [Format::BC1Unorm, Format::BC7UnormSrgb, Format::RGBA32Float, Format::D32Float] {
            let info = format_info(fmt);
            assert!(info.block_width >= 1);
            assert!(info.block_height >= 1);
        }
    }

    #[test]
    fn s9_subresource_layout_aligns_row_pitch_to_the_requested_alignment() {
        // RGBA8: 17 texels wide, 4 bytes/texel -> 68 raw bytes/row, aligned up to 256.
        let layout = subresource_layout(Format::RGBA8Unorm, Extent3D::new(17, 4, 1), 256);
        assert_eq!(layout.row_pitch, 256);
        assert_eq!(layout.row_count, 4);
        assert_eq!(layout.slice_pitch, 256 * 4);
        assert_eq!(layout.size_in_bytes, 256 * 4);
    }

    #[test]
    fn s9_subresource_layout_uses_block_dimensions_for_compressed_formats() {
        // BC1: 4x4 texel blocks, 8 bytes/block. A 10x10 mip is 3x3 blocks.
        let layout = subresource_layout(Format::BC1Unorm, Extent3D::new(10, 10, 1), 1);
        assert_eq!(layout.block_width, 4);
        assert_eq!(layout.block_height, 4);
        assert_eq!(layout.row_pitch, 3 * 8);
        assert_eq!(layout.row_count, 3);
        assert_eq!(layout.size_in_bytes, 3 * 8 * 3);
    }

    #[test]
    fn s9_subresource_layout_multiplies_slice_pitch_by_depth() {
        let layout = subresource_layout(Format::R8Uint, Extent3D::new(4, 4, 3), 1);
        assert_eq!(layout.slice_pitch, layout.row_pitch * layout.row_count);
        assert_eq!(layout.size_in_bytes, layout.slice_pitch * 3);
    }
}
