//! OpenGL enum values used by KTX headers, and their names for log output.

use core::fmt;

pub const GL_BYTE: u32 = 0x1400;
pub const GL_UNSIGNED_BYTE: u32 = 0x1401;
pub const GL_SHORT: u32 = 0x1402;
pub const GL_UNSIGNED_SHORT: u32 = 0x1403;
pub const GL_INT: u32 = 0x1404;
pub const GL_UNSIGNED_INT: u32 = 0x1405;
pub const GL_FLOAT: u32 = 0x1406;
pub const GL_UNSIGNED_BYTE_3_3_2: u32 = 0x8032;
pub const GL_UNSIGNED_SHORT_4_4_4_4: u32 = 0x8033;
pub const GL_UNSIGNED_SHORT_5_5_5_1: u32 = 0x8034;
pub const GL_UNSIGNED_INT_8_8_8_8: u32 = 0x8035;
pub const GL_UNSIGNED_INT_10_10_10_2: u32 = 0x8036;
pub const GL_UNSIGNED_SHORT_5_6_5: u32 = 0x8363;

pub const GL_RED: u32 = 0x1903;
pub const GL_GREEN: u32 = 0x1904;
pub const GL_BLUE: u32 = 0x1905;
pub const GL_ALPHA: u32 = 0x1906;
pub const GL_RGB: u32 = 0x1907;
pub const GL_RGBA: u32 = 0x1908;
pub const GL_LUMINANCE: u32 = 0x1909;
pub const GL_LUMINANCE_ALPHA: u32 = 0x190A;
pub const GL_BGRA: u32 = 0x80E1;

pub const GL_RGB8: u32 = 0x8051;
pub const GL_RGBA4: u32 = 0x8056;
pub const GL_RGB5_A1: u32 = 0x8057;
pub const GL_RGBA8: u32 = 0x8058;
pub const GL_LUMINANCE8: u32 = 0x8040;
pub const GL_LUMINANCE8_ALPHA8: u32 = 0x8045;
pub const GL_R8: u32 = 0x8229;
pub const GL_RGB565: u32 = 0x8D62;
pub const GL_ETC1_RGB8_OES: u32 = 0x8D64;

fn type_str(v: u32) -> Option<&'static str> {
    Some(match v {
        GL_BYTE => "GL_BYTE",
        GL_UNSIGNED_BYTE => "GL_UNSIGNED_BYTE",
        GL_SHORT => "GL_SHORT",
        GL_UNSIGNED_SHORT => "GL_UNSIGNED_SHORT",
        GL_INT => "GL_INT",
        GL_UNSIGNED_INT => "GL_UNSIGNED_INT",
        GL_FLOAT => "GL_FLOAT",
        GL_UNSIGNED_BYTE_3_3_2 => "GL_UNSIGNED_BYTE_3_3_2",
        GL_UNSIGNED_SHORT_4_4_4_4 => "GL_UNSIGNED_SHORT_4_4_4_4",
        GL_UNSIGNED_SHORT_5_5_5_1 => "GL_UNSIGNED_SHORT_5_5_5_1",
        GL_UNSIGNED_INT_8_8_8_8 => "GL_UNSIGNED_INT_8_8_8_8",
        GL_UNSIGNED_INT_10_10_10_2 => "GL_UNSIGNED_INT_10_10_10_2",
        GL_UNSIGNED_SHORT_5_6_5 => "GL_UNSIGNED_SHORT_5_6_5",
        _ => return None,
    })
}

fn format_str(v: u32) -> Option<&'static str> {
    Some(match v {
        GL_RED => "GL_RED",
        GL_GREEN => "GL_GREEN",
        GL_BLUE => "GL_BLUE",
        GL_ALPHA => "GL_ALPHA",
        GL_RGB => "GL_RGB",
        GL_RGBA => "GL_RGBA",
        GL_LUMINANCE => "GL_LUMINANCE",
        GL_LUMINANCE_ALPHA => "GL_LUMINANCE_ALPHA",
        GL_BGRA => "GL_BGRA",
        GL_RGB8 => "GL_RGB8",
        GL_RGBA4 => "GL_RGBA4",
        GL_RGB5_A1 => "GL_RGB5_A1",
        GL_RGBA8 => "GL_RGBA8",
        GL_LUMINANCE8 => "GL_LUMINANCE8",
        GL_LUMINANCE8_ALPHA8 => "GL_LUMINANCE8_ALPHA8",
        GL_R8 => "GL_R8",
        GL_RGB565 => "GL_RGB565",
        GL_ETC1_RGB8_OES => "GL_ETC1_RGB8_OES",
        _ => return None,
    })
}

/// Displays a `glType` value by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeName(pub u32);

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match type_str(self.0) {
            Some(s) => f.write_str(s),
            None => write!(f, "Invalid type(0x{:X})", self.0),
        }
    }
}

/// Displays a `glFormat`, `glInternalFormat` or `glBaseInternalFormat` value by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatName(pub u32);

impl fmt::Display for FormatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match format_str(self.0) {
            Some(s) => f.write_str(s),
            None => write!(f, "Invalid format(0x{:X})", self.0),
        }
    }
}
