/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::convert_error::{check_geometry, ConvertError, MismatchedSize};
use crate::format_support::{PackedYuvLayout, PlanarLayout, RgbLayout};
use std::fmt::{Display, Formatter};

/// Closed catalog of pixel formats the engine converts between.
///
/// Discriminants are stable wire codes: the YUV family lives in `0x1000`,
/// the RGB family in `0x2000`.
#[repr(u16)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PixelFormat {
    /// Planar 4:2:0, planes Y, U, V
    Yuv420p = 0x1001,
    /// Planar 4:2:0 with chroma planes stored V first: Y, V, U
    Yv12 = 0x1002,
    /// Planar 4:1:1, chroma is a quarter of the width at full height
    Yuv411p = 0x1003,
    Yuv422p = 0x1004,
    Yuv444p = 0x1005,
    /// Packed 4:2:2, bytes Y0 U Y1 V
    Yuy2 = 0x1006,
    /// Packed 4:2:2, bytes U Y0 V Y1
    Uyvy = 0x1007,
    /// Packed 4:2:2, bytes Y0 V Y1 U
    Yvyu = 0x1008,
    /// Limited range luma only, black is 16
    Y8 = 0x1009,
    Rgb24 = 0x2001,
    Bgr24 = 0x2002,
    Rgba32 = 0x2003,
    Abgr32 = 0x2004,
    Argb32 = 0x2005,
    Bgra32 = 0x2006,
    /// Full range gray, black is 0
    Gray8 = 0x2007,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FormatFamily {
    YuvPlanar,
    YuvPacked,
    RgbPacked,
    Gray,
}

/// Internal kernel-facing view of a format
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum FormatLayout {
    Planar(PlanarLayout),
    Packed(PackedYuvLayout),
    Rgb(RgbLayout),
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 16] = [
        PixelFormat::Yuv420p,
        PixelFormat::Yv12,
        PixelFormat::Yuv411p,
        PixelFormat::Yuv422p,
        PixelFormat::Yuv444p,
        PixelFormat::Yuy2,
        PixelFormat::Uyvy,
        PixelFormat::Yvyu,
        PixelFormat::Y8,
        PixelFormat::Rgb24,
        PixelFormat::Bgr24,
        PixelFormat::Rgba32,
        PixelFormat::Abgr32,
        PixelFormat::Argb32,
        PixelFormat::Bgra32,
        PixelFormat::Gray8,
    ];

    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    pub const fn from_code(code: u16) -> Option<PixelFormat> {
        match code {
            0x1001 => Some(PixelFormat::Yuv420p),
            0x1002 => Some(PixelFormat::Yv12),
            0x1003 => Some(PixelFormat::Yuv411p),
            0x1004 => Some(PixelFormat::Yuv422p),
            0x1005 => Some(PixelFormat::Yuv444p),
            0x1006 => Some(PixelFormat::Yuy2),
            0x1007 => Some(PixelFormat::Uyvy),
            0x1008 => Some(PixelFormat::Yvyu),
            0x1009 => Some(PixelFormat::Y8),
            0x2001 => Some(PixelFormat::Rgb24),
            0x2002 => Some(PixelFormat::Bgr24),
            0x2003 => Some(PixelFormat::Rgba32),
            0x2004 => Some(PixelFormat::Abgr32),
            0x2005 => Some(PixelFormat::Argb32),
            0x2006 => Some(PixelFormat::Bgra32),
            0x2007 => Some(PixelFormat::Gray8),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PixelFormat::Yuv420p => "YUV420P",
            PixelFormat::Yv12 => "YV12",
            PixelFormat::Yuv411p => "YUV411P",
            PixelFormat::Yuv422p => "YUV422P",
            PixelFormat::Yuv444p => "YUV444P",
            PixelFormat::Yuy2 => "YUY2",
            PixelFormat::Uyvy => "UYVY",
            PixelFormat::Yvyu => "YVYU",
            PixelFormat::Y8 => "Y8",
            PixelFormat::Rgb24 => "RGB24",
            PixelFormat::Bgr24 => "BGR24",
            PixelFormat::Rgba32 => "RGBA32",
            PixelFormat::Abgr32 => "ABGR32",
            PixelFormat::Argb32 => "ARGB32",
            PixelFormat::Bgra32 => "BGRA32",
            PixelFormat::Gray8 => "GRAY8",
        }
    }

    pub const fn family(self) -> FormatFamily {
        match self {
            PixelFormat::Yuv420p
            | PixelFormat::Yv12
            | PixelFormat::Yuv411p
            | PixelFormat::Yuv422p
            | PixelFormat::Yuv444p => FormatFamily::YuvPlanar,
            PixelFormat::Yuy2 | PixelFormat::Uyvy | PixelFormat::Yvyu => FormatFamily::YuvPacked,
            PixelFormat::Y8 | PixelFormat::Gray8 => FormatFamily::Gray,
            PixelFormat::Rgb24
            | PixelFormat::Bgr24
            | PixelFormat::Rgba32
            | PixelFormat::Abgr32
            | PixelFormat::Argb32
            | PixelFormat::Bgra32 => FormatFamily::RgbPacked,
        }
    }

    /// Whether samples are limited range YCbCr (true for the whole YUV family, Y8 included).
    pub const fn is_yuv(self) -> bool {
        (self as u16) & 0xF000 == 0x1000
    }

    pub const fn is_planar(self) -> bool {
        matches!(self.family(), FormatFamily::YuvPlanar)
    }

    pub const fn plane_count(self) -> usize {
        if self.is_planar() {
            3
        } else {
            1
        }
    }

    /// Horizontal and vertical chroma divisors. Formats without chroma report `(1, 1)`,
    /// packed 4:2:2 reports `(2, 1)`.
    pub const fn chroma_divisors(self) -> (u32, u32) {
        match self {
            PixelFormat::Yuv420p | PixelFormat::Yv12 => (2, 2),
            PixelFormat::Yuv411p => (4, 1),
            PixelFormat::Yuv422p | PixelFormat::Yuy2 | PixelFormat::Uyvy | PixelFormat::Yvyu => {
                (2, 1)
            }
            _ => (1, 1),
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(
            self,
            PixelFormat::Rgba32 | PixelFormat::Abgr32 | PixelFormat::Argb32 | PixelFormat::Bgra32
        )
    }

    /// Bytes per pixel of the first plane.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Yuy2 | PixelFormat::Uyvy | PixelFormat::Yvyu => 2,
            PixelFormat::Rgb24 | PixelFormat::Bgr24 => 3,
            PixelFormat::Rgba32 | PixelFormat::Abgr32 | PixelFormat::Argb32 | PixelFormat::Bgra32 => 4,
            _ => 1,
        }
    }

    pub(crate) const fn layout(self) -> FormatLayout {
        match self {
            PixelFormat::Yuv420p => FormatLayout::Planar(PlanarLayout::Yuv420),
            PixelFormat::Yv12 => FormatLayout::Planar(PlanarLayout::Yv12),
            PixelFormat::Yuv411p => FormatLayout::Planar(PlanarLayout::Yuv411),
            PixelFormat::Yuv422p => FormatLayout::Planar(PlanarLayout::Yuv422),
            PixelFormat::Yuv444p => FormatLayout::Planar(PlanarLayout::Yuv444),
            PixelFormat::Y8 => FormatLayout::Planar(PlanarLayout::Y8),
            PixelFormat::Yuy2 => FormatLayout::Packed(PackedYuvLayout::Yuyv),
            PixelFormat::Uyvy => FormatLayout::Packed(PackedYuvLayout::Uyvy),
            PixelFormat::Yvyu => FormatLayout::Packed(PackedYuvLayout::Yvyu),
            PixelFormat::Rgb24 => FormatLayout::Rgb(RgbLayout::Rgb24),
            PixelFormat::Bgr24 => FormatLayout::Rgb(RgbLayout::Bgr24),
            PixelFormat::Rgba32 => FormatLayout::Rgb(RgbLayout::Rgba32),
            PixelFormat::Abgr32 => FormatLayout::Rgb(RgbLayout::Abgr32),
            PixelFormat::Argb32 => FormatLayout::Rgb(RgbLayout::Argb32),
            PixelFormat::Bgra32 => FormatLayout::Rgb(RgbLayout::Bgra32),
            PixelFormat::Gray8 => FormatLayout::Rgb(RgbLayout::Gray8),
        }
    }

    /// Size in bytes of plane `index`, zero for planes the format does not have.
    pub const fn plane_size(self, width: u32, height: u32, index: usize) -> usize {
        let pixels = width as usize * height as usize;
        if index == 0 {
            return pixels * self.bytes_per_pixel();
        }
        if index < self.plane_count() {
            return self.chroma_plane_size(width, height);
        }
        0
    }

    /// Size of one chroma plane, zero for single plane formats
    pub const fn chroma_plane_size(self, width: u32, height: u32) -> usize {
        if !self.is_planar() {
            return 0;
        }
        let (h_div, v_div) = self.chroma_divisors();
        (width / h_div) as usize * (height / v_div) as usize
    }

    pub const fn frame_size(self, width: u32, height: u32) -> usize {
        self.plane_size(width, height, 0) + 2 * self.chroma_plane_size(width, height)
    }
}

impl Display for PixelFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn check_contiguous(
    len: usize,
    format: PixelFormat,
    width: u32,
    height: u32,
) -> Result<(), ConvertError> {
    check_geometry(format, width, height)?;
    let expected = format.frame_size(width, height);
    if len < expected {
        return Err(ConvertError::BufferSizeMismatch(MismatchedSize {
            expected,
            received: len,
        }));
    }
    Ok(())
}

/// Splits a contiguous frame (luma, then the format's first and second chroma
/// planes, no padding) into plane slices.
pub fn plane_pointers(
    buffer: &[u8],
    format: PixelFormat,
    width: u32,
    height: u32,
) -> Result<Vec<&[u8]>, ConvertError> {
    check_contiguous(buffer.len(), format, width, height)?;
    let mut planes = Vec::with_capacity(format.plane_count());
    let mut rest = buffer;
    for index in 0..format.plane_count() {
        let (head, tail) = rest.split_at(format.plane_size(width, height, index));
        planes.push(head);
        rest = tail;
    }
    Ok(planes)
}

/// Mutable counterpart of [plane_pointers].
pub fn plane_pointers_mut(
    buffer: &mut [u8],
    format: PixelFormat,
    width: u32,
    height: u32,
) -> Result<Vec<&mut [u8]>, ConvertError> {
    check_contiguous(buffer.len(), format, width, height)?;
    let mut planes = Vec::with_capacity(format.plane_count());
    let mut rest = buffer;
    for index in 0..format.plane_count() {
        let (head, tail) =
            std::mem::take(&mut rest).split_at_mut(format.plane_size(width, height, index));
        planes.push(head);
        rest = tail;
    }
    Ok(planes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        for format in PixelFormat::ALL {
            assert_eq!(PixelFormat::from_code(format.code()), Some(format));
        }
        assert_eq!(PixelFormat::Yuv420p.code(), 0x1001);
        assert_eq!(PixelFormat::Gray8.code(), 0x2007);
        assert_eq!(PixelFormat::from_code(0x100A), None);
        assert_eq!(PixelFormat::from_code(0), None);
    }

    #[test]
    fn test_geometry_queries() {
        assert_eq!(PixelFormat::Yuv420p.plane_count(), 3);
        assert_eq!(PixelFormat::Yuy2.plane_count(), 1);
        assert_eq!(PixelFormat::Y8.plane_count(), 1);
        assert_eq!(PixelFormat::Yuv411p.chroma_divisors(), (4, 1));
        assert_eq!(PixelFormat::Yv12.chroma_divisors(), (2, 2));
        assert_eq!(PixelFormat::Yuv420p.chroma_plane_size(8, 4), 8);
        assert_eq!(PixelFormat::Yuv411p.chroma_plane_size(8, 4), 8);
        assert_eq!(PixelFormat::Yuv444p.chroma_plane_size(8, 4), 32);
        assert_eq!(PixelFormat::Uyvy.chroma_plane_size(8, 4), 0);
        assert_eq!(PixelFormat::Yuy2.frame_size(8, 4), 64);
        assert_eq!(PixelFormat::Bgr24.frame_size(8, 4), 96);
        assert_eq!(PixelFormat::Argb32.frame_size(8, 4), 128);
        assert_eq!(PixelFormat::Yuv422p.frame_size(8, 4), 64);
        assert_eq!(PixelFormat::Rgb24.plane_size(8, 4, 1), 0);
        assert!(PixelFormat::Y8.is_yuv());
        assert!(!PixelFormat::Gray8.is_yuv());
        assert_eq!(PixelFormat::Gray8.family(), FormatFamily::Gray);
        assert!(PixelFormat::Bgra32.has_alpha());
        assert!(!PixelFormat::Bgr24.has_alpha());
    }

    #[test]
    fn test_plane_pointers_split_in_order() {
        let buffer: Vec<u8> = (0..24u8).collect();
        let planes = plane_pointers(&buffer, PixelFormat::Yv12, 4, 4).unwrap();
        assert_eq!(planes.len(), 3);
        assert_eq!(planes[0], &buffer[..16]);
        assert_eq!(planes[1], &buffer[16..20]);
        assert_eq!(planes[2], &buffer[20..24]);

        let mut buffer = vec![0u8; 48];
        let mut planes = plane_pointers_mut(&mut buffer, PixelFormat::Rgb24, 4, 4).unwrap();
        assert_eq!(planes.len(), 1);
        planes[0][47] = 9;
        assert_eq!(buffer[47], 9);
    }

    #[test]
    fn test_plane_pointers_short_buffer() {
        let buffer = vec![0u8; 23];
        assert_eq!(
            plane_pointers(&buffer, PixelFormat::Yuv420p, 4, 4),
            Err(ConvertError::BufferSizeMismatch(MismatchedSize {
                expected: 24,
                received: 23
            }))
        );
        assert!(matches!(
            plane_pointers(&buffer, PixelFormat::Yuv420p, 3, 4),
            Err(ConvertError::InvalidGeometry(_))
        ));
    }
}
