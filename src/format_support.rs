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
/// Internal layout of a planar YUV format, used as a const generic parameter by kernels.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PlanarLayout {
    Yuv420 = 0,
    Yv12 = 1,
    Yuv411 = 2,
    Yuv422 = 3,
    Yuv444 = 4,
    Y8 = 5,
}

impl From<u8> for PlanarLayout {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => PlanarLayout::Yuv420,
            1 => PlanarLayout::Yv12,
            2 => PlanarLayout::Yuv411,
            3 => PlanarLayout::Yuv422,
            4 => PlanarLayout::Yuv444,
            5 => PlanarLayout::Y8,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl PlanarLayout {
    #[inline(always)]
    pub(crate) const fn has_chroma(self) -> bool {
        !matches!(self, PlanarLayout::Y8)
    }

    #[inline(always)]
    pub(crate) const fn h_div(self) -> usize {
        match self {
            PlanarLayout::Yuv420 | PlanarLayout::Yv12 | PlanarLayout::Yuv422 => 2,
            PlanarLayout::Yuv411 => 4,
            PlanarLayout::Yuv444 | PlanarLayout::Y8 => 1,
        }
    }

    #[inline(always)]
    pub(crate) const fn v_div(self) -> usize {
        match self {
            PlanarLayout::Yuv420 | PlanarLayout::Yv12 => 2,
            PlanarLayout::Yuv411
            | PlanarLayout::Yuv422
            | PlanarLayout::Yuv444
            | PlanarLayout::Y8 => 1,
        }
    }

    /// Chroma plane dimensions, zero for luma-only layouts
    #[inline(always)]
    pub(crate) const fn chroma_size(self, width: usize, height: usize) -> (usize, usize) {
        if self.has_chroma() {
            (width / self.h_div(), height / self.v_div())
        } else {
            (0, 0)
        }
    }

    #[inline(always)]
    pub(crate) const fn u_index(self) -> usize {
        match self {
            PlanarLayout::Yv12 => 2,
            _ => 1,
        }
    }

    #[inline(always)]
    pub(crate) const fn v_index(self) -> usize {
        match self {
            PlanarLayout::Yv12 => 1,
            _ => 2,
        }
    }

    #[inline(always)]
    pub(crate) fn chroma_planes<'a>(self, planes: &[&'a [u8]]) -> (&'a [u8], &'a [u8]) {
        (planes[self.u_index()], planes[self.v_index()])
    }

    #[inline(always)]
    pub(crate) fn chroma_planes_mut<'a>(
        self,
        planes: &'a mut [&mut [u8]],
    ) -> (&'a mut [u8], &'a mut [u8]) {
        let (head, tail) = planes.split_at_mut(2);
        let first = &mut *head[1];
        let second = &mut *tail[0];
        if self.u_index() == 1 {
            (first, second)
        } else {
            (second, first)
        }
    }
}

/// Byte order of a 4:2:2 packed macro pixel (two luma samples sharing one chroma pair)
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PackedYuvLayout {
    Yuyv = 0,
    Uyvy = 1,
    Yvyu = 2,
}

impl From<u8> for PackedYuvLayout {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => PackedYuvLayout::Yuyv,
            1 => PackedYuvLayout::Uyvy,
            2 => PackedYuvLayout::Yvyu,
            _ => {
                panic!("Not supported value {}", value)
            }
        }
    }
}

impl PackedYuvLayout {
    #[inline(always)]
    pub(crate) const fn first_y_position(self) -> usize {
        match self {
            PackedYuvLayout::Yuyv | PackedYuvLayout::Yvyu => 0,
            PackedYuvLayout::Uyvy => 1,
        }
    }

    #[inline(always)]
    pub(crate) const fn second_y_position(self) -> usize {
        match self {
            PackedYuvLayout::Yuyv | PackedYuvLayout::Yvyu => 2,
            PackedYuvLayout::Uyvy => 3,
        }
    }

    #[inline(always)]
    pub(crate) const fn u_position(self) -> usize {
        match self {
            PackedYuvLayout::Yuyv => 1,
            PackedYuvLayout::Uyvy => 0,
            PackedYuvLayout::Yvyu => 3,
        }
    }

    #[inline(always)]
    pub(crate) const fn v_position(self) -> usize {
        match self {
            PackedYuvLayout::Yuyv => 3,
            PackedYuvLayout::Uyvy => 2,
            PackedYuvLayout::Yvyu => 1,
        }
    }
}

/// Interleaved RGB family layout; `Gray8` is a single full range channel.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum RgbLayout {
    Rgb24 = 0,
    Bgr24 = 1,
    Rgba32 = 2,
    Abgr32 = 3,
    Argb32 = 4,
    Bgra32 = 5,
    Gray8 = 6,
}

impl From<u8> for RgbLayout {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => RgbLayout::Rgb24,
            1 => RgbLayout::Bgr24,
            2 => RgbLayout::Rgba32,
            3 => RgbLayout::Abgr32,
            4 => RgbLayout::Argb32,
            5 => RgbLayout::Bgra32,
            6 => RgbLayout::Gray8,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl RgbLayout {
    #[inline(always)]
    pub(crate) const fn channels(self) -> usize {
        match self {
            RgbLayout::Rgb24 | RgbLayout::Bgr24 => 3,
            RgbLayout::Rgba32 | RgbLayout::Abgr32 | RgbLayout::Argb32 | RgbLayout::Bgra32 => 4,
            RgbLayout::Gray8 => 1,
        }
    }

    #[inline(always)]
    pub(crate) const fn has_alpha(self) -> bool {
        self.channels() == 4
    }

    #[inline(always)]
    pub(crate) const fn is_gray(self) -> bool {
        matches!(self, RgbLayout::Gray8)
    }

    #[inline(always)]
    pub(crate) const fn r_position(self) -> usize {
        match self {
            RgbLayout::Rgb24 | RgbLayout::Rgba32 | RgbLayout::Gray8 => 0,
            RgbLayout::Argb32 => 1,
            RgbLayout::Bgr24 | RgbLayout::Bgra32 => 2,
            RgbLayout::Abgr32 => 3,
        }
    }

    #[inline(always)]
    pub(crate) const fn g_position(self) -> usize {
        match self {
            RgbLayout::Rgb24 | RgbLayout::Bgr24 | RgbLayout::Rgba32 | RgbLayout::Bgra32 => 1,
            RgbLayout::Abgr32 | RgbLayout::Argb32 => 2,
            RgbLayout::Gray8 => 0,
        }
    }

    #[inline(always)]
    pub(crate) const fn b_position(self) -> usize {
        match self {
            RgbLayout::Bgr24 | RgbLayout::Bgra32 | RgbLayout::Gray8 => 0,
            RgbLayout::Abgr32 => 1,
            RgbLayout::Rgb24 | RgbLayout::Rgba32 => 2,
            RgbLayout::Argb32 => 3,
        }
    }

    #[inline(always)]
    pub(crate) const fn a_position(self) -> usize {
        match self {
            RgbLayout::Rgba32 | RgbLayout::Bgra32 => 3,
            _ => 0,
        }
    }

    /// Reads a pixel as (r, g, b); gray replicates its single channel.
    #[inline(always)]
    pub(crate) fn read(self, px: &[u8]) -> (u8, u8, u8) {
        (
            px[self.r_position()],
            px[self.g_position()],
            px[self.b_position()],
        )
    }

    /// Writes colour channels and, for alpha layouts, the given alpha.
    #[inline(always)]
    pub(crate) fn write(self, px: &mut [u8], r: u8, g: u8, b: u8, a: u8) {
        px[self.r_position()] = r;
        px[self.g_position()] = g;
        px[self.b_position()] = b;
        if self.has_alpha() {
            px[self.a_position()] = a;
        }
    }
}

/// Expands a runtime planar source into a call of `$target::<SRC>($dst)`
macro_rules! planar_sources {
    ($target:ident, $src:expr, $dst:expr) => {
        match $src {
            $crate::format_support::PlanarLayout::Yuv420 => {
                $target::<{ $crate::format_support::PlanarLayout::Yuv420 as u8 }>($dst)
            }
            $crate::format_support::PlanarLayout::Yv12 => {
                $target::<{ $crate::format_support::PlanarLayout::Yv12 as u8 }>($dst)
            }
            $crate::format_support::PlanarLayout::Yuv411 => {
                $target::<{ $crate::format_support::PlanarLayout::Yuv411 as u8 }>($dst)
            }
            $crate::format_support::PlanarLayout::Yuv422 => {
                $target::<{ $crate::format_support::PlanarLayout::Yuv422 as u8 }>($dst)
            }
            $crate::format_support::PlanarLayout::Yuv444 => {
                $target::<{ $crate::format_support::PlanarLayout::Yuv444 as u8 }>($dst)
            }
            $crate::format_support::PlanarLayout::Y8 => {
                $target::<{ $crate::format_support::PlanarLayout::Y8 as u8 }>($dst)
            }
        }
    };
}

/// Expands a runtime planar target into `$kernel::<$src, DST>` as a handler
macro_rules! planar_targets {
    ($kernel:ident, $src:ident, $dst:expr) => {
        match $dst {
            $crate::format_support::PlanarLayout::Yuv420 => {
                $kernel::<$src, { $crate::format_support::PlanarLayout::Yuv420 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::PlanarLayout::Yv12 => {
                $kernel::<$src, { $crate::format_support::PlanarLayout::Yv12 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::PlanarLayout::Yuv411 => {
                $kernel::<$src, { $crate::format_support::PlanarLayout::Yuv411 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::PlanarLayout::Yuv422 => {
                $kernel::<$src, { $crate::format_support::PlanarLayout::Yuv422 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::PlanarLayout::Yuv444 => {
                $kernel::<$src, { $crate::format_support::PlanarLayout::Yuv444 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::PlanarLayout::Y8 => {
                $kernel::<$src, { $crate::format_support::PlanarLayout::Y8 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
        }
    };
}

macro_rules! packed_sources {
    ($target:ident, $src:expr, $dst:expr) => {
        match $src {
            $crate::format_support::PackedYuvLayout::Yuyv => {
                $target::<{ $crate::format_support::PackedYuvLayout::Yuyv as u8 }>($dst)
            }
            $crate::format_support::PackedYuvLayout::Uyvy => {
                $target::<{ $crate::format_support::PackedYuvLayout::Uyvy as u8 }>($dst)
            }
            $crate::format_support::PackedYuvLayout::Yvyu => {
                $target::<{ $crate::format_support::PackedYuvLayout::Yvyu as u8 }>($dst)
            }
        }
    };
}

macro_rules! packed_targets {
    ($kernel:ident, $src:ident, $dst:expr) => {
        match $dst {
            $crate::format_support::PackedYuvLayout::Yuyv => {
                $kernel::<$src, { $crate::format_support::PackedYuvLayout::Yuyv as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::PackedYuvLayout::Uyvy => {
                $kernel::<$src, { $crate::format_support::PackedYuvLayout::Uyvy as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::PackedYuvLayout::Yvyu => {
                $kernel::<$src, { $crate::format_support::PackedYuvLayout::Yvyu as u8 }>
                    as $crate::kernel::ConvertHandler
            }
        }
    };
}

macro_rules! rgb_sources {
    ($target:ident, $src:expr, $dst:expr) => {
        match $src {
            $crate::format_support::RgbLayout::Rgb24 => {
                $target::<{ $crate::format_support::RgbLayout::Rgb24 as u8 }>($dst)
            }
            $crate::format_support::RgbLayout::Bgr24 => {
                $target::<{ $crate::format_support::RgbLayout::Bgr24 as u8 }>($dst)
            }
            $crate::format_support::RgbLayout::Rgba32 => {
                $target::<{ $crate::format_support::RgbLayout::Rgba32 as u8 }>($dst)
            }
            $crate::format_support::RgbLayout::Abgr32 => {
                $target::<{ $crate::format_support::RgbLayout::Abgr32 as u8 }>($dst)
            }
            $crate::format_support::RgbLayout::Argb32 => {
                $target::<{ $crate::format_support::RgbLayout::Argb32 as u8 }>($dst)
            }
            $crate::format_support::RgbLayout::Bgra32 => {
                $target::<{ $crate::format_support::RgbLayout::Bgra32 as u8 }>($dst)
            }
            $crate::format_support::RgbLayout::Gray8 => {
                $target::<{ $crate::format_support::RgbLayout::Gray8 as u8 }>($dst)
            }
        }
    };
}

macro_rules! rgb_targets {
    ($kernel:ident, $src:ident, $dst:expr) => {
        match $dst {
            $crate::format_support::RgbLayout::Rgb24 => {
                $kernel::<$src, { $crate::format_support::RgbLayout::Rgb24 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::RgbLayout::Bgr24 => {
                $kernel::<$src, { $crate::format_support::RgbLayout::Bgr24 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::RgbLayout::Rgba32 => {
                $kernel::<$src, { $crate::format_support::RgbLayout::Rgba32 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::RgbLayout::Abgr32 => {
                $kernel::<$src, { $crate::format_support::RgbLayout::Abgr32 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::RgbLayout::Argb32 => {
                $kernel::<$src, { $crate::format_support::RgbLayout::Argb32 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::RgbLayout::Bgra32 => {
                $kernel::<$src, { $crate::format_support::RgbLayout::Bgra32 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
            $crate::format_support::RgbLayout::Gray8 => {
                $kernel::<$src, { $crate::format_support::RgbLayout::Gray8 as u8 }>
                    as $crate::kernel::ConvertHandler
            }
        }
    };
}

pub(crate) use packed_sources;
pub(crate) use packed_targets;
pub(crate) use planar_sources;
pub(crate) use planar_targets;
pub(crate) use rgb_sources;
pub(crate) use rgb_targets;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_positions_are_distinct() {
        for layout in [
            RgbLayout::Rgb24,
            RgbLayout::Bgr24,
            RgbLayout::Rgba32,
            RgbLayout::Abgr32,
            RgbLayout::Argb32,
            RgbLayout::Bgra32,
        ] {
            let mut seen = [false; 4];
            seen[layout.r_position()] = true;
            seen[layout.g_position()] = true;
            seen[layout.b_position()] = true;
            if layout.has_alpha() {
                assert!(!seen[layout.a_position()], "{:?}", layout);
                seen[layout.a_position()] = true;
            }
            assert_eq!(
                seen.iter().filter(|x| **x).count(),
                layout.channels(),
                "{:?}",
                layout
            );
        }
    }

    #[test]
    fn test_packed_positions_cover_macro_pixel() {
        for layout in [
            PackedYuvLayout::Yuyv,
            PackedYuvLayout::Uyvy,
            PackedYuvLayout::Yvyu,
        ] {
            let mut positions = [
                layout.first_y_position(),
                layout.second_y_position(),
                layout.u_position(),
                layout.v_position(),
            ];
            positions.sort();
            assert_eq!(positions, [0, 1, 2, 3]);
        }
    }
}
