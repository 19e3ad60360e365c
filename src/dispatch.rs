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
use crate::capabilities::AccelerationTier;
use crate::convert_error::ConvertError;
use crate::format_support::{planar_sources, PlanarLayout};
use crate::kernel::{ConversionKernel, ConversionKey, ConvertHandler, KernelFns};
use crate::pixel_format::{FormatLayout, PixelFormat};
use crate::rgb_packed::{rgb_in_place_handler, rgb_to_rgb_handler};
use crate::yuv_mixed::{packed_to_planar_handler, planar_to_packed_handler};
use crate::yuv_packed::{packed_in_place_handler, packed_to_packed_handler};
use crate::yuv_planar::{planar_in_place_handler, planar_to_planar_handler};
use crate::yuv_rgb::{
    packed_to_rgb_handler, planar_to_rgb_handler, rgb_to_packed_handler, rgb_to_planar_handler,
};

fn copy_planar<const LAYOUT: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let layout: PlanarLayout = LAYOUT.into();
    let luma = width * height;
    dst[0][..luma].copy_from_slice(&src[0][..luma]);
    if layout.has_chroma() {
        let (chroma_width, chroma_height) = layout.chroma_size(width, height);
        let chroma = chroma_width * chroma_height;
        for (src, dst) in src[1..3].iter().zip(dst[1..3].iter_mut()) {
            dst[..chroma].copy_from_slice(&src[..chroma]);
        }
    }
    Ok(())
}

fn copy_interleaved<const BPP: usize>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let len = width * height * BPP;
    dst[0][..len].copy_from_slice(&src[0][..len]);
    Ok(())
}

fn keep_in_place(_: &mut [&mut [u8]], _: usize, _: usize) -> Result<(), ConvertError> {
    Ok(())
}

fn planar_copy_for<const SRC: u8>(_: ()) -> ConvertHandler {
    copy_planar::<SRC>
}

fn identity_fns(format: PixelFormat) -> KernelFns {
    let convert: ConvertHandler = match format.layout() {
        FormatLayout::Planar(layout) => planar_sources!(planar_copy_for, layout, ()),
        _ => match format.bytes_per_pixel() {
            1 => copy_interleaved::<1>,
            2 => copy_interleaved::<2>,
            3 => copy_interleaved::<3>,
            _ => copy_interleaved::<4>,
        },
    };
    KernelFns::new(convert, Some(keep_in_place))
}

fn portable_fns(from: PixelFormat, to: PixelFormat) -> Option<KernelFns> {
    if from == to {
        return Some(identity_fns(from));
    }
    let fns = match (from.layout(), to.layout()) {
        (FormatLayout::Planar(src), FormatLayout::Planar(dst)) => KernelFns::new(
            planar_to_planar_handler(src, dst),
            planar_in_place_handler(src, dst),
        ),
        (FormatLayout::Planar(src), FormatLayout::Packed(dst)) => {
            KernelFns::new(planar_to_packed_handler(src, dst)?, None)
        }
        (FormatLayout::Planar(src), FormatLayout::Rgb(dst)) => {
            KernelFns::new(planar_to_rgb_handler(src, dst), None)
        }
        (FormatLayout::Packed(src), FormatLayout::Planar(dst)) => {
            KernelFns::new(packed_to_planar_handler(src, dst)?, None)
        }
        (FormatLayout::Packed(src), FormatLayout::Packed(dst)) => KernelFns::new(
            packed_to_packed_handler(src, dst),
            Some(packed_in_place_handler(src, dst)),
        ),
        (FormatLayout::Packed(src), FormatLayout::Rgb(dst)) => {
            KernelFns::new(packed_to_rgb_handler(src, dst), None)
        }
        (FormatLayout::Rgb(src), FormatLayout::Planar(dst)) => {
            KernelFns::new(rgb_to_planar_handler(src, dst), None)
        }
        (FormatLayout::Rgb(src), FormatLayout::Packed(dst)) => {
            KernelFns::new(rgb_to_packed_handler(src, dst), None)
        }
        (FormatLayout::Rgb(src), FormatLayout::Rgb(dst)) => KernelFns::new(
            rgb_to_rgb_handler(src, dst),
            rgb_in_place_handler(src, dst),
        ),
    };
    Some(fns)
}

/// Table driven kernel for the pair, `None` for the pairs that are never supported.
pub(crate) fn portable_kernel(from: PixelFormat, to: PixelFormat) -> Option<ConversionKernel> {
    let fns = portable_fns(from, to)?;
    Some(ConversionKernel::new(
        ConversionKey::new(from, to),
        AccelerationTier::Portable,
        fns,
    ))
}

/// Kernel built for `tier`, if that tier has one for the pair on this target.
///
/// The caller is responsible for only asking for tiers the host supports.
#[allow(unused_variables)]
pub(crate) fn accelerated_kernel(
    tier: AccelerationTier,
    from: PixelFormat,
    to: PixelFormat,
) -> Option<ConversionKernel> {
    let fns = match tier {
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        AccelerationTier::Sse2 => crate::sse::sse2_kernel(from, to),
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        AccelerationTier::Sse41 => crate::sse::sse41_kernel(from, to),
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
        AccelerationTier::Avx2 => crate::avx2::avx2_kernel(from, to),
        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        AccelerationTier::Neon => crate::neon::neon_kernel(from, to),
        _ => None,
    }?;
    Some(ConversionKernel::new(
        ConversionKey::new(from, to),
        tier,
        fns,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::{plane_pointers, plane_pointers_mut};

    fn is_411_packed(from: PixelFormat, to: PixelFormat) -> bool {
        let packed = |f: PixelFormat| {
            matches!(f, PixelFormat::Yuy2 | PixelFormat::Uyvy | PixelFormat::Yvyu)
        };
        (from == PixelFormat::Yuv411p && packed(to))
            || (to == PixelFormat::Yuv411p && packed(from))
    }

    #[test]
    fn test_portable_matrix() {
        let mut missing = 0;
        for from in PixelFormat::ALL {
            for to in PixelFormat::ALL {
                match portable_kernel(from, to) {
                    Some(kernel) => {
                        assert_eq!(kernel.key(), ConversionKey::new(from, to));
                        assert_eq!(kernel.tier(), AccelerationTier::Portable);
                    }
                    None => {
                        assert!(is_411_packed(from, to), "{} -> {}", from, to);
                        missing += 1;
                    }
                }
            }
        }
        assert_eq!(missing, 6);
    }

    #[test]
    fn test_in_place_pairs() {
        use PixelFormat::*;
        let rgb32 = [Rgba32, Abgr32, Argb32, Bgra32];
        let packed = [Yuy2, Uyvy, Yvyu];
        for from in PixelFormat::ALL {
            for to in PixelFormat::ALL {
                let Some(kernel) = portable_kernel(from, to) else {
                    continue;
                };
                let expected = from == to
                    || (packed.contains(&from) && packed.contains(&to))
                    || (rgb32.contains(&from) && rgb32.contains(&to))
                    || matches!((from, to), (Rgb24, Bgr24) | (Bgr24, Rgb24))
                    || matches!((from, to), (Yuv420p, Yv12) | (Yv12, Yuv420p));
                assert_eq!(kernel.supports_in_place(), expected, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_identity_copies_every_plane() {
        let format = PixelFormat::Yv12;
        let size = format.frame_size(4, 2);
        let src: Vec<u8> = (0..size as u8).collect();
        let mut dst = vec![0u8; size];
        let kernel = portable_kernel(format, format).unwrap();
        let src_planes = plane_pointers(&src, format, 4, 2).unwrap();
        let mut dst_planes = plane_pointers_mut(&mut dst, format, 4, 2).unwrap();
        kernel.convert(&src_planes, &mut dst_planes, 4, 2).unwrap();
        assert_eq!(src, dst);
    }

    #[test]
    fn test_portable_tier_has_no_accelerated_kernels() {
        for from in PixelFormat::ALL {
            for to in PixelFormat::ALL {
                assert!(accelerated_kernel(AccelerationTier::Portable, from, to).is_none());
            }
        }
    }
}
