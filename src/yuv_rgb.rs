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
use crate::convert_error::ConvertError;
use crate::format_support::{
    packed_sources, packed_targets, planar_sources, planar_targets, rgb_sources, rgb_targets,
    PackedYuvLayout, PlanarLayout, RgbLayout,
};
use crate::kernel::ConvertHandler;
use crate::ycbcr::COLOR_TABLES;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::ParallelSliceMut;

/// Vectorized prefix of a YUV to RGB row: luma row, chroma rows, RGB row, width.
/// Returns the number of pixels written; the caller finishes the row.
///
/// # Safety
/// Only handed out when the CPU supports the instruction set it was compiled for.
pub(crate) type YuvToRgbRowHandler = unsafe fn(&[u8], &[u8], &[u8], &mut [u8], usize) -> usize;

#[inline(always)]
fn store_yuv<const DST: u8>(px: &mut [u8], y: u8, u: u8, v: u8) {
    let target: RgbLayout = DST.into();
    if target.is_gray() {
        px[0] = COLOR_TABLES.luma_to_gray(y);
    } else {
        let (r, g, b) = COLOR_TABLES.yuv_to_rgb(y, u, v);
        target.write(px, r, g, b, 0);
    }
}

#[inline(always)]
pub(crate) fn planar_to_rgb_impl<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
    row_handler: Option<YuvToRgbRowHandler>,
) -> Result<(), ConvertError> {
    let source: PlanarLayout = SRC.into();
    let target: RgbLayout = DST.into();
    let channels = target.channels();
    let y_plane = src[0];
    let (chroma_width, _) = source.chroma_size(width, height);
    let (u_plane, v_plane) = if source.has_chroma() {
        source.chroma_planes(src)
    } else {
        (&[][..], &[][..])
    };
    let rgb = &mut dst[0][..width * height * channels];

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = rgb.par_chunks_exact_mut(width * channels);
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = rgb.chunks_exact_mut(width * channels);
    }

    iter.enumerate().for_each(|(y, rgb_row)| {
        let y_row = &y_plane[y * width..(y + 1) * width];
        if !source.has_chroma() {
            for (&luma, px) in y_row.iter().zip(rgb_row.chunks_exact_mut(channels)) {
                store_yuv::<DST>(px, luma, 128, 128);
            }
            return;
        }
        let chroma_offset = (y / source.v_div()) * chroma_width;
        let u_row = &u_plane[chroma_offset..chroma_offset + chroma_width];
        let v_row = &v_plane[chroma_offset..chroma_offset + chroma_width];

        let mut cx = 0usize;
        if let Some(handler) = row_handler {
            cx = unsafe { handler(y_row, u_row, v_row, rgb_row, width) };
        }

        let h_div = source.h_div();
        for (x, px) in rgb_row
            .chunks_exact_mut(channels)
            .enumerate()
            .skip(cx)
        {
            store_yuv::<DST>(px, y_row[x], u_row[x / h_div], v_row[x / h_div]);
        }
    });
    Ok(())
}

fn planar_to_rgb<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    planar_to_rgb_impl::<SRC, DST>(src, dst, width, height, None)
}

fn packed_to_rgb<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let source: PackedYuvLayout = SRC.into();
    let target: RgbLayout = DST.into();
    let channels = target.channels();
    let packed = &src[0][..width * 2 * height];
    let rgb = &mut dst[0][..width * height * channels];

    for (px, pair) in packed
        .chunks_exact(4)
        .zip(rgb.chunks_exact_mut(channels * 2))
    {
        let u = px[source.u_position()];
        let v = px[source.v_position()];
        let (first, second) = pair.split_at_mut(channels);
        store_yuv::<DST>(first, px[source.first_y_position()], u, v);
        store_yuv::<DST>(second, px[source.second_y_position()], u, v);
    }
    Ok(())
}

/// Luma for every pixel, chroma sampled at the top left pixel of each subsampling block.
#[inline(always)]
pub(crate) fn rgb_to_planar_impl<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let source: RgbLayout = SRC.into();
    let target: PlanarLayout = DST.into();
    let channels = source.channels();
    let rgb = &src[0][..width * height * channels];

    for (y_dst, px) in dst[0][..width * height]
        .iter_mut()
        .zip(rgb.chunks_exact(channels))
    {
        let (r, g, b) = source.read(px);
        *y_dst = COLOR_TABLES.rgb_to_y(r, g, b);
    }

    if !target.has_chroma() {
        return Ok(());
    }

    let (chroma_width, chroma_height) = target.chroma_size(width, height);
    let h_div = target.h_div();
    let v_div = target.v_div();
    let (u_plane, v_plane) = target.chroma_planes_mut(dst);

    for cy in 0..chroma_height {
        let rgb_row = &rgb[cy * v_div * width * channels..][..width * channels];
        let u_row = &mut u_plane[cy * chroma_width..(cy + 1) * chroma_width];
        let v_row = &mut v_plane[cy * chroma_width..(cy + 1) * chroma_width];
        for ((u_dst, v_dst), px) in u_row
            .iter_mut()
            .zip(v_row.iter_mut())
            .zip(rgb_row.chunks_exact(channels * h_div))
        {
            let (r, g, b) = source.read(px);
            let (u, v) = COLOR_TABLES.rgb_to_uv(r, g, b);
            *u_dst = u;
            *v_dst = v;
        }
    }
    Ok(())
}

fn rgb_to_planar<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    rgb_to_planar_impl::<SRC, DST>(src, dst, width, height)
}

fn rgb_to_packed<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let source: RgbLayout = SRC.into();
    let target: PackedYuvLayout = DST.into();
    let channels = source.channels();
    let rgb = &src[0][..width * height * channels];

    for (px, pair) in dst[0][..width * 2 * height]
        .chunks_exact_mut(4)
        .zip(rgb.chunks_exact(channels * 2))
    {
        let (r0, g0, b0) = source.read(&pair[..channels]);
        let (r1, g1, b1) = source.read(&pair[channels..]);
        let (u, v) = COLOR_TABLES.rgb_to_uv(r0, g0, b0);
        px[target.first_y_position()] = COLOR_TABLES.rgb_to_y(r0, g0, b0);
        px[target.second_y_position()] = COLOR_TABLES.rgb_to_y(r1, g1, b1);
        px[target.u_position()] = u;
        px[target.v_position()] = v;
    }
    Ok(())
}

fn rgb_target_for_planar<const SRC: u8>(dst: RgbLayout) -> ConvertHandler {
    rgb_targets!(planar_to_rgb, SRC, dst)
}

fn rgb_target_for_packed<const SRC: u8>(dst: RgbLayout) -> ConvertHandler {
    rgb_targets!(packed_to_rgb, SRC, dst)
}

fn planar_target_for_rgb<const SRC: u8>(dst: PlanarLayout) -> ConvertHandler {
    planar_targets!(rgb_to_planar, SRC, dst)
}

fn packed_target_for_rgb<const SRC: u8>(dst: PackedYuvLayout) -> ConvertHandler {
    packed_targets!(rgb_to_packed, SRC, dst)
}

pub(crate) fn planar_to_rgb_handler(src: PlanarLayout, dst: RgbLayout) -> ConvertHandler {
    planar_sources!(rgb_target_for_planar, src, dst)
}

pub(crate) fn packed_to_rgb_handler(src: PackedYuvLayout, dst: RgbLayout) -> ConvertHandler {
    packed_sources!(rgb_target_for_packed, src, dst)
}

pub(crate) fn rgb_to_planar_handler(src: RgbLayout, dst: PlanarLayout) -> ConvertHandler {
    rgb_sources!(planar_target_for_rgb, src, dst)
}

pub(crate) fn rgb_to_packed_handler(src: RgbLayout, dst: PackedYuvLayout) -> ConvertHandler {
    rgb_sources!(packed_target_for_rgb, src, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ycbcr::{rgb_to_yuv_direct, yuv_to_rgb_direct};
    use rand::Rng;

    #[test]
    fn test_limited_black_frame() {
        let y = vec![16u8; 16];
        let u = vec![128u8; 4];
        let v = vec![128u8; 4];
        let mut rgb = vec![255u8; 8 * 2 * 3];
        planar_to_rgb_handler(PlanarLayout::Yuv420, RgbLayout::Rgb24)(
            &[&y, &u, &v],
            &mut [&mut rgb[..]],
            8,
            2,
        )
        .unwrap();
        assert!(rgb.iter().all(|&c| c <= 2));
    }

    #[test]
    fn test_planar_to_rgb_matches_formula() {
        let mut rng = rand::rng();
        let (width, height) = (8usize, 4usize);
        let y: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
        let u: Vec<u8> = (0..width * height / 2).map(|_| rng.random()).collect();
        let v: Vec<u8> = (0..width * height / 2).map(|_| rng.random()).collect();
        let mut bgra = vec![1u8; width * height * 4];
        planar_to_rgb_handler(PlanarLayout::Yuv422, RgbLayout::Bgra32)(
            &[&y, &u, &v],
            &mut [&mut bgra[..]],
            width,
            height,
        )
        .unwrap();
        for row in 0..height {
            for x in 0..width {
                let c = row * width / 2 + x / 2;
                let (r, g, b) = yuv_to_rgb_direct(y[row * width + x], u[c], v[c]);
                let px = &bgra[(row * width + x) * 4..][..4];
                assert_eq!(px, &[b, g, r, 0]);
            }
        }
    }

    #[test]
    fn test_yuy2_to_rgb_shares_chroma() {
        let yuy2 = vec![16u8, 90, 235, 240];
        let mut rgb = vec![0u8; 6];
        packed_to_rgb_handler(PackedYuvLayout::Yuyv, RgbLayout::Rgb24)(
            &[&yuy2],
            &mut [&mut rgb[..]],
            2,
            1,
        )
        .unwrap();
        let (r0, g0, b0) = yuv_to_rgb_direct(16, 90, 240);
        let (r1, g1, b1) = yuv_to_rgb_direct(235, 90, 240);
        assert_eq!(rgb, vec![r0, g0, b0, r1, g1, b1]);
    }

    #[test]
    fn test_rgb_to_yuv420_samples_block_corner() {
        // 2x2 block, only the top left pixel decides chroma
        let rgb = vec![255u8, 0, 0, 0, 255, 0, 0, 0, 255, 9, 9, 9];
        let mut y = vec![0u8; 4];
        let mut u = vec![0u8; 1];
        let mut v = vec![0u8; 1];
        rgb_to_planar_handler(RgbLayout::Rgb24, PlanarLayout::Yuv420)(
            &[&rgb],
            &mut [&mut y[..], &mut u[..], &mut v[..]],
            2,
            2,
        )
        .unwrap();
        let (y_red, u_red, v_red) = rgb_to_yuv_direct(255, 0, 0);
        assert_eq!((y[0], u[0], v[0]), (y_red, u_red, v_red));
        assert_eq!(y[3], rgb_to_yuv_direct(9, 9, 9).0);
    }

    #[test]
    fn test_rgb_to_yv12_writes_v_first() {
        let rgb = vec![0u8, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0, 255];
        let mut y = vec![0u8; 4];
        let mut first = vec![0u8; 1];
        let mut second = vec![0u8; 1];
        rgb_to_planar_handler(RgbLayout::Rgb24, PlanarLayout::Yv12)(
            &[&rgb],
            &mut [&mut y[..], &mut first[..], &mut second[..]],
            2,
            2,
        )
        .unwrap();
        let (_, u, v) = rgb_to_yuv_direct(0, 0, 255);
        assert_eq!((first[0], second[0]), (v, u));
    }

    #[test]
    fn test_gray_paths() {
        let y = vec![16u8, 235, 126, 255];
        let mut gray = vec![0u8; 4];
        planar_to_rgb_handler(PlanarLayout::Y8, RgbLayout::Gray8)(
            &[&y],
            &mut [&mut gray[..]],
            4,
            1,
        )
        .unwrap();
        assert_eq!(gray[0], 0);
        assert_eq!(gray[3], 255);

        let gray = vec![0u8, 128, 255, 77];
        let mut yuy2 = vec![0u8; 8];
        rgb_to_packed_handler(RgbLayout::Gray8, PackedYuvLayout::Yuyv)(
            &[&gray],
            &mut [&mut yuy2[..]],
            4,
            1,
        )
        .unwrap();
        assert_eq!(yuy2[1], 128);
        assert_eq!(yuy2[3], 128);
        assert_eq!(yuy2[0], 16);
        assert_eq!(yuy2[4], rgb_to_yuv_direct(255, 255, 255).0);
    }
}
