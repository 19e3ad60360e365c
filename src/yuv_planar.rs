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
use crate::format_support::{planar_sources, planar_targets, PlanarLayout};
use crate::kernel::{ConvertHandler, InPlaceHandler};

/// Resamples one chroma plane between subsampling grids.
///
/// Each destination sample covers a block of source samples along each
/// axis: when the source is finer the block is averaged with a single
/// truncating division, when it is coarser the covering sample is replicated.
#[inline(always)]
pub(crate) fn resample_chroma(
    src: &[u8],
    src_width: usize,
    src_height: usize,
    dst: &mut [u8],
    dst_width: usize,
    dst_height: usize,
) {
    if src_width == dst_width && src_height == dst_height {
        dst[..dst_width * dst_height].copy_from_slice(&src[..src_width * src_height]);
        return;
    }
    let x_block = (src_width / dst_width).max(1);
    let y_block = (src_height / dst_height).max(1);
    let count = (x_block * y_block) as u32;

    for (y, dst_row) in dst
        .chunks_exact_mut(dst_width)
        .take(dst_height)
        .enumerate()
    {
        let src_y = y * src_height / dst_height;
        if count == 1 {
            let src_row = &src[src_y * src_width..(src_y + 1) * src_width];
            for (x, dst) in dst_row.iter_mut().enumerate() {
                *dst = src_row[x * src_width / dst_width];
            }
            continue;
        }
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let src_x = x * src_width / dst_width;
            let mut sum = 0u32;
            for row in src[src_y * src_width..]
                .chunks_exact(src_width)
                .take(y_block)
            {
                for &sample in &row[src_x..src_x + x_block] {
                    sum += sample as u32;
                }
            }
            *dst = (sum / count) as u8;
        }
    }
}

#[inline(always)]
pub(crate) fn planar_to_planar_impl<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let source: PlanarLayout = SRC.into();
    let target: PlanarLayout = DST.into();

    let luma = width * height;
    dst[0][..luma].copy_from_slice(&src[0][..luma]);

    if !target.has_chroma() {
        return Ok(());
    }
    let (dst_cw, dst_ch) = target.chroma_size(width, height);
    let dst_len = dst_cw * dst_ch;
    let (u_dst, v_dst) = target.chroma_planes_mut(dst);

    if !source.has_chroma() {
        u_dst[..dst_len].fill(128);
        v_dst[..dst_len].fill(128);
        return Ok(());
    }

    let (src_cw, src_ch) = source.chroma_size(width, height);
    let (u_src, v_src) = source.chroma_planes(src);
    resample_chroma(u_src, src_cw, src_ch, u_dst, dst_cw, dst_ch);
    resample_chroma(v_src, src_cw, src_ch, v_dst, dst_cw, dst_ch);
    Ok(())
}

fn planar_to_planar<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    planar_to_planar_impl::<SRC, DST>(src, dst, width, height)
}

fn planar_target<const SRC: u8>(dst: PlanarLayout) -> ConvertHandler {
    planar_targets!(planar_to_planar, SRC, dst)
}

pub(crate) fn planar_to_planar_handler(src: PlanarLayout, dst: PlanarLayout) -> ConvertHandler {
    planar_sources!(planar_target, src, dst)
}

/// YUV420P and YV12 differ only in chroma plane order.
fn swap_chroma_in_place(
    planes: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let (cw, ch) = PlanarLayout::Yuv420.chroma_size(width, height);
    let (first, second) = PlanarLayout::Yuv420.chroma_planes_mut(planes);
    first[..cw * ch].swap_with_slice(&mut second[..cw * ch]);
    Ok(())
}

pub(crate) fn planar_in_place_handler(
    src: PlanarLayout,
    dst: PlanarLayout,
) -> Option<InPlaceHandler> {
    match (src, dst) {
        (PlanarLayout::Yuv420, PlanarLayout::Yv12) | (PlanarLayout::Yv12, PlanarLayout::Yuv420) => {
            Some(swap_chroma_in_place)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn run(
        src: PlanarLayout,
        dst: PlanarLayout,
        planes: [&[u8]; 3],
        width: usize,
        height: usize,
    ) -> [Vec<u8>; 3] {
        let (cw, ch) = dst.chroma_size(width, height);
        let mut y = vec![0u8; width * height];
        let mut u = vec![0u8; cw * ch];
        let mut v = vec![0u8; cw * ch];
        let handler = planar_to_planar_handler(src, dst);
        handler(
            &planes,
            &mut [&mut y[..], &mut u[..], &mut v[..]],
            width,
            height,
        )
        .unwrap();
        [y, u, v]
    }

    #[test]
    fn test_upsampling_replicates() {
        let y = vec![50u8; 16];
        let u = vec![10, 20, 30, 40];
        let v = vec![1, 2, 3, 4];
        let [_, u422, v422] = run(
            PlanarLayout::Yuv420,
            PlanarLayout::Yuv422,
            [&y, &u, &v],
            4,
            4,
        );
        assert_eq!(u422, vec![10, 20, 10, 20, 30, 40, 30, 40]);
        assert_eq!(v422, vec![1, 2, 1, 2, 3, 4, 3, 4]);

        let [_, u444, _] = run(
            PlanarLayout::Yuv420,
            PlanarLayout::Yuv444,
            [&y, &u, &v],
            4,
            4,
        );
        assert_eq!(&u444[..8], &[10, 10, 20, 20, 10, 10, 20, 20]);
        assert_eq!(&u444[8..], &[30, 30, 40, 40, 30, 30, 40, 40]);
    }

    #[test]
    fn test_downsampling_truncates() {
        let y = vec![0u8; 8];
        // 4:2:2 chroma 2x2, rows averaged into one 4:2:0 row
        let u = vec![3, 8, 4, 9];
        let v = vec![255, 0, 254, 1];
        let [_, u420, v420] = run(
            PlanarLayout::Yuv422,
            PlanarLayout::Yuv420,
            [&y, &u, &v],
            4,
            2,
        );
        assert_eq!(u420, vec![3, 8]);
        assert_eq!(v420, vec![254, 0]);

        // 4:4:4 block of 2x2 with a single truncating division
        let u = vec![1, 2, 7, 7, 2, 2, 7, 8];
        let [_, u420, _] = run(
            PlanarLayout::Yuv444,
            PlanarLayout::Yuv420,
            [&y, &u, &u],
            4,
            2,
        );
        assert_eq!(u420, vec![1, 7]);
    }

    #[test]
    fn test_411_groups_along_rows() {
        let y = vec![0u8; 16];
        let u411 = vec![10, 20, 30, 40];
        let [_, u422, _] = run(
            PlanarLayout::Yuv411,
            PlanarLayout::Yuv422,
            [&y, &u411, &u411],
            8,
            2,
        );
        assert_eq!(u422, vec![10, 10, 20, 20, 30, 30, 40, 40]);

        let u422 = vec![10, 13, 20, 20, 5, 6, 7, 8];
        let [_, back, _] = run(
            PlanarLayout::Yuv422,
            PlanarLayout::Yuv411,
            [&y, &u422, &u422],
            8,
            2,
        );
        assert_eq!(back, vec![11, 20, 5, 7]);
    }

    #[test]
    fn test_y8_fills_neutral_chroma() {
        let y: Vec<u8> = (0..16).collect();
        let [luma, u, v] = run(PlanarLayout::Y8, PlanarLayout::Yv12, [&y, &[], &[]], 4, 4);
        assert_eq!(luma, y);
        assert_eq!(u, vec![128; 4]);
        assert_eq!(v, vec![128; 4]);
    }

    #[test]
    fn test_yv12_swaps_plane_order() {
        let y = vec![7u8; 16];
        let u = vec![1u8; 4];
        let v = vec![2u8; 4];
        let [_, first, second] = run(
            PlanarLayout::Yuv420,
            PlanarLayout::Yv12,
            [&y, &u, &v],
            4,
            4,
        );
        assert_eq!(first, v);
        assert_eq!(second, u);

        let mut planes = [y.clone(), u.clone(), v.clone()];
        let [a, b, c] = &mut planes;
        let handler = planar_in_place_handler(PlanarLayout::Yv12, PlanarLayout::Yuv420).unwrap();
        handler(&mut [&mut a[..], &mut b[..], &mut c[..]], 4, 4).unwrap();
        assert_eq!(planes, [y, v, u]);
    }

    #[test]
    fn test_round_trip_is_bounded() {
        let mut rng = rand::rng();
        let (width, height) = (16usize, 8usize);
        let y: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
        // Smooth chroma keeps the round trip error within the truncation bound
        let u: Vec<u8> = (0..width * height / 4)
            .map(|i| 100 + (i % 8) as u8)
            .collect();
        let v = u.clone();
        for via in [PlanarLayout::Yuv422, PlanarLayout::Yuv444] {
            let [y1, u1, v1] = run(PlanarLayout::Yuv420, via, [&y, &u, &v], width, height);
            let [y2, u2, _] = run(via, PlanarLayout::Yuv420, [&y1, &u1, &v1], width, height);
            assert_eq!(y2, y);
            for (a, b) in u2.iter().zip(u.iter()) {
                assert!((*a as i32 - *b as i32).abs() <= 1);
            }
        }
    }
}
