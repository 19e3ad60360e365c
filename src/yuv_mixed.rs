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
    packed_sources, packed_targets, planar_sources, planar_targets, PackedYuvLayout, PlanarLayout,
};
use crate::kernel::ConvertHandler;
use crate::numerics::avg2;

fn planar_to_packed<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let source: PlanarLayout = SRC.into();
    let target: PackedYuvLayout = DST.into();
    let (chroma_width, _) = source.chroma_size(width, height);
    let (u_plane, v_plane) = if source.has_chroma() {
        source.chroma_planes(src)
    } else {
        (&[][..], &[][..])
    };
    let h_div = source.h_div();

    for (y, packed_row) in dst[0]
        .chunks_exact_mut(width * 2)
        .take(height)
        .enumerate()
    {
        let y_row = &src[0][y * width..(y + 1) * width];
        let chroma_offset = (y / source.v_div()) * chroma_width;

        for (x, (px, luma)) in packed_row
            .chunks_exact_mut(4)
            .zip(y_row.chunks_exact(2))
            .enumerate()
        {
            let (u, v) = if !source.has_chroma() {
                (128, 128)
            } else if h_div == 1 {
                let c = chroma_offset + 2 * x;
                (
                    avg2(u_plane[c], u_plane[c + 1]),
                    avg2(v_plane[c], v_plane[c + 1]),
                )
            } else {
                let c = chroma_offset + 2 * x / h_div;
                (u_plane[c], v_plane[c])
            };
            px[target.first_y_position()] = luma[0];
            px[target.second_y_position()] = luma[1];
            px[target.u_position()] = u;
            px[target.v_position()] = v;
        }
    }
    Ok(())
}

fn packed_to_planar<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let source: PackedYuvLayout = SRC.into();
    let target: PlanarLayout = DST.into();
    let packed = &src[0][..width * 2 * height];

    for (y_row, packed_row) in dst[0]
        .chunks_exact_mut(width)
        .zip(packed.chunks_exact(width * 2))
    {
        for (luma, px) in y_row.chunks_exact_mut(2).zip(packed_row.chunks_exact(4)) {
            luma[0] = px[source.first_y_position()];
            luma[1] = px[source.second_y_position()];
        }
    }

    if !target.has_chroma() {
        return Ok(());
    }

    let (chroma_width, chroma_height) = target.chroma_size(width, height);
    let rows = target.v_div();
    let (u_plane, v_plane) = target.chroma_planes_mut(dst);

    for cy in 0..chroma_height {
        let u_row = &mut u_plane[cy * chroma_width..(cy + 1) * chroma_width];
        let v_row = &mut v_plane[cy * chroma_width..(cy + 1) * chroma_width];
        for (cx, (u_dst, v_dst)) in u_row.iter_mut().zip(v_row.iter_mut()).enumerate() {
            // 4:4:4 replicates the macro pixel chroma, other targets own exactly one
            let macro_pixel = if target.h_div() == 1 { cx / 2 } else { cx };
            let mut u_sum = 0u32;
            let mut v_sum = 0u32;
            for row in 0..rows {
                let offset = (cy * rows + row) * width * 2 + macro_pixel * 4;
                u_sum += packed[offset + source.u_position()] as u32;
                v_sum += packed[offset + source.v_position()] as u32;
            }
            *u_dst = (u_sum / rows as u32) as u8;
            *v_dst = (v_sum / rows as u32) as u8;
        }
    }
    Ok(())
}

fn packed_target_for_planar<const SRC: u8>(dst: PackedYuvLayout) -> ConvertHandler {
    packed_targets!(planar_to_packed, SRC, dst)
}

fn planar_target_for_packed<const SRC: u8>(dst: PlanarLayout) -> ConvertHandler {
    planar_targets!(packed_to_planar, SRC, dst)
}

/// Returns `None` for 4:1:1, which has no packed counterpart.
pub(crate) fn planar_to_packed_handler(
    src: PlanarLayout,
    dst: PackedYuvLayout,
) -> Option<ConvertHandler> {
    if src == PlanarLayout::Yuv411 {
        return None;
    }
    Some(planar_sources!(packed_target_for_planar, src, dst))
}

pub(crate) fn packed_to_planar_handler(
    src: PackedYuvLayout,
    dst: PlanarLayout,
) -> Option<ConvertHandler> {
    if dst == PlanarLayout::Yuv411 {
        return None;
    }
    Some(packed_sources!(planar_target_for_packed, src, dst))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yuv420_to_uyvy() {
        let y: Vec<u8> = (1..=8).collect();
        let u = vec![100, 101];
        let v = vec![200, 201];
        let mut packed = vec![0u8; 16];
        let handler =
            planar_to_packed_handler(PlanarLayout::Yuv420, PackedYuvLayout::Uyvy).unwrap();
        handler(&[&y, &u, &v], &mut [&mut packed[..]], 4, 2).unwrap();
        assert_eq!(
            packed,
            vec![100, 1, 200, 2, 101, 3, 201, 4, 100, 5, 200, 6, 101, 7, 201, 8]
        );
    }

    #[test]
    fn test_yuv444_averages_pairs() {
        let y = vec![16u8; 4];
        let u = vec![1, 2, 9, 9];
        let v = vec![0, 255, 4, 4];
        let mut packed = vec![0u8; 8];
        let handler =
            planar_to_packed_handler(PlanarLayout::Yuv444, PackedYuvLayout::Yuyv).unwrap();
        handler(&[&y, &u, &v], &mut [&mut packed[..]], 4, 1).unwrap();
        assert_eq!(packed, vec![16, 1, 16, 127, 16, 9, 16, 4]);
    }

    #[test]
    fn test_yvyu_to_yuv420_averages_rows() {
        // two rows of two macro pixels, Y0 V Y1 U
        let packed = vec![1, 10, 2, 20, 3, 11, 4, 21, 5, 13, 6, 23, 7, 14, 8, 24];
        let mut y = vec![0u8; 8];
        let mut u = vec![0u8; 2];
        let mut v = vec![0u8; 2];
        let handler =
            packed_to_planar_handler(PackedYuvLayout::Yvyu, PlanarLayout::Yuv420).unwrap();
        handler(
            &[&packed],
            &mut [&mut y[..], &mut u[..], &mut v[..]],
            4,
            2,
        )
        .unwrap();
        assert_eq!(y, (1..=8).collect::<Vec<u8>>());
        assert_eq!(u, vec![21, 22]);
        assert_eq!(v, vec![11, 12]);
    }

    #[test]
    fn test_packed_to_yuv444_replicates() {
        let packed = vec![1, 50, 2, 60];
        let mut y = vec![0u8; 2];
        let mut u = vec![0u8; 2];
        let mut v = vec![0u8; 2];
        let handler =
            packed_to_planar_handler(PackedYuvLayout::Yuyv, PlanarLayout::Yuv444).unwrap();
        handler(
            &[&packed],
            &mut [&mut y[..], &mut u[..], &mut v[..]],
            2,
            1,
        )
        .unwrap();
        assert_eq!((y, u, v), (vec![1, 2], vec![50, 50], vec![60, 60]));
    }

    #[test]
    fn test_y8_and_packed() {
        let y = vec![30u8, 31, 32, 33];
        let mut packed = vec![0u8; 8];
        let handler = planar_to_packed_handler(PlanarLayout::Y8, PackedYuvLayout::Yuyv).unwrap();
        handler(&[&y], &mut [&mut packed[..]], 4, 1).unwrap();
        assert_eq!(packed, vec![30, 128, 31, 128, 32, 128, 33, 128]);

        let mut back = vec![0u8; 4];
        let handler = packed_to_planar_handler(PackedYuvLayout::Yuyv, PlanarLayout::Y8).unwrap();
        handler(&[&packed], &mut [&mut back[..]], 4, 1).unwrap();
        assert_eq!(back, y);
    }

    #[test]
    fn test_411_has_no_packed_kernel() {
        assert!(planar_to_packed_handler(PlanarLayout::Yuv411, PackedYuvLayout::Yuyv).is_none());
        assert!(packed_to_planar_handler(PackedYuvLayout::Uyvy, PlanarLayout::Yuv411).is_none());
    }
}
