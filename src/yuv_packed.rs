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
use crate::format_support::{packed_sources, packed_targets, PackedYuvLayout};
use crate::kernel::{ConvertHandler, InPlaceHandler};

#[inline(always)]
fn reorder_macro_pixel<const SRC: u8, const DST: u8>(src: [u8; 4], dst: &mut [u8]) {
    let source: PackedYuvLayout = SRC.into();
    let target: PackedYuvLayout = DST.into();
    dst[target.first_y_position()] = src[source.first_y_position()];
    dst[target.second_y_position()] = src[source.second_y_position()];
    dst[target.u_position()] = src[source.u_position()];
    dst[target.v_position()] = src[source.v_position()];
}

#[inline(always)]
pub(crate) fn reorder_packed<const SRC: u8, const DST: u8>(src: &[u8], dst: &mut [u8]) {
    for (src, dst) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        reorder_macro_pixel::<SRC, DST>([src[0], src[1], src[2], src[3]], dst);
    }
}

fn packed_to_packed<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let len = width * 2 * height;
    reorder_packed::<SRC, DST>(&src[0][..len], &mut dst[0][..len]);
    Ok(())
}

/// Converts through a YUY2 scratch frame; the caller's source is left untouched.
fn packed_through_yuy2<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let len = width * 2 * height;
    let mut scratch: Vec<u8> = Vec::new();
    scratch
        .try_reserve_exact(len)
        .map_err(|_| ConvertError::AllocationFailure)?;
    scratch.resize(len, 0);
    reorder_packed::<SRC, { PackedYuvLayout::Yuyv as u8 }>(&src[0][..len], &mut scratch);
    reorder_packed::<{ PackedYuvLayout::Yuyv as u8 }, DST>(&scratch, &mut dst[0][..len]);
    Ok(())
}

fn packed_in_place<const SRC: u8, const DST: u8>(
    planes: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let len = width * 2 * height;
    for chunk in planes[0][..len].chunks_exact_mut(4) {
        let source = [chunk[0], chunk[1], chunk[2], chunk[3]];
        reorder_macro_pixel::<SRC, DST>(source, chunk);
    }
    Ok(())
}

fn packed_target<const SRC: u8>(dst: PackedYuvLayout) -> ConvertHandler {
    let source: PackedYuvLayout = SRC.into();
    if source == PackedYuvLayout::Yuyv || dst == PackedYuvLayout::Yuyv {
        packed_targets!(packed_to_packed, SRC, dst)
    } else {
        packed_targets!(packed_through_yuy2, SRC, dst)
    }
}

fn packed_in_place_target<const SRC: u8>(dst: PackedYuvLayout) -> InPlaceHandler {
    match dst {
        PackedYuvLayout::Yuyv => packed_in_place::<SRC, { PackedYuvLayout::Yuyv as u8 }>,
        PackedYuvLayout::Uyvy => packed_in_place::<SRC, { PackedYuvLayout::Uyvy as u8 }>,
        PackedYuvLayout::Yvyu => packed_in_place::<SRC, { PackedYuvLayout::Yvyu as u8 }>,
    }
}

/// Direct byte swaps for pairs involving YUY2, composition through YUY2 otherwise.
pub(crate) fn packed_to_packed_handler(
    src: PackedYuvLayout,
    dst: PackedYuvLayout,
) -> ConvertHandler {
    packed_sources!(packed_target, src, dst)
}

pub(crate) fn packed_in_place_handler(
    src: PackedYuvLayout,
    dst: PackedYuvLayout,
) -> InPlaceHandler {
    packed_sources!(packed_in_place_target, src, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const LAYOUTS: [PackedYuvLayout; 3] = [
        PackedYuvLayout::Yuyv,
        PackedYuvLayout::Uyvy,
        PackedYuvLayout::Yvyu,
    ];

    #[test]
    fn test_byte_orders() {
        let yuy2 = [10u8, 20, 11, 30];
        let mut out = [0u8; 4];
        packed_to_packed_handler(PackedYuvLayout::Yuyv, PackedYuvLayout::Uyvy)(
            &[&yuy2],
            &mut [&mut out[..]],
            2,
            1,
        )
        .unwrap();
        assert_eq!(out, [20, 10, 30, 11]);
        packed_to_packed_handler(PackedYuvLayout::Yuyv, PackedYuvLayout::Yvyu)(
            &[&yuy2],
            &mut [&mut out[..]],
            2,
            1,
        )
        .unwrap();
        assert_eq!(out, [10, 30, 11, 20]);
    }

    #[test]
    fn test_composed_pair_keeps_source() {
        let uyvy = vec![20u8, 10, 30, 11, 21, 12, 31, 13];
        let original = uyvy.clone();
        let mut yvyu = vec![0u8; 8];
        packed_to_packed_handler(PackedYuvLayout::Uyvy, PackedYuvLayout::Yvyu)(
            &[&uyvy],
            &mut [&mut yvyu[..]],
            4,
            1,
        )
        .unwrap();
        assert_eq!(yvyu, vec![10, 30, 11, 20, 12, 31, 13, 21]);
        assert_eq!(uyvy, original);
    }

    #[test]
    fn test_in_place_matches_fresh_buffer() {
        let mut rng = StdRng::seed_from_u64(0x59555932);
        let (width, height) = (6usize, 3usize);
        let source: Vec<u8> = (0..width * 2 * height).map(|_| rng.random()).collect();
        for src in LAYOUTS {
            for dst in LAYOUTS {
                let mut fresh = vec![0u8; source.len()];
                packed_to_packed_handler(src, dst)(
                    &[&source],
                    &mut [&mut fresh[..]],
                    width,
                    height,
                )
                .unwrap();
                let mut shared = source.clone();
                packed_in_place_handler(src, dst)(&mut [&mut shared[..]], width, height).unwrap();
                assert_eq!(shared, fresh, "{:?} -> {:?}", src, dst);
            }
        }
    }
}
