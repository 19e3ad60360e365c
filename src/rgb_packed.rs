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
use crate::format_support::{rgb_sources, rgb_targets, RgbLayout};
use crate::kernel::{ConvertHandler, InPlaceHandler};
use crate::ycbcr::COLOR_TABLES;

/// Moves one pixel between RGB family layouts.
///
/// Alpha is carried over when both sides have it and is 0 when inserted.
/// Gray is expanded by replication and produced with the full range luma weights.
#[inline(always)]
fn shuffle_pixel<const SRC: u8, const DST: u8>(src: &[u8], dst: &mut [u8]) {
    let source: RgbLayout = SRC.into();
    let target: RgbLayout = DST.into();
    let (r, g, b) = source.read(src);
    if target.is_gray() {
        dst[0] = COLOR_TABLES.rgb_to_gray(r, g, b);
        return;
    }
    let a = if source.has_alpha() {
        src[source.a_position()]
    } else {
        0
    };
    target.write(dst, r, g, b, a);
}

fn rgb_to_rgb<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let source: RgbLayout = SRC.into();
    let target: RgbLayout = DST.into();
    let pixels = width * height;
    for (src, dst) in src[0][..pixels * source.channels()]
        .chunks_exact(source.channels())
        .zip(dst[0][..pixels * target.channels()].chunks_exact_mut(target.channels()))
    {
        shuffle_pixel::<SRC, DST>(src, dst);
    }
    Ok(())
}

fn rgb_in_place<const SRC: u8, const DST: u8>(
    planes: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let source: RgbLayout = SRC.into();
    let channels = source.channels();
    for chunk in planes[0][..width * height * channels].chunks_exact_mut(channels) {
        let mut pixel = [0u8; 4];
        pixel[..channels].copy_from_slice(chunk);
        shuffle_pixel::<SRC, DST>(&pixel[..channels], chunk);
    }
    Ok(())
}

fn rgb_target<const SRC: u8>(dst: RgbLayout) -> ConvertHandler {
    rgb_targets!(rgb_to_rgb, SRC, dst)
}

fn rgb_in_place_target<const SRC: u8>(dst: RgbLayout) -> Option<InPlaceHandler> {
    let source: RgbLayout = SRC.into();
    if source.channels() != dst.channels() || source.is_gray() {
        return None;
    }
    Some(match dst {
        RgbLayout::Rgb24 => rgb_in_place::<SRC, { RgbLayout::Rgb24 as u8 }>,
        RgbLayout::Bgr24 => rgb_in_place::<SRC, { RgbLayout::Bgr24 as u8 }>,
        RgbLayout::Rgba32 => rgb_in_place::<SRC, { RgbLayout::Rgba32 as u8 }>,
        RgbLayout::Abgr32 => rgb_in_place::<SRC, { RgbLayout::Abgr32 as u8 }>,
        RgbLayout::Argb32 => rgb_in_place::<SRC, { RgbLayout::Argb32 as u8 }>,
        RgbLayout::Bgra32 => rgb_in_place::<SRC, { RgbLayout::Bgra32 as u8 }>,
        RgbLayout::Gray8 => return None,
    })
}

pub(crate) fn rgb_to_rgb_handler(src: RgbLayout, dst: RgbLayout) -> ConvertHandler {
    rgb_sources!(rgb_target, src, dst)
}

/// Same sized colour layouts can be reordered in place.
pub(crate) fn rgb_in_place_handler(src: RgbLayout, dst: RgbLayout) -> Option<InPlaceHandler> {
    rgb_sources!(rgb_in_place_target, src, dst)
}
