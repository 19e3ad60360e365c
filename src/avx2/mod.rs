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
#![deny(unreachable_code, unreachable_pub)]

mod full_converters;
mod yuv_to_rgb;

use crate::format_support::{
    planar_sources, planar_targets, rgb_sources, rgb_targets, PlanarLayout, RgbLayout,
};
use crate::kernel::{ConvertHandler, KernelFns};
use crate::pixel_format::{FormatLayout, PixelFormat};
use crate::yuv_planar::planar_in_place_handler;
use full_converters::{avx2_planar_to_planar, avx2_rgb_to_planar};
use yuv_to_rgb::avx2_planar_to_rgb;

fn rgb_target_for_planar<const SRC: u8>(dst: RgbLayout) -> ConvertHandler {
    rgb_targets!(avx2_planar_to_rgb, SRC, dst)
}

fn planar_target_for_planar<const SRC: u8>(dst: PlanarLayout) -> ConvertHandler {
    planar_targets!(avx2_planar_to_planar, SRC, dst)
}

fn planar_target_for_rgb<const SRC: u8>(dst: PlanarLayout) -> ConvertHandler {
    planar_targets!(avx2_rgb_to_planar, SRC, dst)
}

/// YUV to colour RGB rows, chroma resampling and RGB to planar YUV.
pub(crate) fn avx2_kernel(from: PixelFormat, to: PixelFormat) -> Option<KernelFns> {
    match (from.layout(), to.layout()) {
        (FormatLayout::Planar(src), FormatLayout::Rgb(dst))
            if src.has_chroma() && !dst.is_gray() =>
        {
            Some(KernelFns::new(
                planar_sources!(rgb_target_for_planar, src, dst),
                None,
            ))
        }
        (FormatLayout::Planar(src), FormatLayout::Planar(dst)) if src != dst => {
            Some(KernelFns::new(
                planar_sources!(planar_target_for_planar, src, dst),
                planar_in_place_handler(src, dst),
            ))
        }
        (FormatLayout::Rgb(src), FormatLayout::Planar(dst)) => Some(KernelFns::new(
            rgb_sources!(planar_target_for_rgb, src, dst),
            None,
        )),
        _ => None,
    }
}
