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
use crate::format_support::{PlanarLayout, RgbLayout};
use crate::ycbcr::{INVERSE_LIMITED, YUV_ROUNDING};
use crate::yuv_rgb::planar_to_rgb_impl;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Loads the chroma for 8 pixels, duplicated to one sample per pixel.
#[inline(always)]
unsafe fn _mm_load_chroma_x8(row: &[u8], h_div: usize) -> __m128i {
    let count = 8 / h_div;
    let mut transient: [u8; 16] = [0; 16];
    transient[..count].copy_from_slice(&row[..count]);
    let values = _mm_loadu_si128(transient.as_ptr() as *const __m128i);
    match h_div {
        1 => values,
        2 => _mm_unpacklo_epi8(values, values),
        _ => {
            let pairs = _mm_unpacklo_epi8(values, values);
            _mm_unpacklo_epi8(pairs, pairs)
        }
    }
}

#[inline(always)]
unsafe fn _mm256_descale_channel(v: __m256i) -> __m256i {
    _mm256_srai_epi32::<16>(_mm256_add_epi32(v, _mm256_set1_epi32(YUV_ROUNDING)))
}

/// Converts 8 pixels per step with 32-bit lanes; produces exactly the table path result.
#[target_feature(enable = "avx2")]
unsafe fn avx2_yuv_to_rgb_row_impl<const SRC: u8, const DST: u8>(
    y_row: &[u8],
    u_row: &[u8],
    v_row: &[u8],
    rgb: &mut [u8],
    width: usize,
) -> usize {
    let source: PlanarLayout = SRC.into();
    let target: RgbLayout = DST.into();
    if target.is_gray() || !source.has_chroma() {
        return 0;
    }
    let channels = target.channels();
    let h_div = source.h_div();

    let y_corr = _mm256_set1_epi32(16);
    let uv_corr = _mm256_set1_epi32(128);
    let v_luma_coeff = _mm256_set1_epi32(INVERSE_LIMITED.y_coef);
    let v_cr_coeff = _mm256_set1_epi32(INVERSE_LIMITED.cr_coef);
    let v_cb_coeff = _mm256_set1_epi32(INVERSE_LIMITED.cb_coef);
    let v_g_coeff_1 = _mm256_set1_epi32(INVERSE_LIMITED.g_coeff_1);
    let v_g_coeff_2 = _mm256_set1_epi32(INVERSE_LIMITED.g_coeff_2);

    let mut rg_store: [u8; 32] = [0; 32];
    let mut b_store: [u8; 32] = [0; 32];

    let mut cx = 0usize;
    while cx + 8 <= width {
        let uv_x = cx / h_div;
        let y_values = _mm_loadl_epi64(y_row[cx..cx + 8].as_ptr() as *const __m128i);
        let u_values = _mm_load_chroma_x8(&u_row[uv_x..], h_div);
        let v_values = _mm_load_chroma_x8(&v_row[uv_x..], h_div);

        let y_term = _mm256_mullo_epi32(
            _mm256_sub_epi32(_mm256_cvtepu8_epi32(y_values), y_corr),
            v_luma_coeff,
        );
        let u_diff = _mm256_sub_epi32(_mm256_cvtepu8_epi32(u_values), uv_corr);
        let v_diff = _mm256_sub_epi32(_mm256_cvtepu8_epi32(v_values), uv_corr);

        let r = _mm256_descale_channel(_mm256_add_epi32(
            y_term,
            _mm256_mullo_epi32(v_diff, v_cr_coeff),
        ));
        let g = _mm256_descale_channel(_mm256_add_epi32(
            y_term,
            _mm256_add_epi32(
                _mm256_mullo_epi32(u_diff, v_g_coeff_1),
                _mm256_mullo_epi32(v_diff, v_g_coeff_2),
            ),
        ));
        let b = _mm256_descale_channel(_mm256_add_epi32(
            y_term,
            _mm256_mullo_epi32(u_diff, v_cb_coeff),
        ));

        // per 128-bit lane: r0..r3 g0..g3 in the low lane, r4..r7 g4..g7 in the high one
        let rg = _mm256_packs_epi32(r, g);
        let bb = _mm256_packs_epi32(b, b);
        _mm256_storeu_si256(
            rg_store.as_mut_ptr() as *mut __m256i,
            _mm256_packus_epi16(rg, rg),
        );
        _mm256_storeu_si256(
            b_store.as_mut_ptr() as *mut __m256i,
            _mm256_packus_epi16(bb, bb),
        );

        let dst = &mut rgb[cx * channels..(cx + 8) * channels];
        for (i, px) in dst.chunks_exact_mut(channels).enumerate() {
            let lane = if i < 4 { i } else { 12 + i };
            target.write(px, rg_store[lane], rg_store[lane + 4], b_store[lane], 0);
        }

        cx += 8;
    }

    cx
}

fn avx2_yuv_to_rgb_row<const SRC: u8, const DST: u8>(
    y_row: &[u8],
    u_row: &[u8],
    v_row: &[u8],
    rgb: &mut [u8],
    width: usize,
) -> usize {
    unsafe { avx2_yuv_to_rgb_row_impl::<SRC, DST>(y_row, u_row, v_row, rgb, width) }
}

pub(crate) fn avx2_planar_to_rgb<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    planar_to_rgb_impl::<SRC, DST>(
        src,
        dst,
        width,
        height,
        Some(avx2_yuv_to_rgb_row::<SRC, DST>),
    )
}
