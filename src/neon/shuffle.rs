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
use crate::kernel::KernelFns;
use crate::pixel_format::PixelFormat;
use crate::word_shuffle::{
    shuffle_words, shuffle_words_in_place, word_shuffle_fns, word_shuffle_for, WordShuffle,
};
use std::arch::aarch64::*;

#[inline(always)]
unsafe fn shuffle_qtable_words_impl(src: &[u8], dst: &mut [u8], op: WordShuffle) {
    let vq_table = op.table();
    let q_table = vld1q_u8(vq_table.as_ptr());

    for (src, dst) in src.chunks_exact(16 * 4).zip(dst.chunks_exact_mut(16 * 4)) {
        let mut rows = vld1q_u8_x4(src.as_ptr());
        rows.0 = vqtbl1q_u8(rows.0, q_table);
        rows.1 = vqtbl1q_u8(rows.1, q_table);
        rows.2 = vqtbl1q_u8(rows.2, q_table);
        rows.3 = vqtbl1q_u8(rows.3, q_table);
        vst1q_u8_x4(dst.as_mut_ptr(), rows);
    }

    let src = src.chunks_exact(16 * 4).remainder();
    let dst = dst.chunks_exact_mut(16 * 4).into_remainder();

    for (src, dst) in src.chunks_exact(16).zip(dst.chunks_exact_mut(16)) {
        let row = vld1q_u8(src.as_ptr());
        vst1q_u8(dst.as_mut_ptr(), vqtbl1q_u8(row, q_table));
    }

    let src = src.chunks_exact(16).remainder();
    let dst = dst.chunks_exact_mut(16).into_remainder();
    shuffle_words(op, src, dst);
}

#[inline(always)]
unsafe fn shuffle_qtable_words_in_place_impl(data: &mut [u8], op: WordShuffle) {
    let vq_table = op.table();
    let q_table = vld1q_u8(vq_table.as_ptr());

    let mut chunks = data.chunks_exact_mut(16);
    for chunk in &mut chunks {
        let row = vld1q_u8(chunk.as_ptr());
        vst1q_u8(chunk.as_mut_ptr(), vqtbl1q_u8(row, q_table));
    }
    shuffle_words_in_place(op, chunks.into_remainder());
}

#[inline(always)]
unsafe fn swap_rb24_impl(src: &[u8], dst: &mut [u8]) {
    for (src, dst) in src.chunks_exact(16 * 3).zip(dst.chunks_exact_mut(16 * 3)) {
        let pixels = vld3q_u8(src.as_ptr());
        vst3q_u8(dst.as_mut_ptr(), uint8x16x3_t(pixels.2, pixels.1, pixels.0));
    }

    let src = src.chunks_exact(16 * 3).remainder();
    let dst = dst.chunks_exact_mut(16 * 3).into_remainder();
    for (src, dst) in src.chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
        dst[0] = src[2];
        dst[1] = src[1];
        dst[2] = src[0];
    }
}

#[inline(always)]
unsafe fn swap_rb24_in_place_impl(data: &mut [u8]) {
    let mut chunks = data.chunks_exact_mut(16 * 3);
    for chunk in &mut chunks {
        let pixels = vld3q_u8(chunk.as_ptr());
        vst3q_u8(
            chunk.as_mut_ptr(),
            uint8x16x3_t(pixels.2, pixels.1, pixels.0),
        );
    }
    for px in chunks.into_remainder().chunks_exact_mut(3) {
        px.swap(0, 2);
    }
}

fn neon_word_convert<const OP: u8, const BPP: usize>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let len = width * height * BPP;
    unsafe {
        shuffle_qtable_words_impl(&src[0][..len], &mut dst[0][..len], OP.into());
    }
    Ok(())
}

fn neon_word_in_place<const OP: u8, const BPP: usize>(
    planes: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let len = width * height * BPP;
    unsafe {
        shuffle_qtable_words_in_place_impl(&mut planes[0][..len], OP.into());
    }
    Ok(())
}

fn neon_swap_rb24(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let len = width * height * 3;
    unsafe {
        swap_rb24_impl(&src[0][..len], &mut dst[0][..len]);
    }
    Ok(())
}

fn neon_swap_rb24_in_place(
    planes: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let len = width * height * 3;
    unsafe {
        swap_rb24_in_place_impl(&mut planes[0][..len]);
    }
    Ok(())
}

fn neon_word_fns<const BPP: usize>(op: WordShuffle) -> KernelFns {
    word_shuffle_fns!(neon_word_convert, neon_word_in_place, op, BPP)
}

/// `tbl` reorders for packed 4:2:2 and 32-bit RGB, `ld3`/`st3` for RGB24/BGR24.
pub(crate) fn neon_kernel(from: PixelFormat, to: PixelFormat) -> Option<KernelFns> {
    if matches!(
        (from, to),
        (PixelFormat::Rgb24, PixelFormat::Bgr24) | (PixelFormat::Bgr24, PixelFormat::Rgb24)
    ) {
        return Some(KernelFns::new(
            neon_swap_rb24,
            Some(neon_swap_rb24_in_place),
        ));
    }
    let op = word_shuffle_for(from, to)?;
    Some(match from.bytes_per_pixel() {
        2 => neon_word_fns::<2>(op),
        _ => neon_word_fns::<4>(op),
    })
}
