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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[target_feature(enable = "sse4.1")]
unsafe fn shuffle_qtable_words_impl(src: &[u8], dst: &mut [u8], op: WordShuffle) {
    let vq_table = op.table();
    let q_table = _mm_loadu_si128(vq_table.as_ptr() as *const __m128i);

    for (src, dst) in src.chunks_exact(16 * 4).zip(dst.chunks_exact_mut(16 * 4)) {
        let mut row_1 = _mm_loadu_si128(src.as_ptr() as *const __m128i);
        let mut row_2 = _mm_loadu_si128(src.as_ptr().add(16) as *const __m128i);
        let mut row_3 = _mm_loadu_si128(src.as_ptr().add(32) as *const __m128i);
        let mut row_4 = _mm_loadu_si128(src.as_ptr().add(48) as *const __m128i);

        row_1 = _mm_shuffle_epi8(row_1, q_table);
        row_2 = _mm_shuffle_epi8(row_2, q_table);
        row_3 = _mm_shuffle_epi8(row_3, q_table);
        row_4 = _mm_shuffle_epi8(row_4, q_table);

        _mm_storeu_si128(dst.as_mut_ptr() as *mut __m128i, row_1);
        _mm_storeu_si128(dst.as_mut_ptr().add(16) as *mut __m128i, row_2);
        _mm_storeu_si128(dst.as_mut_ptr().add(32) as *mut __m128i, row_3);
        _mm_storeu_si128(dst.as_mut_ptr().add(48) as *mut __m128i, row_4);
    }

    let src = src.chunks_exact(16 * 4).remainder();
    let dst = dst.chunks_exact_mut(16 * 4).into_remainder();

    for (src, dst) in src.chunks_exact(16).zip(dst.chunks_exact_mut(16)) {
        let mut row_1 = _mm_loadu_si128(src.as_ptr() as *const __m128i);
        row_1 = _mm_shuffle_epi8(row_1, q_table);
        _mm_storeu_si128(dst.as_mut_ptr() as *mut __m128i, row_1);
    }

    let src = src.chunks_exact(16).remainder();
    let dst = dst.chunks_exact_mut(16).into_remainder();
    shuffle_words(op, src, dst);
}

#[target_feature(enable = "sse4.1")]
unsafe fn shuffle_qtable_words_in_place_impl(data: &mut [u8], op: WordShuffle) {
    let vq_table = op.table();
    let q_table = _mm_loadu_si128(vq_table.as_ptr() as *const __m128i);

    let mut chunks = data.chunks_exact_mut(16);
    for chunk in &mut chunks {
        let row = _mm_loadu_si128(chunk.as_ptr() as *const __m128i);
        _mm_storeu_si128(
            chunk.as_mut_ptr() as *mut __m128i,
            _mm_shuffle_epi8(row, q_table),
        );
    }
    shuffle_words_in_place(op, chunks.into_remainder());
}

/// Tables swapping R and B of 16 packed 24-bit pixels.
///
/// `RGB24_SWAP_TABLES[k][m]` picks the bytes of output register `k` that come
/// from input register `m`, zeroing the rest.
const fn rgb24_swap_tables() -> [[[u8; 16]; 3]; 3] {
    let mut tables = [[[0x80u8; 16]; 3]; 3];
    let mut k = 0usize;
    while k < 3 {
        let mut j = 0usize;
        while j < 16 {
            let index = 16 * k + j;
            let source = 3 * (index / 3) + 2 - index % 3;
            tables[k][source / 16][j] = (source % 16) as u8;
            j += 1;
        }
        k += 1;
    }
    tables
}

static RGB24_SWAP_TABLES: [[[u8; 16]; 3]; 3] = rgb24_swap_tables();

#[inline(always)]
unsafe fn _mm_swap_rb_x16(rows: [__m128i; 3]) -> [__m128i; 3] {
    let mut out = [_mm_setzero_si128(); 3];
    for (k, dst) in out.iter_mut().enumerate() {
        let mut acc = _mm_setzero_si128();
        for (m, row) in rows.iter().enumerate() {
            let table = _mm_loadu_si128(RGB24_SWAP_TABLES[k][m].as_ptr() as *const __m128i);
            acc = _mm_or_si128(acc, _mm_shuffle_epi8(*row, table));
        }
        *dst = acc;
    }
    out
}

#[target_feature(enable = "sse4.1")]
unsafe fn swap_rb24_impl(src: &[u8], dst: &mut [u8]) {
    for (src, dst) in src.chunks_exact(48).zip(dst.chunks_exact_mut(48)) {
        let rows = [
            _mm_loadu_si128(src.as_ptr() as *const __m128i),
            _mm_loadu_si128(src.as_ptr().add(16) as *const __m128i),
            _mm_loadu_si128(src.as_ptr().add(32) as *const __m128i),
        ];
        let [row_1, row_2, row_3] = _mm_swap_rb_x16(rows);
        _mm_storeu_si128(dst.as_mut_ptr() as *mut __m128i, row_1);
        _mm_storeu_si128(dst.as_mut_ptr().add(16) as *mut __m128i, row_2);
        _mm_storeu_si128(dst.as_mut_ptr().add(32) as *mut __m128i, row_3);
    }

    let src = src.chunks_exact(48).remainder();
    let dst = dst.chunks_exact_mut(48).into_remainder();
    for (src, dst) in src.chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
        dst[0] = src[2];
        dst[1] = src[1];
        dst[2] = src[0];
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn swap_rb24_in_place_impl(data: &mut [u8]) {
    let mut chunks = data.chunks_exact_mut(48);
    for chunk in &mut chunks {
        let rows = [
            _mm_loadu_si128(chunk.as_ptr() as *const __m128i),
            _mm_loadu_si128(chunk.as_ptr().add(16) as *const __m128i),
            _mm_loadu_si128(chunk.as_ptr().add(32) as *const __m128i),
        ];
        let [row_1, row_2, row_3] = _mm_swap_rb_x16(rows);
        _mm_storeu_si128(chunk.as_mut_ptr() as *mut __m128i, row_1);
        _mm_storeu_si128(chunk.as_mut_ptr().add(16) as *mut __m128i, row_2);
        _mm_storeu_si128(chunk.as_mut_ptr().add(32) as *mut __m128i, row_3);
    }
    for px in chunks.into_remainder().chunks_exact_mut(3) {
        px.swap(0, 2);
    }
}

fn sse41_word_convert<const OP: u8, const BPP: usize>(
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

fn sse41_word_in_place<const OP: u8, const BPP: usize>(
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

fn sse41_swap_rb24(
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

fn sse41_swap_rb24_in_place(
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

fn sse41_word_fns<const BPP: usize>(op: WordShuffle) -> KernelFns {
    word_shuffle_fns!(sse41_word_convert, sse41_word_in_place, op, BPP)
}

/// `pshufb` reorders: packed 4:2:2, 32-bit RGB and RGB24/BGR24.
pub(crate) fn sse41_kernel(from: PixelFormat, to: PixelFormat) -> Option<KernelFns> {
    if matches!(
        (from, to),
        (PixelFormat::Rgb24, PixelFormat::Bgr24) | (PixelFormat::Bgr24, PixelFormat::Rgb24)
    ) {
        return Some(KernelFns::new(
            sse41_swap_rb24,
            Some(sse41_swap_rb24_in_place),
        ));
    }
    let op = word_shuffle_for(from, to)?;
    Some(match from.bytes_per_pixel() {
        2 => sse41_word_fns::<2>(op),
        _ => sse41_word_fns::<4>(op),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb24_tables_cover_every_byte() {
        for k in 0..3 {
            for j in 0..16 {
                let sources = (0..3)
                    .filter(|&m| RGB24_SWAP_TABLES[k][m][j] != 0x80)
                    .count();
                assert_eq!(sources, 1);
            }
        }
        // output byte 0 is the blue of pixel 0
        assert_eq!(RGB24_SWAP_TABLES[0][0][0], 2);
        // pixel 5 straddles the first two registers
        assert_eq!(RGB24_SWAP_TABLES[0][1][15], 1);
        assert_eq!(RGB24_SWAP_TABLES[1][1][0], 0);
        assert_eq!(RGB24_SWAP_TABLES[1][0][1], 15);
    }
}
