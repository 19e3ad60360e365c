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

/// Word permutation with SSE2 lane shifts and masks only.
#[inline(always)]
unsafe fn _mm_shuffle_words<const OP: u8>(v: __m128i) -> __m128i {
    let op: WordShuffle = OP.into();
    match op {
        WordShuffle::SwapPairs => _mm_or_si128(_mm_slli_epi16::<8>(v), _mm_srli_epi16::<8>(v)),
        WordShuffle::SwapOdd => {
            let keep = _mm_and_si128(v, _mm_set1_epi32(0x00FF00FF));
            let b1 = _mm_slli_epi32::<16>(_mm_and_si128(v, _mm_set1_epi32(0x0000FF00)));
            let b3 = _mm_srli_epi32::<16>(_mm_and_si128(v, _mm_set1_epi32(0xFF000000u32 as i32)));
            _mm_or_si128(keep, _mm_or_si128(b1, b3))
        }
        WordShuffle::SwapEven => {
            let keep = _mm_and_si128(v, _mm_set1_epi32(0xFF00FF00u32 as i32));
            let b0 = _mm_slli_epi32::<16>(_mm_and_si128(v, _mm_set1_epi32(0x000000FF)));
            let b2 = _mm_srli_epi32::<16>(_mm_and_si128(v, _mm_set1_epi32(0x00FF0000)));
            _mm_or_si128(keep, _mm_or_si128(b0, b2))
        }
        WordShuffle::Reverse => {
            let pairs = _mm_or_si128(_mm_slli_epi16::<8>(v), _mm_srli_epi16::<8>(v));
            _mm_or_si128(_mm_slli_epi32::<16>(pairs), _mm_srli_epi32::<16>(pairs))
        }
        WordShuffle::RotateRight => _mm_or_si128(_mm_slli_epi32::<8>(v), _mm_srli_epi32::<24>(v)),
        WordShuffle::RotateLeft => _mm_or_si128(_mm_srli_epi32::<8>(v), _mm_slli_epi32::<24>(v)),
    }
}

#[target_feature(enable = "sse2")]
unsafe fn shuffle_words_sse2<const OP: u8>(src: &[u8], dst: &mut [u8]) {
    for (src, dst) in src.chunks_exact(16).zip(dst.chunks_exact_mut(16)) {
        let row = _mm_loadu_si128(src.as_ptr() as *const __m128i);
        _mm_storeu_si128(dst.as_mut_ptr() as *mut __m128i, _mm_shuffle_words::<OP>(row));
    }

    let src = src.chunks_exact(16).remainder();
    let dst = dst.chunks_exact_mut(16).into_remainder();
    shuffle_words(OP.into(), src, dst);
}

#[target_feature(enable = "sse2")]
unsafe fn shuffle_words_in_place_sse2<const OP: u8>(data: &mut [u8]) {
    let mut chunks = data.chunks_exact_mut(16);
    for chunk in &mut chunks {
        let row = _mm_loadu_si128(chunk.as_ptr() as *const __m128i);
        _mm_storeu_si128(chunk.as_mut_ptr() as *mut __m128i, _mm_shuffle_words::<OP>(row));
    }
    shuffle_words_in_place(OP.into(), chunks.into_remainder());
}

fn sse2_word_convert<const OP: u8, const BPP: usize>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let len = width * height * BPP;
    unsafe {
        shuffle_words_sse2::<OP>(&src[0][..len], &mut dst[0][..len]);
    }
    Ok(())
}

fn sse2_word_in_place<const OP: u8, const BPP: usize>(
    planes: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    let len = width * height * BPP;
    unsafe {
        shuffle_words_in_place_sse2::<OP>(&mut planes[0][..len]);
    }
    Ok(())
}

fn sse2_word_fns<const BPP: usize>(op: WordShuffle) -> KernelFns {
    word_shuffle_fns!(sse2_word_convert, sse2_word_in_place, op, BPP)
}

/// Packed 4:2:2 reorders and 32-bit RGB reorders.
pub(crate) fn sse2_kernel(from: PixelFormat, to: PixelFormat) -> Option<KernelFns> {
    let op = word_shuffle_for(from, to)?;
    Some(match from.bytes_per_pixel() {
        2 => sse2_word_fns::<2>(op),
        _ => sse2_word_fns::<4>(op),
    })
}
