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
use crate::pixel_format::PixelFormat;

/// Byte permutation applied to every 32-bit word of a frame.
///
/// Packed 4:2:2 macro pixels and 32-bit RGB pixels are both 4 bytes, so
/// every reorder between them is one of these permutations.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum WordShuffle {
    /// 0 1 2 3 -> 1 0 3 2
    SwapPairs = 0,
    /// 0 1 2 3 -> 0 3 2 1
    SwapOdd = 1,
    /// 0 1 2 3 -> 2 1 0 3
    SwapEven = 2,
    /// 0 1 2 3 -> 3 2 1 0
    Reverse = 3,
    /// 0 1 2 3 -> 3 0 1 2
    RotateRight = 4,
    /// 0 1 2 3 -> 1 2 3 0
    RotateLeft = 5,
}

impl From<u8> for WordShuffle {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => WordShuffle::SwapPairs,
            1 => WordShuffle::SwapOdd,
            2 => WordShuffle::SwapEven,
            3 => WordShuffle::Reverse,
            4 => WordShuffle::RotateRight,
            5 => WordShuffle::RotateLeft,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl WordShuffle {
    /// Source byte index for each destination byte of a word.
    #[inline(always)]
    pub(crate) const fn pattern(self) -> [u8; 4] {
        match self {
            WordShuffle::SwapPairs => [1, 0, 3, 2],
            WordShuffle::SwapOdd => [0, 3, 2, 1],
            WordShuffle::SwapEven => [2, 1, 0, 3],
            WordShuffle::Reverse => [3, 2, 1, 0],
            WordShuffle::RotateRight => [3, 0, 1, 2],
            WordShuffle::RotateLeft => [1, 2, 3, 0],
        }
    }

    /// `pshufb`/`tbl` table for 16 bytes
    pub(crate) const fn table(self) -> [u8; 16] {
        let pattern = self.pattern();
        let mut table = [0u8; 16];
        let mut i = 0usize;
        while i < 16 {
            table[i] = (i as u8 & !3) + pattern[i & 3];
            i += 1;
        }
        table
    }

    #[inline(always)]
    pub(crate) fn apply(self, word: [u8; 4]) -> [u8; 4] {
        let p = self.pattern();
        [
            word[p[0] as usize],
            word[p[1] as usize],
            word[p[2] as usize],
            word[p[3] as usize],
        ]
    }
}

/// Scalar tail shared by the vector paths
#[inline(always)]
pub(crate) fn shuffle_words(op: WordShuffle, src: &[u8], dst: &mut [u8]) {
    for (src, dst) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        dst.copy_from_slice(&op.apply([src[0], src[1], src[2], src[3]]));
    }
}

#[inline(always)]
pub(crate) fn shuffle_words_in_place(op: WordShuffle, data: &mut [u8]) {
    for chunk in data.chunks_exact_mut(4) {
        let shuffled = op.apply([chunk[0], chunk[1], chunk[2], chunk[3]]);
        chunk.copy_from_slice(&shuffled);
    }
}

/// Permutation reordering `from` into `to`, for 4 byte pixel groups.
pub(crate) fn word_shuffle_for(from: PixelFormat, to: PixelFormat) -> Option<WordShuffle> {
    use PixelFormat::*;
    match (from, to) {
        (Yuy2, Uyvy) | (Uyvy, Yuy2) => Some(WordShuffle::SwapPairs),
        (Yuy2, Yvyu) | (Yvyu, Yuy2) => Some(WordShuffle::SwapOdd),
        (Uyvy, Yvyu) => Some(WordShuffle::RotateLeft),
        (Yvyu, Uyvy) => Some(WordShuffle::RotateRight),
        (Rgba32, Bgra32) | (Bgra32, Rgba32) => Some(WordShuffle::SwapEven),
        (Abgr32, Argb32) | (Argb32, Abgr32) => Some(WordShuffle::SwapOdd),
        (Rgba32, Abgr32) | (Abgr32, Rgba32) | (Bgra32, Argb32) | (Argb32, Bgra32) => {
            Some(WordShuffle::Reverse)
        }
        (Rgba32, Argb32) | (Bgra32, Abgr32) => Some(WordShuffle::RotateRight),
        (Argb32, Rgba32) | (Abgr32, Bgra32) => Some(WordShuffle::RotateLeft),
        _ => None,
    }
}

/// Instantiates `$convert::<OP, $bpp>` and `$in_place::<OP, $bpp>` for a runtime permutation.
#[allow(unused_macros)]
macro_rules! word_shuffle_fns {
    ($convert:ident, $in_place:ident, $op:expr, $bpp:ident) => {
        match $op {
            $crate::word_shuffle::WordShuffle::SwapPairs => $crate::kernel::KernelFns::new(
                $convert::<{ $crate::word_shuffle::WordShuffle::SwapPairs as u8 }, $bpp>,
                Some($in_place::<{ $crate::word_shuffle::WordShuffle::SwapPairs as u8 }, $bpp>),
            ),
            $crate::word_shuffle::WordShuffle::SwapOdd => $crate::kernel::KernelFns::new(
                $convert::<{ $crate::word_shuffle::WordShuffle::SwapOdd as u8 }, $bpp>,
                Some($in_place::<{ $crate::word_shuffle::WordShuffle::SwapOdd as u8 }, $bpp>),
            ),
            $crate::word_shuffle::WordShuffle::SwapEven => $crate::kernel::KernelFns::new(
                $convert::<{ $crate::word_shuffle::WordShuffle::SwapEven as u8 }, $bpp>,
                Some($in_place::<{ $crate::word_shuffle::WordShuffle::SwapEven as u8 }, $bpp>),
            ),
            $crate::word_shuffle::WordShuffle::Reverse => $crate::kernel::KernelFns::new(
                $convert::<{ $crate::word_shuffle::WordShuffle::Reverse as u8 }, $bpp>,
                Some($in_place::<{ $crate::word_shuffle::WordShuffle::Reverse as u8 }, $bpp>),
            ),
            $crate::word_shuffle::WordShuffle::RotateRight => $crate::kernel::KernelFns::new(
                $convert::<{ $crate::word_shuffle::WordShuffle::RotateRight as u8 }, $bpp>,
                Some($in_place::<{ $crate::word_shuffle::WordShuffle::RotateRight as u8 }, $bpp>),
            ),
            $crate::word_shuffle::WordShuffle::RotateLeft => $crate::kernel::KernelFns::new(
                $convert::<{ $crate::word_shuffle::WordShuffle::RotateLeft as u8 }, $bpp>,
                Some($in_place::<{ $crate::word_shuffle::WordShuffle::RotateLeft as u8 }, $bpp>),
            ),
        }
    };
}

#[allow(unused_imports)]
pub(crate) use word_shuffle_fns;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert_error::ConvertError;
    use crate::dispatch::portable_kernel;

    #[test]
    fn test_table_repeats_pattern() {
        let table = WordShuffle::RotateLeft.table();
        assert_eq!(&table[..8], &[1, 2, 3, 0, 5, 6, 7, 4]);
        assert_eq!(&table[12..], &[13, 14, 15, 12]);
    }

    #[test]
    fn test_permutations_match_portable_kernels() -> Result<(), ConvertError> {
        let src: Vec<u8> = (1..=8).collect();
        for from in PixelFormat::ALL {
            for to in PixelFormat::ALL {
                let Some(op) = word_shuffle_for(from, to) else {
                    continue;
                };
                let (width, height) = (8 / from.bytes_per_pixel() as u32, 1);
                let mut expected = vec![0u8; 8];
                let kernel = portable_kernel(from, to).ok_or(ConvertError::AllocationFailure)?;
                kernel.convert(&[&src], &mut [&mut expected[..]], width, height)?;
                let mut out = vec![0u8; 8];
                shuffle_words(op, &src, &mut out);
                assert_eq!(out, expected, "{} -> {}", from, to);
                let mut shared = src.clone();
                shuffle_words_in_place(op, &mut shared);
                assert_eq!(shared, expected);
            }
        }
        Ok(())
    }
}
