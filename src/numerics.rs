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
#![forbid(unsafe_code)]

#[cfg(test)]
#[inline(always)]
/// Saturating rounding shift right of a fixed point value into a byte
pub(crate) const fn qrshr_u8<const PRECISION: i32>(val: i32) -> u8 {
    let rounding: i32 = 1 << (PRECISION - 1);
    saturate_u8((val + rounding) >> PRECISION)
}

#[inline(always)]
pub(crate) const fn saturate_u8(v: i32) -> u8 {
    if v < 0 {
        0
    } else if v > 255 {
        255
    } else {
        v as u8
    }
}

#[inline(always)]
/// Truncating mean of two samples
pub(crate) const fn avg2(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qrshr_saturates() {
        assert_eq!(qrshr_u8::<16>(-1 << 20), 0);
        assert_eq!(qrshr_u8::<16>(300 << 16), 255);
        assert_eq!(qrshr_u8::<16>((7 << 16) + 32767), 7);
        assert_eq!(qrshr_u8::<16>((7 << 16) + 32768), 8);
    }

    #[test]
    fn test_avg2_truncates() {
        assert_eq!(avg2(3, 4), 3);
        assert_eq!(avg2(255, 255), 255);
        assert_eq!(avg2(0, 1), 0);
    }
}
