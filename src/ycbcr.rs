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
//! Fixed point BT.601 limited range transform.
//!
//! All coefficients are 16 bit fixed point with truncating division; the
//! lookup tables below hold the per byte partial products of the same
//! constants, so both paths are bit exact with each other.
#[cfg(test)]
use crate::numerics::qrshr_u8;
use crate::numerics::saturate_u8;

pub(crate) const YUV_PRECISION: i32 = 16;
pub(crate) const YUV_ROUNDING: i32 = 1 << (YUV_PRECISION - 1);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct CbCrInverseTransform {
    pub(crate) y_coef: i32,
    pub(crate) cr_coef: i32,
    pub(crate) cb_coef: i32,
    pub(crate) g_coeff_1: i32,
    pub(crate) g_coeff_2: i32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct CbCrForwardTransform {
    pub(crate) yr: i32,
    pub(crate) yg: i32,
    pub(crate) yb: i32,
    pub(crate) cb_r: i32,
    pub(crate) cb_g: i32,
    pub(crate) cb_b: i32,
    pub(crate) cr_r: i32,
    pub(crate) cr_g: i32,
    pub(crate) cr_b: i32,
}

/// Y'CbCr to RGB; `g_coeff_1` multiplies Cb, `g_coeff_2` multiplies Cr.
pub(crate) const INVERSE_LIMITED: CbCrInverseTransform = CbCrInverseTransform {
    y_coef: 71392,
    cr_coef: 98007,
    cb_coef: 123872,
    g_coeff_1: -24057,
    g_coeff_2: -51842,
};

pub(crate) const FORWARD_LIMITED: CbCrForwardTransform = CbCrForwardTransform {
    yr: 16829,
    yg: 33039,
    yb: 6416,
    cb_r: -9714,
    cb_g: -19070,
    cb_b: 28784,
    cr_r: 28784,
    cr_g: -24103,
    cr_b: -4681,
};

/// Full range luma weights used for RGB to gray
pub(crate) const GRAY_WEIGHTS: (i32, i32, i32) = (19595, 38470, 7471);

#[cfg(test)]
pub(crate) const fn yuv_to_rgb_direct(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let t = INVERSE_LIMITED;
    let y_term = t.y_coef * (y as i32 - 16);
    let cb = u as i32 - 128;
    let cr = v as i32 - 128;
    (
        qrshr_u8::<YUV_PRECISION>(y_term + t.cr_coef * cr),
        qrshr_u8::<YUV_PRECISION>(y_term + t.g_coeff_1 * cb + t.g_coeff_2 * cr),
        qrshr_u8::<YUV_PRECISION>(y_term + t.cb_coef * cb),
    )
}

#[cfg(test)]
pub(crate) const fn rgb_to_yuv_direct(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let t = FORWARD_LIMITED;
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let y = ((t.yr * r + t.yg * g + t.yb * b + YUV_ROUNDING) >> YUV_PRECISION) + 16;
    let u = ((t.cb_r * r + t.cb_g * g + t.cb_b * b + YUV_ROUNDING) >> YUV_PRECISION) + 128;
    let v = ((t.cr_r * r + t.cr_g * g + t.cr_b * b + YUV_ROUNDING) >> YUV_PRECISION) + 128;
    (saturate_u8(y), saturate_u8(u), saturate_u8(v))
}

#[cfg(test)]
pub(crate) const fn rgb_to_gray_direct(r: u8, g: u8, b: u8) -> u8 {
    let (wr, wg, wb) = GRAY_WEIGHTS;
    qrshr_u8::<YUV_PRECISION>(wr * r as i32 + wg * g as i32 + wb * b as i32)
}

/// Per byte partial products of the transform constants.
pub(crate) struct ColorTables {
    y: [i32; 256],
    r_cr: [i32; 256],
    g_cb: [i32; 256],
    g_cr: [i32; 256],
    b_cb: [i32; 256],
    fy_r: [i32; 256],
    fy_g: [i32; 256],
    fy_b: [i32; 256],
    fcb_r: [i32; 256],
    fcb_g: [i32; 256],
    fcb_b: [i32; 256],
    fcr_g: [i32; 256],
    fcr_b: [i32; 256],
    gray_r: [i32; 256],
    gray_g: [i32; 256],
    gray_b: [i32; 256],
}

impl ColorTables {
    const fn build() -> ColorTables {
        let inv = INVERSE_LIMITED;
        let fwd = FORWARD_LIMITED;
        let mut tables = ColorTables {
            y: [0; 256],
            r_cr: [0; 256],
            g_cb: [0; 256],
            g_cr: [0; 256],
            b_cb: [0; 256],
            fy_r: [0; 256],
            fy_g: [0; 256],
            fy_b: [0; 256],
            fcb_r: [0; 256],
            fcb_g: [0; 256],
            fcb_b: [0; 256],
            fcr_g: [0; 256],
            fcr_b: [0; 256],
            gray_r: [0; 256],
            gray_g: [0; 256],
            gray_b: [0; 256],
        };
        let mut i = 0usize;
        while i < 256 {
            let v = i as i32;
            tables.y[i] = inv.y_coef * (v - 16) + YUV_ROUNDING;
            tables.r_cr[i] = inv.cr_coef * (v - 128);
            tables.g_cb[i] = inv.g_coeff_1 * (v - 128);
            tables.g_cr[i] = inv.g_coeff_2 * (v - 128);
            tables.b_cb[i] = inv.cb_coef * (v - 128);
            tables.fy_r[i] = fwd.yr * v + YUV_ROUNDING;
            tables.fy_g[i] = fwd.yg * v;
            tables.fy_b[i] = fwd.yb * v;
            tables.fcb_r[i] = fwd.cb_r * v + YUV_ROUNDING;
            tables.fcb_g[i] = fwd.cb_g * v;
            tables.fcb_b[i] = fwd.cb_b * v;
            // cr_r equals cb_b, the blue table is shared
            tables.fcr_g[i] = fwd.cr_g * v;
            tables.fcr_b[i] = fwd.cr_b * v + YUV_ROUNDING;
            tables.gray_r[i] = GRAY_WEIGHTS.0 * v + YUV_ROUNDING;
            tables.gray_g[i] = GRAY_WEIGHTS.1 * v;
            tables.gray_b[i] = GRAY_WEIGHTS.2 * v;
            i += 1;
        }
        tables
    }

    #[inline(always)]
    pub(crate) fn yuv_to_rgb(&self, y: u8, u: u8, v: u8) -> (u8, u8, u8) {
        let y_term = self.y[y as usize];
        (
            saturate_u8((y_term + self.r_cr[v as usize]) >> YUV_PRECISION),
            saturate_u8((y_term + self.g_cb[u as usize] + self.g_cr[v as usize]) >> YUV_PRECISION),
            saturate_u8((y_term + self.b_cb[u as usize]) >> YUV_PRECISION),
        )
    }

    /// Limited range luma expanded to full range gray
    #[inline(always)]
    pub(crate) fn luma_to_gray(&self, y: u8) -> u8 {
        saturate_u8(self.y[y as usize] >> YUV_PRECISION)
    }

    #[inline(always)]
    pub(crate) fn rgb_to_y(&self, r: u8, g: u8, b: u8) -> u8 {
        let sum = self.fy_r[r as usize] + self.fy_g[g as usize] + self.fy_b[b as usize];
        saturate_u8((sum >> YUV_PRECISION) + 16)
    }

    #[inline(always)]
    pub(crate) fn rgb_to_uv(&self, r: u8, g: u8, b: u8) -> (u8, u8) {
        let cb = self.fcb_r[r as usize] + self.fcb_g[g as usize] + self.fcb_b[b as usize];
        let cr = self.fcb_b[r as usize] + self.fcr_g[g as usize] + self.fcr_b[b as usize];
        (
            saturate_u8((cb >> YUV_PRECISION) + 128),
            saturate_u8((cr >> YUV_PRECISION) + 128),
        )
    }

    #[inline(always)]
    pub(crate) fn rgb_to_gray(&self, r: u8, g: u8, b: u8) -> u8 {
        let sum = self.gray_r[r as usize] + self.gray_g[g as usize] + self.gray_b[b as usize];
        saturate_u8(sum >> YUV_PRECISION)
    }
}

pub(crate) static COLOR_TABLES: ColorTables = ColorTables::build();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_match_direct_inverse() {
        for y in 0..=255u8 {
            for u in 0..=255u8 {
                for v in 0..=255u8 {
                    assert_eq!(
                        COLOR_TABLES.yuv_to_rgb(y, u, v),
                        yuv_to_rgb_direct(y, u, v),
                        "y {} u {} v {}",
                        y,
                        u,
                        v
                    );
                }
            }
        }
    }

    #[test]
    fn test_tables_match_direct_forward() {
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                for b in (0..=255u8).step_by(3) {
                    let (y, u, v) = rgb_to_yuv_direct(r, g, b);
                    assert_eq!(COLOR_TABLES.rgb_to_y(r, g, b), y);
                    assert_eq!(COLOR_TABLES.rgb_to_uv(r, g, b), (u, v));
                    assert_eq!(COLOR_TABLES.rgb_to_gray(r, g, b), rgb_to_gray_direct(r, g, b));
                }
            }
        }
    }

    #[test]
    fn test_limited_range_black_and_white() {
        let (r, g, b) = yuv_to_rgb_direct(16, 128, 128);
        assert!(r <= 2 && g <= 2 && b <= 2);
        let (r, g, b) = yuv_to_rgb_direct(235, 128, 128);
        assert_eq!((r, g, b), (239, 239, 239));
        assert_eq!(yuv_to_rgb_direct(255, 128, 128), (255, 255, 255));
        assert_eq!(rgb_to_yuv_direct(0, 0, 0), (16, 128, 128));
        let (y, u, v) = rgb_to_yuv_direct(255, 255, 255);
        assert!((234..=236).contains(&y));
        assert_eq!((u, v), (128, 128));
    }

    #[test]
    fn test_gray_survives_rgb_replication() {
        for gray in 0..=255u8 {
            assert_eq!(rgb_to_gray_direct(gray, gray, gray), gray);
        }
    }
}
