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
use crate::yuv_planar::planar_to_planar_impl;
use crate::yuv_rgb::rgb_to_planar_impl;

#[target_feature(enable = "avx2")]
unsafe fn planar_to_planar_avx2_impl<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    planar_to_planar_impl::<SRC, DST>(src, dst, width, height)
}

#[target_feature(enable = "avx2")]
unsafe fn rgb_to_planar_avx2_impl<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    rgb_to_planar_impl::<SRC, DST>(src, dst, width, height)
}

pub(crate) fn avx2_planar_to_planar<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    unsafe { planar_to_planar_avx2_impl::<SRC, DST>(src, dst, width, height) }
}

pub(crate) fn avx2_rgb_to_planar<const SRC: u8, const DST: u8>(
    src: &[&[u8]],
    dst: &mut [&mut [u8]],
    width: usize,
    height: usize,
) -> Result<(), ConvertError> {
    unsafe { rgb_to_planar_avx2_impl::<SRC, DST>(src, dst, width, height) }
}
