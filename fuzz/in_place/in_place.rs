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
#![no_main]

use libfuzzer_sys::fuzz_target;
use imgconvert::{plane_pointers_mut, ConversionEngine, PixelFormat};

fuzz_target!(|data: (u8, u8, u8, u8, u8)| {
    let from = PixelFormat::ALL[data.0 as usize % PixelFormat::ALL.len()];
    let to = PixelFormat::ALL[data.1 as usize % PixelFormat::ALL.len()];
    fuzz_in_place(from, to, data.2 as u32, data.3 as u32, data.4);
});

fn fuzz_in_place(from: PixelFormat, to: PixelFormat, width: u32, height: u32, seed: u8) {
    let engine = ConversionEngine::global().unwrap();
    let Some(kernel) = engine.lookup(from, to) else {
        return;
    };
    if !kernel.supports_in_place() || width == 0 || height == 0 {
        return;
    }
    let (h_div, v_div) = from.chroma_divisors();
    if width % h_div != 0 || height % v_div != 0 {
        return;
    }

    let src: Vec<u8> = (0..from.frame_size(width, height))
        .map(|i| (i as u8) ^ seed)
        .collect();
    let mut fresh = vec![0u8; to.frame_size(width, height)];
    engine
        .convert_buffer(&src, from, &mut fresh, to, width, height)
        .unwrap();

    let mut shared = src.clone();
    let mut planes = plane_pointers_mut(&mut shared, from, width, height).unwrap();
    engine
        .convert_in_place(&mut planes, from, to, width, height)
        .unwrap();
    assert_eq!(shared, fresh);
}
