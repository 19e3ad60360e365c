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
use imgconvert::{CapabilityMask, ConversionEngine, ConvertError, PixelFormat};
use std::sync::OnceLock;

fn engines() -> &'static (ConversionEngine, ConversionEngine) {
    static ENGINES: OnceLock<(ConversionEngine, ConversionEngine)> = OnceLock::new();
    ENGINES.get_or_init(|| {
        (
            ConversionEngine::build(CapabilityMask::none()).unwrap(),
            ConversionEngine::build(CapabilityMask::detect()).unwrap(),
        )
    })
}

fuzz_target!(|data: (u8, u8, u8, u8, u8, u8)| {
    let from = PixelFormat::ALL[data.0 as usize % PixelFormat::ALL.len()];
    let to = PixelFormat::ALL[data.1 as usize % PixelFormat::ALL.len()];
    fuzz_convert(from, to, data.2 as u32, data.3 as u32, data.4, data.5);
});

fn fuzz_convert(from: PixelFormat, to: PixelFormat, width: u32, height: u32, seed: u8, shift: u8) {
    let (portable, best) = engines();
    let src: Vec<u8> = (0..from.frame_size(width, height))
        .map(|i| (i as u8).wrapping_mul(seed).wrapping_add(shift))
        .collect();

    let mut expected = vec![0u8; to.frame_size(width, height)];
    let result = portable.convert_buffer(&src, from, &mut expected, to, width, height);

    let mut actual = vec![0u8; to.frame_size(width, height)];
    let accelerated = best.convert_buffer(&src, from, &mut actual, to, width, height);
    assert_eq!(result, accelerated);

    match result {
        Ok(()) => assert_eq!(expected, actual),
        Err(ConvertError::UnsupportedConversion { .. })
        | Err(ConvertError::InvalidGeometry(_))
        | Err(ConvertError::ZeroBaseSize) => {
            assert!(actual.iter().all(|&x| x == 0));
        }
        Err(err) => panic!("{} -> {} {}x{}: {}", from, to, width, height, err),
    }
}
