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
mod support;

use image::{GenericImageView, ImageReader};
use imgconvert::{ConversionEngine, FrameBuffer, PixelFormat};
use std::error::Error;
use std::time::Instant;
use support::{aligned_dimensions, max_divergence, save_raw_frame};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "./assets/bench.jpg".to_string());
    let output = args.next().unwrap_or_else(|| ".".to_string());

    let img = ImageReader::open(&input)?.decode()?;
    let (width, height) = aligned_dimensions(img.dimensions().0, img.dimensions().1);
    let rgb = img.crop_imm(0, 0, width, height).to_rgb8();
    let src_bytes = rgb.as_raw();

    let engine = ConversionEngine::global()?;
    println!("{}", engine.describe());
    println!("{} {}x{}", input, width, height);

    for format in PixelFormat::ALL.into_iter().filter(|f| f.is_yuv()) {
        let kernel = engine.lookup(PixelFormat::Rgb24, format);
        let tier = kernel.map(|k| k.tier().name()).unwrap_or("-");

        let mut yuv = FrameBuffer::alloc(format, width, height)?;
        let start_time = Instant::now();
        engine.convert_buffer(
            src_bytes,
            PixelFormat::Rgb24,
            yuv.data_mut(),
            format,
            width,
            height,
        )?;
        let forward = start_time.elapsed();

        let back_tier = engine
            .lookup(format, PixelFormat::Rgb24)
            .map(|k| k.tier().name())
            .unwrap_or("-");
        let mut restored = FrameBuffer::alloc(PixelFormat::Rgb24, width, height)?;
        let start_time = Instant::now();
        engine.convert_buffer(
            yuv.data(),
            format,
            restored.data_mut(),
            PixelFormat::Rgb24,
            width,
            height,
        )?;
        let backward = start_time.elapsed();

        println!(
            "{:>8}: forward {:?} ({}), backward {:?} ({}), max divergence {:?}",
            format.name(),
            forward,
            tier,
            backward,
            back_tier,
            max_divergence(src_bytes, restored.data(), 3)
        );

        let name = format.name().to_ascii_lowercase();
        save_raw_frame(format!("{}/frame.{}", output, name), yuv.data())?;
        image::save_buffer(
            format!("{}/restored_{}.png", output, name),
            restored.data(),
            width,
            height,
            image::ExtendedColorType::Rgb8,
        )?;
    }

    Ok(())
}
