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
use criterion::{criterion_group, criterion_main, Criterion};
use imgconvert::{CapabilityMask, ConversionEngine, FrameBuffer, PixelFormat};
use rand::Rng;
use yuv_sys::{rs_I420ToRGB24, rs_RGB24ToI420};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn random_frame(format: PixelFormat) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..format.frame_size(WIDTH, HEIGHT))
        .map(|_| rng.random())
        .collect()
}

fn bench_pair(
    c: &mut Criterion,
    engine: &ConversionEngine,
    label: &str,
    from: PixelFormat,
    to: PixelFormat,
) {
    let src = random_frame(from);
    let mut dst = FrameBuffer::alloc(to, WIDTH, HEIGHT).unwrap();
    c.bench_function(
        &format!("imgconvert {} {} -> {}", label, from, to),
        |b| {
            b.iter(|| {
                engine
                    .convert_buffer(&src, from, dst.data_mut(), to, WIDTH, HEIGHT)
                    .unwrap();
            })
        },
    );
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let portable = ConversionEngine::build(CapabilityMask::none()).unwrap();
    let accelerated = ConversionEngine::build(CapabilityMask::detect()).unwrap();

    let pairs = [
        (PixelFormat::Yuv420p, PixelFormat::Rgb24),
        (PixelFormat::Yuv422p, PixelFormat::Bgra32),
        (PixelFormat::Rgb24, PixelFormat::Yuv420p),
        (PixelFormat::Yuv444p, PixelFormat::Yuv420p),
        (PixelFormat::Yuy2, PixelFormat::Uyvy),
        (PixelFormat::Uyvy, PixelFormat::Yvyu),
        (PixelFormat::Rgba32, PixelFormat::Argb32),
        (PixelFormat::Rgb24, PixelFormat::Bgr24),
    ];

    for (from, to) in pairs {
        bench_pair(c, &portable, "portable", from, to);
        bench_pair(c, &accelerated, "best", from, to);
    }

    let planar = random_frame(PixelFormat::Yuv420p);
    let (y_plane, chroma) = planar.split_at((WIDTH * HEIGHT) as usize);
    let (u_plane, v_plane) = chroma.split_at(chroma.len() / 2);

    c.bench_function("libyuv YUV 4:2:0 -> RGB24", |b| {
        let mut rgb_bytes = vec![0u8; WIDTH as usize * HEIGHT as usize * 3];
        b.iter(|| unsafe {
            rs_I420ToRGB24(
                y_plane.as_ptr(),
                WIDTH as i32,
                u_plane.as_ptr(),
                WIDTH as i32 / 2,
                v_plane.as_ptr(),
                WIDTH as i32 / 2,
                rgb_bytes.as_mut_ptr(),
                WIDTH as i32 * 3,
                WIDTH as i32,
                HEIGHT as i32,
            );
        })
    });

    let rgb = random_frame(PixelFormat::Rgb24);
    c.bench_function("libyuv RGB24 -> YUV 4:2:0", |b| {
        let mut target_y = vec![0u8; (WIDTH * HEIGHT) as usize];
        let mut target_u = vec![0u8; (WIDTH / 2 * HEIGHT / 2) as usize];
        let mut target_v = vec![0u8; (WIDTH / 2 * HEIGHT / 2) as usize];
        b.iter(|| unsafe {
            rs_RGB24ToI420(
                rgb.as_ptr(),
                WIDTH as i32 * 3,
                target_y.as_mut_ptr(),
                WIDTH as i32,
                target_u.as_mut_ptr(),
                WIDTH as i32 / 2,
                target_v.as_mut_ptr(),
                WIDTH as i32 / 2,
                WIDTH as i32,
                HEIGHT as i32,
            );
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
