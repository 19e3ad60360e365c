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
//! Raw video frame conversion between a fixed catalog of planar YUV, packed
//! YUV and RGB pixel formats.
//!
//! A [ConversionEngine] holds one kernel per supported format pair. It is built
//! once for a [CapabilityMask]: every pair gets a portable kernel, then each
//! acceleration tier the host supports replaces the pairs it implements.
//! Accelerated kernels produce output byte identical to the portable ones.
//!
//! ```no_run
//! use imgconvert::{CapabilityMask, ConversionEngine, PixelFormat};
//!
//! let engine = ConversionEngine::build(CapabilityMask::detect()).unwrap();
//! let yuv = vec![16u8; PixelFormat::Yuv420p.frame_size(64, 32)];
//! let mut rgb = vec![0u8; PixelFormat::Rgb24.frame_size(64, 32)];
//! engine
//!     .convert_buffer(&yuv, PixelFormat::Yuv420p, &mut rgb, PixelFormat::Rgb24, 64, 32)
//!     .unwrap();
//! ```
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
mod avx2;
mod capabilities;
mod convert_error;
mod dispatch;
mod engine;
mod env_config;
mod format_support;
mod frame;
mod kernel;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;
mod numerics;
mod pixel_format;
mod registry;
mod rgb_packed;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
mod sse;
mod word_shuffle;
mod ycbcr;
mod yuv_mixed;
mod yuv_packed;
mod yuv_planar;
mod yuv_rgb;

pub use capabilities::{
    AccelerationTier, CapabilityMask, CapabilityProbe, HostProbe, UnknownTier,
};
pub use convert_error::{ConvertError, GeometryError, MismatchedSize};
pub use engine::{convert_image, convert_image_in_place, ConversionEngine};
pub use env_config::{DISABLE_ACCEL_ENV, MAX_TIER_ENV};
pub use frame::{BufferStoreMut, FrameBuffer};
pub use kernel::{ConversionKernel, ConversionKey};
pub use pixel_format::{plane_pointers, plane_pointers_mut, FormatFamily, PixelFormat};
pub use registry::ConversionRegistry;
