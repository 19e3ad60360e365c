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
use crate::capabilities::{CapabilityMask, CapabilityProbe, HostProbe};
use crate::convert_error::ConvertError;
use crate::dispatch::{accelerated_kernel, portable_kernel};
use crate::kernel::{ConversionKernel, ConversionKey};
use crate::pixel_format::{plane_pointers, plane_pointers_mut, PixelFormat};
use crate::registry::ConversionRegistry;
use std::sync::OnceLock;

/// Conversion table built for one capability mask.
///
/// Building registers the portable kernel for every supported pair, then lets
/// each accelerated tier present in the mask overwrite the pairs it covers in
/// ascending order, so the most capable tier wins. Once built the engine is
/// read-only and can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    registry: ConversionRegistry,
    capabilities: CapabilityMask,
}

fn build_registry(capabilities: CapabilityMask) -> Result<ConversionRegistry, ConvertError> {
    let mut registry = ConversionRegistry::new();
    for from in PixelFormat::ALL {
        for to in PixelFormat::ALL {
            if let Some(kernel) = portable_kernel(from, to) {
                registry.register(kernel)?;
            }
        }
    }

    for tier in capabilities.tiers() {
        for from in PixelFormat::ALL {
            for to in PixelFormat::ALL {
                if registry.lookup(from, to).is_none() {
                    continue;
                }
                let Some(kernel) = accelerated_kernel(tier, from, to) else {
                    continue;
                };
                if let Some(previous) = registry.register(kernel)? {
                    log::trace!(
                        "{} -> {}: {} kernel replaces {}",
                        from,
                        to,
                        tier,
                        previous.tier()
                    );
                }
            }
        }
    }
    Ok(registry)
}

impl ConversionEngine {
    /// Builds the table for `capabilities`; fails only when the table cannot grow.
    pub fn build(capabilities: CapabilityMask) -> Result<ConversionEngine, ConvertError> {
        let registry = build_registry(capabilities)?;
        let engine = ConversionEngine {
            registry,
            capabilities,
        };
        log::debug!(
            "Conversion engine ready with {}: {} pairs, {} accelerated",
            capabilities,
            engine.registry.len(),
            engine.accelerated_count()
        );
        Ok(engine)
    }

    pub fn from_probe<P: CapabilityProbe + ?Sized>(
        probe: &P,
    ) -> Result<ConversionEngine, ConvertError> {
        Self::build(probe.detect_capabilities())
    }

    /// Process wide engine built from [HostProbe] on first use.
    pub fn global() -> Result<&'static ConversionEngine, ConvertError> {
        static ENGINE: OnceLock<Result<ConversionEngine, ConvertError>> = OnceLock::new();
        ENGINE
            .get_or_init(|| ConversionEngine::from_probe(&HostProbe))
            .as_ref()
            .map_err(|err| *err)
    }

    /// Replaces the whole table with one built for `capabilities`.
    /// On failure the current table is kept.
    pub fn rebuild(&mut self, capabilities: CapabilityMask) -> Result<(), ConvertError> {
        *self = Self::build(capabilities)?;
        Ok(())
    }

    pub fn capabilities(&self) -> CapabilityMask {
        self.capabilities
    }

    pub fn registry(&self) -> &ConversionRegistry {
        &self.registry
    }

    pub fn lookup(&self, from: PixelFormat, to: PixelFormat) -> Option<&ConversionKernel> {
        self.registry.lookup(from, to)
    }

    pub fn supports(&self, from: PixelFormat, to: PixelFormat) -> bool {
        self.lookup(from, to).is_some()
    }

    /// Registered pairs in a stable order.
    pub fn pairs(&self) -> Vec<ConversionKey> {
        self.registry.keys()
    }

    fn accelerated_count(&self) -> usize {
        self.registry
            .kernels()
            .filter(|kernel| kernel.is_accelerated())
            .count()
    }

    fn kernel(&self, from: PixelFormat, to: PixelFormat) -> Result<&ConversionKernel, ConvertError> {
        self.lookup(from, to)
            .ok_or(ConvertError::UnsupportedConversion { from, to })
    }

    /// Converts a frame between formats.
    ///
    /// Unsupported pairs and invalid frames fail without touching `dst`.
    pub fn convert(
        &self,
        src: &[&[u8]],
        from: PixelFormat,
        dst: &mut [&mut [u8]],
        to: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<(), ConvertError> {
        self.kernel(from, to)?.convert(src, dst, width, height)
    }

    /// Converts the frame held by `planes` from `from` to `to` in the same memory.
    pub fn convert_in_place(
        &self,
        planes: &mut [&mut [u8]],
        from: PixelFormat,
        to: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<(), ConvertError> {
        self.kernel(from, to)?
            .convert_in_place(planes, width, height)
    }

    /// Same as [ConversionEngine::convert] for contiguously packed frames.
    pub fn convert_buffer(
        &self,
        src: &[u8],
        from: PixelFormat,
        dst: &mut [u8],
        to: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<(), ConvertError> {
        let kernel = self.kernel(from, to)?;
        let src_planes = plane_pointers(src, from, width, height)?;
        let mut dst_planes = plane_pointers_mut(dst, to, width, height)?;
        kernel.convert(&src_planes, &mut dst_planes, width, height)
    }

    /// One line summary of the capabilities and the table.
    pub fn describe(&self) -> String {
        format!(
            "imgconvert {}: {} conversions, {} accelerated",
            self.capabilities,
            self.registry.len(),
            self.accelerated_count()
        )
    }
}

/// Converts a frame with the process wide engine.
pub fn convert_image(
    src: &[&[u8]],
    from: PixelFormat,
    dst: &mut [&mut [u8]],
    to: PixelFormat,
    width: u32,
    height: u32,
) -> Result<(), ConvertError> {
    ConversionEngine::global()?.convert(src, from, dst, to, width, height)
}

/// In place conversion with the process wide engine.
pub fn convert_image_in_place(
    planes: &mut [&mut [u8]],
    from: PixelFormat,
    to: PixelFormat,
    width: u32,
    height: u32,
) -> Result<(), ConvertError> {
    ConversionEngine::global()?.convert_in_place(planes, from, to, width, height)
}
