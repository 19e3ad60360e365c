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
use crate::kernel::{ConversionKernel, ConversionKey};
use crate::pixel_format::PixelFormat;
use std::collections::HashMap;

/// Map from an ordered format pair to the single kernel serving it.
#[derive(Debug, Default, Clone)]
pub struct ConversionRegistry {
    entries: HashMap<ConversionKey, ConversionKernel>,
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the kernel or replaces the one registered for its pair,
    /// returning the replaced kernel.
    pub fn register(
        &mut self,
        kernel: ConversionKernel,
    ) -> Result<Option<ConversionKernel>, ConvertError> {
        self.entries
            .try_reserve(1)
            .map_err(|_| ConvertError::AllocationFailure)?;
        Ok(self.entries.insert(kernel.key(), kernel))
    }

    pub fn lookup(&self, from: PixelFormat, to: PixelFormat) -> Option<&ConversionKernel> {
        self.entries.get(&ConversionKey::new(from, to))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn kernels(&self) -> impl Iterator<Item = &ConversionKernel> {
        self.entries.values()
    }

    /// Registered pairs in a stable order.
    pub fn keys(&self) -> Vec<ConversionKey> {
        let mut keys: Vec<ConversionKey> = self.entries.keys().copied().collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::AccelerationTier;
    use crate::kernel::KernelFns;

    fn noop(_: &[&[u8]], _: &mut [&mut [u8]], _: usize, _: usize) -> Result<(), ConvertError> {
        Ok(())
    }

    fn kernel(from: PixelFormat, to: PixelFormat, tier: AccelerationTier) -> ConversionKernel {
        ConversionKernel::new(
            ConversionKey::new(from, to),
            tier,
            KernelFns::new(noop, None),
        )
    }

    #[test]
    fn test_register_overwrites() {
        let mut registry = ConversionRegistry::new();
        let replaced = registry
            .register(kernel(
                PixelFormat::Yuy2,
                PixelFormat::Uyvy,
                AccelerationTier::Portable,
            ))
            .unwrap();
        assert!(replaced.is_none());
        for tier in [AccelerationTier::Sse2, AccelerationTier::Sse41] {
            let replaced = registry
                .register(kernel(PixelFormat::Yuy2, PixelFormat::Uyvy, tier))
                .unwrap();
            assert!(replaced.is_some());
        }
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry
                .lookup(PixelFormat::Yuy2, PixelFormat::Uyvy)
                .map(|k| k.tier()),
            Some(AccelerationTier::Sse41)
        );
    }

    #[test]
    fn test_lookup_is_ordered() {
        let mut registry = ConversionRegistry::new();
        registry
            .register(kernel(
                PixelFormat::Rgb24,
                PixelFormat::Gray8,
                AccelerationTier::Portable,
            ))
            .unwrap();
        assert!(registry
            .lookup(PixelFormat::Gray8, PixelFormat::Rgb24)
            .is_none());
        assert!(registry
            .lookup(PixelFormat::Rgb24, PixelFormat::Gray8)
            .is_some());
        assert_eq!(
            registry.keys(),
            vec![ConversionKey::new(PixelFormat::Rgb24, PixelFormat::Gray8)]
        );
    }
}
