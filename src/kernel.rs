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
use crate::capabilities::AccelerationTier;
use crate::convert_error::{check_geometry, check_planes, ConvertError};
use crate::pixel_format::PixelFormat;

/// Kernel entry point: source planes, destination planes, width, height.
///
/// Handlers are only invoked after geometry and plane sizes were validated.
pub(crate) type ConvertHandler =
    fn(&[&[u8]], &mut [&mut [u8]], usize, usize) -> Result<(), ConvertError>;

/// Same-buffer variant: planes hold the source on entry and the destination on return.
pub(crate) type InPlaceHandler = fn(&mut [&mut [u8]], usize, usize) -> Result<(), ConvertError>;

#[derive(Debug, Copy, Clone)]
pub(crate) struct KernelFns {
    pub(crate) convert: ConvertHandler,
    pub(crate) in_place: Option<InPlaceHandler>,
}

impl KernelFns {
    pub(crate) const fn new(convert: ConvertHandler, in_place: Option<InPlaceHandler>) -> Self {
        KernelFns { convert, in_place }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversionKey {
    pub from: PixelFormat,
    pub to: PixelFormat,
}

impl ConversionKey {
    pub const fn new(from: PixelFormat, to: PixelFormat) -> Self {
        ConversionKey { from, to }
    }
}

/// One registered conversion: a pair, the tier it was built for, and its handlers.
#[derive(Debug, Copy, Clone)]
pub struct ConversionKernel {
    key: ConversionKey,
    tier: AccelerationTier,
    fns: KernelFns,
}

impl ConversionKernel {
    pub(crate) const fn new(key: ConversionKey, tier: AccelerationTier, fns: KernelFns) -> Self {
        ConversionKernel { key, tier, fns }
    }

    pub fn key(&self) -> ConversionKey {
        self.key
    }

    pub fn tier(&self) -> AccelerationTier {
        self.tier
    }

    pub fn is_accelerated(&self) -> bool {
        self.tier != AccelerationTier::Portable
    }

    pub fn supports_in_place(&self) -> bool {
        self.fns.in_place.is_some()
    }

    /// Converts `src` into `dst`. Nothing is written to `dst` if validation fails.
    pub fn convert(
        &self,
        src: &[&[u8]],
        dst: &mut [&mut [u8]],
        width: u32,
        height: u32,
    ) -> Result<(), ConvertError> {
        let ConversionKey { from, to } = self.key;
        check_geometry(from, width, height)?;
        check_geometry(to, width, height)?;
        check_planes(src, from, width, height)?;
        check_planes(dst, to, width, height)?;
        (self.fns.convert)(src, dst, width as usize, height as usize)
    }

    /// Converts the frame held by `planes` in place.
    pub fn convert_in_place(
        &self,
        planes: &mut [&mut [u8]],
        width: u32,
        height: u32,
    ) -> Result<(), ConvertError> {
        let ConversionKey { from, to } = self.key;
        let handler = self
            .fns
            .in_place
            .ok_or(ConvertError::InPlaceUnsupported { from, to })?;
        check_geometry(from, width, height)?;
        check_geometry(to, width, height)?;
        check_planes(planes, from, width, height)?;
        check_planes(planes, to, width, height)?;
        handler(planes, width as usize, height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_handler(
        _: &[&[u8]],
        dst: &mut [&mut [u8]],
        width: usize,
        height: usize,
    ) -> Result<(), ConvertError> {
        dst[0][..width * height * 3].fill(1);
        Ok(())
    }

    fn kernel() -> ConversionKernel {
        ConversionKernel::new(
            ConversionKey::new(PixelFormat::Gray8, PixelFormat::Rgb24),
            AccelerationTier::Portable,
            KernelFns::new(fill_handler, None),
        )
    }

    #[test]
    fn test_validation_precedes_writes() {
        let src = vec![0u8; 16];
        let mut dst = vec![0u8; 47];
        let result = kernel().convert(&[&src], &mut [&mut dst], 4, 4);
        assert!(matches!(
            result,
            Err(ConvertError::PlaneSizeMismatch { plane: 0, .. })
        ));
        assert!(dst.iter().all(|&x| x == 0));

        let mut dst = vec![0u8; 48];
        kernel().convert(&[&src], &mut [&mut dst], 4, 4).unwrap();
        assert!(dst.iter().all(|&x| x == 1));
    }

    #[test]
    fn test_in_place_refused_without_handler() {
        let mut plane = vec![0u8; 48];
        assert_eq!(
            kernel().convert_in_place(&mut [&mut plane], 4, 4),
            Err(ConvertError::InPlaceUnsupported {
                from: PixelFormat::Gray8,
                to: PixelFormat::Rgb24
            })
        );
        assert!(!kernel().supports_in_place());
        assert!(!kernel().is_accelerated());
    }
}
