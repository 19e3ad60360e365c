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
use crate::pixel_format::PixelFormat;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

/// Frame dimensions that do not fit a format's chroma subsampling grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GeometryError {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub h_div: u32,
    pub v_div: u32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ConvertError {
    /// No kernel is registered for the pair
    UnsupportedConversion {
        from: PixelFormat,
        to: PixelFormat,
    },
    /// The pair's kernel cannot run with source and destination sharing planes
    InPlaceUnsupported {
        from: PixelFormat,
        to: PixelFormat,
    },
    AllocationFailure,
    InvalidGeometry(GeometryError),
    ZeroBaseSize,
    PointerOverflow,
    PlaneCountMismatch(MismatchedSize),
    PlaneSizeMismatch {
        plane: usize,
        size: MismatchedSize,
    },
    /// Contiguous buffer is too short for the frame it should hold
    BufferSizeMismatch(MismatchedSize),
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::UnsupportedConversion { from, to } => f.write_fmt(format_args!(
                "Conversion from {} to {} is not supported",
                from, to
            )),
            ConvertError::InPlaceUnsupported { from, to } => f.write_fmt(format_args!(
                "Conversion from {} to {} cannot be performed in place",
                from, to
            )),
            ConvertError::AllocationFailure => f.write_str("Failed to allocate memory"),
            ConvertError::InvalidGeometry(geometry) => f.write_fmt(format_args!(
                "Frame {}x{} is invalid for {}, width must be divisible by {} and height by {}",
                geometry.width, geometry.height, geometry.format, geometry.h_div, geometry.v_div
            )),
            ConvertError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            ConvertError::PointerOverflow => {
                f.write_str("Image size overflow pointer capabilities")
            }
            ConvertError::PlaneCountMismatch(size) => f.write_fmt(format_args!(
                "Frame must have at least {} planes, but it has {}",
                size.expected, size.received
            )),
            ConvertError::PlaneSizeMismatch { plane, size } => f.write_fmt(format_args!(
                "Plane {} have invalid size, it must be at least {}, but it was {}",
                plane, size.expected, size.received
            )),
            ConvertError::BufferSizeMismatch(size) => f.write_fmt(format_args!(
                "Buffer must have size at least {} but it is {}",
                size.expected, size.received
            )),
        }
    }
}

impl Error for ConvertError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<(), ConvertError> {
    let (_, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(ConvertError::PointerOverflow);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_overflow_v3(v0: usize, v1: usize, v2: usize) -> Result<(), ConvertError> {
    let (product0, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(ConvertError::PointerOverflow);
    }
    let (_, overflow) = product0.overflowing_mul(v2);
    if overflow {
        return Err(ConvertError::PointerOverflow);
    }
    Ok(())
}

/// Checks that the frame is non-empty, addressable and aligned to the chroma grid.
#[inline]
pub(crate) fn check_geometry(
    format: PixelFormat,
    width: u32,
    height: u32,
) -> Result<(), ConvertError> {
    if width == 0 || height == 0 {
        return Err(ConvertError::ZeroBaseSize);
    }
    check_overflow_v2(width as usize, height as usize)?;
    check_overflow_v3(width as usize, height as usize, 4)?;
    let (h_div, v_div) = format.chroma_divisors();
    if width % h_div != 0 || height % v_div != 0 {
        return Err(ConvertError::InvalidGeometry(GeometryError {
            format,
            width,
            height,
            h_div,
            v_div,
        }));
    }
    Ok(())
}

/// Checks that every plane the format needs is present and large enough.
#[inline]
pub(crate) fn check_planes<T: AsRef<[u8]>>(
    planes: &[T],
    format: PixelFormat,
    width: u32,
    height: u32,
) -> Result<(), ConvertError> {
    let count = format.plane_count();
    if planes.len() < count {
        return Err(ConvertError::PlaneCountMismatch(MismatchedSize {
            expected: count,
            received: planes.len(),
        }));
    }
    for (index, plane) in planes.iter().take(count).enumerate() {
        let expected = format.plane_size(width, height, index);
        let received = plane.as_ref().len();
        if received < expected {
            return Err(ConvertError::PlaneSizeMismatch {
                plane: index,
                size: MismatchedSize { expected, received },
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_rejects_odd_chroma_grid() {
        assert_eq!(
            check_geometry(PixelFormat::Yuv420p, 6, 3),
            Err(ConvertError::InvalidGeometry(GeometryError {
                format: PixelFormat::Yuv420p,
                width: 6,
                height: 3,
                h_div: 2,
                v_div: 2,
            }))
        );
        assert!(check_geometry(PixelFormat::Yuv411p, 6, 2).is_err());
        assert!(check_geometry(PixelFormat::Yuy2, 5, 2).is_err());
        assert!(check_geometry(PixelFormat::Rgb24, 5, 3).is_ok());
        assert!(check_geometry(PixelFormat::Yuv411p, 8, 3).is_ok());
    }

    #[test]
    fn test_zero_size() {
        assert_eq!(
            check_geometry(PixelFormat::Rgba32, 0, 16),
            Err(ConvertError::ZeroBaseSize)
        );
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            check_overflow_v3(usize::MAX / 2, 3, 1),
            Err(ConvertError::PointerOverflow)
        );
        assert!(check_overflow_v2(4096, 4096).is_ok());
    }

    #[test]
    fn test_planes_reports_first_short_plane() {
        let y = vec![0u8; 16];
        let u = vec![0u8; 4];
        let v = vec![0u8; 3];
        let planes: [&[u8]; 3] = [&y, &u, &v];
        assert_eq!(
            check_planes(&planes, PixelFormat::Yuv420p, 4, 4),
            Err(ConvertError::PlaneSizeMismatch {
                plane: 2,
                size: MismatchedSize {
                    expected: 4,
                    received: 3
                }
            })
        );
        assert_eq!(
            check_planes(&planes[..1], PixelFormat::Yuv420p, 4, 4),
            Err(ConvertError::PlaneCountMismatch(MismatchedSize {
                expected: 3,
                received: 1
            }))
        );
        assert!(check_planes(&planes[..1], PixelFormat::Y8, 4, 4).is_ok());
    }
}
