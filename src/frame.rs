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
use crate::convert_error::{check_geometry, ConvertError, MismatchedSize};
use crate::pixel_format::{plane_pointers, plane_pointers_mut, PixelFormat};

#[derive(Debug)]
pub enum BufferStoreMut<'a> {
    Borrowed(&'a mut [u8]),
    Owned(Vec<u8>),
}

impl BufferStoreMut<'_> {
    pub fn borrow(&self) -> &[u8] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn as_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

#[derive(Debug)]
/// Contiguously packed frame: luma, then chroma planes in the format's order, no padding.
pub struct FrameBuffer<'a> {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    store: BufferStoreMut<'a>,
}

impl FrameBuffer<'static> {
    /// Allocates a zeroed frame for `format`.
    pub fn alloc(format: PixelFormat, width: u32, height: u32) -> Result<Self, ConvertError> {
        check_geometry(format, width, height)?;
        let size = format.frame_size(width, height);
        let mut data: Vec<u8> = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| ConvertError::AllocationFailure)?;
        data.resize(size, 0);
        Ok(FrameBuffer {
            format,
            width,
            height,
            store: BufferStoreMut::Owned(data),
        })
    }
}

impl<'a> FrameBuffer<'a> {
    /// Wraps caller memory; the slice may be longer than the frame.
    pub fn borrowed(
        data: &'a mut [u8],
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<Self, ConvertError> {
        check_geometry(format, width, height)?;
        let expected = format.frame_size(width, height);
        if data.len() < expected {
            return Err(ConvertError::BufferSizeMismatch(MismatchedSize {
                expected,
                received: data.len(),
            }));
        }
        Ok(FrameBuffer {
            format,
            width,
            height,
            store: BufferStoreMut::Borrowed(data),
        })
    }

    pub fn data(&self) -> &[u8] {
        self.store.borrow()
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        self.store.as_mut()
    }

    pub fn planes(&self) -> Result<Vec<&[u8]>, ConvertError> {
        plane_pointers(self.store.borrow(), self.format, self.width, self.height)
    }

    pub fn planes_mut(&mut self) -> Result<Vec<&mut [u8]>, ConvertError> {
        plane_pointers_mut(self.store.as_mut(), self.format, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_sizes() {
        let frame = FrameBuffer::alloc(PixelFormat::Yuv422p, 8, 2).unwrap();
        assert_eq!(frame.data().len(), 32);
        let planes = frame.planes().unwrap();
        assert_eq!(planes[0].len(), 16);
        assert_eq!(planes[1].len(), 8);
        assert_eq!(planes[2].len(), 8);
        assert!(matches!(
            FrameBuffer::alloc(PixelFormat::Yuv411p, 6, 2),
            Err(ConvertError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_borrowed_writes_through() {
        let mut memory = vec![0u8; 40];
        {
            let mut frame = FrameBuffer::borrowed(&mut memory, PixelFormat::Rgba32, 3, 3).unwrap();
            let mut planes = frame.planes_mut().unwrap();
            planes[0][35] = 7;
        }
        assert_eq!(memory[35], 7);
        let mut short = vec![0u8; 10];
        assert!(FrameBuffer::borrowed(&mut short, PixelFormat::Rgba32, 3, 3).is_err());
    }
}
