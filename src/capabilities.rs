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
use crate::env_config::{define_env_flag, env_var_normalized, DISABLE_ACCEL_ENV, MAX_TIER_ENV};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

/// Acceleration tiers in ascending capability order.
///
/// x86 tiers only ever appear on x86/x86_64 hosts and `Neon` only on aarch64,
/// so the order between `Avx2` and `Neon` never matters in practice.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccelerationTier {
    Portable = 0,
    Sse2 = 1,
    Sse41 = 2,
    Avx2 = 3,
    Neon = 4,
}

impl AccelerationTier {
    pub const ALL: [AccelerationTier; 5] = [
        AccelerationTier::Portable,
        AccelerationTier::Sse2,
        AccelerationTier::Sse41,
        AccelerationTier::Avx2,
        AccelerationTier::Neon,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub const fn name(self) -> &'static str {
        match self {
            AccelerationTier::Portable => "portable",
            AccelerationTier::Sse2 => "sse2",
            AccelerationTier::Sse41 => "sse41",
            AccelerationTier::Avx2 => "avx2",
            AccelerationTier::Neon => "neon",
        }
    }
}

impl Display for AccelerationTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTier(pub String);

impl Display for UnknownTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Unknown acceleration tier `{}`", self.0))
    }
}

impl std::error::Error for UnknownTier {}

impl FromStr for AccelerationTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portable" | "none" => Ok(AccelerationTier::Portable),
            "sse2" => Ok(AccelerationTier::Sse2),
            "sse41" | "sse4.1" => Ok(AccelerationTier::Sse41),
            "avx2" => Ok(AccelerationTier::Avx2),
            "neon" => Ok(AccelerationTier::Neon),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}

/// Set of acceleration tiers kernels may use.
///
/// A mask only starts out as [CapabilityMask::none] or [CapabilityMask::detect]
/// and can only be narrowed, so it never names a feature the host lacks.
/// The portable tier is implied and always available.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CapabilityMask {
    bits: u8,
}

impl CapabilityMask {
    /// Portable kernels only
    pub const fn none() -> Self {
        CapabilityMask { bits: 0 }
    }

    /// Runtime feature detection on the current host.
    pub fn detect() -> Self {
        #[allow(unused_mut)]
        let mut bits = 0u8;
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            if std::arch::is_x86_feature_detected!("sse2") {
                bits |= AccelerationTier::Sse2.bit();
            }
            if std::arch::is_x86_feature_detected!("ssse3")
                && std::arch::is_x86_feature_detected!("sse4.1")
            {
                bits |= AccelerationTier::Sse41.bit();
            }
            if std::arch::is_x86_feature_detected!("avx2") {
                bits |= AccelerationTier::Avx2.bit();
            }
        }
        #[cfg(target_arch = "aarch64")]
        {
            if std::arch::is_aarch64_feature_detected!("neon") {
                bits |= AccelerationTier::Neon.bit();
            }
        }
        CapabilityMask { bits }
    }

    pub const fn contains(&self, tier: AccelerationTier) -> bool {
        match tier {
            AccelerationTier::Portable => true,
            _ => self.bits & tier.bit() != 0,
        }
    }

    /// Drops every tier above `max`.
    pub fn up_to(self, max: AccelerationTier) -> Self {
        let mut bits = self.bits;
        for tier in AccelerationTier::ALL {
            if tier > max {
                bits &= !tier.bit();
            }
        }
        CapabilityMask { bits }
    }

    pub fn without(self, tier: AccelerationTier) -> Self {
        CapabilityMask {
            bits: self.bits & !tier.bit(),
        }
    }

    /// Accelerated tiers present, ascending.
    pub fn tiers(&self) -> impl Iterator<Item = AccelerationTier> + '_ {
        AccelerationTier::ALL
            .into_iter()
            .filter(move |&tier| tier != AccelerationTier::Portable && self.contains(tier))
    }

    pub fn best(&self) -> AccelerationTier {
        self.tiers().last().unwrap_or(AccelerationTier::Portable)
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl Display for CapabilityMask {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(AccelerationTier::Portable.name())?;
        for tier in self.tiers() {
            f.write_fmt(format_args!("+{}", tier))?;
        }
        Ok(())
    }
}

/// Source of the capability mask an engine is built with.
pub trait CapabilityProbe {
    fn detect_capabilities(&self) -> CapabilityMask;
}

/// Runtime detection narrowed by the `IMGCONVERT_DISABLE_ACCEL` and
/// `IMGCONVERT_MAX_TIER` environment variables. Both are read once per process.
#[derive(Debug, Default, Copy, Clone)]
pub struct HostProbe;

define_env_flag!(enabled_when(acceleration_disabled, DISABLE_ACCEL_ENV));

fn max_tier_override() -> Option<&'static str> {
    static VALUE: OnceLock<Option<String>> = OnceLock::new();
    VALUE
        .get_or_init(|| env_var_normalized(MAX_TIER_ENV))
        .as_deref()
}

/// Applies environment overrides to a detected mask.
fn apply_overrides(
    detected: CapabilityMask,
    disabled: bool,
    max_tier: Option<&str>,
) -> CapabilityMask {
    if disabled {
        log::info!(
            "{} is set, using portable kernels only",
            DISABLE_ACCEL_ENV
        );
        return CapabilityMask::none();
    }
    match max_tier.map(AccelerationTier::from_str) {
        Some(Ok(tier)) => {
            let narrowed = detected.up_to(tier);
            log::info!(
                "{}={} narrows capabilities from {} to {}",
                MAX_TIER_ENV,
                tier,
                detected,
                narrowed
            );
            narrowed
        }
        Some(Err(err)) => {
            log::warn!("Ignoring {}: {}", MAX_TIER_ENV, err);
            detected
        }
        None => detected,
    }
}

impl CapabilityProbe for HostProbe {
    fn detect_capabilities(&self) -> CapabilityMask {
        apply_overrides(
            CapabilityMask::detect(),
            acceleration_disabled(),
            max_tier_override(),
        )
    }
}

/// Fixed mask, for callers that already know what they want.
impl CapabilityProbe for CapabilityMask {
    fn detect_capabilities(&self) -> CapabilityMask {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_portable() {
        let mask = CapabilityMask::none();
        assert!(mask.is_empty());
        assert!(mask.contains(AccelerationTier::Portable));
        assert_eq!(mask.tiers().count(), 0);
        assert_eq!(mask.best(), AccelerationTier::Portable);
        assert_eq!(mask.to_string(), "portable");
    }

    #[test]
    fn test_narrowing_never_widens() {
        let detected = CapabilityMask::detect();
        for max in AccelerationTier::ALL {
            let narrowed = detected.up_to(max);
            for tier in narrowed.tiers() {
                assert!(tier <= max);
                assert!(detected.contains(tier));
            }
            assert!(narrowed.best() <= max);
        }
        for tier in detected.tiers() {
            assert!(!detected.without(tier).contains(tier));
        }
        assert!(detected.up_to(AccelerationTier::Portable).is_empty());
    }

    #[test]
    fn test_tiers_ascending() {
        let tiers: Vec<_> = CapabilityMask::detect().tiers().collect();
        let mut sorted = tiers.clone();
        sorted.sort();
        assert_eq!(tiers, sorted);
    }

    #[test]
    fn test_parse_tier() {
        assert_eq!("SSE4.1".parse::<AccelerationTier>(), Ok(AccelerationTier::Sse41));
        assert_eq!(" avx2 ".parse::<AccelerationTier>(), Ok(AccelerationTier::Avx2));
        assert!("avx512".parse::<AccelerationTier>().is_err());
    }

    #[test]
    fn test_overrides() {
        let detected = CapabilityMask::detect();
        assert!(apply_overrides(detected, true, Some("avx2")).is_empty());
        assert_eq!(
            apply_overrides(detected, false, Some("sse2")),
            detected.up_to(AccelerationTier::Sse2)
        );
        assert_eq!(apply_overrides(detected, false, Some("bogus")), detected);
        assert_eq!(apply_overrides(detected, false, None), detected);
    }
}
