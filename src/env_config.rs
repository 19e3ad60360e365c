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
//! Environment overrides consulted once by the host capability probe.

/// Forces the portable kernels when truthy.
pub const DISABLE_ACCEL_ENV: &str = "IMGCONVERT_DISABLE_ACCEL";
/// Caps detected acceleration at the named tier.
pub const MAX_TIER_ENV: &str = "IMGCONVERT_MAX_TIER";

/// `1`, `true`, `yes`, `on`, case-insensitive and trimmed.
#[inline]
pub(crate) fn parse_truthy(raw: &str) -> bool {
    let normalized = raw.trim().to_ascii_lowercase();
    normalized == "1" || normalized == "true" || normalized == "yes" || normalized == "on"
}

#[inline]
pub(crate) fn env_var_truthy(var_name: &str) -> bool {
    std::env::var(var_name)
        .map(|raw| parse_truthy(&raw))
        .unwrap_or(false)
}

/// Trimmed, lowercased value, `None` when unset or blank.
#[inline]
pub(crate) fn env_var_normalized(var_name: &str) -> Option<String> {
    std::env::var(var_name)
        .ok()
        .map(|raw| raw.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty())
}

/// Declares a cached boolean flag backed by a `OnceLock<bool>`.
macro_rules! define_env_flag {
    (enabled_when($fn_name:ident, $var:expr)) => {
        #[inline]
        fn $fn_name() -> bool {
            static VALUE: ::std::sync::OnceLock<bool> = ::std::sync::OnceLock::new();
            *VALUE.get_or_init(|| $crate::env_config::env_var_truthy($var))
        }
    };
}

pub(crate) use define_env_flag;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        for raw in ["1", "true", " YES ", "On"] {
            assert!(parse_truthy(raw), "{}", raw);
        }
        for raw in ["0", "false", "", "enabled"] {
            assert!(!parse_truthy(raw), "{}", raw);
        }
    }

    #[test]
    fn test_unset_variable() {
        assert!(!env_var_truthy("IMGCONVERT_TEST_SURELY_UNSET_VARIABLE"));
        assert_eq!(
            env_var_normalized("IMGCONVERT_TEST_SURELY_UNSET_VARIABLE"),
            None
        );
    }
}
