// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

/// When to write the low 32 bits of an IPv6 address as a dotted quad.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DualOutputMode {
    /// never
    ForceNormal,
    /// if the address carries the `dual` flag
    #[default]
    ValueDependent,
    /// always
    ForceDual,
}

/**
Output formatting options for rendering merged blocks.

Only rendering needs these, the merge itself is option-free.

- `compressed`: use `::` zero compression for IPv6
- `uppercase`: upper-case IPv6 hex digits
- `dual`: see [DualOutputMode]
- `always_prefix`: if false, host blocks (/32, /128) are written without `/prefix`
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub compressed: bool,
    pub uppercase: bool,
    pub dual: DualOutputMode,
    pub always_prefix: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            compressed: true,
            uppercase: false,
            dual: DualOutputMode::ValueDependent,
            always_prefix: false,
        }
    }
}

impl FormatOptions {
    /// Default options, but always write the prefix (matches [std::fmt::Display]).
    pub fn with_prefix() -> Self {
        Self {
            always_prefix: true,
            ..Default::default()
        }
    }

    /**
    Read options from a JSON object, f.ex. `{"compressed": false, "dual": "force_dual"}`.
    Missing fields keep their defaults.
    */
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::{value::Error as DeError, value::StrDeserializer, IntoDeserializer};

    #[test]
    fn test_defaults() {
        let opts = FormatOptions::default();
        assert!(opts.compressed);
        assert!(!opts.uppercase);
        assert!(!opts.always_prefix);
        assert_eq!(opts.dual, DualOutputMode::ValueDependent);
        assert!(FormatOptions::with_prefix().always_prefix);
    }

    #[test]
    fn test_dual_mode_names() {
        let pairs = [
            ("force_normal", DualOutputMode::ForceNormal),
            ("value_dependent", DualOutputMode::ValueDependent),
            ("force_dual", DualOutputMode::ForceDual),
        ];
        for (name, mode) in pairs {
            let de: StrDeserializer<DeError> = name.into_deserializer();
            assert_eq!(DualOutputMode::deserialize(de), Ok(mode), "Failed: '{name}'");
        }

        let de: StrDeserializer<DeError> = "sometimes".into_deserializer();
        assert!(DualOutputMode::deserialize(de).is_err());
    }

    #[test]
    fn test_from_json() {
        let opts = FormatOptions::from_json(r#"{"uppercase": true, "dual": "force_dual"}"#).unwrap();
        assert_eq!(
            opts,
            FormatOptions {
                uppercase: true,
                dual: DualOutputMode::ForceDual,
                ..Default::default()
            }
        );
        assert_eq!(FormatOptions::from_json("{}").unwrap(), FormatOptions::default());
        assert!(FormatOptions::from_json(r#"{"dual": "sometimes"}"#).is_err());
        assert!(FormatOptions::from_json("compressed").is_err());
    }
}
