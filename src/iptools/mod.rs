// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IPv4/IPv6 CIDR block parsing and merging into minimal representations.

mod addresses;
mod format;
mod groups;
mod merging;
mod strings;
mod structs;

use std::{error, fmt};
use strings::*;

pub use addresses::Address;
pub use format::{DualOutputMode, FormatOptions};
pub use groups::{strip_comment, BlockGroups};
pub use merging::*;
pub use structs::{AddressBlock, IpFam};

pub(crate) const IPV4_BITS: u8 = 32;
pub(crate) const IPV6_BITS: u8 = 128;

#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddressError {
    /// text is not an address of any supported family
    Unrecognized(String),
    /// prefix outside `0..=max` for the detected family
    InvalidPrefix { prefix: i64, max: u8, fam: IpFam },
    /// prefix part is not an integer
    InvalidPrefixFmt(String),
    /// address has host bits set for the given prefix
    InvalidNetworkAddress { addr: String, prefix: u8 },
    /// more than one slash
    InvalidFormat(String),
    /// error on a specific (1-based) input line
    Line { line: usize, source: Box<AddressError> },
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::Unrecognized(addr) => {
                write!(f, "{ERR_UNRECOGNIZED}: '{addr}'")
            }
            AddressError::InvalidPrefix { prefix, max, fam } => {
                write!(f, "{ERR_PREFIX} {prefix} for {fam} (max {max})")
            }
            AddressError::InvalidPrefixFmt(prefix) => {
                write!(f, "{ERR_PREFIX_FMT}: '{prefix}'")
            }
            AddressError::InvalidNetworkAddress { addr, prefix } => {
                write!(f, "{ERR_NETWORK}: '{addr}{SLASH}{prefix}'")
            }
            AddressError::InvalidFormat(cidr) => {
                write!(f, "{ERR_CIDR_FMT}: '{cidr}'")
            }
            AddressError::Line { line, source } => {
                write!(f, "{ERR_LINE} {line}: {source}")
            }
        }
    }
}

impl error::Error for AddressError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            AddressError::Line { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/* -------------------------------------------------------------------------- */
