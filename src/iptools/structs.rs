// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    addresses::Address,
    format::FormatOptions,
    merging::{host_mask_u128, mask_u128},
    strings::*,
    AddressError, IPV4_BITS, IPV6_BITS,
};
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, net::IpAddr, str::FromStr};

/// IP address family
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum IpFam {
    V4,
    V6,
}

impl IpFam {
    pub fn bits(&self) -> u8 {
        match self {
            IpFam::V4 => IPV4_BITS,
            IpFam::V6 => IPV6_BITS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IpFam::V4 => NAME_V4,
            IpFam::V6 => NAME_V6,
        }
    }
}

impl fmt::Display for IpFam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/* -------------------------------------------------------------------------- */

/**
A CIDR block: a network address plus a prefix length.

The address is always the network (lowest) address of the block; building a
block from a host address is an error rather than being normalized. Two
blocks are equal if their address values and prefixes are equal.
*/
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AddressBlock {
    addr: Address,
    /// **v4**: `0..=32`, **v6**: `0..=128`
    prefix: u8,
}

impl AddressBlock {
    /**
    Create a new block.

    ### Errors
    - [AddressError::InvalidPrefix] if `prefix` is longer than the address
    - [AddressError::InvalidNetworkAddress] if `addr` has bits set past `prefix`
    */
    pub fn new(addr: Address, prefix: u8) -> Result<Self, AddressError> {
        if prefix > addr.bits() {
            return Err(AddressError::InvalidPrefix {
                prefix: prefix as i64,
                max: addr.bits(),
                fam: addr.fam(),
            });
        }
        Self::checked(addr, prefix, &addr.to_string())
    }

    /// Validate network-address canonicality, reporting `text` on failure.
    fn checked(addr: Address, prefix: u8, text: &str) -> Result<Self, AddressError> {
        if addr.value() & host_mask_u128(addr.bits(), prefix) != 0 {
            return Err(AddressError::InvalidNetworkAddress {
                addr: text.to_string(),
                prefix,
            });
        }
        Ok(Self { addr, prefix })
    }

    /// Build a block known to be canonical (result of a merge).
    pub(crate) fn new_unchecked(addr: Address, prefix: u8) -> Self {
        debug_assert!(addr.value() & host_mask_u128(addr.bits(), prefix) == 0);
        Self { addr, prefix }
    }

    /**
    Parse `ADDRESS` or `ADDRESS/PREFIX`. Without a prefix the block is a
    single host (/32 or /128).

    ### Errors
    - [AddressError::InvalidFormat] for more than one `/`
    - [AddressError::Unrecognized] if the address is not IPv4 or IPv6
    - [AddressError::InvalidPrefixFmt] if the prefix is not an integer
    - [AddressError::InvalidPrefix] if the prefix is out of range for the family
    - [AddressError::InvalidNetworkAddress] if the address is not the network address
    */
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let parts: Vec<&str> = text.trim().split(SLASH).collect();
        if parts.len() > 2 {
            return Err(AddressError::InvalidFormat(text.to_string()));
        }

        let addr_str: &str = parts[0].trim();
        let addr: Address = Address::parse_any(addr_str)?;

        let prefix: u8 = match parts.get(1) {
            None => addr.bits(),
            Some(prefix) => {
                let prefix: &str = prefix.trim();
                let value: i64 = prefix
                    .parse::<i64>()
                    .map_err(|_| AddressError::InvalidPrefixFmt(prefix.to_string()))?;
                if !(0..=addr.bits() as i64).contains(&value) {
                    return Err(AddressError::InvalidPrefix {
                        prefix: value,
                        max: addr.bits(),
                        fam: addr.fam(),
                    });
                }
                value as u8
            }
        };

        Self::checked(addr, prefix, addr_str)
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn fam(&self) -> IpFam {
        self.addr.fam()
    }

    pub fn bits(&self) -> u8 {
        self.addr.bits()
    }

    /// Network mask: the top `prefix` bits of the address width set.
    pub fn mask(&self) -> u128 {
        mask_u128(self.bits(), self.prefix)
    }

    /// First address of the block as an integer.
    pub fn first(&self) -> u128 {
        self.addr.value()
    }

    /// Last address of the block as an integer (inclusive).
    pub fn last(&self) -> u128 {
        self.first() | host_mask_u128(self.bits(), self.prefix)
    }

    /// Number of addresses in the block. Saturates at [u128::MAX] for `::/0`.
    pub fn len(&self) -> u128 {
        let host_bits: u8 = self.bits() - self.prefix;
        if host_bits == IPV6_BITS {
            return u128::MAX;
        }
        1u128 << host_bits
    }

    /// Returns true if the block represents a single host address.
    pub fn is_host(&self) -> bool {
        self.prefix == self.bits()
    }

    /// Whether `other` lies entirely within this block (same family only).
    pub fn contains(&self, other: &AddressBlock) -> bool {
        self.fam() == other.fam() && self.first() <= other.first() && other.last() <= self.last()
    }

    /// Copy of this block whose address carries the given `dual` flag.
    pub fn with_dual(self, dual: bool) -> Self {
        Self {
            addr: self.addr.with_dual(dual),
            prefix: self.prefix,
        }
    }

    /// Render the block as text according to `opts`.
    pub fn format(&self, opts: &FormatOptions) -> String {
        let addr: String = self.addr.render(opts.compressed, opts.uppercase, opts.dual);
        if !opts.always_prefix && self.is_host() {
            return addr;
        }
        format!("{addr}{SLASH}{}", self.prefix)
    }
}

impl fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&FormatOptions::with_prefix()))
    }
}

impl FromStr for AddressBlock {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for AddressBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AddressBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s: String = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl From<AddressBlock> for IpNet {
    fn from(block: AddressBlock) -> Self {
        // prefix is always valid for the family
        match IpAddr::from(block.addr) {
            IpAddr::V4(a) => IpNet::V4(Ipv4Net::new_assert(a, block.prefix)),
            IpAddr::V6(a) => IpNet::V6(Ipv6Net::new_assert(a, block.prefix)),
        }
    }
}

impl TryFrom<IpNet> for AddressBlock {
    type Error = AddressError;

    /// Fails if `net` has host bits set.
    fn try_from(net: IpNet) -> Result<Self, Self::Error> {
        AddressBlock::new(Address::from(net.addr()), net.prefix_len())
    }
}

/* -------------------------------------------------------------------------- */
