// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{format::DualOutputMode, strings::*, structs::IpFam, AddressError};
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
};

lazy_static! {
    static ref RE_V4: Regex =
        Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$").unwrap();
}

/// Family parsers in the order [Address::parse_any] tries them.
static PARSERS: &[fn(&str) -> Option<Address>] = &[Address::parse_v4, Address::parse_v6];

/**
A single IPv4 or IPv6 address held as an integer.

The `dual` flag of an IPv6 address marks that it was written (and should be
rendered, in [DualOutputMode::ValueDependent]) with its low 32 bits as a
dotted quad, f.ex. `::ffff:192.0.2.1`. The flag does not take part in
equality, hashing or ordering.
*/
#[derive(Clone, Copy, Debug)]
pub enum Address {
    V4(u32),
    V6 { value: u128, dual: bool },
}

impl Address {
    /**
    Parse an address of any supported family. Each family parser is tried
    in turn and the first one that recognizes the text wins.

    ### Errors
    [AddressError::Unrecognized] if no family parser accepts `text`.
    */
    pub fn parse_any(text: &str) -> Result<Self, AddressError> {
        PARSERS
            .iter()
            .find_map(|parse| parse(text))
            .ok_or_else(|| AddressError::Unrecognized(text.to_string()))
    }

    /// Parse a dotted-quad IPv4 address. Returns `None` if not recognized.
    pub fn parse_v4(text: &str) -> Option<Self> {
        parse_dotted_quad(text).map(Address::V4)
    }

    /**
    Parse an IPv6 address. Returns `None` if not recognized.

    Accepts up to eight colon-separated hextets, a single `::` zero run and
    a trailing dotted-quad (which counts as two hextets and sets the `dual`
    flag). A dotted quad anywhere but at the very end is rejected.
    */
    pub fn parse_v6(text: &str) -> Option<Self> {
        if !text.contains(COLON) {
            return None;
        }

        let (head, tail, zero_run) = match text.split_once(DCOLON) {
            Some((_, tail)) if tail.contains(DCOLON) => return None,
            Some((head, tail)) => (head, tail, true),
            None => (text, "", false),
        };

        // with a '::' present, anything on the left is followed by something
        let (mut segments, head_dual) = parse_hextets(head, !zero_run)?;
        let (tail_segments, tail_dual) = parse_hextets(tail, true)?;

        let count: usize = segments.len() + tail_segments.len();
        if zero_run {
            if count > 7 {
                return None;
            }
            segments.resize(8 - tail_segments.len(), 0);
            segments.extend(tail_segments);
        } else if count != 8 {
            return None;
        }

        let value: u128 = segments
            .iter()
            .fold(0u128, |acc, &seg| acc << 16 | seg as u128);

        Some(Address::V6 {
            value,
            dual: head_dual || tail_dual,
        })
    }

    /// The address as an integer.
    pub fn value(&self) -> u128 {
        match *self {
            Address::V4(value) => value as u128,
            Address::V6 { value, .. } => value,
        }
    }

    pub fn fam(&self) -> IpFam {
        match self {
            Address::V4(_) => IpFam::V4,
            Address::V6 { .. } => IpFam::V6,
        }
    }

    /// Address length in bits: 32 or 128.
    pub fn bits(&self) -> u8 {
        self.fam().bits()
    }

    /// Human-readable family name.
    pub fn type_text(&self) -> &'static str {
        self.fam().name()
    }

    /// Always false for IPv4.
    pub fn is_dual(&self) -> bool {
        matches!(self, Address::V6 { dual: true, .. })
    }

    /// Copy of this address with the `dual` flag replaced. IPv4 is returned as is.
    pub fn with_dual(self, dual: bool) -> Self {
        match self {
            Address::V4(_) => self,
            Address::V6 { value, .. } => Address::V6 { value, dual },
        }
    }

    /// The eight 16-bit groups of an IPv6 address, `None` for IPv4.
    pub fn segments(&self) -> Option<[u16; 8]> {
        match *self {
            Address::V4(_) => None,
            Address::V6 { value, .. } => Some(Ipv6Addr::from(value).segments()),
        }
    }

    /**
    Render the address as text.

    IPv4 is always a plain dotted quad. For IPv6:
    - `compressed`: replace the longest run (>= 2) of zero hextets with `::`,
      leftmost run wins on ties; otherwise every hextet is zero-padded to 4 digits
    - `uppercase`: upper-case hex digits
    - `mode`: whether the low 32 bits are written as a dotted quad
    */
    pub fn render(&self, compressed: bool, uppercase: bool, mode: DualOutputMode) -> String {
        let (value, dual) = match *self {
            Address::V4(value) => return Ipv4Addr::from(value).to_string(),
            Address::V6 { value, dual } => (value, dual),
        };

        let as_dual: bool = match mode {
            DualOutputMode::ForceNormal => false,
            DualOutputMode::ValueDependent => dual,
            DualOutputMode::ForceDual => true,
        };

        let segments: [u16; 8] = Ipv6Addr::from(value).segments();
        let hex_count: usize = if as_dual { 6 } else { 8 };
        let mut out: String = render_hextets(&segments[..hex_count], compressed);
        if uppercase {
            out = out.to_uppercase();
        }

        if as_dual {
            if !out.ends_with(DCOLON) {
                out.push_str(COLON);
            }
            out.push_str(&Ipv4Addr::from(value as u32).to_string());
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true, false, DualOutputMode::ValueDependent))
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.fam() == other.fam() && self.value() == other.value()
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fam().hash(state);
        self.value().hash(state);
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.fam(), self.value()).cmp(&(other.fam(), other.value()))
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address::V4(u32::from(ip))
    }
}

impl From<Ipv6Addr> for Address {
    fn from(ip: Ipv6Addr) -> Self {
        Address::V6 {
            value: u128::from(ip),
            dual: false,
        }
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

impl From<Address> for IpAddr {
    fn from(addr: Address) -> Self {
        match addr {
            Address::V4(value) => IpAddr::V4(Ipv4Addr::from(value)),
            Address::V6 { value, .. } => IpAddr::V6(Ipv6Addr::from(value)),
        }
    }
}

/* ---------------------------------- */

fn parse_dotted_quad(text: &str) -> Option<u32> {
    let caps = RE_V4.captures(text)?;
    let mut value: u32 = 0;
    for i in 1..=4 {
        let octet: u32 = caps[i].parse().ok()?;
        if octet > 255 {
            return None;
        }
        value = value << 8 | octet;
    }
    Some(value)
}

/**
Parse one side of an IPv6 address (colon-separated hextets, possibly empty).

A dotted quad is accepted only as the final piece and only if `allow_dual`,
and yields two hextets. The returned flag tells whether one was present.
*/
fn parse_hextets(text: &str, allow_dual: bool) -> Option<(Vec<u16>, bool)> {
    let mut out: Vec<u16> = Vec::with_capacity(8);
    if text.is_empty() {
        return Some((out, false));
    }

    let pieces: Vec<&str> = text.split(COLON).collect();
    let last: usize = pieces.len() - 1;

    for (i, piece) in pieces.iter().enumerate() {
        if piece.contains(DOT) {
            if !allow_dual || i != last {
                return None;
            }
            let v4: u32 = parse_dotted_quad(piece)?;
            out.push((v4 >> 16) as u16);
            out.push(v4 as u16);
            return Some((out, true));
        }
        if piece.is_empty() || !piece.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        out.push(u16::from_str_radix(piece, 16).ok()?);
    }
    Some((out, false))
}

/// Join hextets with colons, optionally compressing the longest zero run.
fn render_hextets(segments: &[u16], compressed: bool) -> String {
    let join = |segs: &[u16]| -> String {
        segs.iter()
            .map(|s| match compressed {
                true => format!("{s:x}"),
                false => format!("{s:04x}"),
            })
            .collect::<Vec<String>>()
            .join(COLON)
    };

    if compressed {
        if let Some((beg, end)) = longest_zero_run(segments) {
            return format!("{}{DCOLON}{}", join(&segments[..beg]), join(&segments[end..]));
        }
    }
    join(segments)
}

/// Longest run of at least two zero hextets as `(beg, end)`, end exclusive.
/// The leftmost run wins on ties.
fn longest_zero_run(segments: &[u16]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i: usize = 0;

    while i < segments.len() {
        if segments[i] != 0 {
            i += 1;
            continue;
        }
        let beg: usize = i;
        while i < segments.len() && segments[i] == 0 {
            i += 1;
        }
        let len: usize = i - beg;
        if len >= 2 && best.map_or(true, |(b, e)| len > e - b) {
            best = Some((beg, i));
        }
    }
    best
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    const V4_OK: &str = "192.168.1.10";
    const V6_DUAL: &str = "::ffff:192.0.2.1";
    const V6_DOC: &str = "2001:db8::1";

    #[rustfmt::skip]
    const V6_INVALID: [&str; 14] = [
        "1:2:3:4:5:6:7:8:9",        // too many groups
        "1:2:3:4:5:6:7",            // too few without '::'
        "1:2:3:4:5:6:7:8::",        // '::' with nothing left to fill
        "1::2::3",                  // two zero runs
        ":::",
        ":1:2:3:4:5:6:7",
        "1:2:3:4:5:6:7:",
        "12345::",                  // hextet > 0xffff
        "g::1",
        "+1::",
        "1.2.3.4::",                // dual suffix followed by '::'
        "::1.2.3.4:5",              // dual suffix not last
        "1:2:3:4:5:6:7:1.2.3.4",    // 7 hextets plus dual
        "::256.1.1.1",
    ];

    #[test]
    fn test_parse_v4() {
        let addr = Address::parse_any(V4_OK).unwrap();
        assert_eq!(addr, Address::V4(0xc0a8010a));
        assert_eq!(addr.bits(), 32);
        assert_eq!(addr.type_text(), "IPv4");
        assert_eq!(addr.to_string(), V4_OK);
    }

    #[test]
    fn test_parse_v4_invalid() {
        for s in ["999.1.1.1", "1.2.3", "1.2.3.4.5", "1.2.3.-4", "a.b.c.d", " 1.2.3.4", ""] {
            assert_eq!(Address::parse_v4(s), None, "Failed: '{s}'");
        }
        assert_eq!(
            Address::parse_any("999.1.1.1"),
            Err(AddressError::Unrecognized("999.1.1.1".into()))
        );
    }

    #[test]
    fn test_parse_v6() {
        let addr = Address::parse_any(V6_DOC).unwrap();
        assert_eq!(addr.value(), 0x2001_0db8_0000_0000_0000_0000_0000_0001);
        assert!(!addr.is_dual());
        assert_eq!(addr.to_string(), V6_DOC);

        let full = Address::parse_v6("2001:0db8:0000:0000:0000:0000:0000:0001").unwrap();
        assert_eq!(full, addr);
        assert_eq!(Address::parse_v6("::").unwrap().value(), 0);
        assert_eq!(Address::parse_v6("1::").unwrap().value(), 1u128 << 112);
    }

    #[test]
    fn test_parse_v6_dual() {
        let addr = Address::parse_any(V6_DUAL).unwrap();
        assert!(addr.is_dual());
        assert_eq!(addr.value(), 0xffff_c000_0201);
        assert_eq!(addr.to_string(), V6_DUAL);

        let six = Address::parse_v6("1:2:3:4:5:6:10.0.0.1").unwrap();
        assert!(six.is_dual());
        assert_eq!(six.segments(), Some([1, 2, 3, 4, 5, 6, 0x0a00, 0x0001]));
    }

    #[test]
    fn test_parse_v6_invalid() {
        for s in V6_INVALID {
            assert_eq!(Address::parse_v6(s), None, "Failed: '{s}'");
        }
    }

    #[test]
    fn test_render_compression() {
        let addr = Address::parse_v6("1:0:0:2:0:0:0:3").unwrap();
        assert_eq!(addr.render(true, false, DualOutputMode::ForceNormal), "1:0:0:2::3");

        // tie goes to the leftmost run
        let addr = Address::parse_v6("1:0:0:2:3:0:0:4").unwrap();
        assert_eq!(addr.render(true, false, DualOutputMode::ForceNormal), "1::2:3:0:0:4");

        // single zero groups are never compressed
        let addr = Address::parse_v6("1:0:2:0:3:0:4:0").unwrap();
        assert_eq!(addr.render(true, false, DualOutputMode::ForceNormal), "1:0:2:0:3:0:4:0");
    }

    #[test]
    fn test_render_full_and_case() {
        let addr = Address::parse_v6("2001:db8::abcd").unwrap();
        assert_eq!(
            addr.render(false, false, DualOutputMode::ForceNormal),
            "2001:0db8:0000:0000:0000:0000:0000:abcd"
        );
        assert_eq!(addr.render(true, true, DualOutputMode::ForceNormal), "2001:DB8::ABCD");
    }

    #[test]
    fn test_render_dual_modes() {
        let dual = Address::parse_v6(V6_DUAL).unwrap();
        let plain = dual.with_dual(false);

        assert_eq!(dual.render(true, false, DualOutputMode::ValueDependent), V6_DUAL);
        assert_eq!(dual.render(true, false, DualOutputMode::ForceNormal), "::ffff:c000:201");
        assert_eq!(plain.render(true, false, DualOutputMode::ValueDependent), "::ffff:c000:201");
        assert_eq!(plain.render(true, true, DualOutputMode::ForceDual), "::FFFF:192.0.2.1");
        assert_eq!(
            dual.render(false, false, DualOutputMode::ForceDual),
            "0000:0000:0000:0000:0000:ffff:192.0.2.1"
        );

        let zeros = Address::parse_v6("::1.2.3.4").unwrap();
        assert_eq!(zeros.to_string(), "::1.2.3.4");
        let tail = Address::parse_v6("1::1.2.3.4").unwrap();
        assert_eq!(tail.to_string(), "1::1.2.3.4");
    }

    #[test]
    fn test_dual_ignored_in_eq() {
        let dual = Address::parse_v6(V6_DUAL).unwrap();
        assert_eq!(dual, dual.with_dual(false));
        assert!(Address::V4(u32::MAX) < Address::from(Ipv6Addr::UNSPECIFIED));
    }

    #[test]
    fn test_ipaddr_conversion() {
        let ip: IpAddr = V6_DOC.parse().unwrap();
        let addr = Address::from(ip);
        assert_eq!(IpAddr::from(addr), ip);
        assert_eq!(Address::V4(1).with_dual(true), Address::V4(1));
        assert!(!Address::V4(1).with_dual(true).is_dual());
    }
}
