// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{groups::BlockGroups, structs::AddressBlock, IPV6_BITS};
use tracing::{debug, trace};

/**
Merge two blocks into one, if possible.

Returns `None` when the blocks are of different families, overlap only
partially, or are disjoint without being buddies. Otherwise, in order:
1. equal prefixes and equal addresses: the (duplicate) block
2. equal prefixes, adjacent, and the lower one is the even half of the
   one-bit-shorter parent: the parent block
3. one block contains the other: the containing block

A merged IPv6 block is dual only if both inputs were dual.
*/
pub fn merge(a: &AddressBlock, b: &AddressBlock) -> Option<AddressBlock> {
    if a.fam() != b.fam() {
        return None;
    }
    let dual: bool = a.address().is_dual() && b.address().is_dual();

    if a.prefix() == b.prefix() {
        if a.first() == b.first() {
            return Some(a.with_dual(dual));
        }

        let lower: &AddressBlock = if a.last().checked_add(1) == Some(b.first()) {
            a
        } else if b.last().checked_add(1) == Some(a.first()) {
            b
        } else {
            return None;
        };

        // only the even half of the parent may absorb its buddy
        let parent: u8 = lower.prefix().checked_sub(1)?;
        if lower.first() & host_mask_u128(lower.bits(), parent) != 0 {
            return None;
        }
        let addr = lower.address().with_dual(dual);
        return Some(AddressBlock::new_unchecked(addr, parent));
    }

    if b.contains(a) {
        return Some(b.with_dual(dual));
    }
    if a.contains(b) {
        return Some(a.with_dual(dual));
    }
    None
}

/**
Reduce a list of blocks of one address family into a minimal set.

Blocks are sorted by address and merged into a stack of output blocks. Each
incoming block is merged with the top of the stack for as long as that
succeeds, so a freshly merged block is retried against its new left
neighbor. Merges only ever widen a block by one bit at a time; wider
supernets form by cascading.
*/
pub fn merge_sweep(mut blocks: Vec<AddressBlock>) -> Vec<AddressBlock> {
    let count: usize = blocks.len();
    blocks.sort_by_key(|b| (b.fam(), b.first()));

    let mut out: Vec<AddressBlock> = Vec::with_capacity(count);
    for block in blocks {
        let mut current: AddressBlock = block;
        while let Some(merged) = out.last().and_then(|last| merge(last, &current)) {
            trace!("merged {} + {current} -> {merged}", out[out.len() - 1]);
            out.pop();
            current = merged;
        }
        out.push(current);
    }

    debug!("merge sweep: {count} blocks in, {} out", out.len());
    out
}

/**
Merge blocks of possibly mixed families. Each family is reduced on its own
and the results are concatenated in order of first appearance of the family.
*/
pub fn merge_blocks(input: &[AddressBlock]) -> Vec<AddressBlock> {
    input
        .iter()
        .copied()
        .collect::<BlockGroups>()
        .merged()
        .into_blocks()
}

/* ---------------------------------- */

/// Low `n` bits set.
#[inline]
fn ones_u128(n: u8) -> u128 {
    if n >= IPV6_BITS {
        return u128::MAX;
    }
    (1u128 << n) - 1
}

/**
Returns a u128 with the top `prefix` bits of a `bits` wide address set,
everything else zero.

bits: 32 or 128, prefix: `0..=bits`
*/
#[inline]
pub(crate) fn mask_u128(bits: u8, prefix: u8) -> u128 {
    let prefix: u8 = prefix.min(bits);
    ones_u128(bits) & !ones_u128(bits - prefix)
}

/// Complement of [mask_u128] within the address width: the host bits.
#[inline]
pub(crate) fn host_mask_u128(bits: u8, prefix: u8) -> u128 {
    ones_u128(bits - prefix.min(bits))
}

/* -------------------------------------------------------------------------- */
