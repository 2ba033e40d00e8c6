// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    format::FormatOptions,
    merging::merge_sweep,
    strings::*,
    structs::{AddressBlock, IpFam},
    AddressError,
};
use tracing::debug;

/// Drop everything from the first `#` onwards and trim whitespace.
pub fn strip_comment(line: &str) -> &str {
    match line.split_once(COMMENT) {
        Some((before, _)) => before.trim(),
        None => line.trim(),
    }
}

/**
Address blocks grouped by family.

Groups keep the order in which each family first appeared, and blocks keep
their insertion order within a group until [BlockGroups::merged] is called.
*/
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BlockGroups {
    groups: Vec<(IpFam, Vec<AddressBlock>)>,
}

impl BlockGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /**
    Parse input lines into grouped blocks. Blank lines and `#` comments are
    skipped.

    ### Errors
    The first line that fails to parse aborts the whole batch with
    [AddressError::Line], carrying the 1-based line number.
    */
    pub fn from_lines<I, S>(lines: I) -> Result<Self, AddressError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: BlockGroups = BlockGroups::new();
        let mut skipped: usize = 0;

        for (i, line) in lines.into_iter().enumerate() {
            let text: &str = strip_comment(line.as_ref());
            if text.is_empty() {
                skipped += 1;
                continue;
            }
            let block: AddressBlock = AddressBlock::parse(text).map_err(|e| AddressError::Line {
                line: i + 1,
                source: Box::new(e),
            })?;
            out.push(block);
        }

        debug!("parsed {} blocks, skipped {skipped} blank/comment lines", out.len());
        Ok(out)
    }

    /// Append a block to its family group, creating the group if needed.
    pub fn push(&mut self, block: AddressBlock) {
        match self.groups.iter_mut().find(|(fam, _)| *fam == block.fam()) {
            Some((_, blocks)) => blocks.push(block),
            None => self.groups.push((block.fam(), vec![block])),
        }
    }

    /// Iterate over `(family, blocks)` in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (IpFam, &[AddressBlock])> {
        self.groups.iter().map(|(fam, blocks)| (*fam, blocks.as_slice()))
    }

    /// The blocks of one family, if any were seen.
    pub fn get(&self, fam: IpFam) -> Option<&[AddressBlock]> {
        self.iter().find(|(f, _)| *f == fam).map(|(_, blocks)| blocks)
    }

    /// Total number of blocks over all families.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, blocks)| blocks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reduce every family group to its minimal set of blocks.
    pub fn merged(self) -> Self {
        let groups = self
            .groups
            .into_iter()
            .map(|(fam, blocks)| {
                debug!("merging {} {fam} blocks", blocks.len());
                (fam, merge_sweep(blocks))
            })
            .collect();
        Self { groups }
    }

    /// All blocks, family groups concatenated in order.
    pub fn into_blocks(self) -> Vec<AddressBlock> {
        self.groups.into_iter().flat_map(|(_, blocks)| blocks).collect()
    }

    /// One block per line, family groups separated by a blank line.
    pub fn render(&self, opts: &FormatOptions) -> String {
        self.groups
            .iter()
            .map(|(_, blocks)| {
                blocks
                    .iter()
                    .map(|b| b.format(opts))
                    .collect::<Vec<String>>()
                    .join("\n")
            })
            .collect::<Vec<String>>()
            .join("\n\n")
    }
}

impl FromIterator<AddressBlock> for BlockGroups {
    fn from_iter<T: IntoIterator<Item = AddressBlock>>(iter: T) -> Self {
        let mut out: BlockGroups = BlockGroups::new();
        for block in iter {
            out.push(block);
        }
        out
    }
}

/* -------------------------------------------------------------------------- */
