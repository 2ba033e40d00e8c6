// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static SLASH: &str = "/";
pub(crate) static COLON: &str = ":";
pub(crate) static DCOLON: &str = "::";
pub(crate) static DOT: char = '.';
pub(crate) static COMMENT: char = '#';

pub(crate) static NAME_V4: &str = "IPv4";
pub(crate) static NAME_V6: &str = "IPv6";

// mod.rs
pub(crate) static ERR_UNRECOGNIZED: &str = "unrecognized IP address";
pub(crate) static ERR_PREFIX: &str = "invalid prefix";
pub(crate) static ERR_PREFIX_FMT: &str = "prefix is not an integer";
pub(crate) static ERR_NETWORK: &str = "not a network address for prefix";
pub(crate) static ERR_CIDR_FMT: &str = "invalid CIDR format (too many slashes)";
pub(crate) static ERR_LINE: &str = "line";
