// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merge IPv4/IPv6 CIDR blocks into a minimal set of covering networks.

mod iptools;

pub use iptools::*;
