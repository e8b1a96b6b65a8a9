// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The derivation and projection engine: pure, synchronous functions over
//! the in-memory record set. Every caller recomputes from scratch; nothing
//! here caches or mutates shared state.

pub mod advisor;
pub mod aggregate;
pub mod badges;
pub mod projection;
pub mod recurrence;
