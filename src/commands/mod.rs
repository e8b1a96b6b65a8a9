// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod investments;
pub mod goals;
pub mod dashboard;
pub mod timeline;
pub mod advisor;
pub mod badges;
pub mod profile;
pub mod insight;
pub mod exporter;
pub mod doctor;
