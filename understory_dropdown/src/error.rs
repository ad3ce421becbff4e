// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller errors.

use alloc::string::String;

use thiserror::Error;

/// Errors reported to callers of the dropdown API.
///
/// Redundant transitions (opening an open dropdown, closing a closed one) are
/// not errors; they are silently ignored.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DropdownError {
    /// The method name passed to [`Dropdowns::invoke`](crate::Dropdowns::invoke) does not exist.
    #[error("method {0:?} does not exist on dropdown")]
    UnknownMethod(String),

    /// A method was invoked on a trigger that has no bound dropdown.
    #[error("no dropdown is bound to this trigger")]
    NotInitialized,

    /// The trigger does not name an existing panel element.
    #[error("trigger does not name an existing panel")]
    MissingPanel,
}
