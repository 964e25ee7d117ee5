//! Schema migration runner.
//!
//! Applies `*.sql` files from the configured directory in file-name order and
//! records each applied file in a ledger table. A file is applied inside one
//! transaction together with its ledger record, so a failing file leaves no
//! trace while earlier files stay applied.
//!
//! Statements are split on `;` without parsing, so a `;` inside a string
//! literal or a block comment breaks the file into invalid fragments.

/// Statement splitting.
pub mod helpers;

/// Manager, ledger record and status structures.
pub mod structs;

/// Migration operations.
pub mod impls;

#[cfg(test)]
mod tests;
