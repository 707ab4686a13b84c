//! Core data models for bankbook
//!
//! The ledger hierarchy (wallet holding accounts holding statements holding
//! operations) plus the pieces every level shares: the record contract, the
//! key-sorted container, money and field values. Nothing in here touches a
//! terminal or a file.

pub mod account;
pub mod container;
pub mod field;
pub mod ids;
pub mod money;
pub mod operation;
pub mod record;
pub mod statement;
pub mod wallet;

pub use account::{valid_account_name, Account};
pub use container::Container;
pub use field::{format_date, parse_date, FieldDef, FieldKind, FieldValue, DATE_FORMAT};
pub use ids::RecordId;
pub use money::Money;
pub use operation::Operation;
pub use record::{Record, SortKey};
pub use statement::Statement;
pub use wallet::Wallet;
