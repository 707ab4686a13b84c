//! Storage layer for bankbook
//!
//! CSV for record lists, JSON for metadata, atomic writes throughout.
//! The domain types never touch files themselves; everything on-disk goes
//! through this module.

pub mod csv_io;
pub mod json_io;
pub mod wallet_store;

pub use csv_io::{read_rows, write_rows_atomic};
pub use json_io::{read_json, write_json_atomic};
pub use wallet_store::{
    init_wallet, load_account, load_wallet, reload_account, reload_statement, save_account,
    save_statement, save_wallet,
};
