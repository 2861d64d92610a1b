pub mod quiz_log;
pub mod tab_ledger;
