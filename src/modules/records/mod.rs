//! Record store for lost reports, found reports and match records
//!
//! Services depend on the [`RecordStore`] trait only. Production wires in
//! [`PgRecordStore`]; tests use [`MemoryRecordStore`].

#[cfg(test)]
mod memory_store;
mod postgres_store;
mod record_store;

#[cfg(test)]
pub use memory_store::MemoryRecordStore;
pub use postgres_store::PgRecordStore;
pub use record_store::RecordStore;
