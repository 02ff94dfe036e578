//! Storage layer: the abstraction traits and the two interchangeable
//! backends (in-memory and Business Central OData).
pub mod bc;
pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{EmployeeStore, LocationStore, StoreError, TimeEntryStore};
