pub mod number_registry;

pub use number_registry::{NumberRecord, NumberRegistry, NumberStatus, RegistrySummary};
