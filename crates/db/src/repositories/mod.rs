//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod car_repo;
pub mod driver_repo;
pub mod manufacturer_repo;
pub mod session_repo;

pub use car_repo::CarRepo;
pub use driver_repo::DriverRepo;
pub use manufacturer_repo::ManufacturerRepo;
pub use session_repo::SessionRepo;
