pub mod memory;
pub mod product;
pub mod user;

pub use memory::InMemoryProductRepository;
pub use memory::InMemoryUserRepository;
pub use product::PostgresProductRepository;
pub use user::PostgresUserRepository;
