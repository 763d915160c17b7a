pub mod auth;
pub mod order;
pub mod customer;
pub mod distributor;
pub mod page;

pub use auth::{LoginRequest, RefreshRequest, Role, TokenClaims, TokenPair};
pub use customer::Customer;
pub use distributor::Distributor;
pub use order::{CustomerInfo, Location, NewOrder, Order, OrderStatus};
pub use page::{OrderFilter, Paged};
