pub mod billboards;
pub mod categories;
pub mod checkout;
pub mod colors;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod sizes;
pub mod stores;
pub mod webhook;
