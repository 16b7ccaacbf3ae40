pub mod cache;
pub mod controller;
pub mod deck;
pub mod error;
pub mod fetch;
pub mod poller;
pub mod query;
pub mod state;
pub mod upload;

// Re-export the pieces the binary and tests compose with.
pub use controller::SessionController;
pub use error::SessionError;
pub use poller::{spawn_connectivity_poller, spawn_status_poller};
pub use state::{ActiveView, QueryDisplay};
