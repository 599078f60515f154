//! # Identity Gateway
//!
//! A JWT-authenticated REST service for managing users, roles, and
//! permissions with flat role-based access control.
//!
//! - **Identity store**: users, roles, permissions, and their assignments
//!   persisted through SeaORM (PostgreSQL or SQLite)
//! - **Authorization engine**: effective permissions resolved through role
//!   assignments on every check, so grants and revocations apply without
//!   reissuing tokens
//! - **Access guard**: a fixed catalog mapping each management operation to
//!   the permission that protects it
//! - **Management API**: CRUD plus transactional assignment syncs over HTTP
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use identity_gateway::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::{AccessGuard, AuthSystem, AuthorizationEngine, ProtectedOperation};
pub use config::Config;
pub use core::admin::AdminService;
pub use core::models::{Page, PageRequest, Permission, Role, User};
pub use storage::Database;
pub use utils::error::{GatewayError, Result};

use tracing::info;

/// The assembled gateway: storage, auth, and the HTTP server
pub struct Gateway {
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting identity gateway");

        self.server.start().await?;

        Ok(())
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
