//! Cowork Server - coworking space booking backend
//!
//! Workspaces own rooms, rooms own devices and bookings. Besides plain
//! CRUD per resource, a workspace can be created or updated together with
//! its whole room/device tree in a single transaction.
//!
//! ```text
//! cowork-server/src/
//! ├── core/          # config, state, server startup
//! ├── db/            # pool, migrations, repositories, demo seed
//! ├── services/      # nested reconciler, read projection, resource services
//! ├── api/           # HTTP routes and handlers
//! ├── middleware/    # request logging
//! └── utils/         # logger, validated JSON extractor
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod services;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use utils::{AppError, AppResult, ErrorCode};

pub use utils::logger::init_logger_with_file;
