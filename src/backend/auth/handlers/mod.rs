//! Authentication Handlers Module
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── login.rs     - POST /register/login/{username}
//! ├── logout.rs    - /register/logout
//! └── userinfo.rs  - GET /register/userinfo
//! ```
//!
//! Login is the only handler reachable without a token. Invalid credentials
//! return 401 with the same message whether or not the user exists.

pub mod types;

pub mod login;

pub mod logout;

pub mod userinfo;

// Re-export commonly used types
pub use types::{AuthResponse, LoginForm, UserResponse};

// Re-export handlers
pub use login::login;
pub use logout::logout;
pub use userinfo::userinfo;
