//! Authentication module for the game backend
//!
//! This module provides authentication functionality including:
//! - JWT token issuance and verification
//! - Account registration and login
//! - The authentication gate middleware for protected routes
//! - REST API endpoints for account operations

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod service;

pub use api::{AccountApiState, account_api_router};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{AuthGateError, AuthGateState, require_auth};
pub use service::{AuthError, AuthService, JoinRequest, LoginRequest};
