// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route Prefix: /api/*
// Middleware: jwt_auth_middleware injects AuthUser into request extensions
pub mod tasks; // Task CRUD and filtered search
