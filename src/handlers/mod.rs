// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT auth, /api/*)
pub mod public; // No authentication required: service info and health
pub mod protected; // JWT authentication required: task CRUD and filtered search
