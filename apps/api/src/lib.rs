pub mod config;
pub mod errors;
pub mod llm_client;
pub mod optimize;
pub mod routes;
pub mod shell;
pub mod state;
