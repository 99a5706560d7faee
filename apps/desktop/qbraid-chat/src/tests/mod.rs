mod error;
mod state;
