pub mod health;
pub mod submissions;
