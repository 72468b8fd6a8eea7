pub mod farmers;
pub mod health;
