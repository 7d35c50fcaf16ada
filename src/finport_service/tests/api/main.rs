mod auth;
mod health;
mod helpers;
mod otp;
mod stock;
