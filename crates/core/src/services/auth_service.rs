pub mod login;
pub mod logout;
pub mod register;
pub mod token;
pub mod user;
