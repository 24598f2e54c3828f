// Terminal front end for the registration form

pub mod check;
pub mod register;
pub mod utils;
