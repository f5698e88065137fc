//! Secret generator adapters.

mod basic_auth;

pub use basic_auth::{
    BasicAuthSecrets, DEFAULT_USER, PASSWORD_FILE, PASSWORD_LEN, SECRET_FILE_MODE, USER_FILE,
    generate_password,
};
