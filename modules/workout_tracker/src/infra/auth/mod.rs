pub mod jwt;
pub mod password;

pub use jwt::JwtCredentialService;
pub use password::Argon2PasswordHasher;
