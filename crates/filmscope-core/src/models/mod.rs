mod favorites;
mod movie;
mod user;

pub use favorites::{FavoriteChange, FavoriteSet};
pub use movie::Movie;
pub use user::{AuthSession, AuthUser};
