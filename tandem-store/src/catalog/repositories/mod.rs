mod character_repository;
mod favorite_repository;
mod planet_repository;
mod user_repository;

pub use character_repository::CharacterRepository;
pub use favorite_repository::FavoriteRepository;
pub use planet_repository::PlanetRepository;
pub use user_repository::UserRepository;
